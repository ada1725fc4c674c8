//! Built-in value parsers

use super::registry::ValueParsers;
use super::temporal;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::any::Any;
use std::fmt::{Debug, Display};
use std::str::FromStr;

pub(super) fn register_all(parsers: &mut ValueParsers) {
    parsers.register("string", |raw: &str| Ok(raw.to_string()));

    register_from_str::<i8>(parsers, "i8");
    register_from_str::<i16>(parsers, "i16");
    register_from_str::<i32>(parsers, "i32");
    register_from_str::<i64>(parsers, "i64");
    register_from_str::<i128>(parsers, "i128");
    register_from_str::<isize>(parsers, "isize");
    register_from_str::<u8>(parsers, "u8");
    register_from_str::<u16>(parsers, "u16");
    register_from_str::<u32>(parsers, "u32");
    register_from_str::<u64>(parsers, "u64");
    register_from_str::<u128>(parsers, "u128");
    register_from_str::<usize>(parsers, "usize");
    register_from_str::<f32>(parsers, "f32");
    register_from_str::<f64>(parsers, "f64");
    register_from_str::<BigInt>(parsers, "bigint");
    register_from_str::<BigDecimal>(parsers, "decimal");

    parsers.register("bool", parse_bool);
    parsers.register("char", parse_char);
    parsers.register("color", |raw: &str| {
        csscolorparser::parse(raw).map_err(|e| e.to_string())
    });

    parsers.register("duration", temporal::parse_duration);
    parsers.register("period", temporal::parse_period);
    parsers.register("instant", temporal::parse_instant);
    parsers.register("date", temporal::parse_date);
    parsers.register("datetime", temporal::parse_date_time);
    parsers.register("time", temporal::parse_time);
    parsers.register("month_day", temporal::parse_month_day);
    parsers.register("year", temporal::parse_year);
    parsers.register("year_month", temporal::parse_year_month);
    parsers.register("offset_datetime", temporal::parse_offset_date_time);
    parsers.register("offset_time", temporal::parse_offset_time);
    parsers.register("zoned_datetime", temporal::parse_zoned_date_time);
    parsers.register("zone", temporal::parse_zone);
    parsers.register("zone_offset", temporal::parse_zone_offset);
}

fn register_from_str<T>(parsers: &mut ValueParsers, type_id: &str)
where
    T: FromStr + Any + Debug + Send + Sync,
    T::Err: Display,
{
    parsers.register(type_id, |raw: &str| {
        raw.parse::<T>().map_err(|e| e.to_string())
    });
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected true or false".to_string())
    }
}

fn parse_char(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err("expected exactly one character".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Scalar;
    use crate::schema::ValueType;
    use test_case::test_case;

    fn parse(type_id: &str, raw: &str) -> Result<Scalar, String> {
        let value_type = ValueType::named(type_id);
        ValueParsers::builtin()
            .resolve(&value_type)
            .unwrap_or_else(|| panic!("no parser for {type_id}"))
            .parse(raw)
    }

    #[test_case("true", true ; "lower")]
    #[test_case("TRUE", true ; "upper")]
    #[test_case("False", false ; "mixed")]
    fn test_bool(raw: &str, expected: bool) {
        assert_eq!(parse("bool", raw).unwrap().downcast_ref::<bool>(), Some(&expected));
    }

    #[test_case("yes" ; "yes")]
    #[test_case("1" ; "digit")]
    #[test_case("" ; "empty")]
    fn test_bool_rejects_other_words(raw: &str) {
        assert!(parse("bool", raw).is_err());
    }

    #[test]
    fn test_char_requires_exactly_one_code_point() {
        assert_eq!(parse("char", "x").unwrap().downcast_ref::<char>(), Some(&'x'));
        assert_eq!(parse("char", "é").unwrap().downcast_ref::<char>(), Some(&'é'));
        assert!(parse("char", "").is_err());
        assert!(parse("char", "xy").is_err());
    }

    #[test_case("red", [255, 0, 0, 255] ; "css name")]
    #[test_case("#00ff00", [0, 255, 0, 255] ; "hex")]
    #[test_case("#00f", [0, 0, 255, 255] ; "short hex")]
    #[test_case("rgba(255, 255, 255, 0)", [255, 255, 255, 0] ; "rgba function")]
    fn test_color(raw: &str, expected: [u8; 4]) {
        let scalar = parse("color", raw).unwrap();
        let color = scalar.downcast_ref::<csscolorparser::Color>().unwrap();
        assert_eq!(color.to_rgba8(), expected);
    }

    #[test]
    fn test_color_rejects_unknown_name() {
        assert!(parse("color", "not-a-colour").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("i32", "-42").unwrap().downcast_ref::<i32>(), Some(&-42));
        assert_eq!(parse("u8", "255").unwrap().downcast_ref::<u8>(), Some(&255));
        assert!(parse("u8", "256").is_err());
        assert_eq!(parse("f64", "1.5").unwrap().downcast_ref::<f64>(), Some(&1.5));
        assert_eq!(
            parse("bigint", "123456789012345678901234567890")
                .unwrap()
                .downcast_ref::<BigInt>()
                .map(ToString::to_string)
                .as_deref(),
            Some("123456789012345678901234567890")
        );
        assert!(parse("decimal", "3.14159265358979323846").is_ok());
    }

    #[test]
    fn test_number_error_is_parser_message() {
        let err = parse("i64", "twelve").unwrap_err();
        assert_eq!(err, "invalid digit found in string");
    }

    #[test]
    fn test_string_is_verbatim() {
        let scalar = parse("string", "  padded  ").unwrap();
        assert_eq!(scalar.downcast_ref::<String>().unwrap(), "  padded  ");
    }

    #[test]
    fn test_temporal_types_registered() {
        assert!(parse("duration", "PT15M").is_ok());
        assert!(parse("period", "P1Y").is_ok());
        assert!(parse("instant", "2007-12-03T10:15:30Z").is_ok());
        assert!(parse("date", "2007-12-03").is_ok());
        assert!(parse("datetime", "2007-12-03T10:15:30").is_ok());
        assert!(parse("time", "10:15").is_ok());
        assert!(parse("month_day", "--12-03").is_ok());
        assert!(parse("year", "2007").is_ok());
        assert!(parse("year_month", "2007-12").is_ok());
        assert!(parse("offset_datetime", "2007-12-03T10:15:30+01:00").is_ok());
        assert!(parse("offset_time", "10:15:30+01:00").is_ok());
        assert!(parse("zoned_datetime", "2007-12-03T10:15:30+01:00[Europe/Paris]").is_ok());
        assert!(parse("zone", "Europe/Paris").is_ok());
        assert!(parse("zone_offset", "+01:00").is_ok());
    }
}
