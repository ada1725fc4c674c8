//! Integration tests for binding schemas against in-memory stores

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use confbind::binding::{bind, Binder, BoundConfig, Scalar, Value};
use confbind::domain::{ConfigurationError, Path, Result, StoreError};
use confbind::parser::{EnumVariant, ValueParsers, YearMonth};
use confbind::schema::{ItemKind, Schema, ValueType};
use confbind::store::{JsonStore, PropertiesStore, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn string() -> ValueType {
    ValueType::named("string")
}

fn int() -> ValueType {
    ValueType::named("i32")
}

fn bind_pairs(schema: &Schema, pairs: &[(&str, &str)]) -> Result<BoundConfig> {
    Binder::new(schema).bind(&PropertiesStore::from_pairs(pairs.iter().copied()))
}

/// Counts lookups and fails on a configured path
struct RecordingStore {
    inner: PropertiesStore,
    lookups: AtomicUsize,
    broken: Option<String>,
}

impl RecordingStore {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            inner: PropertiesStore::from_pairs(pairs.iter().copied()),
            lookups: AtomicUsize::new(0),
            broken: None,
        }
    }
}

impl Store for RecordingStore {
    fn get(&self, path: &Path) -> std::result::Result<Option<String>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.broken.as_deref() == Some(path.render().as_str()) {
            return Err(StoreError::Backend("connection reset".to_string()));
        }
        self.inner.get(path)
    }
}

#[test]
fn test_enum_options_bind_by_variant_name() {
    let level = || ValueType::enumeration("Level", ["ONE", "TWO", "THREE"]);
    let schema = Schema::builder()
        .scalar("first", level())
        .optional("second", level())
        .list("all", ItemKind::Scalar(level()))
        .build()
        .unwrap();

    let config = bind_pairs(
        &schema,
        &[("first", "THREE"), ("all.0", "ONE"), ("all.1", "TWO")],
    )
    .unwrap();

    let first = config.value::<EnumVariant>("first").unwrap();
    assert_eq!(first.name, "THREE");
    assert_eq!(first.ordinal, 2);
    assert_eq!(config.optional::<EnumVariant>("second").unwrap(), None);
    let all: Vec<usize> = config
        .list("all")
        .unwrap()
        .iter()
        .filter_map(|item| item.downcast::<EnumVariant>())
        .map(|variant| variant.ordinal)
        .collect();
    assert_eq!(all, vec![0, 1]);

    let err = bind_pairs(&schema, &[("first", "four")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Can not parse 'four' as enum Level: expected one of ONE, TWO, THREE in first"
    );
}

#[test]
fn test_custom_parser_replaces_enum_lookup() {
    let schema = Schema::builder()
        .scalar("level", ValueType::enumeration("Level", ["ONE", "TWO"]))
        .build()
        .unwrap();

    let config = Binder::new(&schema)
        .with_value_parser("Level", |raw: &str| match raw {
            "1" => Ok("ONE"),
            "2" => Ok("TWO"),
            other => Err(format!("no level numbered {other}")),
        })
        .bind(&PropertiesStore::from_pairs([("level", "2")]))
        .unwrap();
    assert_eq!(*config.value::<&str>("level").unwrap(), "TWO");
}

#[test]
fn test_standard_value_types() {
    let schema = Schema::builder()
        .scalar("byte", ValueType::named("i8"))
        .scalar("long", ValueType::named("i64"))
        .scalar("unsigned", ValueType::named("u64"))
        .scalar("float", ValueType::named("f32"))
        .scalar("double", ValueType::named("f64"))
        .scalar("truth", ValueType::named("bool"))
        .scalar("letter", ValueType::named("char"))
        .scalar("text", string())
        .scalar("color", ValueType::named("color"))
        .optional("webColor", ValueType::named("color"))
        .build()
        .unwrap();

    let config = bind_pairs(
        &schema,
        &[
            ("byte", "-12"),
            ("long", "9000000000"),
            ("unsigned", "18446744073709551615"),
            ("float", "1.5"),
            ("double", "-2.25e3"),
            ("truth", "false"),
            ("letter", "x"),
            ("text", "  keeps whitespace "),
            ("color", "#ff8000"),
            ("webColor", "cornflowerblue"),
        ],
    )
    .unwrap();

    assert_eq!(*config.value::<i8>("byte").unwrap(), -12);
    assert_eq!(*config.value::<i64>("long").unwrap(), 9_000_000_000);
    assert_eq!(*config.value::<u64>("unsigned").unwrap(), u64::MAX);
    assert_eq!(*config.value::<f32>("float").unwrap(), 1.5);
    assert_eq!(*config.value::<f64>("double").unwrap(), -2250.0);
    assert!(!*config.value::<bool>("truth").unwrap());
    assert_eq!(*config.value::<char>("letter").unwrap(), 'x');
    assert_eq!(config.value::<String>("text").unwrap(), "  keeps whitespace ");
    assert_eq!(
        config.value::<csscolorparser::Color>("color").unwrap().to_rgba8(),
        [255, 128, 0, 255]
    );
    assert_eq!(
        config
            .optional::<csscolorparser::Color>("webColor")
            .unwrap()
            .map(|color| color.to_rgba8()),
        Some([100, 149, 237, 255])
    );
}

#[test]
fn test_date_and_time_types() {
    let schema = Schema::builder()
        .scalar("date", ValueType::named("date"))
        .scalar("time", ValueType::named("time"))
        .scalar("dateTime", ValueType::named("datetime"))
        .scalar("duration", ValueType::named("duration"))
        .scalar("yearMonth", ValueType::named("year_month"))
        .build()
        .unwrap();

    let config = bind_pairs(
        &schema,
        &[
            ("date", "2016-02-29"),
            ("time", "13:45:30"),
            ("dateTime", "2016-02-29T13:45:30"),
            ("duration", "PT1H30M"),
            ("yearMonth", "2016-02"),
        ],
    )
    .unwrap();

    let date = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
    let time = NaiveTime::from_hms_opt(13, 45, 30).unwrap();
    assert_eq!(*config.value::<NaiveDate>("date").unwrap(), date);
    assert_eq!(*config.value::<NaiveTime>("time").unwrap(), time);
    assert_eq!(
        *config.value::<NaiveDateTime>("dateTime").unwrap(),
        date.and_time(time)
    );
    assert_eq!(
        *config.value::<TimeDelta>("duration").unwrap(),
        TimeDelta::try_minutes(90).unwrap()
    );
    let year_month = config.value::<YearMonth>("yearMonth").unwrap();
    assert_eq!((year_month.year, year_month.month), (2016, 2));
}

#[test]
fn test_parse_failure_names_type_and_path() {
    let inner = Schema::builder().scalar("count", int()).build().unwrap();
    let schema = Schema::builder().nested("outer", inner).build().unwrap();

    let err = bind_pairs(&schema, &[("outer.count", "many")]).unwrap_err();
    assert!(matches!(err, ConfigurationError::TypeParse { .. }));
    assert_eq!(err.path().map(Path::render).as_deref(), Some("outer.count"));
    let message = err.to_string();
    assert!(message.starts_with("Can not parse 'many' as i32: "), "{message}");
    assert!(message.ends_with(" in outer.count"), "{message}");
}

#[test]
fn test_invalid_default_is_a_parse_error() {
    let schema = Schema::builder()
        .with_default("port", ValueType::named("u16"), "eighty")
        .build()
        .unwrap();
    let err = bind_pairs(&schema, &[]).unwrap_err();
    assert!(matches!(err, ConfigurationError::TypeParse { .. }));

    // a stored value never consults the default
    let config = bind_pairs(&schema, &[("port", "80")]).unwrap();
    assert_eq!(*config.value::<u16>("port").unwrap(), 80);
}

#[test]
fn test_unknown_type_fails_before_any_lookup() {
    let schema = Schema::builder()
        .scalar("name", string())
        .list("weird", ItemKind::Scalar(ValueType::named("Unregistered")))
        .build()
        .unwrap();
    let store = RecordingStore::new(&[("name", "x")]);

    let err = bind(&schema, &store, ValueParsers::builtin()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No value parser registered for type Unregistered in weird"
    );
    assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_nested_missing_value_reports_full_path() {
    let third = Schema::builder().scalar("opt", string()).build().unwrap();
    let second = Schema::builder()
        .list("third", ItemKind::Nested(third))
        .build()
        .unwrap();
    let schema = Schema::builder()
        .nested("top", Schema::builder().nested("second", second).build().unwrap())
        .scalar("after", string())
        .build()
        .unwrap();

    let err = bind_pairs(&schema, &[("top.second.third.0.opt", "x")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No value provided for mandatory option after in after"
    );

    let config = bind_pairs(
        &schema,
        &[("top.second.third.0.opt", "x"), ("after", "y")],
    )
    .unwrap();
    let third = config
        .nested("top")
        .and_then(|top| top.nested("second"))
        .and_then(|second| second.list("third"))
        .unwrap();
    assert_eq!(third.len(), 1);
    let item = third[0].as_nested().unwrap();
    assert_eq!(item.path().map(Path::render).as_deref(), Some("top.second.third[0]"));
}

#[test]
fn test_list_ends_at_first_hole() {
    let schema = Schema::builder()
        .list("numbers", ItemKind::Scalar(int()))
        .build()
        .unwrap();
    let config = bind_pairs(
        &schema,
        &[("numbers.0", "1"), ("numbers.1", "2"), ("numbers.3", "4")],
    )
    .unwrap();
    let numbers: Vec<i32> = config
        .list("numbers")
        .unwrap()
        .iter()
        .filter_map(|item| item.downcast::<i32>().copied())
        .collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn test_list_item_parse_error_propagates() {
    let schema = Schema::builder()
        .list("numbers", ItemKind::Scalar(int()))
        .build()
        .unwrap();
    let err = bind_pairs(&schema, &[("numbers.0", "1"), ("numbers.1", "two")]).unwrap_err();
    assert_eq!(err.path().map(Path::render).as_deref(), Some("numbers[1]"));
}

#[test]
fn test_nested_list_ends_at_incomplete_item() {
    let server = Schema::builder()
        .scalar("host", string())
        .with_default("port", ValueType::named("u16"), "80")
        .build()
        .unwrap();
    let schema = Schema::builder()
        .list("servers", ItemKind::Nested(server))
        .build()
        .unwrap();

    let config = bind_pairs(
        &schema,
        &[
            ("servers.0.host", "a"),
            ("servers.1.port", "81"),
            ("servers.2.host", "c"),
        ],
    )
    .unwrap();
    let servers = config.list("servers").unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(
        servers[0].as_nested().unwrap().value::<String>("host").unwrap(),
        "a"
    );
}

#[test]
fn test_store_failure_is_not_a_list_terminator() {
    let schema = Schema::builder()
        .list("tags", ItemKind::Scalar(string()))
        .build()
        .unwrap();
    let mut store = RecordingStore::new(&[("tags.0", "a")]);
    store.broken = Some("tags[1]".to_string());

    let err = bind(&schema, &store, ValueParsers::builtin()).unwrap_err();
    assert!(matches!(err, ConfigurationError::Store { .. }));
    assert_eq!(err.to_string(), "connection reset in tags[1]");
}

#[test]
fn test_leaf_where_object_expected() {
    let inner = Schema::builder().scalar("host", string()).build().unwrap();
    let schema = Schema::builder()
        .list("servers", ItemKind::Nested(inner))
        .build()
        .unwrap();
    let store = JsonStore::parse(r#"{"servers": ["not an object"]}"#).unwrap();

    let err = Binder::new(&schema).bind(&store).unwrap_err();
    assert!(matches!(err, ConfigurationError::NotAnObject { .. }));
    assert_eq!(err.path().map(Path::render).as_deref(), Some("servers[0].host"));
}

#[test]
fn test_derived_options() {
    let schema = Schema::builder()
        .scalar("someNumber", int())
        .scalar("someThing", string())
        .derive("whatDoWeHave", |config: &BoundConfig| {
            Ok(format!(
                "{} {}",
                config.value::<i32>("someNumber")?,
                config.value::<String>("someThing")?
            ))
        })
        .derive("tripled", |config: &BoundConfig| {
            Ok(config.value::<i32>("someNumber")? * 3)
        })
        .build()
        .unwrap();

    let config = bind_pairs(&schema, &[("someNumber", "5"), ("someThing", "frogs")]).unwrap();
    assert_eq!(config.derived::<String>("whatDoWeHave").unwrap(), "5 frogs");
    assert_eq!(config.derived::<i32>("tripled").unwrap(), 15);
    assert!(config.has_derived("tripled"));
    assert!(config.derive("missing").is_err());

    let names: Vec<&str> = config.derived_names().collect();
    assert_eq!(names, vec!["tripled", "whatDoWeHave"]);
}

#[test]
fn test_derived_options_on_nested_levels() {
    let range = Schema::builder()
        .scalar("low", int())
        .scalar("high", int())
        .derive("width", |config: &BoundConfig| {
            Ok(config.value::<i32>("high")? - config.value::<i32>("low")?)
        })
        .build()
        .unwrap();
    let schema = Schema::builder()
        .list("ranges", ItemKind::Nested(range))
        .derive_value("count", |config: &BoundConfig| {
            Ok(Value::Scalar(Scalar::new(config.list("ranges")?.len() as i64)))
        })
        .build()
        .unwrap();

    let config = bind_pairs(
        &schema,
        &[
            ("ranges.0.low", "1"),
            ("ranges.0.high", "4"),
            ("ranges.1.low", "10"),
            ("ranges.1.high", "20"),
        ],
    )
    .unwrap();

    let widths: Vec<i32> = config
        .list("ranges")
        .unwrap()
        .iter()
        .filter_map(Value::as_nested)
        .map(|range| range.derived::<i32>("width").unwrap())
        .collect();
    assert_eq!(widths, vec![3, 10]);
    assert_eq!(config.derived::<i64>("count").unwrap(), 2);
}

#[test]
fn test_bound_config_is_shared_across_threads() {
    let schema = Schema::builder()
        .scalar("name", string())
        .build()
        .unwrap();
    let config = Arc::new(bind_pairs(&schema, &[("name", "shared")]).unwrap());

    thread::scope(|scope| {
        for _ in 0..4 {
            let config = Arc::clone(&config);
            scope.spawn(move || {
                assert_eq!(config.value::<String>("name").unwrap(), "shared");
            });
        }
    });
}

#[test]
fn test_access_errors() {
    let schema = Schema::builder()
        .scalar("count", int())
        .optional("label", string())
        .build()
        .unwrap();
    let config = bind_pairs(&schema, &[("count", "3")]).unwrap();

    assert!(matches!(
        config.value::<String>("count"),
        Err(ConfigurationError::Access(_))
    ));
    assert!(matches!(
        config.value::<i32>("nothing"),
        Err(ConfigurationError::Access(_))
    ));
    assert!(config.nested("count").is_err());
    assert_eq!(config.optional::<String>("label").unwrap(), None);
}
