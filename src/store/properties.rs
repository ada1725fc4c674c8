//! Flat key-value store
//!
//! Keys are the dotted rendering of a path with list indices as segments, e.g.
//! `servers.1.port`. Sources use the `.properties` format: `key=value`,
//! `key: value` or `key value` lines, `#`/`!` comments, backslash line
//! continuations and escapes.

use super::traits::Store;
use crate::domain::{Path, StoreError};
use std::collections::HashMap;
use std::fs;

/// A store backed by a flat map of dotted keys
#[derive(Debug, Clone, Default)]
pub struct PropertiesStore {
    values: HashMap<String, String>,
}

impl PropertiesStore {
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Builds a store from key-value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Parses `.properties` text
    pub fn parse(source: &str) -> Result<Self, StoreError> {
        let mut values = HashMap::new();
        for (number, line) in logical_lines(source) {
            let (key, value) = split_entry(&line);
            let key = unescape(key).map_err(|e| {
                StoreError::malformed("properties", format!("line {number}: {e}"))
            })?;
            let value = unescape(value).map_err(|e| {
                StoreError::malformed("properties", format!("line {number}: {e}"))
            })?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Reads and parses a `.properties` file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&source)?;
        tracing::debug!(path = %path.display(), keys = store.len(), "Loaded properties store");
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Store for PropertiesStore {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(&path.to_flat_key()).cloned())
    }
}

/// Joins continuation lines and drops blanks and comments, keeping the
/// 1-based number of each logical line's first physical line
fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for (index, physical) in source.lines().enumerate() {
        let trimmed = physical.trim_start();
        let (number, mut logical) = match current.take() {
            Some(pending) => pending,
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                (index + 1, String::new())
            }
        };

        if ends_with_continuation(trimmed) {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some((number, logical));
        } else {
            logical.push_str(trimmed);
            lines.push((number, logical));
        }
    }
    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

fn ends_with_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..index], line[index + 1..].trim_start()),
            c if c.is_whitespace() => {
                let rest = line[index..].trim_start();
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .map(str::trim_start)
                    .unwrap_or(rest);
                return (&line[..index], rest);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .ok_or_else(|| format!("malformed \\u escape '\\u{hex}'"))?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_key_lookup() {
        let store = PropertiesStore::from_pairs([("top.second.2.opt", "x")]);
        let path = Path::root("top").indexed_child("second", 2).child("opt");
        assert_eq!(store.get(&path).unwrap().as_deref(), Some("x"));
        assert_eq!(store.get(&Path::root("top")).unwrap(), None);
    }

    #[test]
    fn test_parse_separators_and_comments() {
        let store = PropertiesStore::parse(
            "# comment\n! also comment\n\na=1\nb : 2\nc 3\n  d=  padded value\ne\n",
        )
        .unwrap();
        let get = |key: &str| store.get(&Path::root(key)).unwrap();
        assert_eq!(get("a").as_deref(), Some("1"));
        assert_eq!(get("b").as_deref(), Some("2"));
        assert_eq!(get("c").as_deref(), Some("3"));
        assert_eq!(get("d").as_deref(), Some("padded value"));
        assert_eq!(get("e").as_deref(), Some(""));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_parse_continuations_and_escapes() {
        let store = PropertiesStore::parse(
            "list = one, \\\n       two\nkey\\ with\\ spaces = tab\\there\nunicode = caf\\u00e9\n",
        )
        .unwrap();
        let get = |key: &str| store.get(&Path::root(key)).unwrap();
        assert_eq!(get("list").as_deref(), Some("one, two"));
        assert_eq!(get("key with spaces").as_deref(), Some("tab\there"));
        assert_eq!(get("unicode").as_deref(), Some("café"));
    }

    #[test]
    fn test_parse_rejects_bad_unicode_escape() {
        let err = PropertiesStore::parse("a = \\uZZ\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PropertiesStore::load("/nonexistent/app.properties").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
