use regex::Regex;
use std::collections::BTreeMap;

use super::{ErrorKind, FieldError, Result, ResultExt};

/// How a named format checks a value
#[derive(Debug, Clone)]
enum Format {
    /// Decimal string that fits in an i64
    Int64,
    /// Arbitrary regex
    Pattern(Regex),
}

impl Format {
    fn matches(&self, value: &str) -> bool {
        match self {
            Format::Int64 => value.parse::<i64>().is_ok(),
            Format::Pattern(re) => re.is_match(value),
        }
    }
}

/// Registry of named string formats
///
/// Models look formats up by name when checking string fields.
/// The default registry knows `int64`, `uuid`, `hostname` and `ipv4`.
#[derive(Debug, Clone)]
pub struct Formats {
    formats: BTreeMap<String, Format>,
}

impl Default for Formats {
    fn default() -> Self {
        let mut formats = BTreeMap::new();
        formats.insert("int64".to_string(), Format::Int64);
        // constant patterns, covered by tests below
        let builtins = vec![
            ("uuid", r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"),
            ("hostname", r"^(([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9])$"),
            ("ipv4", r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$"),
        ];
        for (name, pattern) in builtins {
            formats.insert(name.to_string(), Format::Pattern(Regex::new(pattern).unwrap()));
        }
        Formats { formats }
    }
}

impl Formats {
    /// A registry without any formats
    pub fn empty() -> Self {
        Formats { formats: BTreeMap::new() }
    }

    /// Register (or replace) a regex backed format
    pub fn register(&mut self, name: &str, pattern: &str) -> Result<()> {
        let re = Regex::new(pattern).chain_err(|| ErrorKind::InvalidFormat(name.to_string()))?;
        debug!("registered format {}", name);
        self.formats.insert(name.to_string(), Format::Pattern(re));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Names of all registered formats, sorted
    pub fn names(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).collect()
    }

    /// Check `value` against format `name`
    ///
    /// Returns the failure for field `path`, if any. An unregistered format is a failure.
    pub fn check(&self, name: &str, path: &str, value: &str) -> Option<FieldError> {
        match self.formats.get(name) {
            None => {
                warn!("format {} is not registered, cannot check {}", name, path);
                Some(FieldError::new(path, format!("has unknown format {}", name)))
            }
            Some(f) if f.matches(value) => None,
            Some(_) => Some(FieldError::new(path, format!("must be of type {}: \"{}\"", name, value))),
        }
    }
}
