//! Named parameter storage consumed by network models.
//!
//! Models only need to read typed parameters and write them back; the
//! [`Configuration`] trait captures that surface and
//! [`PropertiesConfiguration`] provides the in-memory implementation models
//! own.

use std::{collections::BTreeMap, fmt};

use crate::error::ConfigError;

/// A value stored under a configuration key.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Raw text, parsed on demand when read as a number.
    Text(String),
}

impl ParamValue {
    fn describe(&self) -> String {
        match self {
            Self::Int(value) => format!("integer {value}"),
            Self::Float(value) => format!("float {value}"),
            Self::Text(value) => format!("text {value:?}"),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

macro_rules! param_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

param_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Typed access to named parameters.
///
/// Absent keys read as `Ok(None)` so callers can fall back to their own
/// defaults. Values that cannot be read as the requested type fail with
/// [`ConfigError`].
pub trait Configuration {
    /// Reads a 32-bit integer.
    ///
    /// # Errors
    /// Returns [`ConfigError::TypeMismatch`] when the value is not an integer
    /// and [`ConfigError::OutOfRange`] when it does not fit in 32 bits.
    fn get_int(&self, key: &str) -> Result<Option<i32>, ConfigError>;

    /// Reads a 64-bit integer.
    ///
    /// # Errors
    /// Returns [`ConfigError::TypeMismatch`] when the value is not an integer.
    fn get_long(&self, key: &str) -> Result<Option<i64>, ConfigError>;

    /// Reads a floating-point number. Integers widen losslessly where
    /// possible.
    ///
    /// # Errors
    /// Returns [`ConfigError::TypeMismatch`] when the value is not numeric.
    fn get_double(&self, key: &str) -> Result<Option<f64>, ConfigError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_property(&mut self, key: &str, value: ParamValue);

    /// Reports whether `key` holds a value.
    fn contains_key(&self, key: &str) -> bool;
}

/// An ordered in-memory key-value [`Configuration`].
///
/// Text values are parsed when read, so parameters supplied as strings (for
/// example from a properties file loaded elsewhere) behave like typed ones.
///
/// # Examples
/// ```
/// use netgen_core::{Configuration, PropertiesConfiguration};
///
/// let mut config = PropertiesConfiguration::new();
/// config.set_property("numNodes", 100.into());
/// config.set_property("p", "0.25".into());
///
/// assert_eq!(config.get_int("numNodes")?, Some(100));
/// assert_eq!(config.get_double("p")?, Some(0.25));
/// assert_eq!(config.get_long("seed")?, None);
/// assert!(config.get_int("p").is_err());
/// # Ok::<(), netgen_core::ConfigError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertiesConfiguration {
    values: BTreeMap<String, ParamValue>,
}

impl PropertiesConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Reports whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builder-style variant of [`Configuration::set_property`].
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.set_property(key, value.into());
        self
    }

    fn mismatch(key: &str, expected: &'static str, found: &ParamValue) -> ConfigError {
        ConfigError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found: found.describe(),
        }
    }
}

impl Configuration for PropertiesConfiguration {
    fn get_int(&self, key: &str) -> Result<Option<i32>, ConfigError> {
        let Some(value) = self.get_long(key)? else {
            return Ok(None);
        };
        i32::try_from(value)
            .map(Some)
            .map_err(|_| ConfigError::OutOfRange {
                key: key.to_owned(),
                value,
            })
    }

    fn get_long(&self, key: &str) -> Result<Option<i64>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Int(value)) => Ok(Some(*value)),
            Some(found @ ParamValue::Text(raw)) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| Self::mismatch(key, "integer", found)),
            Some(found @ ParamValue::Float(_)) => Err(Self::mismatch(key, "integer", found)),
        }
    }

    fn get_double(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(ParamValue::Float(value)) => Ok(Some(*value)),
            Some(ParamValue::Int(value)) => Ok(Some(*value as f64)),
            Some(found @ ParamValue::Text(raw)) => raw
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| Self::mismatch(key, "float", found)),
        }
    }

    fn set_property(&mut self, key: &str, value: ParamValue) {
        self.values.insert(key.to_owned(), value);
    }

    fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ParamValue::Int(42), Some(42))]
    #[case(ParamValue::Text(" 17 ".into()), Some(17))]
    fn get_int_reads_integers_and_numeric_text(
        #[case] value: ParamValue,
        #[case] expected: Option<i32>,
    ) {
        let mut config = PropertiesConfiguration::new();
        config.set_property("k", value);
        assert_eq!(config.get_int("k"), Ok(expected));
    }

    #[rstest]
    #[case(ParamValue::Float(1.5))]
    #[case(ParamValue::Text("many".into()))]
    fn get_int_rejects_non_integers(#[case] value: ParamValue) {
        let config = PropertiesConfiguration::new().with("k", value);
        let err = config.get_int("k").expect_err("value is not an integer");
        assert_eq!(err.code(), crate::ConfigErrorCode::TypeMismatch);
    }

    #[test]
    fn get_int_rejects_values_wider_than_32_bits() {
        let config = PropertiesConfiguration::new().with("k", i64::from(i32::MAX) + 1);
        assert_eq!(
            config.get_int("k"),
            Err(ConfigError::OutOfRange {
                key: "k".into(),
                value: i64::from(i32::MAX) + 1,
            })
        );
        assert_eq!(config.get_long("k"), Ok(Some(i64::from(i32::MAX) + 1)));
    }

    #[test]
    fn get_double_widens_integers() {
        let config = PropertiesConfiguration::new().with("k", 3);
        assert_eq!(config.get_double("k"), Ok(Some(3.0)));
    }

    #[test]
    fn absent_keys_read_as_none() {
        let config = PropertiesConfiguration::new();
        assert_eq!(config.get_int("missing"), Ok(None));
        assert_eq!(config.get_long("missing"), Ok(None));
        assert_eq!(config.get_double("missing"), Ok(None));
        assert!(!config.contains_key("missing"));
    }

    #[test]
    fn set_property_replaces_previous_value() {
        let mut config = PropertiesConfiguration::new().with("k", 1);
        config.set_property("k", 2.into());
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("k"), Some(&ParamValue::Int(2)));
        assert_eq!(config.get("k").map(ToString::to_string).as_deref(), Some("2"));
    }
}
