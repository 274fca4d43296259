// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Typed query-parameter values and their canonical encoding
//!
//! Every supported type converts into a [`QueryValue`]; wrapping it in
//! `Option` makes it nullable, and `None` means the parameter is left out.
//! Encodings never depend on locale: floats use `.` and the shortest text
//! that parses back to the same value.

use std::fmt;

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// A query-parameter value tagged with its source type
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Bool(bool),
    Int(i32),
    UInt(u32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
}

impl QueryValue {
    /// Canonical string form sent on the wire
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::UInt(n) => write!(f, "{}", n),
            QueryValue::Long(n) => write!(f, "{}", n),
            QueryValue::Float(n) => write!(f, "{}", n),
            QueryValue::Double(n) => write!(f, "{}", n),
            QueryValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

/// Anything that can be passed to `add_query_parameter`.
///
/// Plain values always yield a parameter, `Option`s only when `Some`.
pub trait IntoQueryValue {
    fn into_query_value(self) -> Option<QueryValue>;
}

macro_rules! query_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::$variant(value)
                }
            }

            impl IntoQueryValue for $ty {
                fn into_query_value(self) -> Option<QueryValue> {
                    Some(QueryValue::$variant(self))
                }
            }

            impl IntoQueryValue for Option<$ty> {
                fn into_query_value(self) -> Option<QueryValue> {
                    self.map(QueryValue::$variant)
                }
            }
        )*
    };
}

query_value! {
    String => Str,
    bool => Bool,
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl IntoQueryValue for &str {
    fn into_query_value(self) -> Option<QueryValue> {
        Some(QueryValue::from(self))
    }
}

impl IntoQueryValue for Option<&str> {
    fn into_query_value(self) -> Option<QueryValue> {
        self.map(QueryValue::from)
    }
}

impl IntoQueryValue for QueryValue {
    fn into_query_value(self) -> Option<QueryValue> {
        Some(self)
    }
}

/// Insertion-ordered query parameters; re-adding a name replaces its value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParameters {
    pairs: Vec<(String, String)>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. Absent values leave the parameters untouched.
    pub fn insert(&mut self, key: &str, value: impl IntoQueryValue) -> Result<()> {
        if key.is_empty() {
            return Err(Error::validation("query parameter name must not be empty"));
        }
        let Some(value) = value.into_query_value() else {
            return Ok(());
        };
        let encoded = value.encode();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = encoded,
            None => self.pairs.push((key.to_string(), encoded)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_canonical_encoding() {
        assert_eq!(QueryValue::from(true).encode(), "true");
        assert_eq!(QueryValue::from(false).encode(), "false");
        assert_eq!(QueryValue::from(-42i32).encode(), "-42");
        assert_eq!(QueryValue::from(u32::MAX).encode(), "4294967295");
        assert_eq!(QueryValue::from(i64::MIN).encode(), "-9223372036854775808");
        assert_eq!(QueryValue::from(3.14f64).encode(), "3.14");
        assert_eq!(QueryValue::from(0.1f32).encode(), "0.1");
        assert_eq!(QueryValue::from(2.0f64).encode(), "2");
        assert_eq!(
            QueryValue::from(Decimal::from_str("10.50").unwrap()).encode(),
            "10.50"
        );
        assert_eq!(QueryValue::from("a b").encode(), "a b");
    }

    #[test]
    fn test_float_round_trip() {
        for value in [3.14f64, 0.1, -2.5e-8, 1e21, f64::MAX, f64::MIN_POSITIVE] {
            let encoded = QueryValue::from(value).encode();
            assert_eq!(encoded.parse::<f64>().unwrap(), value, "{}", encoded);
        }
        for value in [3.14f32, 0.1, f32::MAX] {
            let encoded = QueryValue::from(value).encode();
            assert_eq!(encoded.parse::<f32>().unwrap(), value, "{}", encoded);
        }
        let decimal = Decimal::from_str("-1234.000567").unwrap();
        let encoded = QueryValue::from(decimal).encode();
        assert_eq!(Decimal::from_str(&encoded).unwrap(), decimal);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let mut params = QueryParameters::new();
        params.insert("flag", None::<bool>).unwrap();
        params.insert("count", None::<i32>).unwrap();
        params.insert("size", None::<u32>).unwrap();
        params.insert("ratio", None::<f64>).unwrap();
        params.insert("scale", None::<f32>).unwrap();
        params.insert("price", None::<Decimal>).unwrap();
        params.insert("id", None::<i64>).unwrap();
        params.insert("name", None::<&str>).unwrap();
        assert!(params.is_empty());

        params.insert("count", Some(7)).unwrap();
        assert_eq!(params.get("count"), Some("7"));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut params = QueryParameters::new();
        params.insert("a", 1).unwrap();
        params.insert("b", 2).unwrap();
        params.insert("a", 3).unwrap();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut params = QueryParameters::new();
        assert!(params.insert("", "x").unwrap_err().is_validation());
        assert!(params.insert("", None::<i32>).unwrap_err().is_validation());
    }
}
