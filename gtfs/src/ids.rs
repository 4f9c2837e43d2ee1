use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(x: S) -> Self {
                Self(x.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(x: &str) -> Self {
                Self(x.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                d.deserialize_any(CoerceToString).map(Self)
            }
        }
    };
}

string_id!(RouteID);
string_id!(StopID);
string_id!(DirectionID);

impl DirectionID {
    /// GTFS only has two travel directions per route.
    pub fn both() -> [DirectionID; 2] {
        [DirectionID::from("0"), DirectionID::from("1")]
    }
}

/// Feeds and hand-built indices disagree about whether IDs are strings or numbers. Everything is
/// compared as a string, so this is the one place numbers get turned into strings.
struct CoerceToString;

impl<'de> Visitor<'de> for CoerceToString {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a string or numeric ID")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(coerce_f64(v))
    }
}

/// 100223.0 should match "100223", not "100223.0"
pub(crate) fn coerce_f64(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Coerce an arbitrary JSON value into an ID string, if it looks like one. Used where the input
/// is loosely typed GeoJSON rather than a schema we control.
pub fn id_from_json(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(x) => Some(x.trim().to_string()),
        serde_json::Value::Number(n) => {
            if let Some(x) = n.as_i64() {
                Some(x.to_string())
            } else if let Some(x) = n.as_u64() {
                Some(x.to_string())
            } else {
                n.as_f64().map(coerce_f64)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_strings_are_the_same_id() {
        let from_str: RouteID = serde_json::from_str("\"100223\"").unwrap();
        let from_int: RouteID = serde_json::from_str("100223").unwrap();
        let from_float: RouteID = serde_json::from_str("100223.0").unwrap();
        assert_eq!(from_str, from_int);
        assert_eq!(from_str, from_float);
        assert_eq!(from_str.as_str(), "100223");
    }

    #[test]
    fn direction_ids() {
        let d: DirectionID = serde_json::from_str("1").unwrap();
        assert_eq!(d, DirectionID::both()[1]);
        assert!(serde_json::from_str::<DirectionID>("[1]").is_err());
    }

    #[test]
    fn loose_json_ids() {
        assert_eq!(
            id_from_json(&serde_json::json!(" 100254 ")),
            Some("100254".to_string())
        );
        assert_eq!(
            id_from_json(&serde_json::json!(100254)),
            Some("100254".to_string())
        );
        assert_eq!(id_from_json(&serde_json::json!(true)), None);
    }
}
