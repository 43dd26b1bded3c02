//! # Core

use serde::{Deserialize, Serialize};

/// `Kind` allows serde to serialize/deserialize a string or an object.
///
/// DID documents use this shape for verification relationships, where an
/// entry is either a reference (the id of a verification method) or an
/// embedded verification method.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Kind<T> {
    /// Simple string value
    String(String),

    /// Complex object value
    Object(T),
}

impl<T: Default> Default for Kind<T> {
    fn default() -> Self {
        Self::String(String::new())
    }
}

impl<T> Kind<T> {
    /// Returns `true` if the `Kind` is a string.
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if the `Kind` is an object.
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// The string value, if any.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Object(_) => None,
        }
    }

    /// The object value, if any.
    pub const fn as_object(&self) -> Option<&T> {
        match self {
            Self::String(_) => None,
            Self::Object(o) => Some(o),
        }
    }
}

impl<T> From<String> for Kind<T> {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T> From<&str> for Kind<T> {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

#[cfg(test)]
mod test {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn string_or_object() {
        let kinds: Vec<Kind<Value>> =
            serde_json::from_value(json!(["did:tz:abc#key", {"id": "did:tz:abc#other"}]))
                .expect("should deserialize");

        assert!(kinds[0].is_string());
        assert_eq!(kinds[0].as_string(), Some("did:tz:abc#key"));
        assert!(kinds[1].is_object());
        assert_eq!(kinds[1].as_object(), Some(&json!({"id": "did:tz:abc#other"})));
    }
}
