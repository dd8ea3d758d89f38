//! JSON rendering of intercepted values.
//!
//! Every value that ends up in a log line goes through [`ToJson`], an
//! object-safe view over `serde::Serialize`. Arguments of different types can
//! then sit side by side in one argument list.

use serde::Serialize;
use thiserror::Error;

/// Placeholder written in place of a value that could not be serialized.
pub const UNSERIALIZABLE: &str = "[Unable to serialize to JSON]";

/// Errors raised while rendering a value for a log line.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to serialize value to JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Object-safe JSON serialization.
///
/// Values are written straight to text, so struct fields keep their declared
/// order and 128-bit integers render as plain numbers.
pub trait ToJson {
    fn to_json_text(&self) -> Result<String, serde_json::Error>;
}

impl<T: Serialize + ?Sized> ToJson for T {
    fn to_json_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Render a value as compact JSON text.
pub fn to_json_string(value: &dyn ToJson) -> Result<String, LogError> {
    Ok(value.to_json_text()?)
}

/// Render a value as compact JSON text, falling back to [`UNSERIALIZABLE`].
pub fn to_json_or_marker(value: &dyn ToJson) -> String {
    match to_json_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "Value could not be rendered for logging");
            UNSERIALIZABLE.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Opaque;
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        tags: Vec<String>,
        score: Option<u32>,
    }

    fn sample() -> Sample {
        Sample {
            name: "ada".into(),
            tags: vec!["a".into(), "b".into()],
            score: Some(7),
        }
    }

    #[test]
    fn test_round_trip_struct() {
        let json = to_json_string(&sample()).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_fields_keep_declared_order() {
        let json = to_json_string(&sample()).unwrap();
        assert_eq!(json, r#"{"name":"ada","tags":["a","b"],"score":7}"#);
        assert_eq!(json, serde_json::to_string(&sample()).unwrap());
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(
            to_json_string(&u128::MAX).unwrap(),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(
            to_json_or_marker(&i128::MIN),
            "-170141183460469231731687303715884105728"
        );
    }

    #[test]
    fn test_compact_output() {
        let json = to_json_string(&vec![1, 2, 3]).unwrap();
        assert_eq!(json, "[1,2,3]");
    }

    #[test]
    fn test_string_slices() {
        let s: &str = "hello";
        assert_eq!(to_json_string(&s).unwrap(), "\"hello\"");
    }

    #[test]
    fn test_failure_is_reported() {
        assert!(matches!(to_json_string(&Opaque), Err(LogError::Serialize(_))));
    }

    #[test]
    fn test_non_string_map_keys_fall_back_to_marker() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");
        assert_eq!(to_json_or_marker(&map), UNSERIALIZABLE);
    }

    #[test]
    fn test_marker_on_failure() {
        assert_eq!(to_json_or_marker(&Opaque), UNSERIALIZABLE);
    }
}
