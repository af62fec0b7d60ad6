//! Target-version handling.
//!
//! The baseline document is 3.0-shaped. Only the exact literal `"3.1.0"`
//! triggers the structural conversion; any other configured value, malformed
//! or absent, silently keeps the baseline untouched.

use serde_json::{Map, Value};

pub(crate) const BASELINE_VERSION: &str = "3.0.3";
pub(crate) const THREE_ONE_VERSION: &str = "3.1.0";

pub(crate) fn wants_three_one(target: Option<&str>) -> bool {
  target == Some(THREE_ONE_VERSION)
}

/// Rewrites a baseline document in place to 3.1 shape: version string,
/// `nullable: true` becomes a `[type, "null"]` type array, and an empty
/// `webhooks` object appears at the top level.
pub(crate) fn convert_to_three_one(document: &mut Value) {
  rewrite_nullable(document);

  if let Value::Object(root) = document {
    root.insert("openapi".to_string(), Value::String(THREE_ONE_VERSION.to_string()));
    root
      .entry("webhooks".to_string())
      .or_insert_with(|| Value::Object(Map::new()));
  }
}

fn rewrite_nullable(value: &mut Value) {
  match value {
    Value::Object(map) => {
      let is_nullable_schema =
        map.get("nullable") == Some(&Value::Bool(true)) && matches!(map.get("type"), Some(Value::String(_)));
      if is_nullable_schema {
        if let Some(Value::String(base)) = map.get("type").cloned() {
          map.insert(
            "type".to_string(),
            Value::Array(vec![Value::String(base), Value::String("null".to_string())]),
          );
        }
        map.remove("nullable");
      }

      for nested in map.values_mut() {
        rewrite_nullable(nested);
      }
    }
    Value::Array(items) => {
      for item in items {
        rewrite_nullable(item);
      }
    }
    _ => {}
  }
}
