use serde_json::Value;

use crate::input::{ControllerAnalysis, ValidationRules};

pub(super) fn validation_rules(value: Value) -> ValidationRules {
  serde_json::from_value(value).expect("valid validation rules JSON")
}

pub(super) fn analysis(value: Value) -> ControllerAnalysis {
  serde_json::from_value(value).expect("valid controller analysis JSON")
}
