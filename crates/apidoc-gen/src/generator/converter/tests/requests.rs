use serde_json::json;

use super::support::analysis;
use crate::generator::converter::requests::{ResolvedBody, resolve};

#[test]
fn test_no_validation_means_no_body() {
  assert_eq!(resolve(&analysis(json!({}))), ResolvedBody::None);
}

#[test]
fn test_empty_rule_map_means_no_body() {
  let body = resolve(&analysis(json!({
    "formRequest": { "name": "App\\Http\\Requests\\EmptyRequest", "rules": {} }
  })));
  assert_eq!(body, ResolvedBody::None);
}

#[test]
fn test_form_request_takes_precedence_over_inline_rules() {
  let body = resolve(&analysis(json!({
    "formRequest": {
      "name": "App\\Http\\Requests\\StorePostRequest",
      "rules": { "title": "required|string" }
    },
    "inlineRules": { "ignored": "required|integer" }
  })));

  let ResolvedBody::Json(schema) = body else {
    panic!("expected a JSON body");
  };
  let value = schema.to_value();
  assert!(value["properties"].get("title").is_some());
  assert!(value["properties"].get("ignored").is_none());
}

#[test]
fn test_inline_rules_used_when_no_form_request() {
  let body = resolve(&analysis(json!({
    "inlineRules": { "email": "required|email" }
  })));

  let ResolvedBody::Json(schema) = body else {
    panic!("expected a JSON body");
  };
  assert_eq!(schema.to_value()["properties"]["email"]["format"], "email");
}

#[test]
fn test_file_field_forces_multipart() {
  let body = resolve(&analysis(json!({
    "inlineRules": {
      "title": "required|string",
      "attachment": "required|file|max:5000"
    }
  })));

  let ResolvedBody::Multipart(schema) = body else {
    panic!("expected a multipart body");
  };
  let value = schema.to_value();
  assert_eq!(value["properties"]["attachment"]["format"], "binary");
  assert_eq!(value["required"], json!(["title", "attachment"]));
}

#[test]
fn test_conditional_rules_resolve_to_json_union() {
  let body = resolve(&analysis(json!({
    "inlineRules": {
      "title": [
        { "conditions": [{"kind": "http_method", "method": "post"}], "rules": "required|string" },
        { "conditions": [{"kind": "http_method", "method": "put"}], "rules": "sometimes|string" }
      ]
    }
  })));

  let ResolvedBody::Json(schema) = body else {
    panic!("conditional rules always resolve to a JSON body");
  };
  let value = schema.to_value();
  assert_eq!(value["oneOf"].as_array().expect("oneOf branches").len(), 2);
}
