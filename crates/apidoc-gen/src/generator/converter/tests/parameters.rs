use serde_json::json;

use crate::generator::converter::{
  FileMetadata, ParameterDescriptor,
  parameters::{build_object, needs_multipart},
  rules::{descriptor_from_rules, tokens_from_list},
};
use crate::input::RuleList;

fn descriptor(name: &str, raw: &str) -> ParameterDescriptor {
  descriptor_from_rules(name, &tokens_from_list(&RuleList::Joined(raw.to_string())))
}

#[test]
fn test_required_list_is_omitted_when_empty() {
  let value = build_object(&[descriptor("note", "nullable|string")]).to_value();
  assert!(value.get("required").is_none());
}

#[test]
fn test_declaration_order_is_preserved() {
  let value = build_object(&[
    descriptor("zulu", "string"),
    descriptor("alpha", "string"),
    descriptor("mike", "string"),
  ])
  .to_value();

  let keys = value["properties"]
    .as_object()
    .expect("properties object")
    .keys()
    .cloned()
    .collect::<Vec<_>>();
  assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
}

#[test]
fn test_nameless_descriptors_are_skipped() {
  let value = build_object(&[descriptor("", "required|string"), descriptor("name", "string")]).to_value();
  assert_eq!(value["properties"].as_object().expect("properties object").len(), 1);
}

#[test]
fn test_dotted_names_stay_literal() {
  let value = build_object(&[
    descriptor("items.*.sku", "required|string"),
    descriptor("meta.author", "string"),
  ])
  .to_value();

  let properties = value["properties"].as_object().expect("properties object");
  assert!(properties.contains_key("items.*.sku"));
  assert!(properties.contains_key("meta.author"));
  assert_eq!(value["required"], json!(["items.*.sku"]));
}

#[test]
fn test_array_field_renders_as_string_array() {
  let value = build_object(&[descriptor("tags", "array|min:1|max:5")]).to_value();
  assert_eq!(
    value["properties"]["tags"],
    json!({
      "type": "array",
      "items": { "type": "string" },
      "minItems": 1,
      "maxItems": 5
    }),
  );
}

#[test]
fn test_file_field_is_binary_with_assembled_description() {
  let value = build_object(&[descriptor("avatar", "required|image|mimes:jpg,png|max:2048")]).to_value();

  let avatar = &value["properties"]["avatar"];
  assert_eq!(avatar["type"], "string");
  assert_eq!(avatar["format"], "binary");
  assert_eq!(avatar["description"], "Allowed types: jpg, png. Max size: 2048 KB");
  assert_eq!(avatar["maxSize"], 2048);
}

#[test]
fn test_mime_types_set_content_media_type() {
  let value = build_object(&[descriptor("doc", "file|mimetypes:application/pdf,text/plain")]).to_value();
  let doc = &value["properties"]["doc"];
  assert_eq!(doc["contentMediaType"], "application/pdf");
  assert_eq!(
    doc["description"],
    "Allowed MIME types: application/pdf, text/plain",
  );
}

#[test]
fn test_wildcard_file_field_becomes_binary_array() {
  let value = build_object(&[descriptor("photos.*", "required|image|max:1024")]).to_value();

  let photos = &value["properties"]["photos"];
  assert_eq!(photos["type"], "array");
  assert_eq!(photos["items"]["format"], "binary");
  assert_eq!(value["required"], json!(["photos"]), "required uses the stripped key");
}

#[test]
fn test_bracket_suffixes_also_mark_arrays() {
  let value = build_object(&[descriptor("uploads[]", "file")]).to_value();
  assert_eq!(value["properties"]["uploads"]["type"], "array");
}

#[test]
fn test_multipart_detection() {
  let scalar_only = [descriptor("name", "required|string")];
  assert!(!needs_multipart(&scalar_only));

  let with_file = [descriptor("name", "required|string"), descriptor("cv", "required|file")];
  assert!(needs_multipart(&with_file));
}

#[test]
fn test_file_descriptor_default_metadata_is_empty() {
  let plain = descriptor("upload", "file");
  assert_eq!(plain.file, Some(FileMetadata::default()));
}
