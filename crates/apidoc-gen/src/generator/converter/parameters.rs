//! Parameter Schema Builder: flat descriptor lists to object schemas.

use indexmap::IndexMap;
use itertools::Itertools;

use super::{FileMetadata, ParameterDescriptor};
use crate::generator::schema::{ArrayNode, Constraints, PrimitiveNode, SchemaNode};

const ARRAY_SUFFIXES: [&str; 3] = [".*", "[*]", "[]"];

/// Assembles an ordered descriptor list into one object schema.
///
/// Descriptors without a name are skipped. The required list is omitted
/// entirely when no field is required. Dotted and bracketed field names
/// (`items.*`, `tags[]`, `users.*.email`) stay literal property keys; no
/// nested expansion happens at this layer.
pub(crate) fn build_object(descriptors: &[ParameterDescriptor]) -> SchemaNode {
  let mut properties = IndexMap::new();
  let mut required = Vec::new();

  for descriptor in descriptors {
    if descriptor.name.is_empty() {
      continue;
    }

    let (key, node) = match &descriptor.file {
      Some(file) => file_property(descriptor, file),
      None => (descriptor.name.clone(), scalar_property(descriptor)),
    };

    if descriptor.required {
      required.push(key.clone());
    }
    properties.insert(key, node);
  }

  SchemaNode::object(properties, required)
}

/// True when the descriptor list needs a multipart/form-data body.
pub(crate) fn needs_multipart(descriptors: &[ParameterDescriptor]) -> bool {
  descriptors.iter().any(|descriptor| descriptor.file.is_some())
}

/// Binary leaf (or array of binary leaves, for `photos.*`-style names) with
/// a human-readable description and raw metadata passthrough.
fn file_property(descriptor: &ParameterDescriptor, file: &FileMetadata) -> (String, SchemaNode) {
  let (key, is_array) = strip_array_suffix(&descriptor.name);

  let mut leaf = SchemaNode::binary();
  if let SchemaNode::Primitive(PrimitiveNode { constraints, .. }) = &mut leaf {
    constraints.description = file_description(file).or_else(|| descriptor.description.clone());
    constraints.nullable = descriptor.nullable;
    constraints.max_size = file.max_size;
    constraints.content_media_type = file.mime_types.first().cloned();
  }

  let node = if is_array { SchemaNode::array(leaf) } else { leaf };
  (key, node)
}

fn strip_array_suffix(name: &str) -> (String, bool) {
  for suffix in ARRAY_SUFFIXES {
    if let Some(stripped) = name.strip_suffix(suffix) {
      return (stripped.to_string(), true);
    }
  }
  (name.to_string(), false)
}

fn file_description(file: &FileMetadata) -> Option<String> {
  let mut parts = Vec::new();
  if !file.extensions.is_empty() {
    parts.push(format!("Allowed types: {}", file.extensions.iter().join(", ")));
  }
  if !file.mime_types.is_empty() {
    parts.push(format!("Allowed MIME types: {}", file.mime_types.iter().join(", ")));
  }
  if let Some(min_size) = file.min_size {
    parts.push(format!("Min size: {min_size} KB"));
  }
  if let Some(max_size) = file.max_size {
    parts.push(format!("Max size: {max_size} KB"));
  }
  if !file.dimensions.is_empty() {
    parts.push(format!("Dimensions: {}", file.dimensions.iter().join(", ")));
  }
  (!parts.is_empty()).then(|| parts.join(". "))
}

fn scalar_property(descriptor: &ParameterDescriptor) -> SchemaNode {
  if descriptor.is_array {
    return SchemaNode::Array(ArrayNode {
      items: Box::new(SchemaNode::string()),
      description: descriptor.description.clone(),
      min_items: descriptor.min_items,
      max_items: descriptor.max_items,
      example: descriptor.example.clone(),
    });
  }

  SchemaNode::Primitive(PrimitiveNode {
    kind: descriptor.kind,
    constraints: Constraints {
      format: descriptor.format.clone(),
      enum_values: descriptor.enum_values.clone(),
      minimum: descriptor.minimum,
      maximum: descriptor.maximum,
      min_length: descriptor.min_length,
      max_length: descriptor.max_length,
      pattern: descriptor.pattern.clone(),
      nullable: descriptor.nullable,
      default: descriptor.default.clone(),
      example: descriptor.example.clone(),
      description: descriptor.description.clone(),
      max_size: None,
      content_media_type: None,
    },
  })
}
