//! The engine's single internal schema representation.
//!
//! Every collaborator payload converts into a [`SchemaNode`] before it goes
//! anywhere near the output document, and the final document serializes each
//! node back to JSON. Keeping the representation a closed sum type makes
//! recursive transforms (deduplication, the 3.1 nullable rewrite) exhaustive
//! pattern matches instead of dictionary spelunking.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use strum::Display;

pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// JSON primitive type of a schema leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
  #[default]
  String,
  Integer,
  Number,
  Boolean,
}

impl PrimitiveKind {
  /// Maps a collaborator-declared type hint to a primitive kind. Unknown
  /// hints fall back to string.
  pub fn parse(raw: &str) -> Self {
    match raw.to_ascii_lowercase().as_str() {
      "integer" | "int" => Self::Integer,
      "number" | "numeric" | "float" | "double" | "decimal" => Self::Number,
      "boolean" | "bool" => Self::Boolean,
      _ => Self::String,
    }
  }
}

/// Constraint facts attached to a primitive leaf.
///
/// Populated by the rule constraint mapper and by direct descriptor fields.
/// Everything is optional; an empty value serializes to a bare `{"type": ...}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraints {
  pub format: Option<String>,
  pub enum_values: Vec<String>,
  pub minimum: Option<f64>,
  pub maximum: Option<f64>,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub pattern: Option<String>,
  pub nullable: bool,
  pub default: Option<Value>,
  pub example: Option<Value>,
  pub description: Option<String>,
  /// Raw upload size limit passthrough for binary fields.
  pub max_size: Option<u64>,
  /// Raw media type passthrough for binary fields.
  pub content_media_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
  pub properties: IndexMap<String, SchemaNode>,
  pub required: Vec<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
  pub items: Box<SchemaNode>,
  pub description: Option<String>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
  pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveNode {
  pub kind: PrimitiveKind,
  pub constraints: Constraints,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
  pub property_name: String,
  pub mapping: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OneOfNode {
  pub branches: Vec<SchemaNode>,
  pub discriminator: Discriminator,
}

/// Recursive schema value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
  Object(ObjectNode),
  Array(ArrayNode),
  Primitive(PrimitiveNode),
  OneOf(OneOfNode),
  Ref(String),
}

impl SchemaNode {
  pub fn object(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
    Self::Object(ObjectNode {
      properties,
      required,
      ..ObjectNode::default()
    })
  }

  pub fn empty_object() -> Self {
    Self::Object(ObjectNode::default())
  }

  pub fn primitive(kind: PrimitiveKind) -> Self {
    Self::Primitive(PrimitiveNode {
      kind,
      constraints: Constraints::default(),
    })
  }

  pub fn string() -> Self {
    Self::primitive(PrimitiveKind::String)
  }

  /// A file-upload leaf: `{type: string, format: binary}`.
  pub fn binary() -> Self {
    Self::Primitive(PrimitiveNode {
      kind: PrimitiveKind::String,
      constraints: Constraints {
        format: Some("binary".to_string()),
        ..Constraints::default()
      },
    })
  }

  pub fn array(items: SchemaNode) -> Self {
    Self::Array(ArrayNode {
      items: Box::new(items),
      description: None,
      min_items: None,
      max_items: None,
      example: None,
    })
  }

  pub fn reference(name: impl Into<String>) -> Self {
    Self::Ref(name.into())
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    let text = description.into();
    match &mut self {
      Self::Object(node) => node.description = Some(text),
      Self::Array(node) => node.description = Some(text),
      Self::Primitive(node) => node.constraints.description = Some(text),
      Self::OneOf(_) | Self::Ref(_) => {}
    }
    self
  }

  /// Serializes the node to a JSON value in OpenAPI 3.0 shape.
  pub fn to_value(&self) -> Value {
    match self {
      Self::Object(node) => object_value(node),
      Self::Array(node) => array_value(node),
      Self::Primitive(node) => primitive_value(node),
      Self::OneOf(node) => one_of_value(node),
      Self::Ref(name) => {
        let mut map = Map::new();
        map.insert("$ref".to_string(), Value::String(format!("{SCHEMA_REF_PREFIX}{name}")));
        Value::Object(map)
      }
    }
  }
}

impl Serialize for SchemaNode {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_value().serialize(serializer)
  }
}

fn object_value(node: &ObjectNode) -> Value {
  let mut map = Map::new();
  map.insert("type".to_string(), Value::String("object".to_string()));
  if let Some(title) = &node.title {
    map.insert("title".to_string(), Value::String(title.clone()));
  }
  if let Some(description) = &node.description {
    map.insert("description".to_string(), Value::String(description.clone()));
  }
  if !node.properties.is_empty() {
    let properties = node
      .properties
      .iter()
      .map(|(name, schema)| (name.clone(), schema.to_value()))
      .collect::<Map<_, _>>();
    map.insert("properties".to_string(), Value::Object(properties));
  }
  if !node.required.is_empty() {
    map.insert(
      "required".to_string(),
      Value::Array(node.required.iter().cloned().map(Value::String).collect()),
    );
  }
  if let Some(example) = &node.example {
    map.insert("example".to_string(), example.clone());
  }
  Value::Object(map)
}

fn array_value(node: &ArrayNode) -> Value {
  let mut map = Map::new();
  map.insert("type".to_string(), Value::String("array".to_string()));
  if let Some(description) = &node.description {
    map.insert("description".to_string(), Value::String(description.clone()));
  }
  map.insert("items".to_string(), node.items.to_value());
  if let Some(min_items) = node.min_items {
    map.insert("minItems".to_string(), Value::from(min_items));
  }
  if let Some(max_items) = node.max_items {
    map.insert("maxItems".to_string(), Value::from(max_items));
  }
  if let Some(example) = &node.example {
    map.insert("example".to_string(), example.clone());
  }
  Value::Object(map)
}

fn primitive_value(node: &PrimitiveNode) -> Value {
  let constraints = &node.constraints;
  let mut map = Map::new();
  map.insert("type".to_string(), Value::String(node.kind.to_string()));
  if let Some(format) = &constraints.format {
    map.insert("format".to_string(), Value::String(format.clone()));
  }
  if let Some(description) = &constraints.description {
    map.insert("description".to_string(), Value::String(description.clone()));
  }
  if !constraints.enum_values.is_empty() {
    map.insert(
      "enum".to_string(),
      Value::Array(constraints.enum_values.iter().cloned().map(Value::String).collect()),
    );
  }
  if let Some(minimum) = constraints.minimum {
    map.insert("minimum".to_string(), number_value(minimum));
  }
  if let Some(maximum) = constraints.maximum {
    map.insert("maximum".to_string(), number_value(maximum));
  }
  if let Some(min_length) = constraints.min_length {
    map.insert("minLength".to_string(), Value::from(min_length));
  }
  if let Some(max_length) = constraints.max_length {
    map.insert("maxLength".to_string(), Value::from(max_length));
  }
  if let Some(pattern) = &constraints.pattern {
    map.insert("pattern".to_string(), Value::String(pattern.clone()));
  }
  if constraints.nullable {
    map.insert("nullable".to_string(), Value::Bool(true));
  }
  if let Some(default) = &constraints.default {
    map.insert("default".to_string(), default.clone());
  }
  if let Some(example) = &constraints.example {
    map.insert("example".to_string(), example.clone());
  }
  if let Some(max_size) = constraints.max_size {
    map.insert("maxSize".to_string(), Value::from(max_size));
  }
  if let Some(content_media_type) = &constraints.content_media_type {
    map.insert("contentMediaType".to_string(), Value::String(content_media_type.clone()));
  }
  Value::Object(map)
}

fn one_of_value(node: &OneOfNode) -> Value {
  let mut map = Map::new();
  map.insert(
    "oneOf".to_string(),
    Value::Array(node.branches.iter().map(SchemaNode::to_value).collect()),
  );

  let mut discriminator = Map::new();
  discriminator.insert(
    "propertyName".to_string(),
    Value::String(node.discriminator.property_name.clone()),
  );
  let mapping = node
    .discriminator
    .mapping
    .iter()
    .map(|(key, target)| (key.clone(), Value::String(target.clone())))
    .collect::<Map<_, _>>();
  discriminator.insert("mapping".to_string(), Value::Object(mapping));
  map.insert("discriminator".to_string(), Value::Object(discriminator));

  Value::Object(map)
}

/// Emits whole numbers as JSON integers so `min:5` renders as `5`, not `5.0`.
fn number_value(value: f64) -> Value {
  if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
    Value::from(value as i64)
  } else {
    Value::from(value)
  }
}
