pub(crate) mod branches;
pub(crate) mod conditions;
pub(crate) mod hashing;
pub(crate) mod parameters;
pub(crate) mod requests;
pub(crate) mod resources;
pub(crate) mod responses;
pub(crate) mod rules;
pub(crate) mod security;
pub(crate) mod tags;

use serde_json::Value;

use crate::generator::schema::PrimitiveKind;

pub(crate) const CONDITION_DISCRIMINATOR: &str = "_condition";
pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";
pub(crate) const MULTIPART_MEDIA_TYPE: &str = "multipart/form-data";

/// One request field, fully analyzed.
///
/// Owned by the request that declares it; the schema builders consume these
/// without mutating them.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ParameterDescriptor {
  pub name: String,
  pub kind: PrimitiveKind,
  pub required: bool,
  pub nullable: bool,
  pub is_array: bool,
  pub format: Option<String>,
  pub enum_values: Vec<String>,
  pub minimum: Option<f64>,
  pub maximum: Option<f64>,
  pub min_length: Option<u64>,
  pub max_length: Option<u64>,
  pub min_items: Option<u64>,
  pub max_items: Option<u64>,
  pub pattern: Option<String>,
  pub default: Option<Value>,
  pub example: Option<Value>,
  pub description: Option<String>,
  /// Present iff the field is a file upload.
  pub file: Option<FileMetadata>,
}

/// Upload constraints gathered from file-flavored rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FileMetadata {
  pub extensions: Vec<String>,
  pub mime_types: Vec<String>,
  /// Raw size limit as declared (kilobytes in the source rule syntax).
  pub max_size: Option<u64>,
  pub min_size: Option<u64>,
  pub dimensions: Vec<String>,
}

#[cfg(test)]
mod tests;
