//! Rule Constraint Mapper: validation-rule tokens to typed schema constraints.
//!
//! The mapping table is fixed and case-insensitive. Unknown or malformed
//! rules never fail; they degrade to an unconstrained field.

use serde_json::Value;

use super::{FileMetadata, ParameterDescriptor};
use crate::{generator::schema::PrimitiveKind, input::RuleList};

/// A rule name plus its ordered string arguments, parsed once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleToken {
  pub name: String,
  pub args: Vec<String>,
}

impl RuleToken {
  /// Splits `min:5` into name `min` and args `["5"]`. Argument values are
  /// kept verbatim; only the name is normalized.
  pub(crate) fn parse(raw: &str) -> Self {
    match raw.split_once(':') {
      Some((name, args)) => Self {
        name: name.trim().to_ascii_lowercase(),
        args: args.split(',').map(str::to_string).collect(),
      },
      None => Self {
        name: raw.trim().to_ascii_lowercase(),
        args: Vec::new(),
      },
    }
  }

  /// The argument text as written, commas restored.
  fn raw_args(&self) -> String {
    self.args.join(",")
  }

  fn first_number(&self) -> Option<f64> {
    self.args.first().and_then(|arg| arg.trim().parse::<f64>().ok())
  }

  fn second_number(&self) -> Option<f64> {
    self.args.get(1).and_then(|arg| arg.trim().parse::<f64>().ok())
  }
}

/// Tokenizes one field's rule list. Pipe-joined strings are split; list
/// entries that are not plain strings are skipped without error.
pub(crate) fn tokens_from_list(list: &RuleList) -> Vec<RuleToken> {
  match list {
    RuleList::Joined(joined) => joined
      .split('|')
      .filter(|raw| !raw.trim().is_empty())
      .map(RuleToken::parse)
      .collect(),
    RuleList::Split(entries) => entries
      .iter()
      .filter_map(Value::as_str)
      .filter(|raw| !raw.trim().is_empty())
      .map(RuleToken::parse)
      .collect(),
  }
}

/// Field shape inferred from the tokens on that field. Default is string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum InferredKind {
  #[default]
  String,
  Integer,
  Number,
  Boolean,
  Array,
  File,
}

impl InferredKind {
  pub(crate) fn primitive(self) -> PrimitiveKind {
    match self {
      Self::Integer => PrimitiveKind::Integer,
      Self::Number => PrimitiveKind::Number,
      Self::Boolean => PrimitiveKind::Boolean,
      Self::String | Self::Array | Self::File => PrimitiveKind::String,
    }
  }
}

pub(crate) fn infer_kind(tokens: &[RuleToken]) -> InferredKind {
  let mut kind = InferredKind::String;
  for token in tokens {
    match token.name.as_str() {
      "file" | "image" | "mimes" | "mimetypes" | "dimensions" => return InferredKind::File,
      "array" => kind = InferredKind::Array,
      "integer" | "int" if kind == InferredKind::String => kind = InferredKind::Integer,
      "numeric" | "decimal" if kind == InferredKind::String => kind = InferredKind::Number,
      "boolean" | "bool" if kind == InferredKind::String => kind = InferredKind::Boolean,
      _ => {}
    }
  }
  kind
}

fn is_required_rule(name: &str) -> bool {
  name == "required" || name.starts_with("required_")
}

/// Builds a fully analyzed descriptor for one field from its rule tokens.
///
/// `required_if`/`required_unless`/`required_with`/`required_without` mark
/// the field required wherever the rule text appears; the runtime condition
/// is not evaluated. This mirrors the observed source behavior.
pub(crate) fn descriptor_from_rules(name: &str, tokens: &[RuleToken]) -> ParameterDescriptor {
  let kind = infer_kind(tokens);
  let mut descriptor = ParameterDescriptor {
    name: name.to_string(),
    kind: kind.primitive(),
    is_array: kind == InferredKind::Array,
    ..ParameterDescriptor::default()
  };
  let mut file = (kind == InferredKind::File).then(FileMetadata::default);

  for token in tokens {
    apply_token(token, kind, &mut descriptor, &mut file);
  }

  descriptor.file = file;
  descriptor
}

fn apply_token(
  token: &RuleToken,
  kind: InferredKind,
  descriptor: &mut ParameterDescriptor,
  file: &mut Option<FileMetadata>,
) {
  match token.name.as_str() {
    name if is_required_rule(name) => descriptor.required = true,
    "nullable" => descriptor.nullable = true,
    "min" => apply_min(token.first_number(), kind, descriptor, file),
    "max" => apply_max(token.first_number(), kind, descriptor, file),
    "between" => {
      apply_min(token.first_number(), kind, descriptor, file);
      apply_max(token.second_number(), kind, descriptor, file);
    }
    "email" => descriptor.format = Some("email".to_string()),
    "url" => descriptor.format = Some("uri".to_string()),
    "uuid" => descriptor.format = Some("uuid".to_string()),
    "date" => descriptor.format = Some("date".to_string()),
    "datetime" | "date_time" => descriptor.format = Some("date-time".to_string()),
    "in" => descriptor.enum_values = token.args.clone(),
    "regex" => descriptor.pattern = Some(strip_pattern_delimiters(&token.raw_args())),
    "mimes" => {
      if let Some(metadata) = file.as_mut() {
        metadata.extensions = token.args.iter().map(|arg| arg.trim().to_string()).collect();
      }
    }
    "mimetypes" => {
      if let Some(metadata) = file.as_mut() {
        metadata.mime_types = token.args.iter().map(|arg| arg.trim().to_string()).collect();
      }
    }
    "dimensions" => {
      if let Some(metadata) = file.as_mut() {
        metadata.dimensions = token.args.iter().map(|arg| arg.trim().to_string()).collect();
      }
    }
    // Unknown rules emit no constraint.
    _ => {}
  }
}

fn apply_min(value: Option<f64>, kind: InferredKind, descriptor: &mut ParameterDescriptor, file: &mut Option<FileMetadata>) {
  let Some(value) = value else { return };
  match kind {
    InferredKind::String | InferredKind::Boolean => descriptor.min_length = unsigned(value),
    InferredKind::Integer | InferredKind::Number => descriptor.minimum = Some(value),
    InferredKind::Array => descriptor.min_items = unsigned(value),
    InferredKind::File => {
      if let Some(metadata) = file.as_mut() {
        metadata.min_size = unsigned(value);
      }
    }
  }
}

fn apply_max(value: Option<f64>, kind: InferredKind, descriptor: &mut ParameterDescriptor, file: &mut Option<FileMetadata>) {
  let Some(value) = value else { return };
  match kind {
    InferredKind::String | InferredKind::Boolean => descriptor.max_length = unsigned(value),
    InferredKind::Integer | InferredKind::Number => descriptor.maximum = Some(value),
    InferredKind::Array => descriptor.max_items = unsigned(value),
    InferredKind::File => {
      if let Some(metadata) = file.as_mut() {
        metadata.max_size = unsigned(value);
      }
    }
  }
}

fn unsigned(value: f64) -> Option<u64> {
  (value >= 0.0).then_some(value as u64)
}

/// Strips one enclosing delimiter pair (`/.../`, `#...#`, ...) when present.
fn strip_pattern_delimiters(raw: &str) -> String {
  let mut chars = raw.chars();
  match (chars.next(), raw.chars().next_back()) {
    (Some(first), Some(last)) if raw.chars().count() >= 2 && first == last && !first.is_ascii_alphanumeric() => {
      raw[first.len_utf8()..raw.len() - last.len_utf8()].to_string()
    }
    _ => raw.to_string(),
  }
}
