//! Data contracts consumed from the extraction collaborators.
//!
//! The engine never parses host-application source code. Route discovery,
//! validation-rule extraction, resource analysis, and authentication
//! detection all happen elsewhere and hand their findings over as the typed
//! payloads below. Shape is validated exactly once, at the boundary, with a
//! JSON path attached to any failure.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
  #[error("invalid api description at `{path}`: {source}")]
  Deserialize {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

/// Everything the document assembler needs for one generation pass.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiDescription {
  pub info: ApiInfo,
  pub servers: Vec<ServerRecord>,
  /// Absent or `null` deserializes as zero routes; that is not an error.
  pub routes: Vec<RouteRecord>,
  pub auth: AuthAnalysis,
  /// Resource/transformer analysis keyed by fully qualified class name.
  pub resources: IndexMap<String, ResourceAnalysis>,
}

impl ApiDescription {
  pub fn from_json(value: Value) -> Result<Self, InputError> {
    serde_path_to_error::deserialize(value).map_err(|err| InputError::Deserialize {
      path: err.path().to_string(),
      source: err.into_inner(),
    })
  }

  pub fn from_slice(bytes: &[u8]) -> Result<Self, InputError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| InputError::Deserialize {
      path: err.path().to_string(),
      source: err.into_inner(),
    })
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiInfo {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
  pub terms_of_service: Option<String>,
  pub contact: Option<ContactRecord>,
  pub license: Option<LicenseRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
  pub name: Option<String>,
  pub email: Option<String>,
  pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LicenseRecord {
  pub name: String,
  pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerRecord {
  pub url: String,
  pub description: Option<String>,
}

/// One discovered route, joined with its controller analysis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteRecord {
  pub uri: String,
  pub methods: Vec<String>,
  pub controller: Option<String>,
  pub action: Option<String>,
  pub middleware: Vec<String>,
  pub path_parameters: Vec<PathParameterRecord>,
  pub analysis: ControllerAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathParameterRecord {
  pub name: String,
  pub kind: Option<String>,
  pub description: Option<String>,
  pub enum_values: Vec<String>,
}

/// What the controller-analysis collaborator learned about one action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerAnalysis {
  pub operation_id: Option<String>,
  pub summary: Option<String>,
  pub response_type: Option<String>,
  pub success_status: Option<u16>,
  /// Form-request validation. Takes precedence over `inline_rules`.
  pub form_request: Option<FormRequestRecord>,
  pub inline_rules: Option<ValidationRules>,
  pub resource: Option<String>,
  pub returns_collection: bool,
  pub pagination: Option<PaginationKind>,
  pub query_parameters: Vec<QueryParameterRecord>,
  pub response_links: Vec<ResponseLinkRecord>,
  pub error_responses: Vec<ErrorResponseRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRequestRecord {
  pub name: String,
  pub rules: ValidationRules,
}

/// Field name to validation rules, preserving declaration order.
pub type ValidationRules = IndexMap<String, FieldRules>;

/// A field's rules are either one flat list or a set of condition branches.
///
/// Branches are tried first: `RuleList::Split` accepts any JSON array, so the
/// reverse order would swallow branch lists as flat rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldRules {
  Branched(Vec<RuleBranch>),
  Flat(RuleList),
}

/// Rules as extracted: a pipe-joined string or an already-split list.
///
/// List entries that are not plain strings (rule objects, closures the
/// extractor could not stringify) survive deserialization and are skipped
/// later by the constraint mapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleList {
  Joined(String),
  Split(Vec<Value>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBranch {
  #[serde(default)]
  pub conditions: Vec<ConditionRecord>,
  pub rules: RuleList,
}

/// Runtime condition guarding a validation branch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionRecord {
  HttpMethod { method: String },
  UserCheck { name: String },
  RequestField { check: String, field: String },
  Else,
  Custom { expression: Option<String> },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParameterRecord {
  pub name: String,
  pub kind: Option<String>,
  pub required: bool,
  pub description: Option<String>,
  pub format: Option<String>,
  pub enum_values: Vec<String>,
  pub default: Option<Value>,
  pub example: Option<Value>,
}

/// A response-link declaration: connect a status code on this operation to
/// another operation, mapping parameters through runtime expressions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseLinkRecord {
  pub status: u16,
  pub name: String,
  pub operation_id: String,
  #[serde(default)]
  pub parameters: IndexMap<String, String>,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseRecord {
  pub status: u16,
  pub description: String,
}

/// Shape of the collection envelope a paginated response uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
  /// Resource-collection envelope: `data` + `links` + `meta.pagination`.
  ApiResource,
  LengthAware,
  Simple,
  Cursor,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthAnalysis {
  /// Named security schemes, keyed by the name they register under.
  pub schemes: IndexMap<String, SecuritySchemeRecord>,
  /// Middleware identifier (the part before any `:` argument) to scheme name.
  pub middleware_map: IndexMap<String, String>,
  pub default_scheme: Option<String>,
  pub default_required: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySchemeRecord {
  pub scheme_type: String,
  pub scheme: Option<String>,
  pub bearer_format: Option<String>,
  pub name: Option<String>,
  pub location: Option<String>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceAnalysis {
  pub properties: IndexMap<String, ResourceProperty>,
  /// Pre-built example payload; passed through unmodified when present.
  pub custom_example: Option<Value>,
  pub includes: Vec<IncludeRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceProperty {
  pub kind: Option<String>,
  pub format: Option<String>,
  pub description: Option<String>,
  pub nullable: bool,
  pub example: Option<Value>,
  /// Nested object properties, when `kind` is `object` (or omitted).
  pub properties: IndexMap<String, ResourceProperty>,
  /// Item shape, when `kind` is `array`.
  pub items: Option<Box<ResourceProperty>>,
}

/// A relationship the resource can embed on request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncludeRecord {
  pub name: String,
  pub default_active: bool,
  pub property: Option<ResourceProperty>,
}
