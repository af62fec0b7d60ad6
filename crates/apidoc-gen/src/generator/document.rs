//! Serializable output document model.
//!
//! A thin, owned representation of the final OpenAPI-style document. The
//! assembler builds it piecemeal; serialization order follows field order
//! thanks to `preserve_order` maps.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::{
  generator::schema::SchemaNode,
  input::{ApiInfo, ContactRecord, LicenseRecord, SecuritySchemeRecord, ServerRecord},
};

/// One security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Method key to operation, per path.
pub type PathItem = IndexMap<String, Operation>;

#[derive(Debug, Clone, Serialize, bon::Builder)]
pub struct Document {
  #[builder(into)]
  pub openapi: String,
  pub info: Info,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub servers: Vec<Server>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub tags: Vec<Tag>,
  #[builder(default)]
  pub paths: IndexMap<String, PathItem>,
  pub components: Components,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub security: Option<Vec<SecurityRequirement>>,
  #[serde(rename = "x-tagGroups", skip_serializing_if = "Option::is_none")]
  pub tag_groups: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
  pub title: String,
  pub version: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub terms_of_service: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact: Option<Contact>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub license: Option<License>,
}

impl From<&ApiInfo> for Info {
  fn from(info: &ApiInfo) -> Self {
    Self {
      title: info.title.clone(),
      version: info.version.clone(),
      description: info.description.clone(),
      terms_of_service: info.terms_of_service.clone(),
      contact: info.contact.as_ref().map(Contact::from),
      license: info.license.as_ref().map(License::from),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

impl From<&ContactRecord> for Contact {
  fn from(record: &ContactRecord) -> Self {
    Self {
      name: record.name.clone(),
      email: record.email.clone(),
      url: record.url.clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct License {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

impl From<&LicenseRecord> for License {
  fn from(record: &LicenseRecord) -> Self {
    Self {
      name: record.name.clone(),
      url: record.url.clone(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct Server {
  pub url: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl From<&ServerRecord> for Server {
  fn from(record: &ServerRecord) -> Self {
    Self {
      url: record.url.clone(),
      description: record.description.clone(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub operation_id: Option<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<ParameterObject>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RequestBody>,
  pub responses: IndexMap<String, ResponseObject>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub security: Option<Vec<SecurityRequirement>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterObject {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub required: bool,
  pub schema: SchemaNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
  Path,
  Query,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub required: bool,
  pub content: IndexMap<String, MediaTypeObject>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaTypeObject {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub schema: Option<SchemaNode>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub example: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseObject {
  pub description: String,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaTypeObject>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub links: IndexMap<String, LinkObject>,
}

impl ResponseObject {
  pub fn new(description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
      content: IndexMap::new(),
      links: IndexMap::new(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkObject {
  pub operation_id: String,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub parameters: IndexMap<String, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
  pub schemas: BTreeMap<String, SchemaNode>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub security_schemes: IndexMap<String, SecuritySchemeObject>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySchemeObject {
  #[serde(rename = "type")]
  pub scheme_type: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scheme: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bearer_format: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
  pub location: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl From<&SecuritySchemeRecord> for SecuritySchemeObject {
  fn from(record: &SecuritySchemeRecord) -> Self {
    Self {
      scheme_type: record.scheme_type.clone(),
      scheme: record.scheme.clone(),
      bearer_format: record.bearer_format.clone(),
      name: record.name.clone(),
      location: record.location.clone(),
      description: record.description.clone(),
    }
  }
}
