//! Response assembly for one operation.

use indexmap::IndexMap;

use super::{JSON_MEDIA_TYPE, resources};
use crate::{
  generator::{
    document::{LinkObject, MediaTypeObject, ResponseObject},
    metrics::{GenerationStats, GenerationWarning},
    schema_registry::SchemaRegistry,
  },
  input::{ControllerAnalysis, ResourceAnalysis},
};

const DEFAULT_SUCCESS_STATUS: u16 = 200;

/// Everything response assembly needs to know about the operation.
pub(crate) struct ResponseContext<'a> {
  pub analysis: &'a ControllerAnalysis,
  pub resources: &'a IndexMap<String, ResourceAnalysis>,
  pub operation_id: &'a str,
  pub has_request_body: bool,
  pub auth_required: bool,
}

/// Builds the operation's response map.
///
/// The success schema reuses the named component for the route's resource,
/// registering it on first sight. Links attach only to status codes that
/// exist on the operation; a link targeting a missing status is dropped
/// with a warning, never a failure.
pub(crate) fn build_responses(
  context: &ResponseContext<'_>,
  registry: &mut SchemaRegistry,
  stats: &mut GenerationStats,
) -> IndexMap<String, ResponseObject> {
  let mut responses = IndexMap::new();

  let status = context.analysis.success_status.unwrap_or(DEFAULT_SUCCESS_STATUS);
  responses.insert(status.to_string(), success_response(context, registry));

  if context.has_request_body {
    responses
      .entry("422".to_string())
      .or_insert_with(|| ResponseObject::new("Validation error"));
  }
  if context.auth_required {
    responses
      .entry("401".to_string())
      .or_insert_with(|| ResponseObject::new("Unauthenticated"));
  }
  for error in &context.analysis.error_responses {
    responses
      .entry(error.status.to_string())
      .or_insert_with(|| ResponseObject::new(error.description.clone()));
  }

  attach_links(context, &mut responses, stats);
  responses
}

fn success_response(context: &ResponseContext<'_>, registry: &mut SchemaRegistry) -> ResponseObject {
  let mut response = ResponseObject::new("Successful response");

  let Some(resource) = context.analysis.resource.as_deref() else {
    return response;
  };

  let name = SchemaRegistry::extract_schema_name(resource);
  let reference = match context.resources.get(resource).or_else(|| context.resources.get(name)) {
    Some(analysis) => registry.register_and_get_ref(name, resources::build_resource_schema(analysis)),
    // No analysis available: issue the reference anyway and let
    // validate_references report it if nothing registers the name later.
    None => registry.get_ref(name),
  };

  let schema = if context.analysis.returns_collection {
    resources::wrap_collection(reference, context.analysis.pagination)
  } else {
    reference
  };

  response.content.insert(
    JSON_MEDIA_TYPE.to_string(),
    MediaTypeObject {
      schema: Some(schema),
      example: None,
    },
  );
  response
}

fn attach_links(
  context: &ResponseContext<'_>,
  responses: &mut IndexMap<String, ResponseObject>,
  stats: &mut GenerationStats,
) {
  for link in &context.analysis.response_links {
    match responses.get_mut(&link.status.to_string()) {
      Some(response) => {
        response.links.insert(
          link.name.clone(),
          LinkObject {
            operation_id: link.operation_id.clone(),
            parameters: link.parameters.clone(),
            description: link.description.clone(),
          },
        );
      }
      None => stats.record_warning(GenerationWarning::LinkTargetMissing {
        operation_id: context.operation_id.to_string(),
        link: link.name.clone(),
        status: link.status,
      }),
    }
  }
}
