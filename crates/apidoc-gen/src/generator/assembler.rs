//! Orchestration for one document-generation pass.
//!
//! The assembler walks the route list, builds one operation per route and
//! method, and merges the cross-cutting pieces (tags, component schemas,
//! security) into a single coherent document. It owns the schema registry
//! for the duration of the pass; a fresh pass never sees state from a
//! previous one.

use std::{
  collections::BTreeSet,
  sync::LazyLock,
};

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use crate::{
  generator::{
    config::GeneratorConfig,
    converter::{
      JSON_MEDIA_TYPE, MULTIPART_MEDIA_TYPE, requests,
      requests::ResolvedBody,
      responses::{self, ResponseContext},
      security, tags,
    },
    document::{
      Components, Document, Info, MediaTypeObject, Operation, ParameterLocation, ParameterObject, PathItem,
      RequestBody, Server, Tag,
    },
    metrics::{GenerationStats, GenerationWarning},
    schema::{Constraints, PrimitiveKind, PrimitiveNode, SchemaNode},
    schema_registry::SchemaRegistry,
    version,
  },
  input::{ApiDescription, PathParameterRecord, QueryParameterRecord, RouteRecord},
};

const SUPPORTED_METHODS: [&str; 5] = ["get", "post", "put", "patch", "delete"];
const BODY_METHODS: [&str; 3] = ["post", "put", "patch"];

static PATH_TEMPLATE_PARAM: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\{([^/{}]+?)\??\}").expect("valid path template regex"));

/// High-level entry point: one `ApiDescription` in, one document out.
pub struct DocumentAssembler {
  description: ApiDescription,
  config: GeneratorConfig,
}

impl DocumentAssembler {
  pub fn new(description: ApiDescription, config: GeneratorConfig) -> Self {
    Self { description, config }
  }

  /// Runs one generation pass.
  ///
  /// Best-effort: data-quality problems become warnings on the returned
  /// stats, and the document is emitted regardless.
  pub fn generate(&self) -> anyhow::Result<(Value, GenerationStats)> {
    let mut registry = SchemaRegistry::new();
    // Fresh pass: no schemas or pending references may survive a prior run.
    registry.clear();
    let mut stats = GenerationStats::default();

    let mut paths: IndexMap<String, PathItem> = IndexMap::new();
    let mut used_tags = BTreeSet::new();

    for route in &self.description.routes {
      stats.record_route();
      let path = normalize_path(&route.uri);

      for raw_method in &route.methods {
        let method = raw_method.to_ascii_lowercase();
        if !SUPPORTED_METHODS.contains(&method.as_str()) {
          stats.record_warning(GenerationWarning::UnsupportedHttpMethod {
            uri: route.uri.clone(),
            method: raw_method.clone(),
          });
          continue;
        }

        let operation = self.build_operation(route, &method, &mut registry, &mut stats);
        used_tags.extend(operation.tags.iter().cloned());
        paths.entry(path.clone()).or_default().insert(method, operation);
        stats.record_operation();
      }
    }

    let broken = registry.validate_references();
    if !broken.is_empty() {
      stats.record_warning(GenerationWarning::BrokenSchemaReferences {
        names: broken.join(", "),
      });
    }
    stats.record_schemas(registry.all().len());

    let tag_names = used_tags.into_iter().collect::<Vec<_>>();
    let tag_groups = tags::tag_groups_extension(&self.config, &tag_names);
    let tags = tag_names
      .into_iter()
      .map(|name| Tag { name, description: None })
      .collect::<Vec<_>>();

    let components = Components {
      schemas: registry.all().clone(),
      security_schemes: security::scheme_objects(&self.description.auth),
    };

    let document = Document::builder()
      .openapi(version::BASELINE_VERSION)
      .info(Info::from(&self.description.info))
      .servers(self.description.servers.iter().map(Server::from).collect())
      .tags(tags)
      .paths(paths)
      .components(components)
      .maybe_security(security::global_security(&self.description.auth))
      .maybe_tag_groups(tag_groups)
      .build();

    let mut value = serde_json::to_value(&document)?;
    if version::wants_three_one(self.config.target_version.as_deref()) {
      version::convert_to_three_one(&mut value);
    }

    Ok((value, stats))
  }

  fn build_operation(
    &self,
    route: &RouteRecord,
    method: &str,
    registry: &mut SchemaRegistry,
    stats: &mut GenerationStats,
  ) -> Operation {
    let tags = tags::resolve_tags(route, &self.config);
    let resolved_security = security::resolve_route_security(route, &self.description.auth, stats);
    let parameters = build_parameters(route);

    let body = if BODY_METHODS.contains(&method) {
      requests::resolve(&route.analysis)
    } else {
      ResolvedBody::None
    };
    let (request_body, has_request_body) = match body {
      ResolvedBody::None => (None, false),
      ResolvedBody::Json(schema) => (Some(body_object(JSON_MEDIA_TYPE, schema)), true),
      ResolvedBody::Multipart(schema) => (Some(body_object(MULTIPART_MEDIA_TYPE, schema)), true),
    };

    let operation_id = route
      .analysis
      .operation_id
      .clone()
      .unwrap_or_else(|| derive_operation_id(method, &route.uri));

    let responses = responses::build_responses(
      &ResponseContext {
        analysis: &route.analysis,
        resources: &self.description.resources,
        operation_id: &operation_id,
        has_request_body,
        auth_required: resolved_security.auth_required,
      },
      registry,
      stats,
    );

    Operation {
      tags,
      summary: route.analysis.summary.clone(),
      operation_id: Some(operation_id),
      parameters,
      request_body,
      responses,
      security: resolved_security.requirement,
    }
  }
}

fn body_object(media_type: &str, schema: SchemaNode) -> RequestBody {
  RequestBody {
    description: None,
    required: true,
    content: IndexMap::from([(
      media_type.to_string(),
      MediaTypeObject {
        schema: Some(schema),
        example: None,
      },
    )]),
  }
}

fn build_parameters(route: &RouteRecord) -> Vec<ParameterObject> {
  let mut parameters = Vec::new();
  let mut declared = BTreeSet::new();

  for record in &route.path_parameters {
    if record.name.is_empty() {
      continue;
    }
    declared.insert(record.name.clone());
    parameters.push(path_parameter(record));
  }

  // Template parameters the collaborator did not describe still need a
  // declaration for the document to be internally consistent.
  for name in template_params(&route.uri) {
    if declared.insert(name.clone()) {
      parameters.push(ParameterObject {
        name,
        location: ParameterLocation::Path,
        description: None,
        required: true,
        schema: SchemaNode::string(),
      });
    }
  }

  for record in &route.analysis.query_parameters {
    if record.name.is_empty() {
      continue;
    }
    parameters.push(query_parameter(record));
  }

  parameters
}

fn path_parameter(record: &PathParameterRecord) -> ParameterObject {
  ParameterObject {
    name: record.name.clone(),
    location: ParameterLocation::Path,
    description: record.description.clone(),
    required: true,
    schema: SchemaNode::Primitive(PrimitiveNode {
      kind: record.kind.as_deref().map(PrimitiveKind::parse).unwrap_or_default(),
      constraints: Constraints {
        enum_values: record.enum_values.clone(),
        ..Constraints::default()
      },
    }),
  }
}

fn query_parameter(record: &QueryParameterRecord) -> ParameterObject {
  ParameterObject {
    name: record.name.clone(),
    location: ParameterLocation::Query,
    description: record.description.clone(),
    required: record.required,
    schema: SchemaNode::Primitive(PrimitiveNode {
      kind: record.kind.as_deref().map(PrimitiveKind::parse).unwrap_or_default(),
      constraints: Constraints {
        format: record.format.clone(),
        enum_values: record.enum_values.clone(),
        default: record.default.clone(),
        example: record.example.clone(),
        ..Constraints::default()
      },
    }),
  }
}

/// Leading slash enforced, optional-parameter markers dropped:
/// `users/{id?}` becomes `/users/{id}`.
fn normalize_path(uri: &str) -> String {
  let trimmed = uri.trim_start_matches('/');
  format!("/{}", trimmed.replace("?}", "}"))
}

fn template_params(uri: &str) -> Vec<String> {
  PATH_TEMPLATE_PARAM
    .captures_iter(uri)
    .map(|capture| capture[1].to_string())
    .collect()
}

fn derive_operation_id(method: &str, uri: &str) -> String {
  let segments = uri
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      segment
        .trim_start_matches(['{', ':'])
        .trim_end_matches(['}', '?'])
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect::<String>()
    })
    .collect::<Vec<_>>();

  if segments.is_empty() {
    method.to_string()
  } else {
    format!("{method}_{}", segments.join("_"))
  }
}
