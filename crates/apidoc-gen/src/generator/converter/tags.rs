//! Tag derivation and the `x-tagGroups` extension.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::{
  generator::{config::GeneratorConfig, schema_registry::SchemaRegistry},
  input::RouteRecord,
};

/// Resolves the tags for one operation, deduplicated.
///
/// Prefers a tag derived from the controller class name; falls back to the
/// leading URI segments, `tag_depth` deep. `tag_map` overrides apply last.
pub(crate) fn resolve_tags(route: &RouteRecord, config: &GeneratorConfig) -> Vec<String> {
  let derived = route
    .controller
    .as_deref()
    .and_then(tag_from_controller)
    .or_else(|| tag_from_uri(&route.uri, config.tag_depth));

  let mut tags = Vec::new();
  let mut seen = BTreeSet::new();
  for tag in derived {
    let tag = config.tag_map.get(&tag).cloned().unwrap_or(tag);
    if seen.insert(tag.clone()) {
      tags.push(tag);
    }
  }
  tags
}

fn tag_from_controller(controller: &str) -> Option<String> {
  let name = SchemaRegistry::extract_schema_name(controller);
  let base = name.strip_suffix("Controller").unwrap_or(name);
  (!base.is_empty()).then(|| cruet::to_title_case(base))
}

fn tag_from_uri(uri: &str, depth: usize) -> Option<String> {
  let segments = uri
    .split('/')
    .filter(|segment| !segment.is_empty() && !segment.starts_with('{') && !segment.starts_with(':'))
    .take(depth.max(1))
    .map(cruet::to_title_case)
    .collect::<Vec<_>>();
  (!segments.is_empty()).then(|| segments.join(" "))
}

/// Builds the `x-tagGroups` extension value when groups are configured.
///
/// Tags not named by any configured group collect under
/// `ungrouped_tag_group_name`, when one is set.
pub(crate) fn tag_groups_extension(config: &GeneratorConfig, used_tags: &[String]) -> Option<Value> {
  if config.tag_groups.is_empty() {
    return None;
  }

  let mut groups = config
    .tag_groups
    .iter()
    .map(|(name, tags)| json!({ "name": name, "tags": tags }))
    .collect::<Vec<_>>();

  let grouped = config.tag_groups.values().flatten().collect::<BTreeSet<_>>();
  let ungrouped = used_tags
    .iter()
    .filter(|tag| !grouped.contains(tag))
    .collect::<Vec<_>>();
  if !ungrouped.is_empty()
    && let Some(name) = &config.ungrouped_tag_group_name
  {
    groups.push(json!({ "name": name, "tags": ungrouped }));
  }

  Some(Value::Array(groups))
}
