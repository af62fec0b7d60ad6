use std::collections::{BTreeMap, BTreeSet};

use crate::generator::schema::{SCHEMA_REF_PREFIX, SchemaNode};

/// Named-component store for one generation pass.
///
/// Owned exclusively by the document assembler for the duration of a pass.
/// References may be issued before their target is registered; whatever is
/// still unregistered when the pass finishes is reported through
/// [`SchemaRegistry::validate_references`].
#[derive(Debug, Default)]
pub struct SchemaRegistry {
  schemas: BTreeMap<String, SchemaNode>,
  pending: BTreeSet<String>,
}

impl SchemaRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Drops all schemas and pending references. Called at the start of every
  /// generation pass so repeated runs never leak state from a previous one.
  pub fn clear(&mut self) {
    self.schemas.clear();
    self.pending.clear();
  }

  /// Registers a schema under `name`, replacing any previous content.
  ///
  /// Idempotent: registering the same name twice leaves a single entry.
  pub fn register(&mut self, name: impl Into<String>, schema: SchemaNode) {
    self.schemas.insert(name.into(), schema);
  }

  pub fn get(&self, name: &str) -> Option<&SchemaNode> {
    self.schemas.get(name)
  }

  pub fn has(&self, name: &str) -> bool {
    self.schemas.contains_key(name)
  }

  /// Issues a `$ref` node for `name`, recording it as pending when no
  /// matching registration exists yet.
  pub fn get_ref(&mut self, name: &str) -> SchemaNode {
    if !self.has(name) {
      self.pending.insert(name.to_string());
    }
    SchemaNode::reference(name)
  }

  pub fn register_and_get_ref(&mut self, name: &str, schema: SchemaNode) -> SchemaNode {
    self.register(name, schema);
    self.get_ref(name)
  }

  /// All registered schemas, sorted by name. Never contains two entries for
  /// the same name.
  pub fn all(&self) -> &BTreeMap<String, SchemaNode> {
    &self.schemas
  }

  /// Every name that was requested via [`SchemaRegistry::get_ref`] but never
  /// registered. Empty means every forward reference resolved.
  pub fn validate_references(&self) -> Vec<String> {
    self
      .pending
      .iter()
      .filter(|name| !self.schemas.contains_key(*name))
      .cloned()
      .collect()
  }

  /// Strips the namespace from a fully qualified class name.
  ///
  /// Handles `\`-separated PHP-style names, `::`-separated paths, and plain
  /// `/` separators: `App\Http\Resources\UserResource` becomes `UserResource`.
  pub fn extract_schema_name(fully_qualified: &str) -> &str {
    fully_qualified
      .rsplit(['\\', '/'])
      .next()
      .map(|tail| tail.rsplit("::").next().unwrap_or(tail))
      .unwrap_or(fully_qualified)
  }

  /// Parses a `#/components/schemas/<name>` reference back to its name.
  pub fn parse_ref(ref_path: &str) -> Option<&str> {
    ref_path.strip_prefix(SCHEMA_REF_PREFIX)
  }
}
