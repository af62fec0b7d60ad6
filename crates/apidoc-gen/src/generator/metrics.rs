use strum::Display;

/// Counters and warnings accumulated over one generation pass.
///
/// The engine is best-effort: data-quality problems it can route around are
/// recorded here instead of aborting generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub routes_processed: usize,
  pub operations_built: usize,
  pub schemas_registered: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_route(&mut self) {
    self.routes_processed += 1;
  }

  pub fn record_operation(&mut self) {
    self.operations_built += 1;
  }

  pub fn record_schemas(&mut self, count: usize) {
    self.schemas_registered = count;
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  /// Every `$ref` requested during the pass that never got a matching
  /// registration, reported once as a single combined warning.
  #[strum(to_string = "Unresolved schema references: {names}")]
  BrokenSchemaReferences { names: String },
  #[strum(to_string = "[{operation_id}] link '{link}' targets response status {status} which is not defined; link dropped")]
  LinkTargetMissing {
    operation_id: String,
    link: String,
    status: u16,
  },
  #[strum(to_string = "Route '{uri}' declares unsupported HTTP method '{method}'; skipped")]
  UnsupportedHttpMethod { uri: String, method: String },
  #[strum(to_string = "Route '{uri}' references security scheme '{scheme}' which is not declared")]
  UnknownSecurityScheme { uri: String, scheme: String },
}
