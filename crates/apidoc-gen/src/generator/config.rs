use indexmap::IndexMap;

/// The closed set of options the assembler recognizes.
///
/// Constructed once by the caller and passed in; the engine never reads
/// ambient configuration. `target_version` only has an effect when it is
/// exactly the literal `"3.1.0"` — any other value, malformed or absent,
/// silently keeps the baseline document.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct GeneratorConfig {
  #[builder(into)]
  pub target_version: Option<String>,
  /// Number of leading URI segments used when deriving a tag from the path.
  #[builder(default = 1)]
  pub tag_depth: usize,
  /// Overrides applied after tag derivation, derived name to final name.
  #[builder(default)]
  pub tag_map: IndexMap<String, String>,
  /// Group name to member tags, emitted as the `x-tagGroups` extension.
  #[builder(default)]
  pub tag_groups: IndexMap<String, Vec<String>>,
  /// Group that collects tags not named by any entry in `tag_groups`.
  #[builder(into)]
  pub ungrouped_tag_group_name: Option<String>,
  #[builder(default)]
  pub example_generation: ExampleGeneration,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// Example-synthesis knobs, carried for the example-generation collaborator.
///
/// The engine stores these and passes through already-resolved example
/// values; it never synthesizes examples itself.
#[derive(Debug, Clone, PartialEq, Default, bon::Builder)]
pub struct ExampleGeneration {
  #[builder(default)]
  pub use_faker: bool,
  pub faker_seed: Option<u64>,
  #[builder(into)]
  pub faker_locale: Option<String>,
}
