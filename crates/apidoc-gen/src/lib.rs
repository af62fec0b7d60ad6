#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod generator;
pub mod input;

pub use generator::{
  assembler::DocumentAssembler,
  config::GeneratorConfig,
  metrics::{GenerationStats, GenerationWarning},
};
pub use input::ApiDescription;
