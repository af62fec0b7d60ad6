pub mod assembler;
pub mod config;
pub(crate) mod converter;
pub mod document;
pub mod metrics;
pub mod schema;
pub mod schema_registry;
pub(crate) mod version;
