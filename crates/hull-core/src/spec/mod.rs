//! # Hull Core Request Specs
//!
//! On-disk representation of a resolve request: the declarative spec a
//! plugin author writes, listing declared content modules, allow-lists and
//! mode flags. JSON is always supported; TOML and YAML are available behind
//! the `toml-spec` / `yaml-spec` features, with the format chosen by file
//! extension.

pub mod error;
pub mod format;
pub mod model;

pub use error::SpecError;
pub use format::SpecFormat;
pub use model::{load_request_spec, DeclaredModuleSpec, RequestSpec};

// Test module declaration
#[cfg(test)]
mod tests;
