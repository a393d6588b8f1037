//! # Hull Core Descriptor Handling
//!
//! Plugin descriptor files declare content modules, dependencies, aliases
//! and include directives. This module defines the parsed shape of a
//! descriptor, the parsing seam, and the side channel through which the
//! resolver asks for a test descriptor's self-declared dependencies.
//!
//! The wire format is a collaborator concern: the resolver and the
//! extraction pipeline only ever see [`ParsedDescriptor`] values. A JSON
//! parser is provided as the default implementation.

pub mod error;
pub mod model;
pub mod parser;
pub mod source;

pub use error::DescriptorError;
pub use model::{ContentEntry, ParsedDescriptor, TestDescriptor};
pub use parser::{DescriptorParser, JsonDescriptorParser};
pub use source::{AnalyzingDescriptorSource, StaticDescriptorSource, TestDescriptorSource};

// Test module declaration
#[cfg(test)]
mod tests;
