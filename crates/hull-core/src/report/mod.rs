//! # Hull Core Reporting
//!
//! Structured error values and the sinks they flow through. Errors carry
//! enough context (module names, scope, owners, chain root) for a caller to
//! render an actionable message; rendering itself is the caller's concern.
//!
//! Ownership errors are non-fatal to traversal: the resolver reports them
//! and keeps going, and the caller decides afterwards whether the run
//! failed. Include-resolution errors likewise degrade the affected include
//! to "absent" instead of aborting extraction.

pub mod error;
pub mod sink;

pub use error::ResolutionError;
pub use sink::{CollectingErrorSink, ErrorSink, LogErrorSink};
