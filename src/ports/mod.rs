// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams between the binding engine and the outside
//! world. Adapters in the adapters layer implement them.

pub mod parser;
pub mod source;

// Re-export commonly used types
pub use parser::DocumentParser;
pub use source::{Origin, PropertySource, SourceEntry, SourceRecord};
