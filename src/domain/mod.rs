// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing the binding engine.
//!
//! This module holds the value types, the coercer, the field table contract
//! and the field catalog. It knows nothing about where values come from; that
//! is the job of the adapters.

pub mod catalog;
pub mod coerce;
pub mod errors;
pub mod field;
pub mod value;

// Re-export commonly used types
pub use catalog::FieldCatalog;
pub use coerce::{coerce, zero_value};
pub use errors::{BindError, BoxError, Result};
pub use field::{Bindable, FieldDescriptor, FieldSpec, FieldWriter};
pub use value::{FieldKind, FieldValue, RawValue};
