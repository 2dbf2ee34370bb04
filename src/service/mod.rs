// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the binder facade.
//!
//! This module ties a [`FieldCatalog`](crate::domain::FieldCatalog) to the
//! source adapters, exposing one call per source and an ordered plan type.

pub mod binder;

// Re-export commonly used types
pub use binder::{BindingPlan, PropertyBinder};
