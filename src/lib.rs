// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture property binding crate.
//!
//! This crate fills the fields of a plain record from an ordered sequence of
//! sources: declared defaults, environment variables, command-line arguments,
//! a YAML file and a caller-supplied callback. Each field declares a source
//! key, a default literal and a kind, and raw values are coerced to that kind
//! before anything touches the record.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Value types, the coercer and the field catalog (`FieldCatalog`, `RawValue`, errors)
//! - **Ports**: Trait definitions that define interfaces (`PropertySource`, `DocumentParser`)
//! - **Adapters**: Implementations for specific sources (defaults, env vars, args, YAML, callback)
//! - **Service**: The binder facade and binding plans
//!
//! # Binding model
//!
//! - **Staging**: Every source pass stages coerced values; the record is untouched
//! - **Precedence**: Call order only. The last pass to supply a value wins
//! - **Commit**: Writes staged values into the record and remembers which fields were written
//! - **Rounds**: In later rounds, a source's default fallback never overwrites a committed field
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//!
//! # Quick Start
//!
//! ```rust
//! use propbind::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct Configuration {
//!     option_a: String,
//!     option_b: i64,
//!     option_c: bool,
//! }
//!
//! propbind::bindable!(Configuration {
//!     option_a: text = ("OPT_A", "unfilled"),
//!     option_b: integer = ("OPT_B", "4444"),
//!     option_c: boolean = ("OPT_C", "false"),
//! });
//!
//! # fn main() -> Result<()> {
//! let mut config = Configuration::default();
//! let mut binder = PropertyBinder::new(&mut config)?;
//!
//! binder.apply_defaults()?;
//! binder.apply_args(vec!["opt_a=filled", "opt_c=true"])?;
//! binder.commit(&mut config);
//!
//! assert_eq!(config.option_a, "filled");
//! assert_eq!(config.option_b, 4444);
//! assert!(config.option_c);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        BindError, Bindable, FieldCatalog, FieldDescriptor, FieldKind, FieldSpec, FieldValue,
        RawValue, Result,
    };
    pub use crate::ports::{DocumentParser, Origin, PropertySource, SourceRecord};
    pub use crate::service::{BindingPlan, PropertyBinder};

    // Re-export adapters based on feature flags
    pub use crate::adapters::{CallbackSource, DefaultsSource};
    #[cfg(feature = "cli")]
    pub use crate::adapters::ArgsSource;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarSource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileSource, YamlParser};
}
