// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binder facade and binding plans.
//!
//! [`PropertyBinder`] wraps a [`FieldCatalog`] with one method per source so
//! callers can spell out their precedence as a sequence of calls.
//! [`BindingPlan`] records the same sequence up front and replays it.

use crate::adapters::{CallbackSource, DefaultsSource};
use crate::domain::{Bindable, BoxError, FieldCatalog, RawValue, Result};
use crate::ports::PropertySource;
use std::collections::HashMap;

/// Binds values from several sources onto one destination record.
///
/// Passes run in call order and the last pass to supply a value for a field
/// wins. Nothing reaches the destination until [`commit`](Self::commit).
///
/// # Examples
///
/// ```rust
/// use propbind::bindable;
/// use propbind::service::PropertyBinder;
///
/// #[derive(Default)]
/// struct Configuration {
///     option_a: String,
///     option_b: i64,
/// }
///
/// bindable!(Configuration {
///     option_a: text = ("OPT_A", "unfilled"),
///     option_b: integer = ("OPT_B", "4444"),
/// });
///
/// # fn main() -> propbind::domain::Result<()> {
/// let mut config = Configuration::default();
/// let mut binder = PropertyBinder::new(&mut config)?;
///
/// binder.apply_defaults()?;
/// binder.apply_args(vec!["opt_b=8888"])?;
/// binder.commit(&mut config);
///
/// assert_eq!(config.option_a, "unfilled");
/// assert_eq!(config.option_b, 8888);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PropertyBinder<T: ?Sized> {
    catalog: FieldCatalog<T>,
}

impl<T: Bindable + ?Sized> PropertyBinder<T> {
    /// Creates a binder for `dest`, building its field catalog.
    pub fn new(dest: &mut T) -> Result<Self> {
        Ok(Self {
            catalog: FieldCatalog::build(dest)?,
        })
    }
}

impl<T: ?Sized> PropertyBinder<T> {
    /// Runs one resolution pass with an arbitrary source.
    pub fn apply<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: PropertySource + ?Sized,
    {
        self.catalog.resolve(source)
    }

    /// Stages every field's default literal.
    pub fn apply_defaults(&mut self) -> Result<()> {
        self.apply(&mut DefaultsSource::new())
    }

    /// Stages values from the process environment.
    #[cfg(feature = "env")]
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply(&mut crate::adapters::EnvVarSource::new())
    }

    /// Stages values from an argument list.
    #[cfg(feature = "cli")]
    pub fn apply_args<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.apply(&mut crate::adapters::ArgsSource::from_args(args))
    }

    /// Stages values from a YAML file.
    #[cfg(feature = "yaml")]
    pub fn apply_yaml_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.apply(&mut crate::adapters::YamlFileSource::new(path))
    }

    /// Stages values returned by `callback`, which is invoked once.
    pub fn apply_callback<F, V, E>(&mut self, callback: F) -> Result<()>
    where
        F: FnMut() -> std::result::Result<HashMap<String, V>, E> + 'static,
        V: Into<RawValue>,
        E: Into<BoxError>,
    {
        self.apply(&mut CallbackSource::new(callback))
    }

    /// Writes staged values into `dest`. Returns the number of fields written.
    pub fn commit(&mut self, dest: &mut T) -> usize {
        self.catalog.commit(dest)
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &FieldCatalog<T> {
        &self.catalog
    }

    /// Consumes the binder, returning the underlying catalog.
    pub fn into_catalog(self) -> FieldCatalog<T> {
        self.catalog
    }
}

/// An ordered list of sources applied as one resolve-and-commit round.
///
/// Sources run in the order they were added; there is no built-in priority.
///
/// # Examples
///
/// ```rust
/// use propbind::bindable;
/// use propbind::service::BindingPlan;
///
/// #[derive(Default)]
/// struct Configuration {
///     option_c: bool,
/// }
///
/// bindable!(Configuration {
///     option_c: boolean = ("OPT_C", "false"),
/// });
///
/// # fn main() -> propbind::domain::Result<()> {
/// let mut config = Configuration::default();
/// let catalog = BindingPlan::new()
///     .with_defaults()
///     .with_args(vec!["opt_c=t"])
///     .bind(&mut config)?;
///
/// assert!(config.option_c);
/// assert!(catalog.is_committed("option_c"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BindingPlan {
    sources: Vec<Box<dyn PropertySource>>,
}

impl BindingPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the usual plan for an application: defaults, then
    /// `config.yaml` from the OS configuration directory if it exists, then
    /// the environment, then the process arguments.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn standard(app_name: &str, qualifier: &str) -> Self {
        let plan = Self::new().with_defaults();

        #[cfg(feature = "yaml")]
        let plan = match crate::adapters::YamlFileSource::from_default_location(app_name, qualifier)
        {
            Ok(source) if source.file_path().is_file() => plan.with_source(Box::new(source)),
            Ok(source) => {
                tracing::debug!("No configuration file at {}", source.file_path().display());
                plan
            }
            Err(e) => {
                tracing::debug!("Skipping default configuration file: {}", e);
                plan
            }
        };
        #[cfg(not(feature = "yaml"))]
        let _ = (app_name, qualifier);

        #[cfg(feature = "env")]
        let plan = plan.with_env_vars();

        #[cfg(feature = "cli")]
        let plan = plan.with_source(Box::new(crate::adapters::ArgsSource::from_env_args()));

        plan
    }

    /// Appends a source to the plan.
    pub fn with_source(mut self, source: Box<dyn PropertySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Appends the defaults source.
    pub fn with_defaults(self) -> Self {
        self.with_source(Box::new(DefaultsSource::new()))
    }

    /// Appends the process environment.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        self.with_source(Box::new(crate::adapters::EnvVarSource::new()))
    }

    /// Appends the process environment, with `prefix` prepended to every key.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_source(Box::new(crate::adapters::EnvVarSource::with_prefix(prefix)))
    }

    /// Appends an argument list.
    #[cfg(feature = "cli")]
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_source(Box::new(crate::adapters::ArgsSource::from_args(args)))
    }

    /// Appends a YAML file. The file is read when the plan runs.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Self {
        self.with_source(Box::new(crate::adapters::YamlFileSource::new(path)))
    }

    /// Appends a callback source.
    pub fn with_callback<F, V, E>(self, callback: F) -> Self
    where
        F: FnMut() -> std::result::Result<HashMap<String, V>, E> + 'static,
        V: Into<RawValue>,
        E: Into<BoxError>,
    {
        self.with_source(Box::new(CallbackSource::new(callback)))
    }

    /// Returns the number of sources in the plan.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if the plan has no sources.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Builds a catalog for `dest`, runs every source in order and commits.
    ///
    /// The returned catalog can be used for later rounds, for example with
    /// [`apply`](Self::apply).
    pub fn bind<T: Bindable + ?Sized>(&mut self, dest: &mut T) -> Result<FieldCatalog<T>> {
        let mut catalog = FieldCatalog::build(dest)?;
        self.apply(&mut catalog, dest)?;
        Ok(catalog)
    }

    /// Runs every source in order against an existing catalog, then commits.
    ///
    /// Returns the number of fields written. On error nothing is committed
    /// and values staged by earlier sources stay staged.
    pub fn apply<T: ?Sized>(&mut self, catalog: &mut FieldCatalog<T>, dest: &mut T) -> Result<usize> {
        for source in &mut self.sources {
            catalog.resolve(source.as_mut())?;
        }
        Ok(catalog.commit(dest))
    }
}

impl std::fmt::Debug for BindingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("BindingPlan").field("sources", &names).finish()
    }
}
