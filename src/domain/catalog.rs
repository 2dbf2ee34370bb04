// SPDX-License-Identifier: MIT OR Apache-2.0

//! The field catalog: resolution passes and commits.
//!
//! A catalog is built once from a destination record. Each call to
//! [`FieldCatalog::resolve`] runs one source against every field and stages
//! coerced values; [`FieldCatalog::commit`] writes staged values back into the
//! record. Precedence is purely a matter of call order: the last pass that
//! supplies a value for a field wins.

use crate::domain::coerce::{coerce, zero_value};
use crate::domain::errors::{BindError, Result};
use crate::domain::field::{Bindable, FieldDescriptor, FieldWriter};
use crate::ports::{Origin, PropertySource};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Field descriptors, writers and committed-set for one destination type.
///
/// # Examples
///
/// ```
/// use propbind::bindable;
/// use propbind::adapters::DefaultsSource;
/// use propbind::domain::FieldCatalog;
///
/// #[derive(Default)]
/// struct Server {
///     port: i64,
/// }
///
/// bindable!(Server {
///     port: integer = ("PORT", "8080"),
/// });
///
/// # fn main() -> propbind::domain::Result<()> {
/// let mut server = Server::default();
/// let mut catalog = FieldCatalog::build(&mut server)?;
///
/// catalog.resolve(&mut DefaultsSource::new())?;
/// catalog.commit(&mut server);
///
/// assert_eq!(server.port, 8080);
/// assert!(catalog.is_committed("port"));
/// # Ok(())
/// # }
/// ```
pub struct FieldCatalog<T: ?Sized> {
    fields: HashMap<String, FieldDescriptor>,
    writers: HashMap<String, FieldWriter<T>>,
    committed: HashSet<String>,
}

impl<T: Bindable + ?Sized> FieldCatalog<T> {
    /// Builds a catalog from the destination's field table.
    ///
    /// The mutable borrow is what makes the destination writable later; the
    /// record itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidDestination`] if the table is empty, an
    /// identifier is empty, or two fields share an identifier.
    pub fn build(dest: &mut T) -> Result<Self> {
        let specs = dest.field_specs();
        if specs.is_empty() {
            return Err(BindError::invalid_destination(
                "destination declares no bindable fields",
            ));
        }

        let mut fields = HashMap::with_capacity(specs.len());
        let mut writers = HashMap::with_capacity(specs.len());
        for spec in specs {
            let (descriptor, writer) = spec.into_parts();
            if descriptor.name().is_empty() {
                return Err(BindError::invalid_destination(
                    "field identifier must not be empty",
                ));
            }
            let name = descriptor.name().to_string();
            if fields.contains_key(&name) {
                return Err(BindError::invalid_destination(format!(
                    "duplicate field identifier '{}'",
                    name
                )));
            }
            writers.insert(name.clone(), writer);
            fields.insert(name, descriptor);
        }

        tracing::debug!("Built field catalog with {} fields", fields.len());

        Ok(Self {
            fields,
            writers,
            committed: HashSet::new(),
        })
    }
}

impl<T: ?Sized> FieldCatalog<T> {
    /// Runs one resolution pass with `source`.
    ///
    /// For every field the source yields a value for:
    ///
    /// - a default-origin value for a field committed in an earlier round
    ///   marks the field skipped and leaves it unstaged;
    /// - empty text is ignored, unless the source stages empties, in which
    ///   case the field's zero value is staged;
    /// - anything else is coerced and replaces the staged value.
    ///
    /// # Errors
    ///
    /// Source failures and coercion failures abort the pass. Fields staged
    /// before the failure keep their new values.
    pub fn resolve<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: PropertySource + ?Sized,
    {
        let record = {
            let fields: Vec<&FieldDescriptor> = self.fields.values().collect();
            source.collect(&fields)?
        };
        let stages_empty = source.stages_empty();

        tracing::debug!(
            "Resolving {} candidate values from source '{}'",
            record.len(),
            source.name()
        );

        let mut staged = 0usize;
        for descriptor in self.fields.values_mut() {
            let entry = match record.get(descriptor.key()) {
                Some(entry) => entry,
                None => continue,
            };

            if entry.origin == Origin::Default && self.committed.contains(descriptor.name()) {
                tracing::trace!(
                    "Skipping field '{}': already committed, source '{}' only has its default",
                    descriptor.name(),
                    source.name()
                );
                descriptor.mark_skipped();
                continue;
            }

            let value = if entry.value.is_empty_text() {
                if !stages_empty {
                    continue;
                }
                zero_value(descriptor.kind(), descriptor.name())?
            } else {
                coerce(&entry.value, descriptor.kind(), descriptor.name())?
            };

            tracing::trace!(
                "Staging field '{}' = {} from source '{}'",
                descriptor.name(),
                value,
                source.name()
            );
            descriptor.stage(value);
            staged += 1;
        }

        tracing::debug!("Source '{}' staged {} fields", source.name(), staged);
        Ok(())
    }

    /// Writes every staged, non-skipped value into `dest` and records the
    /// field as committed. Returns the number of fields written.
    ///
    /// Committing again without an intervening pass writes the same values.
    pub fn commit(&mut self, dest: &mut T) -> usize {
        let mut written = 0usize;
        for descriptor in self.fields.values() {
            if descriptor.is_skipped() {
                continue;
            }
            let value = match descriptor.staged() {
                Some(value) => value,
                None => continue,
            };
            let writer = match self.writers.get(descriptor.name()) {
                Some(writer) => writer,
                None => continue,
            };

            if writer.write(dest, value) {
                self.committed.insert(descriptor.name().to_string());
                written += 1;
            } else {
                tracing::warn!(
                    "Not committing field '{}': staged {} does not match declared {}",
                    descriptor.name(),
                    value.kind(),
                    descriptor.kind()
                );
            }
        }

        tracing::debug!(
            "Committed {} fields ({} committed in total)",
            written,
            self.committed.len()
        );
        written
    }

    /// Returns the descriptor for the field `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Iterates over all descriptors in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Returns `true` if `name` has been written by a commit.
    pub fn is_committed(&self, name: &str) -> bool {
        self.committed.contains(name)
    }

    /// Returns the committed-set.
    pub fn committed(&self) -> &HashSet<String> {
        &self.committed
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the catalog has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for FieldCatalog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCatalog")
            .field("fields", &self.fields)
            .field("committed", &self.committed)
            .finish()
    }
}
