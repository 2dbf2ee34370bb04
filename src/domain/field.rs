// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field table contract and per-field staging slots.
//!
//! A destination record describes its bindable fields with a static table of
//! [`FieldSpec`]s, usually generated by the [`bindable!`](crate::bindable)
//! macro. The catalog turns each spec into a [`FieldDescriptor`] that holds
//! the staged value and skip flag between resolution passes.

use crate::domain::value::{FieldKind, FieldValue};
use std::fmt;

/// Typed writer for one destination field.
///
/// The variant fixes the field's declared kind.
pub enum FieldWriter<T: ?Sized> {
    /// Writes an integer field
    Integer(fn(&mut T, i64)),
    /// Writes a text field
    Text(fn(&mut T, String)),
    /// Writes a boolean field
    Boolean(fn(&mut T, bool)),
    /// A field whose type the engine cannot stage
    Unsupported(&'static str),
}

impl<T: ?Sized> FieldWriter<T> {
    /// Returns the declared kind implied by this writer.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldWriter::Integer(_) => FieldKind::Integer,
            FieldWriter::Text(_) => FieldKind::Text,
            FieldWriter::Boolean(_) => FieldKind::Boolean,
            FieldWriter::Unsupported(name) => FieldKind::Unsupported(*name),
        }
    }

    /// Writes `value` into `dest`. Returns `false` if the value's kind does not
    /// match the writer.
    pub(crate) fn write(&self, dest: &mut T, value: &FieldValue) -> bool {
        match (self, value) {
            (FieldWriter::Integer(set), FieldValue::Integer(n)) => set(dest, *n),
            (FieldWriter::Text(set), FieldValue::Text(s)) => set(dest, s.clone()),
            (FieldWriter::Boolean(set), FieldValue::Boolean(b)) => set(dest, *b),
            _ => return false,
        }
        true
    }
}

impl<T: ?Sized> Clone for FieldWriter<T> {
    fn clone(&self) -> Self {
        match self {
            FieldWriter::Integer(set) => FieldWriter::Integer(*set),
            FieldWriter::Text(set) => FieldWriter::Text(*set),
            FieldWriter::Boolean(set) => FieldWriter::Boolean(*set),
            FieldWriter::Unsupported(name) => FieldWriter::Unsupported(*name),
        }
    }
}

impl<T: ?Sized> fmt::Debug for FieldWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldWriter({})", self.kind())
    }
}

/// Static metadata for one bindable field.
///
/// # Examples
///
/// ```
/// use propbind::domain::{FieldKind, FieldSpec};
///
/// struct Server {
///     port: i64,
/// }
///
/// let spec = FieldSpec::integer("port", "PORT", "8080", |s: &mut Server, v| s.port = v);
/// assert_eq!(spec.kind(), FieldKind::Integer);
/// assert_eq!(spec.key(), "PORT");
/// ```
pub struct FieldSpec<T: ?Sized> {
    name: &'static str,
    key: &'static str,
    default: &'static str,
    writer: FieldWriter<T>,
}

impl<T: ?Sized> FieldSpec<T> {
    /// Creates a spec from its parts.
    pub fn new(
        name: &'static str,
        key: &'static str,
        default: &'static str,
        writer: FieldWriter<T>,
    ) -> Self {
        Self {
            name,
            key,
            default,
            writer,
        }
    }

    /// Creates a spec for an integer field.
    pub fn integer(
        name: &'static str,
        key: &'static str,
        default: &'static str,
        set: fn(&mut T, i64),
    ) -> Self {
        Self::new(name, key, default, FieldWriter::Integer(set))
    }

    /// Creates a spec for a text field.
    pub fn text(
        name: &'static str,
        key: &'static str,
        default: &'static str,
        set: fn(&mut T, String),
    ) -> Self {
        Self::new(name, key, default, FieldWriter::Text(set))
    }

    /// Creates a spec for a boolean field.
    pub fn boolean(
        name: &'static str,
        key: &'static str,
        default: &'static str,
        set: fn(&mut T, bool),
    ) -> Self {
        Self::new(name, key, default, FieldWriter::Boolean(set))
    }

    /// Creates a spec for a field of a type the engine cannot stage.
    ///
    /// Any pass that offers a value for it fails with
    /// [`BindError::UnsupportedType`](crate::domain::BindError::UnsupportedType).
    pub fn unsupported(
        name: &'static str,
        key: &'static str,
        default: &'static str,
        type_name: &'static str,
    ) -> Self {
        Self::new(name, key, default, FieldWriter::Unsupported(type_name))
    }

    /// Returns the field identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the external lookup key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the default literal.
    pub fn default_literal(&self) -> &'static str {
        self.default
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> FieldKind {
        self.writer.kind()
    }

    pub(crate) fn into_parts(self) -> (FieldDescriptor, FieldWriter<T>) {
        let descriptor = FieldDescriptor::new(self.name, self.writer.kind(), self.key, self.default);
        (descriptor, self.writer)
    }
}

impl<T: ?Sized> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("default", &self.default)
            .field("kind", &self.kind())
            .finish()
    }
}

/// A destination record the engine can bind values onto.
///
/// Implement it by hand or with [`bindable!`](crate::bindable).
pub trait Bindable {
    /// Returns the field table. Called once per catalog.
    fn field_specs(&self) -> Vec<FieldSpec<Self>>;
}

/// Catalog entry for one field: metadata plus staging slot and skip flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    key: String,
    default: String,
    staged: Option<FieldValue>,
    skip: bool,
}

impl FieldDescriptor {
    /// Creates an unstaged descriptor.
    ///
    /// Catalogs build their descriptors from a [`FieldSpec`] table; this is
    /// for exercising a [`PropertySource`](crate::ports::PropertySource) on its own.
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        key: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            key: key.into(),
            default: default.into(),
            staged: None,
            skip: false,
        }
    }

    /// Returns the field identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the external lookup key as declared.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the default literal.
    pub fn default_literal(&self) -> &str {
        &self.default
    }

    /// Returns the currently staged value, if any.
    pub fn staged(&self) -> Option<&FieldValue> {
        self.staged.as_ref()
    }

    /// Returns `true` once the field has been excluded from commits.
    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub(crate) fn stage(&mut self, value: FieldValue) {
        self.staged = Some(value);
    }

    pub(crate) fn mark_skipped(&mut self) {
        self.skip = true;
    }
}

/// Implements [`Bindable`] for a struct from a field table.
///
/// Each entry names the struct field, its kind (`integer` for `i64`, `text` for
/// `String`, `boolean` for `bool`), its source key and its default literal. The
/// field name doubles as the field identifier.
///
/// # Examples
///
/// ```
/// use propbind::bindable;
///
/// #[derive(Default)]
/// struct Configuration {
///     option_a: String,
///     option_b: i64,
///     option_c: bool,
/// }
///
/// bindable!(Configuration {
///     option_a: text = ("OPT_A", "unfilled"),
///     option_b: integer = ("OPT_B", "4444"),
///     option_c: boolean = ("OPT_C", "false"),
/// });
/// ```
#[macro_export]
macro_rules! bindable {
    (@spec $ty:ty, $field:ident, integer, $key:expr, $default:expr) => {
        $crate::domain::FieldSpec::integer(
            stringify!($field),
            $key,
            $default,
            |dest: &mut $ty, value: i64| dest.$field = value,
        )
    };
    (@spec $ty:ty, $field:ident, text, $key:expr, $default:expr) => {
        $crate::domain::FieldSpec::text(
            stringify!($field),
            $key,
            $default,
            |dest: &mut $ty, value: ::std::string::String| dest.$field = value,
        )
    };
    (@spec $ty:ty, $field:ident, boolean, $key:expr, $default:expr) => {
        $crate::domain::FieldSpec::boolean(
            stringify!($field),
            $key,
            $default,
            |dest: &mut $ty, value: bool| dest.$field = value,
        )
    };
    ($ty:ty { $($field:ident : $kind:ident = ($key:expr, $default:expr)),* $(,)? }) => {
        impl $crate::domain::Bindable for $ty {
            fn field_specs(&self) -> ::std::vec::Vec<$crate::domain::FieldSpec<Self>> {
                ::std::vec![
                    $($crate::bindable!(@spec $ty, $field, $kind, $key, $default)),*
                ]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Server {
        host: String,
        port: i64,
        tls: bool,
    }

    bindable!(Server {
        host: text = ("HOST", "localhost"),
        port: integer = ("PORT", "8080"),
        tls: boolean = ("TLS", ""),
    });

    #[test]
    fn test_macro_generates_specs() {
        let server = Server::default();
        let specs = server.field_specs();
        assert_eq!(specs.len(), 3);

        assert_eq!(specs[0].name(), "host");
        assert_eq!(specs[0].key(), "HOST");
        assert_eq!(specs[0].default_literal(), "localhost");
        assert_eq!(specs[0].kind(), FieldKind::Text);
        assert_eq!(specs[1].kind(), FieldKind::Integer);
        assert_eq!(specs[2].kind(), FieldKind::Boolean);
        assert_eq!(specs[2].default_literal(), "");
    }

    #[test]
    fn test_writer_sets_field() {
        let mut server = Server::default();
        let specs = server.field_specs();

        assert!(specs[0]
            .writer
            .write(&mut server, &FieldValue::Text("example.org".to_string())));
        assert!(specs[1].writer.write(&mut server, &FieldValue::Integer(443)));
        assert!(specs[2].writer.write(&mut server, &FieldValue::Boolean(true)));

        assert_eq!(server.host, "example.org");
        assert_eq!(server.port, 443);
        assert!(server.tls);
    }

    #[test]
    fn test_writer_rejects_kind_mismatch() {
        let mut server = Server::default();
        let specs = server.field_specs();

        assert!(!specs[1]
            .writer
            .write(&mut server, &FieldValue::Text("443".to_string())));
        assert_eq!(server.port, 0);
    }

    #[test]
    fn test_into_parts_starts_unstaged() {
        let server = Server::default();
        let spec = server.field_specs().remove(1);
        let (descriptor, writer) = spec.into_parts();

        assert_eq!(descriptor.name(), "port");
        assert_eq!(descriptor.kind(), FieldKind::Integer);
        assert!(descriptor.staged().is_none());
        assert!(!descriptor.is_skipped());
        assert_eq!(writer.kind(), FieldKind::Integer);
    }

    #[test]
    fn test_unsupported_spec() {
        let spec: FieldSpec<Server> = FieldSpec::unsupported("ratio", "RATIO", "0.5", "f64");
        assert_eq!(spec.kind(), FieldKind::Unsupported("f64"));
        assert!(!spec.kind().is_supported());
    }
}
