//! Capability trait for caller-defined record types.
//!
//! Native maps and lists are handled directly by [`Value`]. Anything else is
//! wrapped in [`Value::Object`] and exposes its members through
//! [`RecordLike`]. Every method except [`RecordLike::clone_record`] has a
//! default, so a type only implements the capabilities it actually has; the
//! shape classifier in [`crate::shape`] decides how to treat it from which
//! capabilities answer.

use std::fmt;

use crate::error::{RecordError, Result};
use crate::value::{Key, Mapping, Value};

/// Framework marker carried by legacy document-database records.
pub const LEGACY_DOCUMENT_FRAMEWORK: &str = "mongoengine.base";

/// Trait for record types that are not native maps or lists.
///
/// # Capabilities
///
/// - **Full mapping**: return `Some` from [`as_mapping`](Self::as_mapping).
///   Subscript, enumeration, insertion and deletion all follow from it.
/// - **Near mapping**: override [`subscript_keys`](Self::subscript_keys) and
///   [`subscript`](Self::subscript) without exposing a mapping.
/// - **Attribute table**: return `Some` from
///   [`attributes`](Self::attributes). Combined with a
///   [`framework`](Self::framework) marker containing
///   [`LEGACY_DOCUMENT_FRAMEWORK`] and a `_data` mapping attribute, the record
///   is treated as a legacy document.
/// - **Introspectable members**: override [`members`](Self::members).
///
/// # Example
///
/// ```
/// use recordkit::{Key, Mapping, RecordLike, Value};
///
/// #[derive(Debug, Clone, Default)]
/// struct Settings {
///     table: Mapping,
/// }
///
/// impl RecordLike for Settings {
///     fn type_name(&self) -> &'static str {
///         "Settings"
///     }
///
///     fn clone_record(&self) -> Box<dyn RecordLike> {
///         Box::new(self.clone())
///     }
///
///     fn as_mapping(&self) -> Option<&Mapping> {
///         Some(&self.table)
///     }
///
///     fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
///         Some(&mut self.table)
///     }
/// }
///
/// let mut settings = Settings::default();
/// settings.table.insert(Key::from("theme"), Value::from("dark"));
/// let record = Value::object(settings);
/// assert_eq!(record.type_name(), "Settings");
/// ```
pub trait RecordLike: fmt::Debug {
    /// Runtime type name, used by the equality fallback and in errors.
    fn type_name(&self) -> &'static str {
        "object"
    }

    /// Clones the record behind a fresh box.
    fn clone_record(&self) -> Box<dyn RecordLike>;

    /// Full mapping view, if the type is a complete key-value container.
    fn as_mapping(&self) -> Option<&Mapping> {
        None
    }

    /// Mutable full mapping view.
    fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        None
    }

    /// Keys reachable through subscript, in iteration order.
    ///
    /// `None` means the type does not support enumeration at all.
    fn subscript_keys(&self) -> Option<Vec<Key>> {
        self.as_mapping().map(|map| map.keys().cloned().collect())
    }

    /// Reads one member by key.
    fn subscript(&self, key: &Key) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Mutable access to one member by key.
    fn subscript_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.as_mapping_mut().and_then(|map| map.get_mut(key))
    }

    /// Assigns a member, creating it when missing.
    fn subscript_set(&mut self, key: Key, value: Value) -> Result<()> {
        let name = self.type_name();
        match self.as_mapping_mut() {
            Some(map) => {
                map.insert(key, value);
                Ok(())
            }
            None => Err(RecordError::rejected(
                name,
                key,
                "item assignment not supported",
            )),
        }
    }

    /// Removes a member, returning the old value if it existed.
    fn subscript_remove(&mut self, key: &Key) -> Result<Option<Value>> {
        let name = self.type_name();
        match self.as_mapping_mut() {
            Some(map) => Ok(map.remove(key)),
            None => Err(RecordError::rejected(
                name,
                key,
                "item deletion not supported",
            )),
        }
    }

    /// Attribute table, if the type keeps its members in one.
    fn attributes(&self) -> Option<&Mapping> {
        None
    }

    /// Mutable attribute table.
    fn attributes_mut(&mut self) -> Option<&mut Mapping> {
        None
    }

    /// Framework the type was defined by (module path of its base class).
    fn framework(&self) -> Option<&str> {
        None
    }

    /// Introspected members for types without an attribute table.
    fn members(&self) -> Vec<(Key, Value)> {
        Vec::new()
    }

    /// Human readable form. `None` means the type cannot describe itself.
    fn text(&self) -> Option<String> {
        None
    }
}

impl Clone for Box<dyn RecordLike> {
    fn clone(&self) -> Self {
        self.clone_record()
    }
}
