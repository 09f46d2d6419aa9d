//! Record shape detection and normalization.
//!
//! Every record is classified once per access into a [`RecordShape`]; the
//! shape decides how members are read, written and enumerated.
//!
//! Detection order:
//!
//! 1. Records supporting subscript whose first enumerated key reads back are
//!    [`Mapping`](RecordShape::Mapping) when they expose the full mapping
//!    capability set, otherwise [`NearMapping`](RecordShape::NearMapping).
//!    Native lists are always [`Sequence`](RecordShape::Sequence).
//! 2. Records from the legacy document framework with a `_data` mapping
//!    attribute are [`LegacyDocument`](RecordShape::LegacyDocument).
//! 3. Records with an attribute table are
//!    [`Attributed`](RecordShape::Attributed).
//! 4. Records with introspectable members are
//!    [`AttributedObject`](RecordShape::AttributedObject).
//! 5. Everything else is [`Unknown`](RecordShape::Unknown).
//!
//! Native maps are always mappings, even when empty. Caller objects with no
//! enumerable keys fail the probe in step 1 and fall through.

use std::borrow::Cow;

use crate::traits::{RecordLike, LEGACY_DOCUMENT_FRAMEWORK};
use crate::value::{Key, Mapping, Value};

/// Attribute holding the payload of a legacy document.
pub const LEGACY_DATA_KEY: &str = "_data";

/// How a record exposes its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordShape {
    /// Full key-value container.
    Mapping,
    /// Positional container; indices are keys.
    Sequence,
    /// Subscriptable and enumerable, but not a full mapping.
    NearMapping,
    /// Document-database record with its payload in `_data`.
    LegacyDocument,
    /// Plain object with an attribute table.
    Attributed,
    /// Object whose members are only discoverable by introspection.
    AttributedObject,
    /// Nothing recognizable; normalizes to an empty mapping.
    Unknown,
}

impl RecordShape {
    /// Returns the display name of this shape.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordShape::Mapping => "mapping",
            RecordShape::Sequence => "sequence",
            RecordShape::NearMapping => "near-mapping",
            RecordShape::LegacyDocument => "legacy-document",
            RecordShape::Attributed => "attributed",
            RecordShape::AttributedObject => "attributed-object",
            RecordShape::Unknown => "unknown",
        }
    }

    /// Returns `true` when normalization hands out the record's own storage,
    /// so writes through the normalized view reach the record.
    pub fn is_aliased(self) -> bool {
        matches!(
            self,
            RecordShape::Mapping | RecordShape::LegacyDocument | RecordShape::Attributed
        )
    }
}

impl std::fmt::Display for RecordShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a record.
pub fn classify(value: &Value) -> RecordShape {
    match value {
        Value::Map(_) => RecordShape::Mapping,
        Value::List(_) => RecordShape::Sequence,
        Value::Object(object) => classify_object(object.as_ref()),
        _ => RecordShape::Unknown,
    }
}

fn classify_object(object: &dyn RecordLike) -> RecordShape {
    if probe_subscript(object) {
        return if object.as_mapping().is_some() {
            RecordShape::Mapping
        } else {
            RecordShape::NearMapping
        };
    }
    if legacy_data(object).is_some() {
        return RecordShape::LegacyDocument;
    }
    if object.attributes().is_some() {
        return RecordShape::Attributed;
    }
    if !object.members().is_empty() {
        return RecordShape::AttributedObject;
    }
    RecordShape::Unknown
}

fn probe_subscript(object: &dyn RecordLike) -> bool {
    object
        .subscript_keys()
        .and_then(|keys| keys.into_iter().next())
        .is_some_and(|first| object.subscript(&first).is_some())
}

fn is_legacy(object: &dyn RecordLike) -> bool {
    object
        .framework()
        .is_some_and(|framework| framework.contains(LEGACY_DOCUMENT_FRAMEWORK))
}

pub(crate) fn legacy_data(object: &dyn RecordLike) -> Option<&Mapping> {
    if !is_legacy(object) {
        return None;
    }
    match object.attributes()?.get(&Key::from(LEGACY_DATA_KEY))? {
        Value::Map(data) => Some(data),
        _ => None,
    }
}

fn legacy_data_mut(object: &mut dyn RecordLike) -> Option<&mut Mapping> {
    if !is_legacy(object) {
        return None;
    }
    match object.attributes_mut()?.get_mut(&Key::from(LEGACY_DATA_KEY))? {
        Value::Map(data) => Some(data),
        _ => None,
    }
}

/// Key-value view of any record.
///
/// Mappings, legacy documents and attributed objects are borrowed as-is.
/// Sequences map positions to elements, near-mappings and introspected
/// objects are materialized into a fresh mapping, and unknown values yield an
/// empty one.
pub fn to_mapping(value: &Value) -> Cow<'_, Mapping> {
    match value {
        Value::Map(map) => Cow::Borrowed(map),
        Value::List(items) => Cow::Owned(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| (Key::from(index), item.clone()))
                .collect(),
        ),
        Value::Object(object) => object_mapping(object.as_ref()),
        _ => Cow::Owned(Mapping::new()),
    }
}

fn object_mapping(object: &dyn RecordLike) -> Cow<'_, Mapping> {
    match classify_object(object) {
        RecordShape::Mapping => object
            .as_mapping()
            .map_or_else(|| Cow::Owned(Mapping::new()), Cow::Borrowed),
        RecordShape::LegacyDocument => {
            legacy_data(object).map_or_else(|| Cow::Owned(Mapping::new()), Cow::Borrowed)
        }
        RecordShape::Attributed => object
            .attributes()
            .map_or_else(|| Cow::Owned(Mapping::new()), Cow::Borrowed),
        RecordShape::NearMapping => Cow::Owned(
            object
                .subscript_keys()
                .unwrap_or_default()
                .into_iter()
                .filter_map(|key| {
                    let value = object.subscript(&key)?.clone();
                    Some((key, value))
                })
                .collect(),
        ),
        RecordShape::AttributedObject => Cow::Owned(object.members().into_iter().collect()),
        RecordShape::Sequence | RecordShape::Unknown => Cow::Owned(Mapping::new()),
    }
}

/// Mutable key-value view, for shapes whose normalized view is their own
/// storage. Returns `None` for every materialized shape.
pub fn to_mapping_mut(value: &mut Value) -> Option<&mut Mapping> {
    let shape = classify(value);
    match value {
        Value::Map(map) => Some(map),
        Value::Object(object) => match shape {
            RecordShape::Mapping => object.as_mapping_mut(),
            RecordShape::LegacyDocument => legacy_data_mut(object.as_mut()),
            RecordShape::Attributed => object.attributes_mut(),
            _ => None,
        },
        _ => None,
    }
}
