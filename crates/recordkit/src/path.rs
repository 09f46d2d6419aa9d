//! Path addressing through nested records.
//!
//! A [`Path`] is an ordered list of keys: the first key is looked up in the
//! record, the second in the value found there, and so on. Two resolution
//! strategies exist:
//!
//! - [`crawl`] walks container-native members and remembers the owning
//!   container of the final key, which is what in-place [`set_field`] and
//!   [`remove_field`] need. It refuses to descend into introspected objects.
//! - [`lookup`] walks a chain of [`to_mapping`] views, so it also reaches
//!   members of shapes that `crawl` cannot traverse. Filters, sort keys and
//!   value extraction use it.
//!
//! Neither ever fails: an unresolvable path is `None`.

use std::borrow::Cow;
use std::fmt;

use crate::error::{RecordError, Result};
use crate::shape::{classify, legacy_data, to_mapping, to_mapping_mut, RecordShape};
use crate::traits::RecordLike;
use crate::value::{Key, Value};

/// Ordered list of keys addressing a nested field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Key>);

impl Path {
    /// Creates a path from keys.
    pub fn new(keys: Vec<Key>) -> Self {
        Path(keys)
    }

    /// Single-key path.
    pub fn key(key: impl Into<Key>) -> Self {
        Path(vec![key.into()])
    }

    /// Splits `"a.b.2"` on dots. Segments that parse as integers become
    /// index keys.
    pub fn dotted(path: &str) -> Self {
        Path(
            path.split('.')
                .map(|segment| match segment.parse::<i64>() {
                    Ok(index) => Key::Index(index),
                    Err(_) => Key::from(segment),
                })
                .collect(),
        )
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `key` appended.
    pub fn join(&self, key: impl Into<Key>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Path(keys)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Path(vec![key])
    }
}

impl From<&str> for Path {
    fn from(name: &str) -> Self {
        Path::key(name)
    }
}

impl From<String> for Path {
    fn from(name: String) -> Self {
        Path::key(name)
    }
}

impl From<i64> for Path {
    fn from(index: i64) -> Self {
        Path::key(index)
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        Path::key(index)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl<K: Into<Key>> From<Vec<K>> for Path {
    fn from(keys: Vec<K>) -> Self {
        Path(keys.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for Path {
    fn from(keys: [K; N]) -> Self {
        Path(keys.into_iter().map(Into::into).collect())
    }
}

/// Result of a successful [`crawl`].
#[derive(Debug, Clone)]
pub struct Crawl<'a> {
    /// Container holding the final key.
    pub owner: &'a Value,
    /// Final key of the path.
    pub key: Key,
    /// Value stored under `key`.
    pub value: &'a Value,
}

fn position(key: &Key, len: usize) -> Option<usize> {
    let index = usize::try_from(key.as_index()?).ok()?;
    (index < len).then_some(index)
}

fn object_of(node: &Value) -> Option<&dyn RecordLike> {
    match node {
        Value::Object(object) => Some(object.as_ref()),
        _ => None,
    }
}

/// One container-native step of a crawl.
fn child<'a>(node: &'a Value, key: &Key) -> Option<&'a Value> {
    match classify(node) {
        RecordShape::Mapping => match node {
            Value::Map(map) => map.get(key),
            _ => object_of(node)?.as_mapping()?.get(key),
        },
        RecordShape::Sequence => {
            let items = node.as_list()?;
            items.get(position(key, items.len())?)
        }
        RecordShape::LegacyDocument => legacy_data(object_of(node)?)?.get(key),
        RecordShape::Attributed => object_of(node)?.attributes()?.get(key),
        RecordShape::NearMapping => {
            if !to_mapping(node).contains_key(key) {
                return None;
            }
            object_of(node)?.subscript(key)
        }
        RecordShape::AttributedObject | RecordShape::Unknown => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, key: &Key) -> Option<&'a mut Value> {
    let shape = classify(node);
    if shape == RecordShape::NearMapping && !to_mapping(node).contains_key(key) {
        return None;
    }
    match shape {
        RecordShape::Mapping | RecordShape::LegacyDocument | RecordShape::Attributed => {
            to_mapping_mut(node)?.get_mut(key)
        }
        RecordShape::Sequence => match node {
            Value::List(items) => {
                let index = position(key, items.len())?;
                items.get_mut(index)
            }
            _ => None,
        },
        RecordShape::NearMapping => match node {
            Value::Object(object) => object.subscript_mut(key),
            _ => None,
        },
        RecordShape::AttributedObject | RecordShape::Unknown => None,
    }
}

/// Resolves `path` through container-native members.
///
/// Returns the container owning the final key together with the key and its
/// value, or `None` as soon as a step fails. An empty path never resolves.
pub fn crawl<'a>(record: &'a Value, path: &Path) -> Option<Crawl<'a>> {
    let last = path.keys().last()?;
    let mut owner = record;
    let mut current = record;
    for key in path.keys() {
        owner = current;
        current = child(current, key)?;
    }
    Some(Crawl {
        owner,
        key: last.clone(),
        value: current,
    })
}

/// Returns `true` if `path` crawls to a value.
pub fn has_field(record: &Value, path: &Path) -> bool {
    crawl(record, path).is_some()
}

/// Value at `path`, if it crawls.
pub fn get_field<'a>(record: &'a Value, path: &Path) -> Option<&'a Value> {
    crawl(record, path).map(|found| found.value)
}

/// Resolves `path` through a chain of normalized mapping views.
///
/// Borrows from the record wherever the views alias it and clones the
/// reached value otherwise.
pub fn lookup<'a>(record: &'a Value, path: &Path) -> Option<Cow<'a, Value>> {
    if path.is_empty() {
        return None;
    }
    let mut current = Cow::Borrowed(record);
    for key in path.keys() {
        current = match current {
            Cow::Borrowed(node) => match to_mapping(node) {
                Cow::Borrowed(map) => Cow::Borrowed(map.get(key)?),
                Cow::Owned(mut map) => Cow::Owned(map.remove(key)?),
            },
            Cow::Owned(node) => Cow::Owned(to_mapping(&node).get(key)?.clone()),
        };
    }
    Some(current)
}

/// Value at `path`, with `Null` standing in for an absent field.
pub fn get_value(record: &Value, path: &Path) -> Value {
    lookup(record, path).map_or(Value::Null, Cow::into_owned)
}

fn locate_owner_mut<'a, 'p>(record: &'a mut Value, path: &'p Path) -> Option<(&'a mut Value, &'p Key)> {
    let (last, prefix) = path.keys().split_last()?;
    let mut owner = record;
    for key in prefix {
        owner = child_mut(owner, key)?;
    }
    child(owner, last)?;
    Some((owner, last))
}

/// Overwrites the value at `path` if it crawls. Never creates keys.
///
/// Returns `true` when the value was written.
pub fn set_field(record: &mut Value, path: &Path, value: Value) -> bool {
    match locate_owner_mut(record, path) {
        Some((owner, key)) => assign(owner, key.clone(), value).is_ok(),
        None => false,
    }
}

/// Deletes the value at `path` if it crawls. Removing a sequence element
/// shifts the later positions down.
///
/// Returns `true` when something was removed.
pub fn remove_field(record: &mut Value, path: &Path) -> bool {
    match locate_owner_mut(record, path) {
        Some((owner, key)) => matches!(detach(owner, key), Ok(Some(_))),
        None => false,
    }
}

/// Assigns `value` at `path`, creating the final key when missing.
///
/// Every key but the last must already crawl. For a single-key path the
/// record itself receives the key.
pub fn insert_field(record: &mut Value, path: &Path, value: Value) -> Result<()> {
    let Some((last, prefix)) = path.keys().split_last() else {
        return Err(RecordError::rejected("path", "", "empty path"));
    };
    let mut owner = record;
    for key in prefix {
        owner = child_mut(owner, key)
            .ok_or_else(|| RecordError::rejected("path", key, "parent not found"))?;
    }
    assign(owner, last.clone(), value)
}

fn assign(owner: &mut Value, key: Key, value: Value) -> Result<()> {
    if let Some(map) = to_mapping_mut(owner) {
        map.insert(key, value);
        return Ok(());
    }
    let shape = classify(owner);
    match owner {
        Value::List(items) => match position(&key, items.len()) {
            Some(index) => {
                items[index] = value;
                Ok(())
            }
            None => Err(RecordError::rejected(
                shape.as_str(),
                key,
                "index out of range",
            )),
        },
        Value::Object(object) if matches!(shape, RecordShape::NearMapping | RecordShape::Unknown) => {
            if let Some(slot) = object.subscript_mut(&key) {
                *slot = value;
                return Ok(());
            }
            object.subscript_set(key, value)
        }
        _ => Err(RecordError::rejected(
            shape.as_str(),
            key,
            "item assignment not supported",
        )),
    }
}

fn detach(owner: &mut Value, key: &Key) -> Result<Option<Value>> {
    if let Some(map) = to_mapping_mut(owner) {
        return Ok(map.remove(key));
    }
    let shape = classify(owner);
    match owner {
        Value::List(items) => Ok(position(key, items.len()).map(|index| items.remove(index))),
        Value::Object(object) if matches!(shape, RecordShape::NearMapping | RecordShape::Unknown) => {
            object.subscript_remove(key)
        }
        _ => Err(RecordError::rejected(
            shape.as_str(),
            key,
            "item deletion not supported",
        )),
    }
}
