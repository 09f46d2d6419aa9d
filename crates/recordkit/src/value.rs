//! Dynamic value model for records.
//!
//! Records are loosely typed: the same field may hold an integer in one record
//! and a string in the next. [`Value`] is the owned representation of any
//! record or field, [`Key`] addresses a member inside a record, and
//! [`Mapping`] is the uniform key-value view every record shape can be
//! coerced into.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::traits::RecordLike;

/// Key-value view of a record.
pub type Mapping = BTreeMap<Key, Value>;

/// A member key inside a record.
///
/// Sequence positions and integer keys use `Index`; everything else is a
/// `Name`. Keys order with every index before every name, which gives the
/// familiar "numbers first, then alphabetical" column order when rendering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Positional or integer key.
    Index(i64),
    /// Named key.
    Name(String),
}

impl Key {
    /// Returns the name, if this is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Returns the index, if this is a positional key.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Literal form of the key: names are quoted, indices are bare.
    pub fn repr(&self) -> String {
        match self {
            Key::Index(index) => index.to_string(),
            Key::Name(name) => quote_literal(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{}", index),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::Name(name.clone())
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Key::Index(index as i64)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index as i64)
    }
}

/// Numeric view used for cross-type numeric comparison.
///
/// Booleans take part as `0`/`1`, matching the way loosely typed sources
/// treat them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

/// A record or a field value.
///
/// `Map` and `List` are the native container shapes. Caller-defined types
/// that expose members in some other way are carried as `Object` and probed
/// through the [`RecordLike`] trait.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent or null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Binary document-database object identifier.
    #[cfg(feature = "objectid")]
    ObjectId(bson::oid::ObjectId),
    /// Ordered sequence; positions act as keys.
    List(Vec<Value>),
    /// Native key-value mapping.
    Map(Mapping),
    /// Caller-defined record type.
    ///
    /// Objects never compare equal under `==`, not even to a clone of
    /// themselves; equality filters reach them only through their text form.
    Object(Box<dyn RecordLike>),
}

impl Value {
    /// Wraps a caller-defined record type.
    pub fn object(record: impl RecordLike + 'static) -> Self {
        Value::Object(Box::new(record))
    }

    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `List`.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if this is a `Map`.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` for `Int` values (not bools).
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the integer value, if present.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the float value, if present.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the list elements, if present.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the native mapping, if present.
    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric view of bools, integers and floats.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::I64(*b as i64)),
            Value::Int(n) => Some(Number::I64(*n)),
            Value::Float(n) => Some(Number::F64(*n)),
            _ => None,
        }
    }

    /// Runtime type name. Two values with different names are considered
    /// different types by the equality fallback.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            #[cfg(feature = "objectid")]
            Value::ObjectId(_) => "ObjectId",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
            Value::Object(object) => object.type_name(),
        }
    }

    /// Plain string form of the value.
    ///
    /// Strings are returned unquoted; containers use their literal form.
    /// Returns `None` for objects that cannot describe themselves.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            #[cfg(feature = "objectid")]
            Value::ObjectId(oid) => Some(oid.to_hex()),
            Value::Object(object) => object.text(),
            other => Some(other.repr()),
        }
    }

    /// Literal (source-like) form of the value: `'text'`, `42`, `1.5`,
    /// `True`, `None`, `[1, 'a']`, `{'k': 1}`.
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => float_repr(*n),
            Value::Str(s) => quote_literal(s),
            #[cfg(feature = "objectid")]
            Value::ObjectId(oid) => format!("ObjectId('{}')", oid.to_hex()),
            Value::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Map(map) => {
                let inner: Vec<String> = map
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.repr(), value.repr()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
            Value::Object(object) => object
                .text()
                .unwrap_or_else(|| format!("<{} object>", object.type_name())),
        }
    }
}

/// Native equality.
///
/// Numbers compare by value across bool/int/float, containers compare
/// element-wise, and objects never compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            #[cfg(feature = "objectid")]
            (Value::ObjectId(a), Value::ObjectId(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(_), _) | (_, Value::Object(_)) => false,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "{}", self.repr()),
        }
    }
}

fn float_repr(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        // Shortest round-trip digits; exponent form outside 1e-4 <= |n| < 1e16.
        let scientific = format!("{:e}", n);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if n != 0.0 && !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        } else {
            let plain = n.to_string();
            if plain.contains('.') {
                plain
            } else {
                format!("{}.0", plain)
            }
        }
    }
}

/// Quotes a string the way a source literal would: single quotes unless the
/// text contains a single quote and no double quote.
fn quote_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// Conversions from primitive types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "objectid")]
impl From<bson::oid::ObjectId> for Value {
    fn from(oid: bson::oid::ObjectId) -> Self {
        Value::ObjectId(oid)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (Key::Name(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Objects are exported through their normalized mapping; keys become
/// strings and non-finite floats become `null`.
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            #[cfg(feature = "objectid")]
            Value::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => mapping_to_json(map),
            Value::Object(_) => mapping_to_json(&crate::shape::to_mapping(value)),
        }
    }
}

fn mapping_to_json(map: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::from(value)))
            .collect(),
    )
}
