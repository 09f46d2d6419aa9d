//! Comparison operators and the permissive comparison rules.
//!
//! [`test`] is the single predicate behind every value filter. Null is
//! tolerated everywhere: a null field only matches a null value, and a null
//! value never matches a present field. Equality never fails; when the native
//! comparison says "not equal" and the two sides have different runtime
//! types, their string forms are compared instead, so `42` matches `"42"`.

use std::cmp::Ordering;

use crate::error::Result;
use crate::ordering::compare_values;
use crate::value::Value;

/// Comparison operator.
///
/// Discriminants are stable and match the numeric codes callers may persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Operator {
    /// Always matches.
    Noop = -1,
    /// Less than.
    Less = 0,
    /// Less than or equal.
    LessOrEqual = 1,
    /// Equal, with string-form fallback across types.
    Equal = 2,
    /// Greater than or equal.
    GreaterOrEqual = 3,
    /// Greater than.
    Greater = 4,
    /// Not equal, with string-form fallback across types.
    NotEqual = 5,
}

impl Operator {
    /// Numeric code of the operator.
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Operator for a numeric code.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Operator::Noop),
            0 => Some(Operator::Less),
            1 => Some(Operator::LessOrEqual),
            2 => Some(Operator::Equal),
            3 => Some(Operator::GreaterOrEqual),
            4 => Some(Operator::Greater),
            5 => Some(Operator::NotEqual),
            _ => None,
        }
    }

    /// Returns `true` for the four ordering operators, which may fail on
    /// incomparable types.
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            Operator::Less | Operator::LessOrEqual | Operator::GreaterOrEqual | Operator::Greater
        )
    }

    /// Evaluates the operator given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Operator::Noop => true,
            Operator::Less => ordering == Ordering::Less,
            Operator::LessOrEqual => ordering != Ordering::Greater,
            Operator::Equal => ordering == Ordering::Equal,
            Operator::GreaterOrEqual => ordering != Ordering::Less,
            Operator::Greater => ordering == Ordering::Greater,
            Operator::NotEqual => ordering != Ordering::Equal,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Noop => "noop",
            Operator::Less => "lt",
            Operator::LessOrEqual => "lte",
            Operator::Equal => "eq",
            Operator::GreaterOrEqual => "gte",
            Operator::Greater => "gt",
            Operator::NotEqual => "ne",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tests `field <op> value`.
///
/// Only the ordering operators can fail, with
/// [`RecordError::TypeMismatch`](crate::RecordError::TypeMismatch) when the
/// two sides have no common ordering. A NaN on either side makes every
/// ordering operator false.
pub fn test(field: &Value, op: Operator, value: &Value) -> Result<bool> {
    match op {
        Operator::Noop => Ok(true),
        Operator::Equal => Ok(equals(field, value)),
        Operator::NotEqual => Ok(not_equals(field, value)),
        _ => {
            if field.is_null() || value.is_null() {
                return Ok(field.is_null() && value.is_null());
            }
            Ok(compare_values(field, value, op.as_str())?.is_some_and(|ord| op.eval_ordering(ord)))
        }
    }
}

/// Permissive equality, as used by [`Operator::Equal`].
pub fn equals(field: &Value, value: &Value) -> bool {
    if field.is_null() || value.is_null() {
        return field.is_null() && value.is_null();
    }
    let coerced = coerce_identifier(field, value);
    let value = coerced.as_ref().unwrap_or(value);
    if field == value {
        return true;
    }
    if field.type_name() == value.type_name() {
        return false;
    }
    match (field.to_text(), value.to_text()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Permissive inequality, as used by [`Operator::NotEqual`].
///
/// A null field is "not equal" only to a null value, mirroring the null rule
/// shared by every operator.
pub fn not_equals(field: &Value, value: &Value) -> bool {
    if field.is_null() || value.is_null() {
        return field.is_null() && value.is_null();
    }
    let coerced = coerce_identifier(field, value);
    let value = coerced.as_ref().unwrap_or(value);
    if field == value {
        return false;
    }
    if field.type_name() == value.type_name() {
        return true;
    }
    match (field.to_text(), value.to_text()) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

/// Parses a textual value into an object id when the field holds one.
#[cfg(feature = "objectid")]
fn coerce_identifier(field: &Value, value: &Value) -> Option<Value> {
    match (field, value) {
        (Value::ObjectId(_), Value::Str(text)) => bson::oid::ObjectId::parse_str(text)
            .ok()
            .map(Value::ObjectId),
        _ => None,
    }
}

#[cfg(not(feature = "objectid"))]
fn coerce_identifier(_field: &Value, _value: &Value) -> Option<Value> {
    None
}
