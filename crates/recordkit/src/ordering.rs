//! Native ordering of values and sort-key comparison.
//!
//! Provides [`Dir`] for sort direction, [`compare_values`] for the ordering
//! operators, and the multi-key comparison used by
//! [`Collection::sort_with`](crate::Collection::sort_with).

use std::cmp::Ordering;

use crate::error::{RecordError, Result};
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// `Desc` swaps `Less` and `Greater`; `Equal` is never flipped, which is
    /// what keeps descending sorts stable.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orders two values natively.
///
/// Numbers (bool, int, float) compare numerically, strings lexically, lists
/// element by element and object ids by their bytes. Returns `Ok(None)` when
/// a NaN is involved and [`RecordError::TypeMismatch`] for incomparable
/// types; `op` names the operation in that error.
pub fn compare_values(a: &Value, b: &Value, op: &'static str) -> Result<Option<Ordering>> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Some(x.cmp(y))),
        (Value::List(x), Value::List(y)) => compare_lists(x, y, op),
        (Value::Null, Value::Null) => Ok(Some(Ordering::Equal)),
        #[cfg(feature = "objectid")]
        (Value::ObjectId(x), Value::ObjectId(y)) => Ok(Some(x.bytes().cmp(&y.bytes()))),
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => Ok(x.compare(y)),
            _ => Err(RecordError::type_mismatch(op, a.type_name(), b.type_name())),
        },
    }
}

fn compare_lists(a: &[Value], b: &[Value], op: &'static str) -> Result<Option<Ordering>> {
    for (x, y) in a.iter().zip(b) {
        if x != y {
            return compare_values(x, y, op);
        }
    }
    Ok(Some(a.len().cmp(&b.len())))
}

/// Compares two rows of sort keys, first key first.
///
/// `None` marks a missing key. Missing sorts before present values unless
/// `none_greater` is set. Values that tie (including NaN) fall through to the
/// next key.
pub fn compare_sort_keys(
    a: &[Option<Value>],
    b: &[Option<Value>],
    none_greater: bool,
) -> Result<Ordering> {
    let missing = if none_greater {
        Ordering::Greater
    } else {
        Ordering::Less
    };
    for (x, y) in a.iter().zip(b) {
        let ordering = match (x, y) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => missing,
            (Some(_), None) => missing.reverse(),
            (Some(x), Some(y)) => compare_values(x, y, "sort")?.unwrap_or(Ordering::Equal),
        };
        if ordering != Ordering::Equal {
            return Ok(ordering);
        }
    }
    Ok(Ordering::Equal)
}
