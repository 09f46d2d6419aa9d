//! Scalar-or-list matching for `contains` filters.
//!
//! Both the field value ("source") and the needle may be a scalar or a list.
//! Element comparison uses [`equals`], so `"3"` matches `3`.

use crate::compare::equals;
use crate::value::Value;

/// Returns `true` if any needle element equals any source element.
///
/// When the source is a scalar and the needle a list, only the first needle
/// element is consulted.
pub fn match_any(source: &Value, needle: &Value) -> bool {
    match (source, needle) {
        (Value::List(items), Value::List(needles)) => items
            .iter()
            .any(|item| needles.iter().any(|wanted| equals(item, wanted))),
        (Value::List(items), _) => items.iter().any(|item| equals(item, needle)),
        (_, Value::List(needles)) => needles
            .first()
            .is_some_and(|wanted| equals(source, wanted)),
        _ => equals(source, needle),
    }
}

/// Returns `true` if every needle element is found in the source.
///
/// An empty needle list matches everything.
pub fn match_all(source: &Value, needle: &Value) -> bool {
    match (source, needle) {
        (Value::List(items), Value::List(needles)) => needles
            .iter()
            .all(|wanted| items.iter().any(|item| equals(item, wanted))),
        (_, Value::List(needles)) => needles.iter().all(|wanted| equals(source, wanted)),
        (Value::List(items), _) => items.iter().any(|item| equals(item, needle)),
        _ => equals(source, needle),
    }
}
