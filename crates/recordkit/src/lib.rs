//! Recordkit - fluent filter, sort and mutate pipeline over heterogeneous
//! in-memory records.
//!
//! Records can be native maps, lists addressed by position, or caller-defined
//! types exposing their members through [`RecordLike`]. A [`Collection`]
//! wraps a list of them and supports:
//!
//! - Nested field addressing with [`Path`]s
//! - Null-tolerant comparisons with string-form fallback for equality
//! - Membership tests against scalar-or-list needles
//! - Stable multi-key sorting with configurable placement of missing values
//! - Bulk key insertion, removal, renumbering and upsert
//! - Origin tracking: every record remembers its position in the input
//!
//! # Quick Start
//!
//! ```rust
//! use recordkit::{Collection, Pick, SortOptions, Value};
//! use serde_json::json;
//!
//! let mut people = Collection::from(vec![
//!     Value::from(json!({"name": "Jim", "age": 18, "income": 93000})),
//!     Value::from(json!({"name": "Larry", "age": 18})),
//!     Value::from(json!({"name": "Joe", "age": 20, "income": 15000})),
//!     Value::from(json!({"name": "Bill", "age": 19, "income": 29000})),
//! ]);
//!
//! people
//!     .has_value("income")
//!     .sort_with(["income"], SortOptions::new().reverse())?;
//!
//! assert_eq!(people.to_origin_list(None), &[0, 3, 2]);
//! assert_eq!(
//!     people.value_of("name", Pick::First).map(|v| v.into_owned()),
//!     Some(Value::from("Jim"))
//! );
//! # Ok::<(), recordkit::RecordError>(())
//! ```
//!
//! # Comparison Semantics
//!
//! | Case | Result |
//! |------|--------|
//! | field null | matches only a null value |
//! | value null, field present | no match |
//! | `eq` / `ne`, different types | string forms compared |
//! | ordering, incomparable types | [`RecordError::TypeMismatch`] |
//! | ordering, NaN | no match |

mod collection;
mod compare;
mod error;
mod matcher;
mod ordering;
mod path;
mod shape;
mod traits;
mod value;

// Re-export public API
pub use collection::{Collection, ContainsOptions, Missing, Pick, RenumberOptions, SortOptions};
pub use compare::{equals, not_equals, test, Operator};
pub use error::{RecordError, Result};
pub use matcher::{match_all, match_any};
pub use ordering::{compare_sort_keys, compare_values, Dir};
pub use path::{
    crawl, get_field, get_value, has_field, insert_field, lookup, remove_field, set_field, Crawl,
    Path,
};
pub use shape::{classify, to_mapping, to_mapping_mut, RecordShape, LEGACY_DATA_KEY};
pub use traits::{RecordLike, LEGACY_DOCUMENT_FRAMEWORK};
pub use value::{Key, Mapping, Number, Value};
