//! Text renderers for recordkit collections.
//!
//! Both renderers work on normalized rows, the key-value views produced by
//! [`Collection::to_normalized_list`](recordkit::Collection::to_normalized_list),
//! and never look at raw record shapes.
//!
//! - [`render_text`] prints an aligned, human readable block with columns in
//!   key order.
//! - [`render_delimited`] prints delimiter-separated values with a
//!   configurable quoting convention.
//!
//! # Example
//!
//! ```rust
//! use recordkit::{Collection, Value};
//! use recordkit_render::{collection_text, TextOptions};
//! use serde_json::json;
//!
//! let people = Collection::from(vec![
//!     Value::from(json!({"name": "Jim", "age": 3})),
//!     Value::from(json!({"name": "Larry", "age": 30})),
//! ]);
//!
//! let text = collection_text(&people, &TextOptions::default());
//! assert_eq!(
//!     text,
//!     "[\n    {age:  3, name: 'Jim'  },\n    {age: 30, name: 'Larry'}\n]"
//! );
//! ```

mod delimited;
mod error;
mod text;

pub use delimited::{collection_delimited, render_delimited, DelimitedOptions, QuoteStyle};
pub use error::{RenderError, Result};
pub use text::{collection_text, render_text, TextOptions};
