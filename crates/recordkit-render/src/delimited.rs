//! Delimiter-separated rendering.
//!
//! Quoting wraps a field in the quote character and doubles any quote
//! character inside it. A present but empty value in the last column is
//! always quoted, so it cannot be mistaken for a dropped trailing field.

use std::borrow::Borrow;

use log::debug;
use recordkit::{Collection, Key, Mapping, Value};

use crate::error::{RenderError, Result};

/// When fields are wrapped in quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuoteStyle {
    /// Quote every present value.
    Always,
    /// Quote only fields that would otherwise be ambiguous.
    #[default]
    Necessary,
}

/// Options for [`render_delimited`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedOptions {
    pub field_delimiter: String,
    pub line_delimiter: String,
    pub quote: char,
    /// Explicit column order. Defaults to first-seen key order.
    pub key_order: Option<Vec<Key>>,
    /// Write the column names as the first line.
    pub header: bool,
    pub quote_style: QuoteStyle,
    /// Render at most this many rows.
    pub limit: Option<usize>,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        DelimitedOptions {
            field_delimiter: ",".to_string(),
            line_delimiter: "\n".to_string(),
            quote: '"',
            key_order: None,
            header: true,
            quote_style: QuoteStyle::Necessary,
            limit: None,
        }
    }
}

impl DelimitedOptions {
    pub fn new() -> Self {
        DelimitedOptions::default()
    }

    pub fn field_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.field_delimiter = delimiter.into();
        self
    }

    pub fn line_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.line_delimiter = delimiter.into();
        self
    }

    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn key_order<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.key_order = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    pub fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.field_delimiter.is_empty() || self.line_delimiter.is_empty() {
            return Err(RenderError::InvalidOptions(
                "delimiters must not be empty".to_string(),
            ));
        }
        if self.field_delimiter.contains(self.quote) || self.line_delimiter.contains(self.quote) {
            return Err(RenderError::InvalidOptions(format!(
                "quote character {:?} appears in a delimiter",
                self.quote
            )));
        }
        Ok(())
    }
}

/// Renders rows as delimiter-separated values, one line per row, each line
/// terminated by the line delimiter.
///
/// Strings are written as their raw text, other values as their display
/// form, and null or missing values as an empty field.
pub fn render_delimited<R: Borrow<Mapping>>(rows: &[R], options: &DelimitedOptions) -> Result<String> {
    options.validate()?;
    let count = options.limit.map_or(rows.len(), |n| n.min(rows.len()));
    let rows: Vec<&Mapping> = rows[..count].iter().map(Borrow::<Mapping>::borrow).collect();

    let columns = match &options.key_order {
        Some(order) => order.clone(),
        None => first_seen_keys(&rows),
    };

    let mut out = String::new();
    if options.header {
        let names: Vec<Field> = columns
            .iter()
            .map(|key| Field::Present(key.to_string()))
            .collect();
        write_line(&mut out, &names, options);
    }
    for row in &rows {
        let fields: Vec<Field> = columns.iter().map(|key| field(row.get(key))).collect();
        write_line(&mut out, &fields, options);
    }

    debug!(
        "render_delimited: {} rows, {} columns",
        rows.len(),
        columns.len()
    );
    Ok(out)
}

/// Renders the normalized rows of a collection.
pub fn collection_delimited(collection: &Collection, options: &DelimitedOptions) -> Result<String> {
    render_delimited(&collection.to_normalized_list(options.limit), options)
}

fn first_seen_keys(rows: &[&Mapping]) -> Vec<Key> {
    let mut keys: Vec<Key> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

enum Field {
    Present(String),
    Empty,
}

fn field(value: Option<&Value>) -> Field {
    match value {
        None | Some(Value::Null) => Field::Empty,
        Some(Value::Str(text)) => Field::Present(text.clone()),
        Some(other) => Field::Present(other.to_string()),
    }
}

fn write_line(out: &mut String, fields: &[Field], options: &DelimitedOptions) {
    let last = fields.len().saturating_sub(1);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(&options.field_delimiter);
        }
        match field {
            Field::Empty => {}
            Field::Present(text) => {
                if needs_quotes(text, i == last, options) {
                    quote_into(out, text, options.quote);
                } else {
                    out.push_str(text);
                }
            }
        }
    }
    out.push_str(&options.line_delimiter);
}

fn needs_quotes(text: &str, trailing: bool, options: &DelimitedOptions) -> bool {
    match options.quote_style {
        QuoteStyle::Always => true,
        QuoteStyle::Necessary => {
            (trailing && text.is_empty())
                || text.contains(options.quote)
                || text.contains(options.field_delimiter.as_str())
                || text.contains(options.line_delimiter.as_str())
                || text.contains(['\n', '\r'])
        }
    }
}

fn quote_into(out: &mut String, text: &str, quote: char) {
    out.push(quote);
    for c in text.chars() {
        out.push(c);
        if c == quote {
            out.push(c);
        }
    }
    out.push(quote);
}
