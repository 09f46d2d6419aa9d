//! Aligned, human readable rendering.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use log::debug;
use recordkit::{Collection, Key, Mapping, Value};
use unicode_width::UnicodeWidthStr;

const MISSING: &str = "None";

/// Options for [`render_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions {
    /// Render at most this many rows.
    pub limit: Option<usize>,
    /// Leave out the surrounding `[` and `]` lines and the row indent.
    pub omit_brackets: bool,
    /// Quote keys so each row reads as a source literal.
    pub literal: bool,
    /// Skip keys a row lacks instead of printing `None`.
    pub omit_missing: bool,
}

impl TextOptions {
    pub fn new() -> Self {
        TextOptions::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn omit_brackets(mut self) -> Self {
        self.omit_brackets = true;
        self
    }

    pub fn literal(mut self) -> Self {
        self.literal = true;
        self
    }

    pub fn omit_missing(mut self) -> Self {
        self.omit_missing = true;
        self
    }
}

/// Renders rows one per line with every column padded to a common width.
///
/// Columns appear in key order. Integers are right-aligned inside their
/// column; every other value is left-aligned.
///
/// ```text
/// [
///     {age:  3, income: 93000, name: 'Jim'  },
///     {age:  3, income: None , name: 'Larry'}
/// ]
/// ```
pub fn render_text<R: Borrow<Mapping>>(rows: &[R], options: &TextOptions) -> String {
    let count = options.limit.map_or(rows.len(), |n| n.min(rows.len()));
    let rows: Vec<&Mapping> = rows[..count].iter().map(Borrow::<Mapping>::borrow).collect();
    let widths = column_widths(&rows, options.omit_missing);

    let indent = if options.omit_brackets { "" } else { "    " };
    let body: Vec<String> = rows
        .iter()
        .map(|row| format!("{}{{{}}}", indent, render_row(row, &widths, options)))
        .collect();

    debug!("render_text: {} rows, {} columns", body.len(), widths.len());

    let mut out = String::new();
    if !options.omit_brackets {
        out.push_str("[\n");
    }
    out.push_str(&body.join(",\n"));
    if !options.omit_brackets {
        if !body.is_empty() {
            out.push('\n');
        }
        out.push(']');
    }
    out
}

/// Renders the normalized rows of a collection.
pub fn collection_text(collection: &Collection, options: &TextOptions) -> String {
    render_text(&collection.to_normalized_list(options.limit), options)
}

fn column_widths(rows: &[&Mapping], omit_missing: bool) -> BTreeMap<Key, usize> {
    let mut widths: BTreeMap<Key, usize> = BTreeMap::new();
    for row in rows {
        for key in row.keys() {
            widths.entry(key.clone()).or_insert(0);
        }
    }
    for row in rows {
        for (key, width) in widths.iter_mut() {
            let needed = match row.get(key) {
                Some(value) => value.repr().width(),
                None if omit_missing => 0,
                None => MISSING.len(),
            };
            *width = (*width).max(needed);
        }
    }
    widths
}

fn render_row(row: &Mapping, widths: &BTreeMap<Key, usize>, options: &TextOptions) -> String {
    let mut cells = Vec::with_capacity(widths.len());
    for (key, &width) in widths {
        let value = match row.get(key) {
            Some(value) => render_value(value, width),
            None if options.omit_missing => continue,
            None => pad_right(MISSING, width),
        };
        let label = if options.literal {
            key.repr()
        } else {
            key.to_string()
        };
        cells.push(format!("{}: {}", label, value));
    }
    cells.join(", ")
}

fn render_value(value: &Value, width: usize) -> String {
    let repr = value.repr();
    if value.is_int() {
        pad_right(&pad_left(&repr, width), width)
    } else {
        pad_right(&repr, width)
    }
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}
