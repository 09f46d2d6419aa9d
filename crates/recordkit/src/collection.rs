//! The fluent record collection.
//!
//! A [`Collection`] owns a working list of records and, in parallel, the
//! position each record held in the list it was built from (its *origin*).
//! Filters, sorts and deletions rearrange both lists together, so a
//! surviving record can always be traced back to where it came from.
//!
//! Every operation mutates in place and returns `&mut Self`, so calls chain.
//! Ordering filters and sorts return `Result` because ordering incomparable
//! values is an error; on error the collection is left as it was.

use std::borrow::Cow;
use std::collections::HashSet;

use log::{debug, trace};

use crate::compare::{self, Operator};
use crate::error::Result;
use crate::matcher::{match_all, match_any};
use crate::ordering::{compare_sort_keys, Dir};
use crate::path::{insert_field, lookup, remove_field, set_field, Path};
use crate::shape::to_mapping;
use crate::value::{Key, Mapping, Value};

/// Policy for records that lack the filtered path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Missing {
    /// Drop records without the path.
    #[default]
    Exclude,
    /// Keep records without the path, without comparing them.
    Include,
}

impl Missing {
    fn keeps(self) -> bool {
        matches!(self, Missing::Include)
    }
}

/// Which end of the collection an extraction reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pick {
    #[default]
    First,
    Last,
}

/// Options for [`Collection::sort_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOptions {
    /// Sort largest first.
    pub reverse: bool,
    /// Place records missing a key after those that have it.
    pub none_greater: bool,
}

impl SortOptions {
    pub fn new() -> Self {
        SortOptions::default()
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn none_greater(mut self) -> Self {
        self.none_greater = true;
        self
    }

    /// Direction equivalent of `reverse`.
    pub fn dir(&self) -> Dir {
        if self.reverse {
            Dir::Desc
        } else {
            Dir::Asc
        }
    }
}

/// Options for [`Collection::renumber_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenumberOptions {
    pub start: i64,
    pub increment: i64,
    /// Create the key on records that lack it, so every record is numbered.
    pub insert: bool,
}

impl Default for RenumberOptions {
    fn default() -> Self {
        RenumberOptions {
            start: 1,
            increment: 1,
            insert: false,
        }
    }
}

impl RenumberOptions {
    pub fn new(start: i64, increment: i64) -> Self {
        RenumberOptions {
            start,
            increment,
            insert: false,
        }
    }

    pub fn insert(mut self) -> Self {
        self.insert = true;
        self
    }
}

/// Options for [`Collection::contains_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContainsOptions {
    /// Require every needle element instead of any.
    pub match_all: bool,
    /// Keep the records that do *not* match.
    pub exclude: bool,
    /// Keep records lacking the path.
    pub include_missing: bool,
}

impl ContainsOptions {
    pub fn new() -> Self {
        ContainsOptions::default()
    }

    pub fn match_all(mut self) -> Self {
        self.match_all = true;
        self
    }

    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn include_missing(mut self) -> Self {
        self.include_missing = true;
        self
    }
}

/// Ordered records paired with their origin positions.
///
/// # Example
///
/// ```
/// use recordkit::{Collection, Value};
/// use serde_json::json;
///
/// let mut people = Collection::from(vec![
///     Value::from(json!({"name": "Jim", "age": 18})),
///     Value::from(json!({"name": "Larry", "age": 19})),
///     Value::from(json!({"name": "Joe", "age": 20})),
/// ]);
///
/// people.gte("age", 19).unwrap().sort("name").unwrap();
///
/// assert_eq!(people.to_origin_list(None), &[2, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<Value>,
    origins: Vec<usize>,
}

impl Collection {
    /// Wraps `items`; origins are `0..items.len()`.
    pub fn new(items: Vec<Value>) -> Self {
        let origins = (0..items.len()).collect();
        Collection { items, origins }
    }

    /// Iterates `(origin, record)` pairs in current order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.origins.iter().copied().zip(self.items.iter())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Removes `path` from every record that has it.
    pub fn drop_key(&mut self, path: impl Into<Path>) -> &mut Self {
        let path = path.into();
        let mut removed = 0usize;
        for item in &mut self.items {
            if remove_field(item, &path) {
                removed += 1;
            }
        }
        debug!("drop_key {}: removed from {} records", path, removed);
        self
    }

    /// Sets `key` to `value` on every record, creating it where missing.
    ///
    /// Records that refuse the assignment are left unchanged.
    pub fn add_key(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let path = Path::key(key);
        let value = value.into();
        for (origin, item) in self.origins.iter().zip(self.items.iter_mut()) {
            if let Err(err) = insert_field(item, &path, value.clone()) {
                trace!("add_key {}: skipping record {}: {}", path, origin, err);
            }
        }
        self
    }

    /// Replaces the first record whose `path` field equals `value` with
    /// `entry`, keeping its origin. Appends `entry` when nothing matches.
    pub fn upsert(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<Value>,
        entry: Value,
    ) -> &mut Self {
        let path = path.into();
        let value = value.into();
        let found = self.items.iter().position(|item| {
            let field = lookup(item, &path);
            compare::equals(field.as_deref().unwrap_or(&Value::Null), &value)
        });
        match found {
            Some(position) => {
                debug!("upsert {}: replacing record at position {}", path, position);
                self.items[position] = entry;
            }
            None => {
                debug!("upsert {}: no match, appending", path);
                self.insert(entry);
            }
        }
        self
    }

    /// Appends `entry` with the next origin, which is the current length.
    pub fn insert(&mut self, entry: Value) -> &mut Self {
        self.origins.push(self.items.len());
        self.items.push(entry);
        self
    }

    /// Removes every record whose origin is `origin`.
    pub fn delete_by_origin(&mut self, origin: usize) -> &mut Self {
        let verdicts = self.origins.iter().map(|&o| o != origin).collect();
        self.apply("delete_by_origin", verdicts);
        self
    }

    /// Removes the records at the given *current* positions.
    ///
    /// Unlike [`delete_by_origin`](Self::delete_by_origin) this addresses
    /// records by where they sit now, not where they came from; the two
    /// differ once the collection has been sorted or filtered.
    pub fn delete_positions(&mut self, positions: impl IntoIterator<Item = usize>) -> &mut Self {
        let doomed: HashSet<usize> = positions.into_iter().collect();
        let verdicts = (0..self.items.len())
            .map(|position| !doomed.contains(&position))
            .collect();
        self.apply("delete_positions", verdicts);
        self
    }

    /// Numbers records in current order, `start`, `start + increment`, ...
    /// into `path`. Records without the path use up a number but are not
    /// changed.
    pub fn renumber(&mut self, path: impl Into<Path>, start: i64, increment: i64) -> &mut Self {
        self.renumber_with(path, RenumberOptions::new(start, increment))
    }

    pub fn renumber_with(&mut self, path: impl Into<Path>, options: RenumberOptions) -> &mut Self {
        let path = path.into();
        let mut counter = options.start;
        let mut written = 0usize;
        for item in &mut self.items {
            let number = Value::Int(counter);
            let ok = if options.insert {
                match insert_field(item, &path, number) {
                    Ok(()) => true,
                    Err(err) => {
                        trace!("renumber {}: {}", path, err);
                        false
                    }
                }
            } else {
                set_field(item, &path, number)
            };
            if ok {
                written += 1;
            }
            counter = counter.wrapping_add(options.increment);
        }
        debug!(
            "renumber {}: numbered {} of {} records",
            path,
            written,
            self.items.len()
        );
        self
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Sorts ascending by one path, missing values first.
    pub fn sort(&mut self, path: impl Into<Path>) -> Result<&mut Self> {
        self.sort_with([path.into()], SortOptions::default())
    }

    /// Stable in-place sort by one or more paths; later paths break ties.
    ///
    /// Null and absent values are both "missing". Errors if two present keys
    /// cannot be ordered, leaving the collection unsorted.
    pub fn sort_with<I, P>(&mut self, paths: I, options: SortOptions) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        let paths: Vec<Path> = paths.into_iter().map(Into::into).collect();
        let dir = options.dir();
        let mut keys: Vec<Vec<Option<Value>>> = self
            .items
            .iter()
            .map(|item| paths.iter().map(|path| sort_key(item, path)).collect())
            .collect();

        // Compute the permutation first so a failed comparison leaves the
        // records untouched.
        let len = keys.len();
        let mut order: Vec<usize> = (0..len).collect();
        for i in 0..len {
            let mut min = i;
            for j in (i + 1)..len {
                let ordering = compare_sort_keys(&keys[j], &keys[min], options.none_greater)?;
                if dir.apply(ordering) == std::cmp::Ordering::Less {
                    min = j;
                }
            }
            if min != i {
                keys[i..=min].rotate_right(1);
                order[i..=min].rotate_right(1);
            }
        }

        let mut slots: Vec<Option<Value>> = std::mem::take(&mut self.items)
            .into_iter()
            .map(Some)
            .collect();
        let origins = std::mem::take(&mut self.origins);
        for index in order {
            if let Some(item) = slots[index].take() {
                self.items.push(item);
                self.origins.push(origins[index]);
            }
        }
        debug!("sort by {} key(s) {}: {} records", paths.len(), dir, len);
        Ok(self)
    }

    // ========================================================================
    // Value filters
    // ========================================================================

    /// Keeps records where `path <op> value` holds.
    ///
    /// Records lacking the path are kept only with [`Missing::Include`].
    pub fn select(
        &mut self,
        path: impl Into<Path>,
        op: Operator,
        value: impl Into<Value>,
        missing: Missing,
    ) -> Result<&mut Self> {
        let path = path.into();
        let value = value.into();
        let verdicts = self
            .items
            .iter()
            .map(|item| match lookup(item, &path) {
                Some(field) => compare::test(&field, op, &value),
                None => Ok(missing.keeps()),
            })
            .collect::<Result<Vec<bool>>>()?;
        self.apply(op.as_str(), verdicts);
        Ok(self)
    }

    fn select_equality(&mut self, path: Path, value: Value, missing: Missing, negate: bool) -> &mut Self {
        let verdicts = self
            .items
            .iter()
            .map(|item| match lookup(item, &path) {
                Some(field) if negate => compare::not_equals(&field, &value),
                Some(field) => compare::equals(&field, &value),
                None => missing.keeps(),
            })
            .collect();
        self.apply(if negate { "ne" } else { "eq" }, verdicts);
        self
    }

    pub fn eq(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Self {
        self.select_equality(path.into(), value.into(), Missing::Exclude, false)
    }

    pub fn eq_or_missing(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Self {
        self.select_equality(path.into(), value.into(), Missing::Include, false)
    }

    pub fn ne(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Self {
        self.select_equality(path.into(), value.into(), Missing::Exclude, true)
    }

    pub fn ne_or_missing(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> &mut Self {
        self.select_equality(path.into(), value.into(), Missing::Include, true)
    }

    pub fn gt(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<&mut Self> {
        self.select(path, Operator::Greater, value, Missing::Exclude)
    }

    pub fn gt_or_missing(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.select(path, Operator::Greater, value, Missing::Include)
    }

    pub fn gte(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<&mut Self> {
        self.select(path, Operator::GreaterOrEqual, value, Missing::Exclude)
    }

    pub fn gte_or_missing(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.select(path, Operator::GreaterOrEqual, value, Missing::Include)
    }

    pub fn lt(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<&mut Self> {
        self.select(path, Operator::Less, value, Missing::Exclude)
    }

    pub fn lt_or_missing(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.select(path, Operator::Less, value, Missing::Include)
    }

    pub fn lte(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<&mut Self> {
        self.select(path, Operator::LessOrEqual, value, Missing::Exclude)
    }

    pub fn lte_or_missing(
        &mut self,
        path: impl Into<Path>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.select(path, Operator::LessOrEqual, value, Missing::Include)
    }

    // ========================================================================
    // Presence filters
    // ========================================================================

    /// Keeps records where `path` resolves, even to null.
    pub fn has_field(&mut self, path: impl Into<Path>) -> &mut Self {
        self.retain_presence("has_field", path.into(), |field| field.is_some())
    }

    /// Keeps records where `path` resolves to a non-null value.
    pub fn has_value(&mut self, path: impl Into<Path>) -> &mut Self {
        self.retain_presence("has_value", path.into(), |field| {
            field.is_some_and(|value| !value.is_null())
        })
    }

    /// Keeps records where `path` does not resolve.
    pub fn missing_field(&mut self, path: impl Into<Path>) -> &mut Self {
        self.retain_presence("missing_field", path.into(), |field| field.is_none())
    }

    /// Keeps records where `path` does not resolve or resolves to null.
    pub fn missing_value(&mut self, path: impl Into<Path>) -> &mut Self {
        self.retain_presence("missing_value", path.into(), |field| {
            field.map_or(true, Value::is_null)
        })
    }

    fn retain_presence<F>(&mut self, label: &str, path: Path, keep: F) -> &mut Self
    where
        F: Fn(Option<&Value>) -> bool,
    {
        let verdicts = self
            .items
            .iter()
            .map(|item| keep(lookup(item, &path).as_deref()))
            .collect();
        self.apply(label, verdicts);
        self
    }

    // ========================================================================
    // Membership filters
    // ========================================================================

    /// Keeps records whose `path` value shares any element with `needle`.
    pub fn contains(&mut self, path: impl Into<Path>, needle: impl Into<Value>) -> &mut Self {
        self.contains_with(path, needle, ContainsOptions::default())
    }

    /// Membership filter with explicit any/all, negation and missing policy.
    pub fn contains_with(
        &mut self,
        path: impl Into<Path>,
        needle: impl Into<Value>,
        options: ContainsOptions,
    ) -> &mut Self {
        let path = path.into();
        let needle = needle.into();
        let verdicts = self
            .items
            .iter()
            .map(|item| match lookup(item, &path) {
                Some(field) => {
                    let hit = if options.match_all {
                        match_all(&field, &needle)
                    } else {
                        match_any(&field, &needle)
                    };
                    hit != options.exclude
                }
                None => options.include_missing,
            })
            .collect();
        self.apply("contains", verdicts);
        self
    }

    /// Rebuilds both lists from the survivors in one step.
    fn apply(&mut self, label: &str, verdicts: Vec<bool>) {
        let before = self.items.len();
        let items = std::mem::take(&mut self.items);
        let origins = std::mem::take(&mut self.origins);
        let (items, origins): (Vec<Value>, Vec<usize>) = items
            .into_iter()
            .zip(origins)
            .zip(verdicts)
            .filter_map(|(pair, keep)| keep.then_some(pair))
            .unzip();
        self.items = items;
        self.origins = origins;
        debug!("{}: kept {} of {} records", label, self.items.len(), before);
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    fn limit(&self, limit: Option<usize>) -> usize {
        limit.map_or(self.items.len(), |n| n.min(self.items.len()))
    }

    /// Records in current order, at most `limit` of them.
    pub fn to_list(&self, limit: Option<usize>) -> &[Value] {
        &self.items[..self.limit(limit)]
    }

    /// Records as key-value views, at most `limit` of them.
    pub fn to_normalized_list(&self, limit: Option<usize>) -> Vec<Cow<'_, Mapping>> {
        self.to_list(limit).iter().map(to_mapping).collect()
    }

    /// Origins in current order, at most `limit` of them.
    pub fn to_origin_list(&self, limit: Option<usize>) -> &[usize] {
        &self.origins[..self.limit(limit)]
    }

    pub fn first_origin(&self) -> Option<usize> {
        self.origins.first().copied()
    }

    pub fn last_origin(&self) -> Option<usize> {
        self.origins.last().copied()
    }

    /// Removes the last record and returns its origin.
    pub fn take_last_origin(&mut self) -> Option<usize> {
        self.items.pop();
        self.origins.pop()
    }

    pub fn first_entry(&self) -> Option<&Value> {
        self.items.first()
    }

    pub fn last_entry(&self) -> Option<&Value> {
        self.items.last()
    }

    fn pick(&self, pick: Pick) -> Option<&Value> {
        match pick {
            Pick::First => self.first_entry(),
            Pick::Last => self.last_entry(),
        }
    }

    /// Value of `path` in the first (or last) record.
    ///
    /// `None` when the collection is empty or the record lacks the path.
    pub fn value_of(&self, path: impl Into<Path>, pick: Pick) -> Option<Cow<'_, Value>> {
        lookup(self.pick(pick)?, &path.into())
    }

    /// Values of several paths in the first (or last) record, with `Null`
    /// for each path the record lacks. `None` when the collection is empty.
    pub fn values_of<I, P>(&self, paths: I, pick: Pick) -> Option<Vec<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        let record = self.pick(pick)?;
        Some(
            paths
                .into_iter()
                .map(|path| lookup(record, &path.into()).map_or(Value::Null, Cow::into_owned))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_non_empty(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Consumes the collection, returning the records in current order.
    pub fn into_records(self) -> Vec<Value> {
        self.items
    }
}

fn sort_key(item: &Value, path: &Path) -> Option<Value> {
    lookup(item, path)
        .filter(|value| !value.is_null())
        .map(Cow::into_owned)
}

impl From<Vec<Value>> for Collection {
    fn from(items: Vec<Value>) -> Self {
        Collection::new(items)
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}
