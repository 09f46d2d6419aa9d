//! Property-based tests for recordkit using proptest.

use proptest::prelude::*;
use recordkit::{get_value, Collection, Key, Mapping, Path, SortOptions, Value};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    rank: Option<i64>,
    name: String,
    tag: i64,
}

impl TestItem {
    fn to_value(&self) -> Value {
        let mut map = Mapping::new();
        if let Some(rank) = self.rank {
            map.insert(Key::from("rank"), Value::Int(rank));
        }
        map.insert(Key::from("name"), Value::from(self.name.as_str()));
        map.insert(Key::from("tag"), Value::Int(self.tag));
        Value::Map(map)
    }
}

// Small rank range so ties are common.
fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (prop::option::of(0i64..5), "[a-z]{1,6}", 0i64..1000).prop_map(|(rank, name, tag)| TestItem {
        rank,
        name,
        tag,
    })
}

fn collection_of(items: &[TestItem]) -> Collection {
    items.iter().map(TestItem::to_value).collect()
}

fn ranks(collection: &Collection) -> Vec<Value> {
    collection
        .to_list(None)
        .iter()
        .map(|record| get_value(record, &Path::from("rank")))
        .collect()
}

fn parallel(collection: &Collection) -> bool {
    collection.to_list(None).len() == collection.to_origin_list(None).len()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Construction keeps records untouched and numbers origins in order.
    #[test]
    fn construction_round_trips(items in prop::collection::vec(test_item_strategy(), 0..40)) {
        let values: Vec<Value> = items.iter().map(TestItem::to_value).collect();
        let collection = Collection::new(values.clone());

        prop_assert_eq!(collection.to_list(None), values.as_slice());
        let expected: Vec<usize> = (0..values.len()).collect();
        prop_assert_eq!(collection.to_origin_list(None), expected.as_slice());
    }

    /// Records and origins stay the same length through every operation.
    #[test]
    fn lists_stay_parallel(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        threshold in 0i64..5,
        victim in 0usize..40,
    ) {
        let mut collection = collection_of(&items);

        collection.gte_or_missing("rank", threshold).unwrap();
        prop_assert!(parallel(&collection));
        collection.sort_with(["rank", "name"], SortOptions::new().reverse()).unwrap();
        prop_assert!(parallel(&collection));
        collection.delete_by_origin(victim);
        prop_assert!(parallel(&collection));
        collection.delete_positions([0, victim]);
        prop_assert!(parallel(&collection));
        collection.insert(Value::Null).has_field("tag");
        prop_assert!(parallel(&collection));
        collection.take_last_origin();
        prop_assert!(parallel(&collection));
    }

    /// Filters never grow the collection and keep origins increasing.
    #[test]
    fn filters_preserve_relative_order(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        threshold in 0i64..5,
    ) {
        let mut collection = collection_of(&items);
        collection.lt("rank", threshold).unwrap();

        prop_assert!(collection.count() <= items.len());
        let origins = collection.to_origin_list(None);
        prop_assert!(origins.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Sorting an already sorted collection changes nothing.
    #[test]
    fn sort_is_idempotent(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        reverse in any::<bool>(),
        none_greater in any::<bool>(),
    ) {
        let options = SortOptions { reverse, none_greater };
        let mut collection = collection_of(&items);
        collection.sort_with(["rank"], options).unwrap();
        let once = collection.to_origin_list(None).to_vec();

        collection.sort_with(["rank"], options).unwrap();
        prop_assert_eq!(collection.to_origin_list(None), once.as_slice());
    }

    /// Records with equal keys keep their input order, in both directions.
    #[test]
    fn sort_is_stable(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        reverse in any::<bool>(),
    ) {
        let mut collection = collection_of(&items);
        collection
            .sort_with(["rank"], SortOptions { reverse, none_greater: false })
            .unwrap();

        let ranks = ranks(&collection);
        let origins = collection.to_origin_list(None);
        for i in 1..origins.len() {
            if ranks[i - 1] == ranks[i] {
                prop_assert!(origins[i - 1] < origins[i]);
            }
        }
    }

    /// Ascending sorts put missing ranks first and order the rest.
    #[test]
    fn sort_orders_keys(items in prop::collection::vec(test_item_strategy(), 0..30)) {
        let mut collection = collection_of(&items);
        collection.sort("rank").unwrap();

        let keys: Vec<Option<i64>> = ranks(&collection).iter().map(Value::as_i64).collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    /// Deleting by origin removes exactly that record wherever it sits.
    #[test]
    fn delete_by_origin_is_exact(
        items in prop::collection::vec(test_item_strategy(), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut collection = collection_of(&items);
        collection.sort("name").unwrap();
        let origin = pick.index(items.len());

        collection.delete_by_origin(origin);
        prop_assert_eq!(collection.count(), items.len() - 1);
        prop_assert!(!collection.to_origin_list(None).contains(&origin));
    }

    /// Renumbering with insert numbers every record consecutively.
    #[test]
    fn renumber_insert_numbers_everything(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        start in -100i64..100,
        step in 1i64..5,
    ) {
        let mut collection = collection_of(&items);
        collection.renumber_with("rank", recordkit::RenumberOptions::new(start, step).insert());

        let keys = ranks(&collection);
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(key, &Value::Int(start + i as i64 * step));
        }
    }
}
