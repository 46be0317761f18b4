//! Property-based tests for ObjectStore
//!
//! Random operation sequences are applied to a store and to a `BTreeMap`
//! model; after every step the store must agree with the model and keep its
//! ordering invariant.

use idstore::{ObjectStore, SortOrder};
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// PROPERTY TEST GENERATORS
// =============================================================================

#[derive(Debug, Clone)]
enum StoreOp {
    Set(String, u32),
    AddWithId(String, u32),
    AddDefault(String),
    Delete(String),
    Get(String),
    Reset,
}

fn id_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

fn store_ops_strategy() -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (id_strategy(), any::<u32>()).prop_map(|(id, v)| StoreOp::Set(id, v)),
            2 => (id_strategy(), any::<u32>()).prop_map(|(id, v)| StoreOp::AddWithId(id, v)),
            1 => id_strategy().prop_map(StoreOp::AddDefault),
            2 => id_strategy().prop_map(StoreOp::Delete),
            2 => id_strategy().prop_map(StoreOp::Get),
            1 => Just(StoreOp::Reset),
        ],
        0..200,
    )
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![
        Just(SortOrder::Unordered),
        Just(SortOrder::Ascending),
        Just(SortOrder::Descending),
    ]
}

#[derive(Debug, Clone)]
enum ValueOp {
    Set(String, u32),
    Update(String, u32),
    Delete(String),
    Add(u32),
}

fn value_ops_strategy() -> impl Strategy<Value = Vec<ValueOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (id_strategy(), 0u32..20).prop_map(|(id, v)| ValueOp::Set(id, v)),
            2 => (id_strategy(), 0u32..20).prop_map(|(id, v)| ValueOp::Update(id, v)),
            2 => id_strategy().prop_map(ValueOp::Delete),
            1 => (0u32..20).prop_map(ValueOp::Add),
        ],
        0..120,
    )
}

fn check_value_order(store: &ObjectStore<u32>, descending: bool) -> Result<(), TestCaseError> {
    let pairs: Vec<(&str, u32)> = store.iter().map(|(id, v)| (id, *v)).collect();
    for pair in pairs.windows(2) {
        let (id_a, a) = pair[0];
        let (id_b, b) = pair[1];
        prop_assert!(a <= b, "{:?}", pairs);
        if a == b {
            if descending {
                prop_assert!(id_a > id_b, "{:?}", pairs);
            } else {
                prop_assert!(id_a < id_b, "{:?}", pairs);
            }
        }
    }
    Ok(())
}

fn check_order(store: &ObjectStore<u32>) -> Result<(), TestCaseError> {
    let ids: Vec<&str> = store.ids().collect();
    for pair in ids.windows(2) {
        match store.sort_order() {
            SortOrder::Ascending => prop_assert!(pair[0] < pair[1], "{:?}", ids),
            SortOrder::Descending => prop_assert!(pair[0] > pair[1], "{:?}", ids),
            SortOrder::Unordered => prop_assert!(pair[0] != pair[1], "{:?}", ids),
        }
    }
    Ok(())
}

fn apply(
    store: &mut ObjectStore<u32>,
    model: &mut BTreeMap<String, u32>,
    op: &StoreOp,
) -> Result<(), TestCaseError> {
    match op {
        StoreOp::Set(id, v) => {
            let previous = store.set(id.clone(), *v);
            prop_assert_eq!(previous, model.insert(id.clone(), *v));
            prop_assert_eq!(store.added(), previous.is_none());
        }
        StoreOp::AddWithId(id, v) => {
            let existed = model.insert(id.clone(), *v).is_some();
            prop_assert_eq!(*store.add_with_id(id.clone(), || *v), *v);
            prop_assert_eq!(store.added(), !existed);
        }
        StoreOp::AddDefault(id) => {
            let existed = model.contains_key(id);
            let expected = *model.entry(id.clone()).or_default();
            prop_assert_eq!(*store.add_default(id.clone()), expected);
            prop_assert_eq!(store.added(), !existed);
        }
        StoreOp::Delete(id) => {
            prop_assert_eq!(store.delete(id), model.remove(id).is_some());
        }
        StoreOp::Get(id) => {
            prop_assert_eq!(store.get(id), model.get(id));
        }
        StoreOp::Reset => {
            store.reset();
            model.clear();
        }
    }
    Ok(())
}

// =============================================================================
// OBJECT STORE PROPERTY TESTS
// =============================================================================

proptest! {
    #[test]
    fn prop_store_matches_model(order in order_strategy(), ops in store_ops_strategy()) {
        let mut store = ObjectStore::with_order(order);
        let mut model = BTreeMap::new();

        for op in &ops {
            apply(&mut store, &mut model, op)?;
            prop_assert_eq!(store.len(), model.len());
            check_order(&store)?;
        }

        for (id, value) in &model {
            prop_assert_eq!(store.get(id), Some(value));
        }
    }

    #[test]
    fn prop_order_change_preserves_entries(
        entries in prop::collection::btree_map(id_strategy(), any::<u32>(), 0..50),
        first in order_strategy(),
        second in order_strategy(),
    ) {
        let mut store = ObjectStore::with_order(first);
        for (id, v) in &entries {
            store.set(id.clone(), *v);
        }
        store.set_sort_order(second);

        prop_assert_eq!(store.len(), entries.len());
        check_order(&store)?;
        for (id, v) in &entries {
            prop_assert_eq!(store.get(id), Some(v));
        }
    }

    #[test]
    fn prop_value_order_holds(
        ops in value_ops_strategy(),
        descending in any::<bool>(),
    ) {
        let mut store: ObjectStore<u32> = ObjectStore::new();
        store.set_compare_callback(|a, b| a.cmp(b));
        if descending {
            store.set_sort_order(SortOrder::Descending);
        }

        let mut model = BTreeMap::new();
        for op in &ops {
            match op {
                ValueOp::Set(id, v) => {
                    store.set(id.clone(), *v);
                    model.insert(id.clone(), *v);
                }
                ValueOp::Update(id, v) => {
                    let existed = match model.get_mut(id) {
                        Some(stored) => {
                            *stored = *v;
                            true
                        }
                        None => false,
                    };
                    prop_assert_eq!(store.update(id, |stored| *stored = *v), existed);
                }
                ValueOp::Delete(id) => {
                    prop_assert_eq!(store.delete(id), model.remove(id).is_some());
                }
                ValueOp::Add(v) => {
                    let id = store.add(*v).unwrap();
                    prop_assert!(model.insert(id, *v).is_none());
                }
            }
            prop_assert_eq!(store.len(), model.len());
            check_value_order(&store, descending)?;
        }

        for (id, v) in &model {
            prop_assert_eq!(store.get(id), Some(v));
            prop_assert!(store.exists_by_value(v));
        }
    }

    #[test]
    fn prop_synthesized_ids_unique(count in 0usize..300) {
        let mut store = ObjectStore::with_order(SortOrder::Ascending);
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            ids.push(store.add(i).unwrap());
        }
        prop_assert_eq!(store.len(), count);
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted, ids);
    }
}
