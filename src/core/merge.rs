// src/core/merge.rs

use std::collections::BTreeMap;

/// Union-merge two keyed attribute maps.
///
/// The result's key set is the union of both inputs. Per key, attributes are
/// copied from `first` and then overlaid with `second`, so on an attribute
/// collision the `second` value wins. Keys present in only one input yield
/// that input's attributes alone. Inputs are never mutated.
pub fn merge_by_key<K, A, V>(
    first: &BTreeMap<K, BTreeMap<A, V>>,
    second: &BTreeMap<K, BTreeMap<A, V>>,
) -> BTreeMap<K, BTreeMap<A, V>>
where
    K: Ord + Clone,
    A: Ord + Clone,
    V: Clone,
{
    let mut merged: BTreeMap<K, BTreeMap<A, V>> = BTreeMap::new();

    for key in first.keys().chain(second.keys()) {
        if merged.contains_key(key) {
            continue;
        }
        let mut attrs = BTreeMap::new();
        for source in [first.get(key), second.get(key)].into_iter().flatten() {
            for (name, value) in source {
                attrs.insert(name.clone(), value.clone());
            }
        }
        merged.insert(key.clone(), attrs);
    }

    merged
}
