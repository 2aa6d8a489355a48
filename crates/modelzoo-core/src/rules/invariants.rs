use std::collections::HashMap;

use crate::ops::Store;

/// Find relations whose endpoints are not in the store
///
/// Returns (relation_id, missing_user_id) tuples
pub fn find_dangling_relations(store: &Store) -> Vec<(i64, i64)> {
    let mut dangling = Vec::new();
    for relation in store.relations.values() {
        for user_id in [relation.from_user_id, relation.to_user_id] {
            if !store.users.contains_key(&user_id) {
                dangling.push((relation.id, user_id));
            }
        }
    }
    dangling
}

/// Find ordered (from, to) pairs that carry more than one relation
pub fn find_duplicate_pairs(store: &Store) -> Vec<(i64, i64)> {
    let mut counts: HashMap<(i64, i64), usize> = HashMap::new();
    for relation in store.relations.values() {
        *counts.entry(relation.pair()).or_default() += 1;
    }

    let mut duplicates: Vec<(i64, i64)> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(pair, _)| pair)
        .collect();
    duplicates.sort();
    duplicates
}

/// Find users that have an edge to themselves
pub fn find_self_relations(store: &Store) -> Vec<i64> {
    store
        .relations
        .values()
        .filter(|r| r.from_user_id == r.to_user_id)
        .map(|r| r.from_user_id)
        .collect()
}

/// Find relations whose `updated_at` precedes `created_at`
pub fn find_time_travellers(store: &Store) -> Vec<i64> {
    store
        .relations
        .values()
        .filter(|r| r.updated_at < r.created_at)
        .map(|r| r.id)
        .collect()
}
