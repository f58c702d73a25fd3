use std::hash::Hash;

use indexmap::IndexMap;

/// Counts how often each value occurs. The result is ordered by count, highest
/// first; equal counts keep the order in which their values were first seen.
pub(crate) fn value_counts<I, K>(values: I) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = K>,
    K: Hash + Eq,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut counts = counts.into_iter().collect::<Vec<_>>();
    // stable sort, so first-seen order survives among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Returns the first item with the greatest key. Unlike `Iterator::max_by_key`,
/// which returns the last one, ties resolve to the earliest item.
pub(crate) fn first_max_by_key<I, T, K, F>(items: I, mut key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut best: Option<(K, T)> = None;
    for item in items {
        let item_key = key(&item);
        match &best {
            Some((best_key, _)) if *best_key >= item_key => {}
            _ => best = Some((item_key, item)),
        }
    }
    best.map(|(_, item)| item)
}
