//! Order-preserving selection over sequences.

use std::collections::HashSet;

/// Copies the items for which `keep(position, item)` holds, in order.
pub fn select_indexed<T, F>(items: &[T], mut keep: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(usize, &T) -> bool,
{
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| keep(*i, *item))
        .map(|(_, item)| item.clone())
        .collect()
}

/// Copies every item whose position is not in `excluded`, in order.
pub fn exclude_positions<T: Clone>(items: &[T], excluded: &HashSet<usize>) -> Vec<T> {
    select_indexed(items, |i, _| !excluded.contains(&i))
}
