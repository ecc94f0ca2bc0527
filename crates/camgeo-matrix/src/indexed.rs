//! Index-tagged scalars and order-preserving sorts.
//!
//! A small utility shipped alongside the numerical core: scalars tagged with
//! the index they came from, so a sort by value keeps track of provenance.

use std::cmp::Ordering;

/// A scalar tagged with the index it originated from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedValue<T> {
    /// Originating index.
    pub id: usize,
    /// Tagged value.
    pub val: T,
}

/// Zips index and value runs into a tagged vector.
///
/// Panics if the runs differ in length.
pub fn indexed_from_pairs<T: Copy>(ids: &[usize], vals: &[T]) -> Vec<IndexedValue<T>> {
    assert_eq!(ids.len(), vals.len(), "index and value runs differ in length");
    ids.iter()
        .zip(vals)
        .map(|(&id, &val)| IndexedValue { id, val })
        .collect()
}

/// Sorts tagged values ascending by value.
pub fn sort_ascending<T: PartialOrd>(arr: &mut [IndexedValue<T>]) {
    arr.sort_by(|l, r| l.val.partial_cmp(&r.val).unwrap_or(Ordering::Equal));
}

/// Sorts tagged values descending by value.
pub fn sort_descending<T: PartialOrd>(arr: &mut [IndexedValue<T>]) {
    arr.sort_by(|l, r| r.val.partial_cmp(&l.val).unwrap_or(Ordering::Equal));
}
