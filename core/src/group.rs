//! Bucketing records by a derived key (usually the show date).

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Records partitioned by key, with keys in ascending order.
///
/// Within a bucket, records keep their input order. For `NaiveDate` or
/// `YYYY-MM-DD` string keys, ascending order is chronological.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grouping<K, T> {
    buckets: BTreeMap<K, Vec<T>>,
}

impl<K: Ord, T> Grouping<K, T> {
    /// Distinct keys, ascending
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.buckets.keys().cloned().collect()
    }

    /// Records sharing `key`, if any
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no buckets at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, K, Vec<T>> {
        self.buckets.iter()
    }

    /// Split into the bucket map and its sorted key list
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<K, Vec<T>>, Vec<K>)
    where
        K: Clone,
    {
        let keys = self.sorted_keys();
        (self.buckets, keys)
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = btree_map::IntoIter<K, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Grouping<K, T> {
    type Item = (&'a K, &'a Vec<T>);
    type IntoIter = btree_map::Iter<'a, K, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Partition `records` into buckets keyed by `key_of`.
///
/// Empty input yields an empty grouping; callers render their own
/// "no results" state.
///
/// # Example
///
/// ```
/// use expo_admin_core::group_by_key;
///
/// let grouping = group_by_key(["2024-11-21", "2024-11-20", "2024-11-21"], |d| *d);
/// assert_eq!(grouping.sorted_keys(), vec!["2024-11-20", "2024-11-21"]);
/// assert_eq!(grouping.get(&"2024-11-21").map(<[_]>::len), Some(2));
/// ```
pub fn group_by_key<T, K, I, F>(records: I, mut key_of: F) -> Grouping<K, T>
where
    I: IntoIterator<Item = T>,
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut buckets: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for record in records {
        buckets.entry(key_of(&record)).or_default().push(record);
    }
    Grouping { buckets }
}
