//! First-wins deduplication by natural key.
//!
//! The remote API returns one row per (conference, show date) pairing, so the
//! same logical record can appear several times. Later occurrences are dropped,
//! never merged.

use std::collections::HashSet;
use std::hash::Hash;

/// Collapse `records` to one entry per key, keeping the first occurrence.
///
/// Relative order of the surviving records matches the input. Works on owned
/// vectors as well as borrowed iterators (`slice.iter()` yields `Vec<&T>`).
/// An `Option` key treats `None` as one ordinary key value.
///
/// A panicking `key_of` propagates to the caller.
///
/// # Example
///
/// ```
/// use expo_admin_core::dedupe;
///
/// let rows = vec![("a", 1), ("b", 2), ("a", 3)];
/// let unique = dedupe(rows, |(id, _)| *id);
/// assert_eq!(unique, vec![("a", 1), ("b", 2)]);
/// ```
pub fn dedupe<T, K, I, F>(records: I, mut key_of: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let records = records.into_iter();
    let mut seen = HashSet::with_capacity(records.size_hint().0);

    records
        .filter(|record| seen.insert(key_of(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: Option<&'static str>,
        v: u32,
    }

    const fn row(id: Option<&'static str>, v: u32) -> Row {
        Row { id, v }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rows = vec![row(Some("a"), 1), row(Some("b"), 2), row(Some("a"), 3)];

        let unique = dedupe(rows, |r| r.id);

        assert_eq!(unique, vec![row(Some("a"), 1), row(Some("b"), 2)]);
    }

    #[test]
    fn test_empty_input() {
        let unique = dedupe(Vec::<Row>::new(), |r| r.id);
        assert!(unique.is_empty());
    }

    #[test]
    fn test_missing_key_is_its_own_value() {
        let rows = vec![row(None, 1), row(Some("a"), 2), row(None, 3)];

        let unique = dedupe(rows, |r| r.id);

        assert_eq!(unique, vec![row(None, 1), row(Some("a"), 2)]);
    }

    #[test]
    fn test_borrowed_input_is_untouched() {
        let rows = vec![row(Some("a"), 1), row(Some("a"), 2)];

        let unique = dedupe(rows.iter(), |r| r.id);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].v, 1);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let rows = vec![
            row(Some("c"), 1),
            row(Some("a"), 2),
            row(Some("c"), 3),
            row(Some("b"), 4),
        ];

        let once = dedupe(rows, |r| r.id);
        let twice = dedupe(once.clone(), |r| r.id);

        assert_eq!(once, twice);
    }
}
