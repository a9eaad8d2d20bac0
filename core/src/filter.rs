//! Composite filter predicates for list screens.
//!
//! A [`FilterSpec`] captures every active criterion of one screen. Each
//! criterion is independent, an inactive one matches everything, and active
//! ones combine with logical AND.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A record that list screens can dedupe, search, and filter.
pub trait Filterable {
    /// Natural key used for deduplication and flag membership
    type Key: Eq + Hash + Clone + Debug;

    /// The record's natural key
    fn key(&self) -> Self::Key;

    /// Text fields searched by the keyword filter
    fn search_fields(&self) -> SmallVec<[&str; 4]>;

    /// Calendar date used by the date range filter, if the record has one
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Category or type code used by the category filter, if the record has one
    fn category_code(&self) -> Option<&str> {
        None
    }
}

impl<T: Filterable + ?Sized> Filterable for &T {
    type Key = T::Key;

    fn key(&self) -> Self::Key {
        (**self).key()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        (**self).search_fields()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        (**self).record_date()
    }

    fn category_code(&self) -> Option<&str> {
        (**self).category_code()
    }
}

/// Externally supplied "is this record flagged" test.
///
/// Implemented for plain closures and for [`KeyIndex`].
pub trait Membership<T: ?Sized> {
    /// Whether `record` belongs to the flagged set
    fn contains(&self, record: &T) -> bool;
}

impl<T: ?Sized, F> Membership<T> for F
where
    F: Fn(&T) -> bool,
{
    fn contains(&self, record: &T) -> bool {
        self(record)
    }
}

/// Membership that flags nothing, for screens without a flag filter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unflagged;

impl<T: ?Sized> Membership<T> for Unflagged {
    fn contains(&self, _record: &T) -> bool {
        false
    }
}

/// Hash set of flagged keys, built once per render.
///
/// Replaces a linear scan of the reservation list for every record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyIndex<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> KeyIndex<K> {
    /// Creates an empty `KeyIndex`
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Adds a key, returning whether it was new
    pub fn insert(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Whether the key is flagged
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Number of flagged keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no key is flagged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Eq + Hash> Default for KeyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for KeyIndex<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<T: Filterable> Membership<T> for KeyIndex<T::Key> {
    fn contains(&self, record: &T) -> bool {
        self.keys.contains(&record.key())
    }
}

/// All active filter criteria for one screen at one point in time.
///
/// The default value is the empty filter, which matches every record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring searched in every searchable field
    pub keyword: Option<String>,
    /// Inclusive lower date bound
    pub date_start: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub date_end: Option<NaiveDate>,
    /// Accepted category codes; empty means no category constraint
    pub category_codes: BTreeSet<String>,
    /// Restrict to flagged records
    pub only_flagged: bool,
}

impl FilterSpec {
    /// Creates an empty filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the keyword
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Sets both date bounds
    #[must_use]
    pub const fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    /// Replaces the accepted category codes
    #[must_use]
    pub fn with_categories<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to flagged records
    #[must_use]
    pub const fn only_flagged(mut self, only_flagged: bool) -> Self {
        self.only_flagged = only_flagged;
        self
    }

    /// Whether no criterion is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyword.as_deref().is_none_or(str::is_empty)
            && self.date_start.is_none()
            && self.date_end.is_none()
            && self.category_codes.is_empty()
            && !self.only_flagged
    }

    /// Whether `record` satisfies every active criterion
    pub fn matches<T, M>(&self, record: &T, membership: &M) -> bool
    where
        T: Filterable,
        M: Membership<T> + ?Sized,
    {
        Matcher::new(self).matches(record, membership)
    }
}

/// A [`FilterSpec`] with its keyword lowercased once.
struct Matcher<'a> {
    spec: &'a FilterSpec,
    needle: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        let needle = spec
            .keyword
            .as_deref()
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_lowercase);
        Self { spec, needle }
    }

    fn matches<T, M>(&self, record: &T, membership: &M) -> bool
    where
        T: Filterable,
        M: Membership<T> + ?Sized,
    {
        self.matches_keyword(record)
            && self.matches_dates(record)
            && self.matches_category(record)
            && (!self.spec.only_flagged || membership.contains(record))
    }

    fn matches_keyword<T: Filterable>(&self, record: &T) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }

    fn matches_dates<T: Filterable>(&self, record: &T) -> bool {
        if self.spec.date_start.is_none() && self.spec.date_end.is_none() {
            return true;
        }
        // An undated record cannot satisfy a date bound.
        let Some(date) = record.record_date() else {
            return false;
        };
        self.spec.date_start.is_none_or(|start| date >= start)
            && self.spec.date_end.is_none_or(|end| date <= end)
    }

    fn matches_category<T: Filterable>(&self, record: &T) -> bool {
        if self.spec.category_codes.is_empty() {
            return true;
        }
        record
            .category_code()
            .is_some_and(|code| self.spec.category_codes.contains(code))
    }
}

/// Narrow `records` to those satisfying `spec`, in input order.
///
/// The input slice is never modified; surviving records are cloned (clone a
/// slice of references to avoid copying whole records).
pub fn filter<T, M>(records: &[T], spec: &FilterSpec, membership: &M) -> Vec<T>
where
    T: Filterable + Clone,
    M: Membership<T> + ?Sized,
{
    let matcher = Matcher::new(spec);
    records
        .iter()
        .filter(|record| matcher.matches(*record, membership))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[derive(Clone, Debug, PartialEq)]
    struct Talk {
        id: u32,
        title: &'static str,
        speaker: &'static str,
        date: Option<NaiveDate>,
        category: Option<&'static str>,
    }

    impl Filterable for Talk {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }

        fn search_fields(&self) -> SmallVec<[&str; 4]> {
            smallvec![self.title, self.speaker]
        }

        fn record_date(&self) -> Option<NaiveDate> {
            self.date
        }

        fn category_code(&self) -> Option<&str> {
            self.category
        }
    }

    fn date(s: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    }

    fn talks() -> Vec<Talk> {
        vec![
            Talk {
                id: 1,
                title: "Rust at Scale",
                speaker: "Ada",
                date: date("2024-11-20"),
                category: Some("public"),
            },
            Talk {
                id: 2,
                title: "Supply Chains",
                speaker: "Grace RUSTIC",
                date: date("2024-11-21"),
                category: Some("private"),
            },
            Talk {
                id: 3,
                title: "Opening Keynote",
                speaker: "Linus",
                date: None,
                category: None,
            },
        ]
    }

    fn ids(talks: &[Talk]) -> Vec<u32> {
        talks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_empty_spec_returns_everything() {
        let all = talks();
        let spec = FilterSpec::new();

        assert!(spec.is_empty());
        assert_eq!(filter(&all, &spec, &Unflagged), all);
    }

    #[test]
    fn test_keyword_is_case_insensitive_across_fields() {
        let spec = FilterSpec::new().with_keyword("rUsT");
        assert_eq!(ids(&filter(&talks(), &spec, &Unflagged)), vec![1, 2]);
    }

    #[test]
    fn test_empty_keyword_is_no_filter() {
        let spec = FilterSpec::new().with_keyword("");
        assert!(spec.is_empty());
        assert_eq!(filter(&talks(), &spec, &Unflagged).len(), 3);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let spec = FilterSpec::new().with_date_range(date("2024-11-20"), date("2024-11-20"));
        assert_eq!(ids(&filter(&talks(), &spec, &Unflagged)), vec![1]);

        let open_end = FilterSpec::new().with_date_range(date("2024-11-21"), None);
        assert_eq!(ids(&filter(&talks(), &open_end, &Unflagged)), vec![2]);
    }

    #[test]
    fn test_undated_records_fail_date_bounds() {
        let spec = FilterSpec::new().with_date_range(None, date("2030-01-01"));
        assert_eq!(ids(&filter(&talks(), &spec, &Unflagged)), vec![1, 2]);
    }

    #[test]
    fn test_empty_category_set_is_no_filter() {
        let spec = FilterSpec::new().with_categories(Vec::<String>::new());
        assert_eq!(filter(&talks(), &spec, &Unflagged).len(), 3);
    }

    #[test]
    fn test_category_inclusion() {
        let spec = FilterSpec::new().with_categories(["private"]);
        assert_eq!(ids(&filter(&talks(), &spec, &Unflagged)), vec![2]);
    }

    #[test]
    fn test_only_flagged_uses_membership() {
        let reserved: KeyIndex<u32> = [3, 1].into_iter().collect();
        let spec = FilterSpec::new().only_flagged(true);

        assert_eq!(ids(&filter(&talks(), &spec, &reserved)), vec![1, 3]);

        let closure = |talk: &Talk| talk.id == 2;
        assert_eq!(ids(&filter(&talks(), &spec, &closure)), vec![2]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let reserved: KeyIndex<u32> = [1, 2].into_iter().collect();
        let spec = FilterSpec::new()
            .with_keyword("rust")
            .with_categories(["public", "private"])
            .with_date_range(date("2024-11-21"), None)
            .only_flagged(true);

        assert_eq!(ids(&filter(&talks(), &spec, &reserved)), vec![2]);
    }

    #[test]
    fn test_filters_references() {
        let all = talks();
        let refs: Vec<&Talk> = all.iter().collect();
        let spec = FilterSpec::new().with_keyword("keynote");

        let hits = filter(&refs, &spec, &Unflagged);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 3);
    }
}
