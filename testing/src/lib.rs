//! # Expo Admin Testing
//!
//! Testing utilities and helpers for expo admin list screens.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - In-memory record and flag sources for list environments
//! - [`TestRecord`]: a small `Filterable` record with builders
//! - proptest strategies for record lists and filters
//!
//! ## Example
//!
//! ```ignore
//! use expo_admin_testing::{InMemoryRecordSource, TestRecord, list_environment};
//! use expo_admin_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_load_then_search() {
//!     let env = list_environment(vec![TestRecord::new("c1", "Rust Keynote")]);
//!     let store = Store::new(ListState::new(10), ListReducer::new(), env);
//!
//!     store.send(ListAction::Load).await;
//!     store.send(ListAction::SetKeyword("rust".into())).await;
//!
//!     assert_eq!(store.state(|s| s.visible().len()).await, 1);
//! }
//! ```

pub mod source_mocks;

pub use reducer_test::{ReducerTest, assertions};
pub use source_mocks::{FailingSource, InMemoryFlagSource, InMemoryRecordSource, list_environment};

use chrono::NaiveDate;
use expo_admin_core::Filterable;
use smallvec::{SmallVec, smallvec};

/// Minimal record used across the test suites.
///
/// Searchable fields are `title` and `speaker`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestRecord {
    /// Natural key
    pub id: String,
    /// Searchable title
    pub title: String,
    /// Searchable speaker name
    pub speaker: String,
    /// Optional show date
    pub date: Option<NaiveDate>,
    /// Optional category code
    pub category: Option<String>,
}

impl TestRecord {
    /// Create an undated, uncategorised record
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            speaker: String::new(),
            date: None,
            category: None,
        }
    }

    /// Set the speaker
    #[must_use]
    pub fn speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    /// Set the date from `YYYY-MM-DD`; an unparseable string leaves the record undated
    #[must_use]
    pub fn on(mut self, date: &str) -> Self {
        self.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        self
    }

    /// Set the category code
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl Filterable for TestRecord {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_fields(&self) -> SmallVec<[&str; 4]> {
        smallvec![self.title.as_str(), self.speaker.as_str()]
    }

    fn record_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn category_code(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Property-based testing utilities
///
/// Strategies produce small id and word alphabets on purpose, so generated
/// lists contain duplicate keys and keyword hits often.
pub mod properties {
    use super::TestRecord;
    use chrono::NaiveDate;
    use expo_admin_core::FilterSpec;
    use proptest::collection::{btree_set, vec};
    use proptest::option;
    use proptest::prelude::*;

    /// A date in November 2024
    pub fn date() -> impl Strategy<Value = NaiveDate> {
        (1u32..=30).prop_filter_map("valid day", |day| NaiveDate::from_ymd_opt(2024, 11, day))
    }

    /// A single record drawn from a small id space
    pub fn record() -> impl Strategy<Value = TestRecord> {
        (
            "c[0-9]",
            "(Rust|Go|Cloud|Food|Retail) (Talk|Panel|Demo)",
            "(Ada|Grace|Linus|Barbara)",
            option::of(date()),
            option::of("(public|private|vip)"),
        )
            .prop_map(|(id, title, speaker, date, category)| TestRecord {
                id,
                title,
                speaker,
                date,
                category,
            })
    }

    /// Up to 40 records, duplicates likely
    pub fn records() -> impl Strategy<Value = Vec<TestRecord>> {
        vec(record(), 0..40)
    }

    /// A filter with any combination of criteria active (flag filter off)
    pub fn filter_spec() -> impl Strategy<Value = FilterSpec> {
        (
            option::of("(rust|GO|talk|ada|x)"),
            option::of(date()),
            option::of(date()),
            btree_set("(public|private|vip)", 0..3),
        )
            .prop_map(|(keyword, date_start, date_end, category_codes)| FilterSpec {
                keyword,
                date_start,
                date_end,
                category_codes,
                only_flagged: false,
            })
    }
}
