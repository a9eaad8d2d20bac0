//! In-memory record sources for list screen tests
//!
//! Provides deterministic stand-ins for the remote API:
//! - [`InMemoryRecordSource`]: serves a replaceable record list and counts fetches
//! - [`InMemoryFlagSource`]: serves a fixed list of flagged keys
//! - [`FailingSource`]: always fails with a fixed message

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use expo_admin_core::Filterable;
use expo_admin_core::environment::{FlagSource, RecordSource, SourceFuture};
use expo_admin_core::view::ListEnvironment;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory record source for fast, deterministic testing.
///
/// # Example
///
/// ```
/// use expo_admin_testing::{InMemoryRecordSource, TestRecord};
/// use expo_admin_core::environment::RecordSource;
///
/// let source = InMemoryRecordSource::new(vec![TestRecord::new("c1", "Keynote")]);
/// let records = tokio_test::block_on(source.fetch()).unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(source.fetch_count(), 1);
/// ```
#[derive(Debug)]
pub struct InMemoryRecordSource<T> {
    records: RwLock<Vec<T>>,
    fetches: AtomicUsize,
}

impl<T: Clone> InMemoryRecordSource<T> {
    /// Create a source serving `records`
    #[must_use]
    pub const fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replace the records served by later fetches
    pub fn set_records(&self, records: Vec<T>) {
        *self.records.write().unwrap() = records;
    }

    /// Number of completed fetches
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl<T: Clone + Send + Sync> RecordSource<T> for InMemoryRecordSource<T> {
    fn fetch(&self) -> SourceFuture<'_, Vec<T>> {
        let records = self.records.read().unwrap().clone();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(records) })
    }
}

/// In-memory source of flagged keys.
#[derive(Clone, Debug)]
pub struct InMemoryFlagSource<K> {
    keys: Vec<K>,
}

impl<K> InMemoryFlagSource<K> {
    /// Create a source serving `keys`
    #[must_use]
    pub const fn new(keys: Vec<K>) -> Self {
        Self { keys }
    }
}

impl<K: Clone + Send + Sync> FlagSource<K> for InMemoryFlagSource<K> {
    fn flagged_keys(&self) -> SourceFuture<'_, Vec<K>> {
        let keys = self.keys.clone();
        Box::pin(async move { Ok(keys) })
    }
}

/// Source that fails every fetch with the same message.
#[derive(Clone, Debug)]
pub struct FailingSource {
    message: String,
}

impl FailingSource {
    /// Create a source failing with `message`
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<T: Send> RecordSource<T> for FailingSource {
    fn fetch(&self) -> SourceFuture<'_, Vec<T>> {
        let message = self.message.clone();
        Box::pin(async move { Err(message) })
    }
}

impl<K: Send> FlagSource<K> for FailingSource {
    fn flagged_keys(&self) -> SourceFuture<'_, Vec<K>> {
        let message = self.message.clone();
        Box::pin(async move { Err(message) })
    }
}

/// List environment serving `records` from an [`InMemoryRecordSource`]
#[must_use]
pub fn list_environment<T>(records: Vec<T>) -> ListEnvironment<T>
where
    T: Filterable + Clone + Send + Sync + 'static,
{
    ListEnvironment::new(Arc::new(InMemoryRecordSource::new(records)))
}
