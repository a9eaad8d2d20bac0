//! List-view state machine shared by every table and schedule screen.
//!
//! A screen owns one [`ListState`] and feeds user input into it as
//! [`ListAction`]s. Rows are never stored: [`ListState::render_table`] and
//! [`ListState::render_sections`] rerun the whole pipeline from the latest
//! records and filter on every call.
//!
//! # Page reset rule
//!
//! Every action that changes the filter moves the screen back to page 1, so a
//! page number from a larger result set is never carried over. Actions that
//! replace the data (`Loaded`, `FlagsLoaded`) clamp the page into the new range
//! instead, which keeps the user's place on a refresh.

use crate::dedupe::dedupe;
use crate::effect::Effect;
use crate::environment::{FlagSource, RecordSource};
use crate::filter::{FilterSpec, Filterable, KeyIndex, filter};
use crate::group::group_by_key;
use crate::pagination::{PageWindow, paginate};
use crate::reducer::Reducer;
use chrono::NaiveDate;
use smallvec::{SmallVec, smallvec};
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::Arc;

/// Page size used when a screen does not configure one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Transient state of one list screen.
#[derive(Clone, Debug)]
pub struct ListState<T: Filterable> {
    /// Records exactly as last fetched, duplicates included
    pub records: Vec<T>,
    /// Active filter criteria
    pub filter: FilterSpec,
    /// Keys of flagged records (e.g. the participant's reservations)
    pub flagged: KeyIndex<T::Key>,
    /// Current page, 1-indexed
    pub page: usize,
    /// Items per page
    pub page_size: usize,
    /// A fetch is in flight
    pub loading: bool,
    /// Message from the last failed record fetch
    pub last_error: Option<String>,
    /// Message from the last failed flag fetch; `flagged` is stale while set
    pub flags_error: Option<String>,
}

impl<T: Filterable> ListState<T> {
    /// Creates an empty state on page 1
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            filter: FilterSpec::default(),
            flagged: KeyIndex::new(),
            page: 1,
            page_size: page_size.max(1),
            loading: false,
            last_error: None,
            flags_error: None,
        }
    }

    /// Replaces the records
    #[must_use]
    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.records = records;
        self
    }

    /// Replaces the filter
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the flagged keys
    #[must_use]
    pub fn with_flagged<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = T::Key>,
    {
        self.flagged = keys.into_iter().collect();
        self
    }

    fn unique(&self) -> Vec<&T> {
        dedupe(self.records.iter(), |record| record.key())
    }

    /// Deduplicated records matching the filter, in fetch order
    #[must_use]
    pub fn visible(&self) -> Vec<&T> {
        filter(&self.unique(), &self.filter, &self.flagged)
    }

    /// Page window for the current page
    #[must_use]
    pub fn page_window(&self) -> PageWindow {
        paginate(self.visible().len(), self.page_size, self.page)
    }

    fn clamp_page(&mut self) {
        self.page = self.page_window().current_page;
    }

    /// Dedupe, filter and paginate the current records
    #[must_use]
    pub fn render_table(&self) -> TablePage<'_, T> {
        let unique = self.unique();
        let matching = filter(&unique, &self.filter, &self.flagged);
        let window = paginate(matching.len(), self.page_size, self.page);
        let rows = window.slice(&matching).to_vec();

        tracing::debug!(
            total = self.records.len(),
            unique = unique.len(),
            matching = matching.len(),
            page = window.current_page,
            total_pages = window.total_pages,
            "rendered table page"
        );

        TablePage {
            rows,
            total_records: self.records.len(),
            unique_records: unique.len(),
            matching_records: matching.len(),
            window,
        }
    }

    /// Dedupe, filter and group the current records by `key_of`.
    ///
    /// Sections come back in ascending key order; an empty result means the
    /// screen should show its "no results" state.
    pub fn render_sections<K, F>(&self, mut key_of: F) -> Vec<Section<'_, K, T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let sections: Vec<Section<'_, K, T>> = group_by_key(self.visible(), |record| key_of(*record))
            .into_iter()
            .map(|(key, rows)| Section { key, rows })
            .collect();

        tracing::debug!(sections = sections.len(), "rendered sections");
        sections
    }
}

/// One rendered page of a flat table screen.
#[derive(Clone, Debug)]
pub struct TablePage<'a, T> {
    /// Rows on the current page
    pub rows: Vec<&'a T>,
    /// Pagination metadata
    pub window: PageWindow,
    /// Records as fetched, duplicates included
    pub total_records: usize,
    /// Records left after deduplication
    pub unique_records: usize,
    /// Records left after filtering
    pub matching_records: usize,
}

impl<T> TablePage<'_, T> {
    /// Whether the screen should show its empty state
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One bucket of a sectioned screen (e.g. every conference on one day).
#[derive(Clone, Debug)]
pub struct Section<'a, K, T> {
    /// Bucket key
    pub key: K,
    /// Records in fetch order
    pub rows: Vec<&'a T>,
}

/// Everything a list screen can be asked to do.
#[derive(Clone, Debug)]
pub enum ListAction<T: Filterable> {
    /// Fetch records (and flagged keys, if the screen has a flag source)
    Load,
    /// Records arrived
    Loaded(Vec<T>),
    /// The record fetch failed
    LoadFailed(String),
    /// Flagged keys arrived
    FlagsLoaded(Vec<T::Key>),
    /// The flag fetch failed; records are unaffected
    FlagsFailed(String),
    /// Search box changed; an empty string clears the keyword
    SetKeyword(String),
    /// Date range changed
    SetDateRange {
        /// Inclusive lower bound
        start: Option<NaiveDate>,
        /// Inclusive upper bound
        end: Option<NaiveDate>,
    },
    /// Add the category if absent, remove it if present
    ToggleCategory(String),
    /// Replace the category selection
    SetCategories(BTreeSet<String>),
    /// "Only show reserved" switch changed
    SetOnlyFlagged(bool),
    /// Clear every filter criterion
    ResetFilters,
    /// Jump to a page (clamped into range)
    GoToPage(usize),
    /// Next page, ignored on the last page
    NextPage,
    /// Previous page, ignored on the first page
    PreviousPage,
}

/// Injected data sources for a list screen.
pub struct ListEnvironment<T: Filterable> {
    /// Source of the screen's records
    pub records: Arc<dyn RecordSource<T>>,
    /// Optional source of flagged keys
    pub flags: Option<Arc<dyn FlagSource<T::Key>>>,
}

impl<T: Filterable> ListEnvironment<T> {
    /// Creates an environment without a flag source
    #[must_use]
    pub fn new(records: Arc<dyn RecordSource<T>>) -> Self {
        Self {
            records,
            flags: None,
        }
    }

    /// Adds a flag source
    #[must_use]
    pub fn with_flags(mut self, flags: Arc<dyn FlagSource<T::Key>>) -> Self {
        self.flags = Some(flags);
        self
    }
}

impl<T: Filterable> Clone for ListEnvironment<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            flags: self.flags.clone(),
        }
    }
}

/// Reducer driving a [`ListState`].
pub struct ListReducer<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> ListReducer<T> {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for ListReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ListReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

fn fetch_records<T>(source: Arc<dyn RecordSource<T>>) -> Effect<ListAction<T>>
where
    T: Filterable + Send + 'static,
    T::Key: Send,
{
    Effect::Future(Box::pin(async move {
        match source.fetch().await {
            Ok(records) => Some(ListAction::Loaded(records)),
            Err(reason) => Some(ListAction::LoadFailed(reason)),
        }
    }))
}

fn fetch_flags<T>(source: Arc<dyn FlagSource<T::Key>>) -> Effect<ListAction<T>>
where
    T: Filterable + Send + 'static,
    T::Key: Send + 'static,
{
    Effect::Future(Box::pin(async move {
        match source.flagged_keys().await {
            Ok(keys) => Some(ListAction::FlagsLoaded(keys)),
            Err(reason) => Some(ListAction::FlagsFailed(reason)),
        }
    }))
}

impl<T> Reducer for ListReducer<T>
where
    T: Filterable + Send + 'static,
    T::Key: Send + 'static,
{
    type State = ListState<T>;
    type Action = ListAction<T>;
    type Environment = ListEnvironment<T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Load => {
                state.loading = true;
                state.last_error = None;
                state.flags_error = None;

                let mut effects: SmallVec<[Effect<Self::Action>; 4]> =
                    smallvec![fetch_records(Arc::clone(&env.records))];
                if let Some(flags) = &env.flags {
                    effects.push(fetch_flags(Arc::clone(flags)));
                }
                effects
            },
            ListAction::Loaded(records) => {
                tracing::info!(count = records.len(), "records loaded");
                state.records = records;
                state.loading = false;
                state.clamp_page();
                smallvec![Effect::None]
            },
            ListAction::LoadFailed(reason) => {
                tracing::warn!(%reason, "failed to load records");
                state.loading = false;
                state.last_error = Some(reason);
                smallvec![Effect::None]
            },
            ListAction::FlagsLoaded(keys) => {
                tracing::debug!(count = keys.len(), "flagged keys loaded");
                state.flagged = keys.into_iter().collect();
                state.flags_error = None;
                state.clamp_page();
                smallvec![Effect::None]
            },
            ListAction::FlagsFailed(reason) => {
                tracing::warn!(%reason, "failed to load flagged keys");
                state.flags_error = Some(reason);
                smallvec![Effect::None]
            },
            ListAction::SetKeyword(keyword) => {
                state.filter.keyword = (!keyword.is_empty()).then_some(keyword);
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::SetDateRange { start, end } => {
                state.filter.date_start = start;
                state.filter.date_end = end;
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::ToggleCategory(code) => {
                if !state.filter.category_codes.remove(&code) {
                    state.filter.category_codes.insert(code);
                }
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::SetCategories(codes) => {
                state.filter.category_codes = codes;
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::SetOnlyFlagged(only_flagged) => {
                state.filter.only_flagged = only_flagged;
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::ResetFilters => {
                state.filter = FilterSpec::default();
                state.page = 1;
                smallvec![Effect::None]
            },
            ListAction::GoToPage(page) => {
                state.page = paginate(state.visible().len(), state.page_size, page).current_page;
                smallvec![Effect::None]
            },
            ListAction::NextPage => {
                let window = state.page_window();
                if window.has_next() {
                    state.page = window.current_page + 1;
                }
                smallvec![Effect::None]
            },
            ListAction::PreviousPage => {
                let window = state.page_window();
                if window.has_previous() {
                    state.page = window.current_page - 1;
                }
                smallvec![Effect::None]
            },
        }
    }
}
