//! # Expo Admin Core
//!
//! The list pipeline behind every table and schedule screen of the expo admin
//! dashboard (conferences, exhibitors, organizers, rooms).
//!
//! Records fetched from the remote API flow through four pure stages:
//!
//! ```text
//! raw records ─▶ dedupe ─▶ filter ─┬─▶ group_by_key  (date-sectioned views)
//!                                  └─▶ paginate      (flat table views)
//! ```
//!
//! - **[`dedupe`](dedupe::dedupe)**: keep the first record per natural key
//! - **[`filter`](filter::filter)**: conjunction of keyword, date range, category and flag predicates
//! - **[`group_by_key`](group::group_by_key)**: buckets keyed by a derived value, keys ascending
//! - **[`paginate`](pagination::paginate)**: slice bounds plus a sliding window of page buttons
//!
//! The [`view`] module wraps the stages in a reducer so the owning screen keeps a
//! single [`ListState`](view::ListState) and recomputes its rows on every render.
//!
//! ## Example
//!
//! ```
//! use expo_admin_core::pagination::paginate;
//!
//! let window = paginate(100, 10, 5);
//! assert_eq!(window.total_pages, 10);
//! assert_eq!(window.pages.as_slice(), &[3, 4, 5, 6, 7]);
//! ```

pub mod dedupe;
pub mod filter;
pub mod group;
pub mod pagination;
pub mod view;

// Re-export commonly used types
pub use chrono::NaiveDate;
pub use smallvec::{SmallVec, smallvec};

pub use dedupe::dedupe;
pub use filter::{FilterSpec, Filterable, KeyIndex, Membership, Unflagged, filter};
pub use group::{Grouping, group_by_key};
pub use pagination::{MAX_VISIBLE_PAGES, PageWindow, paginate};

/// Reducer module - the core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They never perform I/O themselves; anything asynchronous is described as an
/// [`Effect`](crate::effect::Effect) and executed by the runtime store.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for screen logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for ListReducer<Conference> {
    ///     type State = ListState<Conference>;
    ///     type Action = ListAction<Conference>;
    ///     type Environment = ListEnvironment<Conference>;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut Self::State,
    ///         action: Self::Action,
    ///         env: &Self::Environment,
    ///     ) -> SmallVec<[Effect<Self::Action>; 4]> {
    ///         match action {
    ///             ListAction::SetKeyword(keyword) => {
    ///                 state.filter.keyword = Some(keyword);
    ///                 state.page = 1;
    ///                 smallvec![Effect::None]
    ///             }
    ///             _ => smallvec![Effect::None],
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns effect descriptions for the
        /// runtime to execute.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions
///
/// Effects describe work for the runtime (fetching records, loading a
/// participant's reservations). They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are returned from reducers and
    /// executed by the store, which feeds any produced action back into the reducer.
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects concurrently, feeding back their actions in declaration order
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another
        Sequential(Vec<Effect<Action>>),

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Whether this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - dependency injection traits
///
/// Screens never talk to the remote API directly. Reducers receive these traits
/// through their environment, so tests can swap in fixed record sets.
pub mod environment {
    use std::future::Future;
    use std::pin::Pin;

    /// Boxed future returned by record sources.
    ///
    /// Failures are reported as display strings; the list view only needs to
    /// show them, never to branch on them.
    pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send + 'a>>;

    /// Something that can produce the full record list for one screen.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// struct StaticRooms(Vec<Room>);
    ///
    /// impl RecordSource<Room> for StaticRooms {
    ///     fn fetch(&self) -> SourceFuture<'_, Vec<Room>> {
    ///         let rooms = self.0.clone();
    ///         Box::pin(async move { Ok(rooms) })
    ///     }
    /// }
    /// ```
    pub trait RecordSource<T>: Send + Sync {
        /// Fetch every record for the current project scope
        fn fetch(&self) -> SourceFuture<'_, Vec<T>>;
    }

    /// Something that can list the keys of flagged records
    /// (for example, the conferences a participant has reserved).
    pub trait FlagSource<K>: Send + Sync {
        /// Fetch the keys of every flagged record
        fn flagged_keys(&self) -> SourceFuture<'_, Vec<K>>;
    }
}
