//! # Expo Admin Runtime
//!
//! The [`Store`](store::Store) owns a screen's state, runs its reducer, and
//! executes the effects the reducer returns.
//!
//! Effects run cooperatively on the caller's task: `send` awaits each
//! `Effect::Future` in turn and reduces whatever actions they produce, in
//! FIFO order, before returning. Nothing is spawned, so a screen driven by a
//! store behaves like a single-threaded event loop.
//!
//! ## Example
//!
//! ```ignore
//! use expo_admin_core::view::{ListAction, ListEnvironment, ListReducer, ListState};
//! use expo_admin_runtime::Store;
//!
//! let store = Store::new(ListState::new(10), ListReducer::new(), environment);
//! store.send(ListAction::Load).await;
//! store.send(ListAction::SetKeyword("rust".into())).await;
//!
//! let rows = store.state(|s| s.render_table().rows.len()).await;
//! ```

pub use store::Store;

/// Store module - owns state and executes effects
pub mod store {
    use expo_admin_core::{effect::Effect, reducer::Reducer};
    use futures::future::{BoxFuture, FutureExt, join_all};
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// The Store - runtime for a reducer
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync,
        A: Send + 'static,
        S: Send + Sync,
        E: Send + Sync,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces the action, executes the returned effects, and keeps
        /// reducing any actions those effects produce until none are left.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, including `action` itself.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> usize {
            let mut queue = VecDeque::from([action]);
            let mut reduced = 0;

            while let Some(action) = queue.pop_front() {
                let effects = {
                    let mut state = self.state.write().await;
                    self.reducer.reduce(&mut state, action, &self.environment)
                };
                reduced += 1;
                metrics::counter!("store.actions.reduced").increment(1);

                for effect in effects {
                    queue.extend(execute(effect).await);
                }
            }

            tracing::trace!(reduced, "store settled");
            reduced
        }

        /// Read a projection of the current state
        ///
        /// # Arguments
        ///
        /// - `f`: Closure that receives a reference to state and returns a value
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
            }
        }
    }

    /// Run one effect to completion and collect the actions it produced.
    fn execute<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        async move {
            match effect {
                Effect::None => {
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                    Vec::new()
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    fut.await.into_iter().collect()
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential").increment(1);
                    let mut produced = Vec::new();
                    for effect in effects {
                        produced.extend(execute(effect).await);
                    }
                    produced
                },
                Effect::Parallel(effects) => {
                    tracing::trace!("Executing Effect::Parallel with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "parallel").increment(1);
                    join_all(effects.into_iter().map(execute))
                        .await
                        .into_iter()
                        .flatten()
                        .collect()
                },
            }
        }
        .boxed()
    }
}
