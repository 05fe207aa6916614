//! # Todolists Core
//!
//! Core traits and types for the todolists state layer.
//!
//! This crate provides the fundamental abstractions used to model client-side
//! application state as a set of reducers driven by dispatched actions.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature slice
//! - **Action**: A named, payload-carrying instruction describing a state change
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Dispatcher**: Capability handed to long-running effects so they can feed
//!   actions back into the store
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todolists_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct SessionState {
//!     is_logged_in: bool,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum SessionAction {
//!     SetLoggedIn { value: bool },
//! }
//!
//! struct SessionReducer;
//!
//! impl Reducer for SessionReducer {
//!     type State = SessionState;
//!     type Action = SessionAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut SessionState,
//!         action: SessionAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<SessionAction>; 4]> {
//!         match action {
//!             SessionAction::SetLoggedIn { value } => state.is_logged_in = value,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = SessionState::default();
//! let _ = SessionReducer.reduce(&mut state, SessionAction::SetLoggedIn { value: true }, &());
//! assert!(state.is_logged_in);
//! ```

// Re-export commonly used types
pub use smallvec::{smallvec, SmallVec};

/// Reducer composition utilities
pub mod composition;

/// Declarative macros for ergonomic effect construction
pub mod effect_macros;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all state transitions and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state slice this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodolistsReducer {
    ///     type State = TodolistsState;
    ///     type Action = TodolistsAction;
    ///     type Environment = ();
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodolistsState,
    ///         action: TodolistsAction,
    ///         _env: &(),
    ///     ) -> SmallVec<[Effect<TodolistsAction>; 4]> {
    ///         match action {
    ///             TodolistsAction::Remove { id } => state.remove(&id),
    ///             // ...
    ///         }
    ///         SmallVec::new()
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
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::future::Future;
    use std::sync::Arc;
    use std::time::Duration;

    /// A long-running task that receives a [`Dispatcher`] when the runtime starts it.
    pub type RunTask<Action> = Box<dyn FnOnce(Dispatcher<Action>) -> BoxFuture<'static, ()> + Send>;

    type SendFn<Action> = Arc<dyn Fn(Action) -> BoxFuture<'static, ()> + Send + Sync>;

    /// Capability to feed actions back into a store
    ///
    /// A `Dispatcher` is handed to [`Effect::Run`] tasks by the runtime. Awaiting
    /// [`Dispatcher::dispatch`] completes once the action has been reduced, so a
    /// task that dispatches several actions observes them applied in order.
    ///
    /// Tests build one directly from a closure to record what a task dispatches.
    ///
    /// # Example
    ///
    /// ```
    /// use todolists_core::effect::Dispatcher;
    ///
    /// let dispatcher = Dispatcher::new(|action: u32| async move {
    ///     assert_eq!(action, 7);
    /// });
    /// # let _ = dispatcher;
    /// ```
    pub struct Dispatcher<Action> {
        send: SendFn<Action>,
    }

    impl<Action: Send + 'static> Dispatcher<Action> {
        /// Create a dispatcher from an async send function
        #[must_use]
        pub fn new<F, Fut>(send: F) -> Self
        where
            F: Fn(Action) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = ()> + Send + 'static,
        {
            Self {
                send: Arc::new(move |action| send(action).boxed()),
            }
        }

        /// Dispatch an action and wait until it has been reduced
        pub async fn dispatch(&self, action: Action) {
            (self.send)(action).await;
        }

        /// Derive a dispatcher for a child action type
        ///
        /// Every child action is lifted with `embed` before it reaches this dispatcher.
        #[must_use]
        pub fn contramap<Child, F>(&self, embed: F) -> Dispatcher<Child>
        where
            Child: Send + 'static,
            F: Fn(Child) -> Action + Send + Sync + 'static,
        {
            let send = Arc::clone(&self.send);
            Dispatcher {
                send: Arc::new(move |child| send(embed(child))),
            }
        }
    }

    impl<Action> Clone for Dispatcher<Action> {
        fn clone(&self) -> Self {
            Self {
                send: Arc::clone(&self.send),
            }
        }
    }

    impl<Action> std::fmt::Debug for Dispatcher<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Dispatcher").finish_non_exhaustive()
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(BoxFuture<'static, Option<Action>>),

        /// Async task that may dispatch any number of actions while it runs
        ///
        /// Suspension points are whatever the task awaits; every dispatched action is
        /// reduced by the store before `dispatch` returns.
        Run(RunTask<Action>),
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
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Run(_) => write!(f, "Effect::Run(<task>)"),
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

        /// Returns `true` for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }

    impl<Action: Send + 'static> Effect<Action> {
        /// Build an [`Effect::Run`] from an async task
        #[must_use]
        pub fn run<F, Fut>(task: F) -> Self
        where
            F: FnOnce(Dispatcher<Action>) -> Fut + Send + 'static,
            Fut: Future<Output = ()> + Send + 'static,
        {
            Effect::Run(Box::new(move |dispatcher| task(dispatcher).boxed()))
        }

        /// Lift this effect into a parent action type
        ///
        /// Actions produced by the effect, and actions dispatched by a `Run` task,
        /// are wrapped with `embed` on their way back to the store.
        #[must_use]
        pub fn map<Parent, F>(self, embed: F) -> Effect<Parent>
        where
            Parent: Send + 'static,
            F: Fn(Action) -> Parent + Send + Sync + 'static,
        {
            self.map_shared(Arc::new(embed))
        }

        fn map_shared<Parent>(self, embed: Arc<dyn Fn(Action) -> Parent + Send + Sync>) -> Effect<Parent>
        where
            Parent: Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects
                        .into_iter()
                        .map(|effect| effect.map_shared(Arc::clone(&embed)))
                        .collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects
                        .into_iter()
                        .map(|effect| effect.map_shared(Arc::clone(&embed)))
                        .collect(),
                ),
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(embed(*action)),
                },
                Effect::Future(fut) => {
                    Effect::Future(async move { fut.await.map(|action| embed(action)) }.boxed())
                },
                Effect::Run(task) => Effect::Run(Box::new(move |dispatcher: Dispatcher<Parent>| {
                    task(dispatcher.contramap(move |action| embed(action)))
                })),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Dispatcher, Effect};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum Child {
        Loaded(u32),
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Parent {
        Child(Child),
    }

    fn recording() -> (Dispatcher<Parent>, Arc<Mutex<Vec<Parent>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let dispatcher = Dispatcher::new(move |action| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(action);
            }
        });
        (dispatcher, log)
    }

    #[tokio::test]
    async fn map_lifts_future_output() {
        let effect: Effect<Child> = Effect::Future(Box::pin(async { Some(Child::Loaded(3)) }));

        let Effect::Future(fut) = effect.map(Parent::Child) else {
            panic!("expected a future effect");
        };
        assert_eq!(fut.await, Some(Parent::Child(Child::Loaded(3))));
    }

    #[test]
    fn map_lifts_delayed_action() {
        let effect = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(Child::Loaded(1)),
        };

        match effect.map(Parent::Child) {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(5));
                assert_eq!(*action, Parent::Child(Child::Loaded(1)));
            },
            other => panic!("expected a delay effect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn map_lifts_actions_dispatched_by_run_task() {
        let effect: Effect<Child> = Effect::run(|dispatcher| async move {
            dispatcher.dispatch(Child::Loaded(1)).await;
            dispatcher.dispatch(Child::Loaded(2)).await;
        });

        let (dispatcher, log) = recording();
        let Effect::Run(task) = effect.map(Parent::Child) else {
            panic!("expected a run effect");
        };
        task(dispatcher).await;

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Parent::Child(Child::Loaded(1)),
                Parent::Child(Child::Loaded(2)),
            ]
        );
    }

    #[test]
    fn map_preserves_structure() {
        let effect: Effect<Child> = Effect::merge(vec![
            Effect::None,
            Effect::chain(vec![Effect::None, Effect::None]),
        ]);

        match effect.map(Parent::Child) {
            Effect::Parallel(effects) => {
                assert_eq!(effects.len(), 2);
                assert!(effects[0].is_none());
                assert!(matches!(&effects[1], Effect::Sequential(inner) if inner.len() == 2));
            },
            other => panic!("expected parallel effects, got {other:?}"),
        }
    }

    #[test]
    fn debug_hides_opaque_variants() {
        let effect: Effect<Child> = Effect::run(|_| async {});
        assert_eq!(format!("{effect:?}"), "Effect::Run(<task>)");
    }
}
