//! # Todolists Testing
//!
//! Testing utilities and helpers for the todolists state layer.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for pure reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`ActionRecorder`]: A dispatcher that records every action it receives, so
//!   effects and async workflows can be tested without a running store
//!
//! ## Example
//!
//! ```ignore
//! use todolists_testing::ActionRecorder;
//!
//! #[tokio::test]
//! async fn test_fetch_todolists() {
//!     let api = MockApi::new().with_todolists(vec![todolist("1", "What to learn")]);
//!     let recorder = ActionRecorder::new();
//!
//!     fetch_todolists(&api, &recorder.dispatcher()).await;
//!
//!     assert_eq!(recorder.actions().len(), 3);
//! }
//! ```

use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::{Arc, Mutex, PoisonError};
use todolists_core::effect::{Dispatcher, Effect};


pub use reducer_test::{assertions, ReducerTest};

/// Records every action dispatched through it, in order
///
/// Clones share the same log.
#[derive(Debug)]
pub struct ActionRecorder<A> {
    actions: Arc<Mutex<Vec<A>>>,
}

impl<A> Clone for ActionRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            actions: Arc::clone(&self.actions),
        }
    }
}

impl<A> Default for ActionRecorder<A> {
    fn default() -> Self {
        Self {
            actions: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A> ActionRecorder<A>
where
    A: Clone + Send + 'static,
{
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher that appends to this recorder's log
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<A> {
        let actions = Arc::clone(&self.actions);
        Dispatcher::new(move |action: A| {
            actions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(action);
            async {}
        })
    }

    /// Snapshot of the recorded actions
    #[must_use]
    pub fn actions(&self) -> Vec<A> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Execute effects to completion, recording the actions they produce
    ///
    /// Produced actions are recorded but not reduced. Delays are skipped so the
    /// delayed action is recorded immediately. Parallel effects run one after
    /// another in declaration order.
    pub async fn run_effects(&self, effects: impl IntoIterator<Item = Effect<A>>) {
        for effect in effects {
            self.run_effect(effect).await;
        }
    }

    fn run_effect(&self, effect: Effect<A>) -> BoxFuture<'_, ()> {
        async move {
            match effect {
                Effect::None => {},
                Effect::Future(fut) => {
                    if let Some(action) = fut.await {
                        self.dispatcher().dispatch(action).await;
                    }
                },
                Effect::Delay { action, .. } => self.dispatcher().dispatch(*action).await,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                },
                Effect::Run(task) => task(self.dispatcher()).await,
            }
        }
        .boxed()
    }
}
