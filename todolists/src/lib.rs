//! # Todolists
//!
//! Client-side state for a to-do list application: a session slice, a global
//! status slice and an ordered collection of todolists, driven by actions
//! through a single [`Store`](todolists_runtime::Store).
//!
//! Workflows against the backend ("thunks") are started by dispatching a
//! [`Command`](actions::Command). The root reducer turns it into an
//! `Effect::Run`; the thunk calls the API and reports every outcome by
//! dispatching further actions, so all state changes stay serialized.
//!
//! ## Example
//!
//! ```no_run
//! use todolists::{actions::Command, api::MockApi, new_store};
//! use todolists_runtime::StoreConfig;
//!
//! # async fn demo() -> Result<(), todolists_runtime::StoreError> {
//! let store = new_store(MockApi::new(), StoreConfig::default());
//!
//! let mut handle = store.send(Command::AddTodolist { title: "What to learn".into() }.into()).await?;
//! handle.wait().await;
//!
//! let titles: Vec<String> = store
//!     .state(|s| s.todolists.iter().map(|tl| tl.title().to_string()).collect())
//!     .await;
//! assert_eq!(titles, vec!["What to learn"]);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod environment;
pub mod reducers;
pub mod state;
pub mod thunks;

use actions::RootAction;
use api::{AuthApi, TodolistsApi};
use environment::TodolistsEnvironment;
use reducers::RootReducer;
use state::RootState;
use todolists_runtime::{Store, StoreConfig};

/// The application store
pub type TodolistsStore<Api> =
    Store<RootState, RootAction, TodolistsEnvironment<Api>, RootReducer<Api>>;

/// Create a store with empty initial state backed by `api`
#[must_use]
pub fn new_store<Api>(api: Api, config: StoreConfig) -> TodolistsStore<Api>
where
    Api: AuthApi + TodolistsApi + Clone + 'static,
{
    Store::with_config(
        RootState::default(),
        RootReducer::new(),
        TodolistsEnvironment::new(api),
        config,
    )
}
