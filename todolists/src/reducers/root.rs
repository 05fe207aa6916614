//! Root reducer: slice routing and workflow commands.

use super::{AppReducer, AuthReducer, TodolistsReducer};
use crate::actions::{Command, RootAction};
use crate::api::{AuthApi, TodolistsApi};
use crate::environment::TodolistsEnvironment;
use crate::state::RootState;
use crate::thunks::{self, ThunkOutcome};
use std::marker::PhantomData;
use todolists_core::{
    composition::scope, effect::Effect, reducer::Reducer, run_effect, smallvec, SmallVec,
};

/// Reducer for [`RootState`].
///
/// Slice actions are scoped onto their slice. A [`Command`] changes no state;
/// it becomes an `Effect::Run` that executes the matching thunk with the
/// environment's API client.
pub struct RootReducer<Api> {
    _api: PhantomData<fn() -> Api>,
}

impl<Api> RootReducer<Api> {
    /// Create the root reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _api: PhantomData }
    }
}

impl<Api> Default for RootReducer<Api> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Api> Clone for RootReducer<Api> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Api> Copy for RootReducer<Api> {}

impl<Api> std::fmt::Debug for RootReducer<Api> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootReducer").finish()
    }
}

impl<Api> RootReducer<Api>
where
    Api: AuthApi + TodolistsApi + Clone + 'static,
{
    fn workflow(command: Command, api: Api) -> Effect<RootAction> {
        run_effect!(|dispatch| {
            tracing::debug!(?command, "Starting workflow");

            let outcome = match &command {
                Command::InitializeApp => thunks::initialize_app(&api, &dispatch).await,
                Command::Login { params } => thunks::login(&api, &dispatch, params).await,
                Command::Logout => thunks::logout(&api, &dispatch).await,
                Command::FetchTodolists => thunks::fetch_todolists(&api, &dispatch).await,
                Command::RemoveTodolist { id } => thunks::remove_todolist(&api, &dispatch, id).await,
                Command::AddTodolist { title } => thunks::add_todolist(&api, &dispatch, title).await,
                Command::ChangeTodolistTitle { id, title } => {
                    thunks::change_todolist_title(&api, &dispatch, id, title).await
                },
            };

            match outcome {
                ThunkOutcome::Succeeded => tracing::debug!(?command, "Workflow succeeded"),
                ThunkOutcome::Rejected { message } => {
                    tracing::info!(?command, %message, "Workflow rejected by backend");
                },
                ThunkOutcome::Failed { message } => {
                    tracing::warn!(?command, %message, "Workflow failed");
                },
            }
        })
    }
}

impl<Api> Reducer for RootReducer<Api>
where
    Api: AuthApi + TodolistsApi + Clone + 'static,
{
    type State = RootState;
    type Action = RootAction;
    type Environment = TodolistsEnvironment<Api>;

    fn reduce(
        &self,
        state: &mut RootState,
        action: RootAction,
        env: &TodolistsEnvironment<Api>,
    ) -> SmallVec<[Effect<RootAction>; 4]> {
        match action {
            RootAction::App(action) => {
                scope(&AppReducer, &mut state.app, action, &(), RootAction::App)
            },
            RootAction::Auth(action) => {
                scope(&AuthReducer, &mut state.auth, action, &(), RootAction::Auth)
            },
            RootAction::Todolists(action) => scope(
                &TodolistsReducer,
                &mut state.todolists,
                action,
                &(),
                RootAction::Todolists,
            ),
            RootAction::Command(command) => {
                smallvec![Self::workflow(command, env.api.clone())]
            },
        }
    }
}
