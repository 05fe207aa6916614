//! Global request status and error banner.

use crate::actions::AppAction;
use crate::state::AppState;
use todolists_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`AppState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut AppState,
        action: AppAction,
        _env: &(),
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        match action {
            AppAction::SetStatus { status } => state.status = status,
            AppAction::SetError { error } => state.error = error,
            AppAction::SetInitialized { value } => state.is_initialized = value,
        }
        SmallVec::new()
    }
}
