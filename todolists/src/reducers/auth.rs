//! Session flag.

use crate::actions::AuthAction;
use crate::state::AuthState;
use todolists_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`AuthState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut AuthState,
        action: AuthAction,
        _env: &(),
    ) -> SmallVec<[Effect<AuthAction>; 4]> {
        match action {
            AuthAction::SetLoggedIn { value } => {
                tracing::debug!(value, "Session flag changed");
                state.is_logged_in = value;
            },
        }
        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todolists_testing::{assertions, ReducerTest};

    #[test]
    fn test_set_logged_in() {
        ReducerTest::new(AuthReducer)
            .with_env(())
            .given_state(AuthState::default())
            .when_action(AuthAction::SetLoggedIn { value: true })
            .then_state(|state| assert!(state.is_logged_in))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_set_logged_out() {
        ReducerTest::new(AuthReducer)
            .with_env(())
            .given_state(AuthState { is_logged_in: true })
            .when_action(AuthAction::SetLoggedIn { value: false })
            .then_state(|state| assert!(!state.is_logged_in))
            .run();
    }

    #[test]
    fn test_set_logged_in_is_unconditional() {
        ReducerTest::new(AuthReducer)
            .with_env(())
            .given_state(AuthState { is_logged_in: true })
            .when_action(AuthAction::SetLoggedIn { value: true })
            .then_state(|state| assert!(state.is_logged_in))
            .run();
    }
}
