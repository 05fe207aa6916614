//! Startup session check.

use super::{report_network_error, server_message, ThunkOutcome};
use crate::actions::{AppAction, AuthAction, RootAction};
use crate::api::AuthApi;
use todolists_core::effect::Dispatcher;

/// Ask the backend whether a session already exists.
///
/// Result code 0 marks the user logged in; any other code just means no
/// session and is not shown as an error. A network failure is reported. In
/// every case the app is marked initialized at the end.
pub async fn initialize_app<Api: AuthApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
) -> ThunkOutcome {
    let outcome = match api.me().await {
        Ok(response) if response.is_success() => {
            tracing::info!(login = %response.data.login, "Existing session found");
            dispatch.dispatch(AuthAction::SetLoggedIn { value: true }.into()).await;
            ThunkOutcome::Succeeded
        },
        Ok(response) => {
            tracing::info!("No active session");
            ThunkOutcome::Rejected {
                message: server_message(&response),
            }
        },
        Err(error) => report_network_error(&error, dispatch).await,
    };

    dispatch.dispatch(AppAction::SetInitialized { value: true }.into()).await;
    outcome
}
