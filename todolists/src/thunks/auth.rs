//! Login and logout.

use super::{report_network_error, report_server_error, set_status, ThunkOutcome};
use crate::actions::{AuthAction, RootAction};
use crate::api::{AuthApi, LoginParams};
use crate::state::RequestStatus;
use todolists_core::effect::Dispatcher;

/// Log in; only a successful result code flips the session flag.
pub async fn login<Api: AuthApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
    params: &LoginParams,
) -> ThunkOutcome {
    set_status(dispatch, RequestStatus::Loading).await;

    match api.login(params).await {
        Ok(response) if response.is_success() => {
            tracing::info!(user_id = response.data.user_id, "Logged in");
            dispatch.dispatch(AuthAction::SetLoggedIn { value: true }.into()).await;
            set_status(dispatch, RequestStatus::Succeeded).await;
            ThunkOutcome::Succeeded
        },
        Ok(response) => report_server_error(&response, dispatch).await,
        Err(error) => report_network_error(&error, dispatch).await,
    }
}

/// Log out; only a successful result code clears the session flag.
pub async fn logout<Api: AuthApi>(api: &Api, dispatch: &Dispatcher<RootAction>) -> ThunkOutcome {
    set_status(dispatch, RequestStatus::Loading).await;

    match api.logout().await {
        Ok(response) if response.is_success() => {
            tracing::info!("Logged out");
            dispatch.dispatch(AuthAction::SetLoggedIn { value: false }.into()).await;
            set_status(dispatch, RequestStatus::Succeeded).await;
            ThunkOutcome::Succeeded
        },
        Ok(response) => report_server_error(&response, dispatch).await,
        Err(error) => report_network_error(&error, dispatch).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AppAction;
    use crate::api::{ApiCall, Endpoint, MockApi, MockFailure};
    use todolists_testing::ActionRecorder;

    fn status(status: RequestStatus) -> RootAction {
        AppAction::SetStatus { status }.into()
    }

    fn error(message: &str) -> RootAction {
        AppAction::SetError {
            error: Some(message.to_string()),
        }
        .into()
    }

    #[tokio::test]
    async fn test_login_success() {
        let api = MockApi::new();
        let recorder = ActionRecorder::new();
        let params = LoginParams::new("free@samuraijs.com", "free", true);

        let outcome = login(&api, &recorder.dispatcher(), &params).await;

        assert!(outcome.is_succeeded());
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                AuthAction::SetLoggedIn { value: true }.into(),
                status(RequestStatus::Succeeded),
            ]
        );
        assert_eq!(
            api.calls(),
            vec![ApiCall::Login {
                email: "free@samuraijs.com".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_login_rejected_keeps_session_flag() {
        let api = MockApi::new().with_credentials("free@samuraijs.com", "free");
        let recorder = ActionRecorder::new();
        let params = LoginParams::new("free@samuraijs.com", "nope", false);

        let outcome = login(&api, &recorder.dispatcher(), &params).await;

        assert_eq!(
            outcome,
            ThunkOutcome::Rejected {
                message: "Incorrect Email or Password".to_string()
            }
        );
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                error("Incorrect Email or Password"),
                status(RequestStatus::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_login_network_failure() {
        let api = MockApi::new();
        api.fail(Endpoint::Login, MockFailure::network("Network Error"));
        let recorder = ActionRecorder::new();

        let outcome = login(&api, &recorder.dispatcher(), &LoginParams::new("a", "b", false)).await;

        assert!(matches!(outcome, ThunkOutcome::Failed { .. }));
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                error("Network Error"),
                status(RequestStatus::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_success() {
        let api = MockApi::new().with_session();
        let recorder = ActionRecorder::new();

        let outcome = logout(&api, &recorder.dispatcher()).await;

        assert!(outcome.is_succeeded());
        assert!(!api.is_logged_in());
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                AuthAction::SetLoggedIn { value: false }.into(),
                status(RequestStatus::Succeeded),
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_rejected() {
        let api = MockApi::new().with_session();
        api.fail(Endpoint::Logout, MockFailure::rejected("Logout is not allowed"));
        let recorder = ActionRecorder::new();

        let _ = logout(&api, &recorder.dispatcher()).await;

        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                error("Logout is not allowed"),
                status(RequestStatus::Failed),
            ]
        );
    }
}
