//! Asynchronous workflows against the backend.
//!
//! A thunk receives the API client and a [`Dispatcher`] and reports everything
//! it learns by dispatching actions. Failures never escape: an application
//! error (non-zero result code) or a network error is turned into an error
//! banner plus `status = failed`, and the returned [`ThunkOutcome`] only says
//! which of the three endings happened.

mod app;
mod auth;
mod todolists;

pub use app::initialize_app;
pub use auth::{login, logout};
pub use todolists::{add_todolist, change_todolist_title, fetch_todolists, remove_todolist};

use crate::actions::{AppAction, RootAction};
use crate::api::{ApiError, ApiResponse};
use crate::state::RequestStatus;
use todolists_core::effect::Dispatcher;

/// Banner text when the backend gave no message
pub const DEFAULT_ERROR_MESSAGE: &str = "Some error occurred";

/// How a thunk ended
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum ThunkOutcome {
    /// The request succeeded and its result was applied
    Succeeded,
    /// The backend answered with a non-zero result code
    Rejected {
        /// Message shown to the user
        message: String,
    },
    /// No usable response arrived
    Failed {
        /// Message shown to the user
        message: String,
    },
}

impl ThunkOutcome {
    /// Whether the request succeeded
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

pub(crate) async fn set_status(dispatch: &Dispatcher<RootAction>, status: RequestStatus) {
    dispatch.dispatch(AppAction::SetStatus { status }.into()).await;
}

async fn report(dispatch: &Dispatcher<RootAction>, message: &str) {
    dispatch
        .dispatch(
            AppAction::SetError {
                error: Some(message.to_string()),
            }
            .into(),
        )
        .await;
    set_status(dispatch, RequestStatus::Failed).await;
}

/// First message of the envelope, or [`DEFAULT_ERROR_MESSAGE`]
pub(crate) fn server_message<T>(response: &ApiResponse<T>) -> String {
    response
        .messages
        .first()
        .filter(|message| !message.is_empty())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

/// Report an application error: show the first message, set `status = failed`
pub async fn report_server_error<T>(
    response: &ApiResponse<T>,
    dispatch: &Dispatcher<RootAction>,
) -> ThunkOutcome {
    let message = server_message(response);
    tracing::warn!(result_code = response.result_code, %message, "Backend rejected request");

    report(dispatch, &message).await;
    ThunkOutcome::Rejected { message }
}

/// Report a network error: show its message, set `status = failed`
pub async fn report_network_error(
    error: &ApiError,
    dispatch: &Dispatcher<RootAction>,
) -> ThunkOutcome {
    let message = match error.message() {
        message if message.is_empty() => DEFAULT_ERROR_MESSAGE.to_string(),
        message => message,
    };
    tracing::warn!(error = %error, "Request failed");

    report(dispatch, &message).await;
    ThunkOutcome::Failed { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NoData;
    use todolists_testing::ActionRecorder;

    fn banner_then_failed(message: &str) -> Vec<RootAction> {
        vec![
            AppAction::SetError {
                error: Some(message.to_string()),
            }
            .into(),
            AppAction::SetStatus {
                status: RequestStatus::Failed,
            }
            .into(),
        ]
    }

    #[tokio::test]
    async fn test_server_error_uses_first_message() {
        let recorder = ActionRecorder::new();
        let response = ApiResponse::rejected(
            1,
            vec!["Title too long".to_string(), "ignored".to_string()],
            NoData {},
        );

        let outcome = report_server_error(&response, &recorder.dispatcher()).await;

        assert_eq!(
            outcome,
            ThunkOutcome::Rejected {
                message: "Title too long".to_string()
            }
        );
        assert_eq!(recorder.actions(), banner_then_failed("Title too long"));
    }

    #[tokio::test]
    async fn test_server_error_without_messages() {
        let recorder = ActionRecorder::new();
        let response = ApiResponse::rejected(10, Vec::new(), NoData {});

        let _ = report_server_error(&response, &recorder.dispatcher()).await;

        assert_eq!(recorder.actions(), banner_then_failed(DEFAULT_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_network_error_message() {
        let recorder = ActionRecorder::new();
        let error = ApiError::RequestFailed("Network Error".to_string());

        let outcome = report_network_error(&error, &recorder.dispatcher()).await;

        assert!(matches!(outcome, ThunkOutcome::Failed { ref message } if message == "Network Error"));
        assert_eq!(recorder.actions(), banner_then_failed("Network Error"));
    }

    #[tokio::test]
    async fn test_network_error_without_message() {
        let recorder = ActionRecorder::new();
        let error = ApiError::RequestFailed(String::new());

        let _ = report_network_error(&error, &recorder.dispatcher()).await;

        assert_eq!(recorder.actions(), banner_then_failed(DEFAULT_ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_status_error_reports_status_code_not_body() {
        let recorder = ActionRecorder::new();
        let error = ApiError::Status {
            status: 502,
            message: "<html><body><h1>502 Bad Gateway</h1><hr>nginx</body></html>".to_string(),
        };

        let _ = report_network_error(&error, &recorder.dispatcher()).await;

        assert_eq!(
            recorder.actions(),
            banner_then_failed("Request failed with status code 502")
        );
    }
}
