//! Todolist CRUD workflows.

use super::{report_network_error, report_server_error, set_status, ThunkOutcome};
use crate::actions::{RootAction, TodolistsAction};
use crate::api::{ApiError, TodolistsApi};
use crate::state::{RequestStatus, TodolistId};
use todolists_core::effect::Dispatcher;

/// Reload every todolist; on failure the current collection is kept.
pub async fn fetch_todolists<Api: TodolistsApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
) -> ThunkOutcome {
    set_status(dispatch, RequestStatus::Loading).await;

    match api.get_todolists().await {
        Ok(todolists) => {
            tracing::debug!(count = todolists.len(), "Fetched todolists");
            dispatch.dispatch(TodolistsAction::SetAll { todolists }.into()).await;
            set_status(dispatch, RequestStatus::Succeeded).await;
            ThunkOutcome::Succeeded
        },
        Err(error) => report_network_error(&error, dispatch).await,
    }
}

/// Delete a todolist.
///
/// The record is marked `loading` while the request runs. Any completed
/// response removes it locally; the result code is not inspected. On a
/// network failure the record stays and is marked `failed`.
pub async fn remove_todolist<Api: TodolistsApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
    id: &TodolistId,
) -> ThunkOutcome {
    set_status(dispatch, RequestStatus::Loading).await;
    change_entity_status(dispatch, id, RequestStatus::Loading).await;

    match api.delete_todolist(id).await {
        Ok(response) => {
            if !response.is_success() {
                tracing::debug!(%id, result_code = response.result_code, "Delete answered with non-zero result code");
            }
            dispatch.dispatch(TodolistsAction::Remove { id: id.clone() }.into()).await;
            set_status(dispatch, RequestStatus::Succeeded).await;
            ThunkOutcome::Succeeded
        },
        Err(error) => {
            let outcome = report_network_error(&error, dispatch).await;
            change_entity_status(dispatch, id, RequestStatus::Failed).await;
            outcome
        },
    }
}

/// Create a todolist and prepend the record the backend returns.
pub async fn add_todolist<Api: TodolistsApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
    title: &str,
) -> ThunkOutcome {
    set_status(dispatch, RequestStatus::Loading).await;

    match api.create_todolist(title).await {
        Ok(response) if response.is_success() => match response.data.item {
            Some(todolist) => {
                tracing::debug!(id = %todolist.id, "Created todolist");
                dispatch.dispatch(TodolistsAction::Create { todolist }.into()).await;
                set_status(dispatch, RequestStatus::Succeeded).await;
                ThunkOutcome::Succeeded
            },
            None => {
                let error = ApiError::ResponseParseFailed("missing data.item".to_string());
                report_network_error(&error, dispatch).await
            },
        },
        Ok(response) => report_server_error(&response, dispatch).await,
        Err(error) => report_network_error(&error, dispatch).await,
    }
}

/// Rename a todolist. The global status is left alone on success.
pub async fn change_todolist_title<Api: TodolistsApi>(
    api: &Api,
    dispatch: &Dispatcher<RootAction>,
    id: &TodolistId,
    title: &str,
) -> ThunkOutcome {
    match api.update_todolist(id, title).await {
        Ok(response) if response.is_success() => {
            dispatch
                .dispatch(
                    TodolistsAction::ChangeTitle {
                        id: id.clone(),
                        title: title.to_string(),
                    }
                    .into(),
                )
                .await;
            ThunkOutcome::Succeeded
        },
        Ok(response) => report_server_error(&response, dispatch).await,
        Err(error) => report_network_error(&error, dispatch).await,
    }
}

async fn change_entity_status(
    dispatch: &Dispatcher<RootAction>,
    id: &TodolistId,
    status: RequestStatus,
) {
    dispatch
        .dispatch(
            TodolistsAction::ChangeEntityStatus {
                id: id.clone(),
                status,
            }
            .into(),
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::AppAction;
    use crate::api::{ApiCall, Endpoint, MockApi, MockFailure};
    use crate::state::Todolist;
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

    fn entity(id: &str, status: RequestStatus) -> RootAction {
        TodolistsAction::ChangeEntityStatus {
            id: id.into(),
            status,
        }
        .into()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let api = MockApi::new().with_todolists(vec![Todolist::new("1", "Groceries")]);
        let recorder = ActionRecorder::new();

        let outcome = fetch_todolists(&api, &recorder.dispatcher()).await;

        assert!(outcome.is_succeeded());
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                TodolistsAction::SetAll {
                    todolists: vec![Todolist::new("1", "Groceries")]
                }
                .into(),
                status(RequestStatus::Succeeded),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_network_failure_dispatches_no_set_all() {
        let api = MockApi::new();
        api.fail(Endpoint::GetTodolists, MockFailure::network("timeout"));
        let recorder = ActionRecorder::new();

        let _ = fetch_todolists(&api, &recorder.dispatcher()).await;

        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                error("timeout"),
                status(RequestStatus::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_success() {
        let api = MockApi::new().with_todolists(vec![Todolist::new("1", "Groceries")]);
        let recorder = ActionRecorder::new();

        let outcome = remove_todolist(&api, &recorder.dispatcher(), &"1".into()).await;

        assert!(outcome.is_succeeded());
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                entity("1", RequestStatus::Loading),
                TodolistsAction::Remove { id: "1".into() }.into(),
                status(RequestStatus::Succeeded),
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_ignores_result_code() {
        let api = MockApi::new();
        api.fail(Endpoint::DeleteTodolist, MockFailure::rejected("Todolist not found"));
        let recorder = ActionRecorder::new();

        let outcome = remove_todolist(&api, &recorder.dispatcher(), &"1".into()).await;

        assert!(outcome.is_succeeded());
        assert!(recorder
            .actions()
            .contains(&TodolistsAction::Remove { id: "1".into() }.into()));
    }

    #[tokio::test]
    async fn test_remove_network_failure_marks_record_failed() {
        let api = MockApi::new();
        api.fail(Endpoint::DeleteTodolist, MockFailure::network("Network Error"));
        let recorder = ActionRecorder::new();

        let outcome = remove_todolist(&api, &recorder.dispatcher(), &"1".into()).await;

        assert!(matches!(outcome, ThunkOutcome::Failed { .. }));
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                entity("1", RequestStatus::Loading),
                error("Network Error"),
                status(RequestStatus::Failed),
                entity("1", RequestStatus::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_success_uses_server_record() {
        let api = MockApi::new();
        let recorder = ActionRecorder::new();

        let outcome = add_todolist(&api, &recorder.dispatcher(), "Chores").await;

        assert!(outcome.is_succeeded());
        let created = api.todolists().remove(0);
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                TodolistsAction::Create { todolist: created }.into(),
                status(RequestStatus::Succeeded),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_rejected_is_not_added() {
        let api = MockApi::new();
        let recorder = ActionRecorder::new();

        let outcome = add_todolist(&api, &recorder.dispatcher(), "").await;

        assert_eq!(
            outcome,
            ThunkOutcome::Rejected {
                message: "Field Title is required. (Title)".to_string()
            }
        );
        assert_eq!(
            recorder.actions(),
            vec![
                status(RequestStatus::Loading),
                error("Field Title is required. (Title)"),
                status(RequestStatus::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_change_title_has_no_global_status() {
        let api = MockApi::new().with_todolists(vec![Todolist::new("1", "X")]);
        let recorder = ActionRecorder::new();

        let outcome = change_todolist_title(&api, &recorder.dispatcher(), &"1".into(), "Y").await;

        assert!(outcome.is_succeeded());
        assert_eq!(
            recorder.actions(),
            vec![RootAction::from(TodolistsAction::ChangeTitle {
                id: "1".into(),
                title: "Y".to_string(),
            })]
        );
        assert_eq!(
            api.calls(),
            vec![ApiCall::UpdateTodolist {
                id: "1".into(),
                title: "Y".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_change_title_rejected_keeps_old_title() {
        let api = MockApi::new().with_todolists(vec![Todolist::new("1", "X")]);
        api.fail(Endpoint::UpdateTodolist, MockFailure::rejected("Title is too long"));
        let recorder = ActionRecorder::new();

        let outcome = change_todolist_title(&api, &recorder.dispatcher(), &"1".into(), "Y").await;

        assert_eq!(
            outcome,
            ThunkOutcome::Rejected {
                message: "Title is too long".to_string()
            }
        );
        assert_eq!(
            recorder.actions(),
            vec![error("Title is too long"), status(RequestStatus::Failed)]
        );
        assert!(!recorder
            .actions()
            .iter()
            .any(|action| matches!(action, RootAction::Todolists(TodolistsAction::ChangeTitle { .. }))));
    }

    #[tokio::test]
    async fn test_change_title_network_failure() {
        let api = MockApi::new();
        api.fail(Endpoint::UpdateTodolist, MockFailure::network("Network Error"));
        let recorder = ActionRecorder::new();

        let _ = change_todolist_title(&api, &recorder.dispatcher(), &"1".into(), "Y").await;

        assert_eq!(
            recorder.actions(),
            vec![error("Network Error"), status(RequestStatus::Failed)]
        );
    }
}
