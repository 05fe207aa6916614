//! In-memory backend for tests and offline demos.

use super::{
    ApiError, ApiResponse, AuthApi, CreateTodolistData, LoginData, LoginParams, MeData, NoData,
    TodolistsApi,
};
use crate::state::{Todolist, TodolistId};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const MAX_TITLE_LEN: usize = 100;

/// Backend endpoint, used to script failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST auth/login`
    Login,
    /// `DELETE auth/login`
    Logout,
    /// `GET auth/me`
    Me,
    /// `GET todo-lists`
    GetTodolists,
    /// `POST todo-lists`
    CreateTodolist,
    /// `DELETE todo-lists/{id}`
    DeleteTodolist,
    /// `PUT todo-lists/{id}`
    UpdateTodolist,
}

/// A scripted failure for one endpoint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockFailure {
    /// The call fails with this error before reaching the backend
    Network(ApiError),
    /// The backend answers with a non-zero result code
    Rejected {
        /// Result code to return
        result_code: i32,
        /// Messages to return
        messages: Vec<String>,
    },
}

impl MockFailure {
    /// A transport failure with the given description
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(ApiError::RequestFailed(message.into()))
    }

    /// An application error with result code 1 and one message
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            result_code: 1,
            messages: vec![message.into()],
        }
    }
}

/// A call the mock received, in arrival order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `login` with this email
    Login {
        /// Email sent
        email: String,
    },
    /// `logout`
    Logout,
    /// `me`
    Me,
    /// `get_todolists`
    GetTodolists,
    /// `create_todolist`
    CreateTodolist {
        /// Title sent
        title: String,
    },
    /// `delete_todolist`
    DeleteTodolist {
        /// Id sent
        id: TodolistId,
    },
    /// `update_todolist`
    UpdateTodolist {
        /// Id sent
        id: TodolistId,
        /// Title sent
        title: String,
    },
}

#[derive(Debug, Default)]
struct Backend {
    todolists: Vec<Todolist>,
    logged_in: bool,
    credentials: Option<(String, String)>,
    failures: HashMap<Endpoint, MockFailure>,
    calls: Vec<ApiCall>,
    next_id: u64,
    latency: Duration,
}

/// Mock backend.
///
/// Keeps todolists and the session flag in memory and behaves like the real
/// backend for the happy path and its validation errors. Failures can be
/// scripted per endpoint with [`MockApi::fail`]; they persist until
/// [`MockApi::clear_failure`]. Clones share the same backend.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    backend: Arc<Mutex<Backend>>,
}

impl MockApi {
    /// Create an empty, logged-out backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored todolists
    #[must_use]
    pub fn with_todolists(self, todolists: Vec<Todolist>) -> Self {
        self.backend().todolists = todolists;
        self
    }

    /// Start with an active session
    #[must_use]
    pub fn with_session(self) -> Self {
        self.backend().logged_in = true;
        self
    }

    /// Only accept these credentials on login
    #[must_use]
    pub fn with_credentials(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.backend().credentials = Some((email.into(), password.into()));
        self
    }

    /// Delay every reply by `latency`
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        self.backend().latency = latency;
        self
    }

    /// Make every call to `endpoint` fail with `failure`
    pub fn fail(&self, endpoint: Endpoint, failure: MockFailure) {
        self.backend().failures.insert(endpoint, failure);
    }

    /// Remove the scripted failure for `endpoint`
    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.backend().failures.remove(&endpoint);
    }

    /// Every call received so far
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.backend().calls.clone()
    }

    /// Todolists currently stored
    #[must_use]
    pub fn todolists(&self) -> Vec<Todolist> {
        self.backend().todolists.clone()
    }

    /// Whether the backend holds an active session
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.backend().logged_in
    }

    fn backend(&self) -> MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, then either apply the scripted failure or run `handle`
    fn respond<T, F>(
        &self,
        endpoint: Endpoint,
        call: ApiCall,
        empty: T,
        handle: F,
    ) -> impl Future<Output = Result<ApiResponse<T>, ApiError>> + Send + use<T, F>
    where
        T: Send + 'static,
        F: FnOnce(&mut Backend) -> ApiResponse<T>,
    {
        let (result, latency) = {
            let mut backend = self.backend();
            backend.calls.push(call);

            let result = match backend.failures.get(&endpoint).cloned() {
                Some(MockFailure::Network(error)) => Err(error),
                Some(MockFailure::Rejected {
                    result_code,
                    messages,
                }) => Ok(ApiResponse::rejected(result_code, messages, empty)),
                None => Ok(handle(&mut backend)),
            };
            (result, backend.latency)
        };

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }
}

fn validate_title(title: &str) -> Option<String> {
    if title.trim().is_empty() {
        Some("Field Title is required. (Title)".to_string())
    } else if title.chars().count() > MAX_TITLE_LEN {
        Some(format!(
            "The field Title must be a string or array type with a maximum length of '{MAX_TITLE_LEN}'. (Title)"
        ))
    } else {
        None
    }
}

impl AuthApi for MockApi {
    fn login(
        &self,
        params: &LoginParams,
    ) -> impl Future<Output = Result<ApiResponse<LoginData>, ApiError>> + Send {
        let call = ApiCall::Login {
            email: params.email.clone(),
        };
        let params = params.clone();

        self.respond(Endpoint::Login, call, LoginData::default(), move |backend| {
            let accepted = backend.credentials.as_ref().is_none_or(|(email, password)| {
                *email == params.email && *password == params.password
            });

            if accepted {
                backend.logged_in = true;
                ApiResponse::success(LoginData { user_id: 1 })
            } else {
                ApiResponse::rejected(
                    1,
                    vec!["Incorrect Email or Password".to_string()],
                    LoginData::default(),
                )
            }
        })
    }

    fn logout(&self) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        self.respond(Endpoint::Logout, ApiCall::Logout, NoData {}, |backend| {
            backend.logged_in = false;
            ApiResponse::success(NoData {})
        })
    }

    fn me(&self) -> impl Future<Output = Result<ApiResponse<MeData>, ApiError>> + Send {
        self.respond(Endpoint::Me, ApiCall::Me, MeData::default(), |backend| {
            if backend.logged_in {
                let (email, login) = backend.credentials.as_ref().map_or_else(
                    || ("free@samuraijs.com".to_string(), "free".to_string()),
                    |(email, _)| (email.clone(), email.split('@').next().unwrap_or_default().to_string()),
                );
                ApiResponse::success(MeData { id: 1, email, login })
            } else {
                ApiResponse::rejected(
                    1,
                    vec!["You are not authorized".to_string()],
                    MeData::default(),
                )
            }
        })
    }
}

impl TodolistsApi for MockApi {
    fn get_todolists(&self) -> impl Future<Output = Result<Vec<Todolist>, ApiError>> + Send {
        let response = self.respond(
            Endpoint::GetTodolists,
            ApiCall::GetTodolists,
            Vec::new(),
            |backend| ApiResponse::success(backend.todolists.clone()),
        );

        async move {
            let response = response.await?;
            if response.is_success() {
                Ok(response.data)
            } else {
                // The list endpoint has no envelope, so a rejection surfaces as a status error
                Err(ApiError::Status {
                    status: 401,
                    message: response.messages.join("; "),
                })
            }
        }
    }

    fn create_todolist(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<CreateTodolistData>, ApiError>> + Send {
        let call = ApiCall::CreateTodolist {
            title: title.to_string(),
        };
        let title = title.to_string();

        self.respond(Endpoint::CreateTodolist, call, CreateTodolistData::default(), move |backend| {
            if let Some(message) = validate_title(&title) {
                return ApiResponse::rejected(1, vec![message], CreateTodolistData::default());
            }

            backend.next_id += 1;
            let mut item = Todolist::new(format!("mock-{}", backend.next_id), title);
            item.meta.insert("order".to_string(), Value::from(0));
            backend.todolists.insert(0, item.clone());
            ApiResponse::success(CreateTodolistData { item: Some(item) })
        })
    }

    fn delete_todolist(
        &self,
        id: &TodolistId,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        let call = ApiCall::DeleteTodolist { id: id.clone() };
        let id = id.clone();

        self.respond(Endpoint::DeleteTodolist, call, NoData {}, move |backend| {
            let before = backend.todolists.len();
            backend.todolists.retain(|tl| tl.id != id);

            if backend.todolists.len() < before {
                ApiResponse::success(NoData {})
            } else {
                ApiResponse::rejected(1, vec!["Todolist not found".to_string()], NoData {})
            }
        })
    }

    fn update_todolist(
        &self,
        id: &TodolistId,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        let call = ApiCall::UpdateTodolist {
            id: id.clone(),
            title: title.to_string(),
        };
        let id = id.clone();
        let title = title.to_string();

        self.respond(Endpoint::UpdateTodolist, call, NoData {}, move |backend| {
            if let Some(message) = validate_title(&title) {
                return ApiResponse::rejected(1, vec![message], NoData {});
            }

            match backend.todolists.iter_mut().find(|tl| tl.id == id) {
                Some(todolist) => {
                    todolist.title = title;
                    ApiResponse::success(NoData {})
                },
                None => ApiResponse::rejected(1, vec!["Todolist not found".to_string()], NoData {}),
            }
        })
    }
}
