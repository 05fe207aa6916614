//! Backend API: wire types, client traits and implementations.
//!
//! Thunks depend on the [`AuthApi`] and [`TodolistsApi`] traits only. The
//! production implementation is [`HttpApi`]; tests use [`MockApi`].

mod error;
mod http;
#[cfg(any(test, feature = "test-utils"))]
mod mock;

pub use error::ApiError;
pub use http::{ApiConfig, HttpApi, DEFAULT_BASE_URL};
pub(crate) use http::parse_base_url;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{ApiCall, Endpoint, MockApi, MockFailure};

use crate::state::{Todolist, TodolistId};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Result code the backend uses for success
pub const RESULT_CODE_SUCCESS: i32 = 0;

/// Response envelope of every mutating endpoint and of `auth/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `0` on success, anything else is an application-level error
    #[serde(rename = "resultCode")]
    pub result_code: i32,
    /// Human-readable messages, the first one is shown to the user
    #[serde(default)]
    pub messages: Vec<String>,
    /// Endpoint-specific payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// A successful envelope
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            result_code: RESULT_CODE_SUCCESS,
            messages: Vec::new(),
            data,
        }
    }

    /// An application-level error envelope
    #[must_use]
    pub const fn rejected(result_code: i32, messages: Vec<String>, data: T) -> Self {
        Self {
            result_code,
            messages,
            data,
        }
    }

    /// Whether the result code signals success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result_code == RESULT_CODE_SUCCESS
    }
}

/// Payload of endpoints that return `data: {}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoData {}

/// Payload of `POST auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    /// Id of the logged in user
    #[serde(rename = "userId", default)]
    pub user_id: i64,
}

/// Payload of `GET auth/me`; empty when not authorized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeData {
    /// User id
    pub id: i64,
    /// Account email
    pub email: String,
    /// Account login
    pub login: String,
}

/// Payload of `POST todo-lists`; `item` is absent on rejection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTodolistData {
    /// The created record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Todolist>,
}

/// Credentials for `POST auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Keep the session cookie after the browser closes
    #[serde(rename = "rememberMe")]
    pub remember_me: bool,
    /// Captcha answer, required after repeated failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

impl LoginParams {
    /// Credentials without captcha
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, remember_me: bool) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me,
            captcha: None,
        }
    }
}

impl std::fmt::Debug for LoginParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginParams")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .field("captcha", &self.captcha)
            .finish()
    }
}

/// Session endpoints.
pub trait AuthApi: Send + Sync {
    /// `POST auth/login`
    fn login(
        &self,
        params: &LoginParams,
    ) -> impl Future<Output = Result<ApiResponse<LoginData>, ApiError>> + Send;

    /// `DELETE auth/login`
    fn logout(&self) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send;

    /// `GET auth/me`
    fn me(&self) -> impl Future<Output = Result<ApiResponse<MeData>, ApiError>> + Send;
}

/// Todolist endpoints.
pub trait TodolistsApi: Send + Sync {
    /// `GET todo-lists`, a plain array without envelope
    fn get_todolists(&self) -> impl Future<Output = Result<Vec<Todolist>, ApiError>> + Send;

    /// `POST todo-lists`
    fn create_todolist(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<CreateTodolistData>, ApiError>> + Send;

    /// `DELETE todo-lists/{id}`
    fn delete_todolist(
        &self,
        id: &TodolistId,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send;

    /// `PUT todo-lists/{id}`
    fn update_todolist(
        &self,
        id: &TodolistId,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_parses_backend_shape() {
        let raw = json!({
            "resultCode": 1,
            "messages": ["Incorrect Email or Password"],
            "fieldsErrors": [],
            "data": {}
        });

        let response: ApiResponse<LoginData> = serde_json::from_value(raw).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.messages, vec!["Incorrect Email or Password"]);
        assert_eq!(response.data.user_id, 0);
    }

    #[test]
    fn test_unauthorized_me_has_empty_data() {
        let raw = json!({"resultCode": 1, "messages": ["You are not authorized"], "data": {}});

        let response: ApiResponse<MeData> = serde_json::from_value(raw).unwrap();
        assert_eq!(response.data, MeData::default());
    }

    #[test]
    fn test_login_params_wire_names() {
        let params = LoginParams::new("free@samuraijs.com", "free", true);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"email": "free@samuraijs.com", "password": "free", "rememberMe": true})
        );
    }

    #[test]
    fn test_login_params_debug_hides_password() {
        let params = LoginParams::new("a@b.c", "secret", false);
        assert!(!format!("{params:?}").contains("secret"));
    }
}
