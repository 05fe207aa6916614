//! `reqwest` implementation of the backend API

use super::{
    ApiError, ApiResponse, AuthApi, CreateTodolistData, LoginData, LoginParams, MeData, NoData,
    TodolistsApi,
};
use crate::state::{Todolist, TodolistId};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Public samurai.js backend
pub const DEFAULT_BASE_URL: &str = "https://social-network.samuraijs.com/api/1.1/";

/// Connection settings for [`HttpApi`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Value of the `API-KEY` header, if the backend requires one
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

/// Backend client over HTTP
///
/// Keeps the session cookie set by `auth/login` and sends it with every
/// later request. Cloning shares the connection pool and the cookie jar.
#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    /// Create a client
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidUrl`] if the base URL does not parse
    /// - [`ApiError::InvalidApiKey`] if the key is not a valid header value
    /// - [`ApiError::RequestFailed`] if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| ApiError::InvalidApiKey)?;
            headers.insert("API-KEY", value);
        }

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "Backend returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
    }
}

/// Parse a base URL, making sure it ends with `/` so endpoint paths join below it
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }

    let url = Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!("{raw} cannot be a base URL")));
    }
    Ok(url)
}

impl AuthApi for HttpApi {
    fn login(
        &self,
        params: &LoginParams,
    ) -> impl Future<Output = Result<ApiResponse<LoginData>, ApiError>> + Send {
        async move {
            tracing::debug!(email = %params.email, "POST auth/login");
            let url = self.url("auth/login")?;
            Self::execute(self.client.post(url).json(params)).await
        }
    }

    fn logout(&self) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        async move {
            tracing::debug!("DELETE auth/login");
            let url = self.url("auth/login")?;
            Self::execute(self.client.delete(url)).await
        }
    }

    fn me(&self) -> impl Future<Output = Result<ApiResponse<MeData>, ApiError>> + Send {
        async move {
            tracing::debug!("GET auth/me");
            let url = self.url("auth/me")?;
            Self::execute(self.client.get(url)).await
        }
    }
}

impl TodolistsApi for HttpApi {
    fn get_todolists(&self) -> impl Future<Output = Result<Vec<Todolist>, ApiError>> + Send {
        async move {
            tracing::debug!("GET todo-lists");
            let url = self.url("todo-lists")?;
            Self::execute(self.client.get(url)).await
        }
    }

    fn create_todolist(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<CreateTodolistData>, ApiError>> + Send {
        async move {
            tracing::debug!(title, "POST todo-lists");
            let url = self.url("todo-lists")?;
            Self::execute(self.client.post(url).json(&TitleBody { title })).await
        }
    }

    fn delete_todolist(
        &self,
        id: &TodolistId,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        async move {
            tracing::debug!(%id, "DELETE todo-lists/{{id}}");
            let url = self.url(&format!("todo-lists/{id}"))?;
            Self::execute(self.client.delete(url)).await
        }
    }

    fn update_todolist(
        &self,
        id: &TodolistId,
        title: &str,
    ) -> impl Future<Output = Result<ApiResponse<NoData>, ApiError>> + Send {
        async move {
            tracing::debug!(%id, title, "PUT todo-lists/{{id}}");
            let url = self.url(&format!("todo-lists/{id}"))?;
            Self::execute(self.client.put(url).json(&TitleBody { title })).await
        }
    }
}
