//! Todolists environment.
//!
//! Dependencies injected into the root reducer and handed to thunks.

use crate::api::{AuthApi, TodolistsApi};

/// Environment of the root reducer.
///
/// # Type Parameters
///
/// - `Api`: Backend client, both session and todolist endpoints
#[derive(Clone, Debug)]
pub struct TodolistsEnvironment<Api>
where
    Api: AuthApi + TodolistsApi + Clone,
{
    /// Backend client.
    pub api: Api,
}

impl<Api> TodolistsEnvironment<Api>
where
    Api: AuthApi + TodolistsApi + Clone,
{
    /// Create a new environment.
    #[must_use]
    pub const fn new(api: Api) -> Self {
        Self { api }
    }
}
