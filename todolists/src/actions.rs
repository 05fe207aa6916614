//! Actions for every slice, plus the commands that start thunks.

use crate::api::LoginParams;
use crate::state::{FilterValue, RequestStatus, Todolist, TodolistId};

/// Global status actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAction {
    /// Set the global request status
    SetStatus {
        /// New status
        status: RequestStatus,
    },
    /// Show or clear the error banner
    SetError {
        /// Message to show, `None` to clear
        error: Option<String>,
    },
    /// Mark the initial session check as done (or not)
    SetInitialized {
        /// New flag value
        value: bool,
    },
}

/// Session actions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Set whether a session is active
    SetLoggedIn {
        /// New flag value
        value: bool,
    },
}

/// Todolists collection actions.
#[derive(Clone, Debug, PartialEq)]
pub enum TodolistsAction {
    /// Remove a todolist; absent ids are ignored
    Remove {
        /// Todolist to remove
        id: TodolistId,
    },
    /// Insert a backend record at the front
    Create {
        /// The record returned by the backend
        todolist: Todolist,
    },
    /// Rename a todolist
    ChangeTitle {
        /// Todolist to rename
        id: TodolistId,
        /// New title
        title: String,
    },
    /// Change the task filter of a todolist
    ChangeFilter {
        /// Todolist to update
        id: TodolistId,
        /// New filter
        filter: FilterValue,
    },
    /// Change the per-record request status
    ChangeEntityStatus {
        /// Todolist to update
        id: TodolistId,
        /// New status
        status: RequestStatus,
    },
    /// Replace the whole collection
    SetAll {
        /// Records returned by the backend
        todolists: Vec<Todolist>,
    },
}

/// Requests that start an asynchronous workflow against the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Check for an existing session
    InitializeApp,
    /// Log in with credentials
    Login {
        /// Credentials
        params: LoginParams,
    },
    /// End the session
    Logout,
    /// Reload every todolist
    FetchTodolists,
    /// Delete a todolist on the backend, then locally
    RemoveTodolist {
        /// Todolist to delete
        id: TodolistId,
    },
    /// Create a todolist on the backend, then locally
    AddTodolist {
        /// Title of the new todolist
        title: String,
    },
    /// Rename a todolist on the backend, then locally
    ChangeTodolistTitle {
        /// Todolist to rename
        id: TodolistId,
        /// New title
        title: String,
    },
}

/// Every action the root store accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum RootAction {
    /// Global status
    App(AppAction),
    /// Session
    Auth(AuthAction),
    /// Todolists collection
    Todolists(TodolistsAction),
    /// Workflow request
    Command(Command),
}

impl From<AppAction> for RootAction {
    fn from(action: AppAction) -> Self {
        Self::App(action)
    }
}

impl From<AuthAction> for RootAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<TodolistsAction> for RootAction {
    fn from(action: TodolistsAction) -> Self {
        Self::Todolists(action)
    }
}

impl From<Command> for RootAction {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}
