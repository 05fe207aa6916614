//! State types for the todolists client.
//!
//! The root state is split into three slices, each owned by one reducer:
//! `app` (global request status and error banner), `auth` (session flag) and
//! `todolists` (the ordered collection shown to the user).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Lifecycle of a request, globally or for one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing in flight
    #[default]
    Idle,
    /// A request has started
    Loading,
    /// The last request completed successfully
    Succeeded,
    /// The last request failed
    Failed,
}

/// Which tasks of a todolist the UI shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    /// Every task
    #[default]
    All,
    /// Tasks not yet done
    Active,
    /// Completed tasks
    Completed,
}

/// Backend-assigned todolist identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodolistId(String);

impl TodolistId {
    /// Wrap a backend id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodolistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodolistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A todolist as the backend returns it.
///
/// Fields other than `id` and `title` (`addedDate`, `order`, ...) are kept
/// verbatim in `meta` and serialized back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todolist {
    /// Backend id
    pub id: TodolistId,
    /// Display title
    pub title: String,
    /// Remaining backend fields
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Todolist {
    /// A record with no extra backend metadata
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: TodolistId::new(id),
            title: title.into(),
            meta: Map::new(),
        }
    }
}

/// A todolist decorated with UI-only fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodolistDomain {
    /// The backend record
    #[serde(flatten)]
    pub todolist: Todolist,
    /// Task filter chosen in the UI
    pub filter: FilterValue,
    /// Status of the latest operation on this record
    #[serde(rename = "entityStatus")]
    pub entity_status: RequestStatus,
}

impl TodolistDomain {
    /// Decorate a fresh backend record with `filter = all`, `entityStatus = idle`
    #[must_use]
    pub fn from_server(todolist: Todolist) -> Self {
        Self {
            todolist,
            filter: FilterValue::All,
            entity_status: RequestStatus::Idle,
        }
    }

    /// Backend id
    #[must_use]
    pub const fn id(&self) -> &TodolistId {
        &self.todolist.id
    }

    /// Display title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.todolist.title
    }
}

/// Ordered todolists, most recently created first.
///
/// Ids are unique. Only [`crate::reducers::TodolistsReducer`] mutates it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodolistsState {
    items: Vec<TodolistDomain>,
}

impl TodolistsState {
    /// Build from already decorated records
    #[must_use]
    pub const fn from_records(items: Vec<TodolistDomain>) -> Self {
        Self { items }
    }

    /// Number of todolists
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no todolists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in display order
    pub fn iter(&self) -> std::slice::Iter<'_, TodolistDomain> {
        self.items.iter()
    }

    /// Records in display order
    #[must_use]
    pub fn as_slice(&self) -> &[TodolistDomain] {
        &self.items
    }

    /// Index of the record with `id`
    #[must_use]
    pub fn position(&self, id: &TodolistId) -> Option<usize> {
        self.items.iter().position(|tl| tl.id() == id)
    }

    /// The record with `id`
    #[must_use]
    pub fn get(&self, id: &TodolistId) -> Option<&TodolistDomain> {
        self.items.iter().find(|tl| tl.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: &TodolistId) -> Option<&mut TodolistDomain> {
        self.items.iter_mut().find(|tl| tl.id() == id)
    }

    /// Remove the first record with `id`; returns whether one was removed
    pub(crate) fn remove(&mut self, id: &TodolistId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            },
            None => false,
        }
    }

    /// Insert at the front, replacing any record that already has the same id
    pub(crate) fn prepend(&mut self, record: TodolistDomain) {
        self.remove(record.id());
        self.items.insert(0, record);
    }

    /// Replace everything; of duplicate ids only the first is kept
    pub(crate) fn replace_all(&mut self, records: impl IntoIterator<Item = TodolistDomain>) {
        self.items.clear();
        for record in records {
            if self.position(record.id()).is_none() {
                self.items.push(record);
            }
        }
    }
}

impl<'a> IntoIterator for &'a TodolistsState {
    type Item = &'a TodolistDomain;
    type IntoIter = std::slice::Iter<'a, TodolistDomain>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Session state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Whether a user session is active
    #[serde(rename = "isLoggedIn")]
    pub is_logged_in: bool,
}

/// Global request status and error banner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Status of the latest globally tracked request
    pub status: RequestStatus,
    /// Message for the error banner, if any
    pub error: Option<String>,
    /// Whether the initial session check has finished
    #[serde(rename = "isInitialized")]
    pub is_initialized: bool,
}

/// The whole client state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RootState {
    /// Global status slice
    pub app: AppState,
    /// Session slice
    pub auth: AuthState,
    /// Todolists slice
    pub todolists: TodolistsState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let state = RootState::default();
        assert!(!state.auth.is_logged_in);
        assert_eq!(state.app.status, RequestStatus::Idle);
        assert_eq!(state.app.error, None);
        assert!(!state.app.is_initialized);
        assert!(state.todolists.is_empty());
    }

    #[test]
    fn test_todolist_keeps_backend_metadata() {
        let raw = json!({
            "id": "a2dfe62b",
            "title": "What to learn",
            "addedDate": "2025-01-01T00:00:00",
            "order": 0
        });

        let todolist: Todolist = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(todolist.id.as_str(), "a2dfe62b");
        assert_eq!(todolist.meta.get("order"), Some(&json!(0)));
        assert_eq!(serde_json::to_value(&todolist).unwrap(), raw);
    }

    #[test]
    fn test_domain_serializes_ui_fields() {
        let domain = TodolistDomain::from_server(Todolist::new("1", "Groceries"));
        let value = serde_json::to_value(&domain).unwrap();

        assert_eq!(
            value,
            json!({"id": "1", "title": "Groceries", "filter": "all", "entityStatus": "idle"})
        );
    }

    #[test]
    fn test_prepend_replaces_same_id() {
        let mut state = TodolistsState::default();
        state.prepend(TodolistDomain::from_server(Todolist::new("1", "Old")));
        state.prepend(TodolistDomain::from_server(Todolist::new("2", "Other")));
        state.prepend(TodolistDomain::from_server(Todolist::new("1", "New")));

        let titles: Vec<_> = state.iter().map(TodolistDomain::title).collect();
        assert_eq!(titles, vec!["New", "Other"]);
    }

    #[test]
    fn test_replace_all_drops_duplicate_ids() {
        let mut state = TodolistsState::default();
        state.replace_all(vec![
            TodolistDomain::from_server(Todolist::new("1", "First")),
            TodolistDomain::from_server(Todolist::new("1", "Again")),
        ]);

        assert_eq!(state.len(), 1);
        assert_eq!(state.get(&"1".into()).map(TodolistDomain::title), Some("First"));
    }
}
