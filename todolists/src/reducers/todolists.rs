//! Todolists collection.

use crate::actions::TodolistsAction;
use crate::state::{TodolistDomain, TodolistsState};
use todolists_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Reducer for [`TodolistsState`].
///
/// Every operation is total. By-id updates for an id that is no longer present
/// (a removal may land before a late status update) are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodolistsReducer;

impl Reducer for TodolistsReducer {
    type State = TodolistsState;
    type Action = TodolistsAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut TodolistsState,
        action: TodolistsAction,
        _env: &(),
    ) -> SmallVec<[Effect<TodolistsAction>; 4]> {
        match action {
            TodolistsAction::Remove { id } => {
                if !state.remove(&id) {
                    tracing::debug!(%id, "Remove ignored, todolist not present");
                }
            },
            TodolistsAction::Create { todolist } => {
                state.prepend(TodolistDomain::from_server(todolist));
            },
            TodolistsAction::ChangeTitle { id, title } => match state.get_mut(&id) {
                Some(todolist) => todolist.todolist.title = title,
                None => tracing::debug!(%id, "Title change ignored, todolist not present"),
            },
            TodolistsAction::ChangeFilter { id, filter } => match state.get_mut(&id) {
                Some(todolist) => todolist.filter = filter,
                None => tracing::debug!(%id, "Filter change ignored, todolist not present"),
            },
            TodolistsAction::ChangeEntityStatus { id, status } => match state.get_mut(&id) {
                Some(todolist) => todolist.entity_status = status,
                None => tracing::debug!(%id, "Status change ignored, todolist not present"),
            },
            TodolistsAction::SetAll { todolists } => {
                state.replace_all(todolists.into_iter().map(TodolistDomain::from_server));
            },
        }
        SmallVec::new()
    }
}
