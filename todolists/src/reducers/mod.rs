//! Todolists reducers.
//!
//! Slice reducers are pure and take no environment. [`RootReducer`] composes them
//! and turns workflow commands into effects.

pub mod app;
pub mod auth;
pub mod root;
pub mod todolists;

pub use app::AppReducer;
pub use auth::AuthReducer;
pub use root::RootReducer;
pub use todolists::TodolistsReducer;
