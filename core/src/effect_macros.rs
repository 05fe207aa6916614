//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from async
//! blocks.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use todolists_core::async_effect;
///
/// async_effect! {
///     let todolists = api.get_todolists().await.ok()?;
///     Some(TodolistsAction::SetAll { todolists })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Run` from an async block that receives a dispatcher
///
/// # Example
///
/// ```rust,ignore
/// use todolists_core::run_effect;
///
/// run_effect!(|dispatcher| {
///     dispatcher.dispatch(AppAction::SetStatus { status: RequestStatus::Loading }).await;
///     // ... await the backend, dispatch the outcome
/// })
/// ```
#[macro_export]
macro_rules! run_effect {
    (|$dispatcher:ident| $($body:tt)*) => {
        $crate::effect::Effect::run(move |$dispatcher| async move { $($body)* })
    };
}
