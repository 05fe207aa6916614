//! Reducer composition utilities
//!
//! Feature slices are written as small reducers over their own state and action
//! types. A root reducer owns the combined state and routes each action to the
//! slice it belongs to with [`scope`], which also lifts the slice's effects
//! into the root action type.
//!
//! # Example
//!
//! ```
//! use todolists_core::{composition::scope, effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct CounterState {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) -> SmallVec<[Effect<Self::Action>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     counter: CounterState,
//!     title: String,
//! }
//!
//! #[derive(Debug)]
//! enum AppAction {
//!     Counter(CounterAction),
//! }
//!
//! let mut state = AppState::default();
//! let effects = scope(&CounterReducer, &mut state.counter, CounterAction::Increment, &(), AppAction::Counter);
//! assert_eq!(state.counter.count, 1);
//! assert_eq!(effects.len(), 1);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Runs a child reducer on a slice of a larger state.
///
/// The child sees only its own state, action and environment. Every effect it
/// returns is re-targeted with `embed` so that actions it produces flow back
/// into the parent store as parent actions.
///
/// # Type Parameters
///
/// - `R`: The child reducer
/// - `Parent`: The parent action type
pub fn scope<R, Parent>(
    reducer: &R,
    state: &mut R::State,
    action: R::Action,
    env: &R::Environment,
    embed: fn(R::Action) -> Parent,
) -> SmallVec<[Effect<Parent>; 4]>
where
    R: Reducer,
    R::Action: Send + 'static,
    Parent: Send + 'static,
{
    reducer
        .reduce(state, action, env)
        .into_iter()
        .map(|effect| effect.map(embed))
        .collect()
}
