//! # Reducers
//!
//! Pure state transitions `(state, action) -> state`, and the two ways of combining them:
//!
//! - [`handle_actions`] turns a keyed map of handlers into one reducer that picks the
//!   handler(s) matching `action.type`.
//! - [`reduce_reducers`] runs a list of reducers one after the other.

use std::fmt;
use std::sync::Arc;

use crate::framework::action::Action;
use crate::framework::keyed::Keyed;

/// A state transition function.
pub type Reducer<S> = Arc<dyn Fn(S, &Action) -> S + Send + Sync>;

/// Wraps a closure as a [`Reducer`].
pub fn reducer<S, F>(f: F) -> Reducer<S>
where
    F: Fn(S, &Action) -> S + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One entry of a keyed reducer map.
pub enum ReducerHandler<S> {
    /// Runs for every matching action.
    Plain(Reducer<S>),
    /// Runs `next` for successful actions and `throw` for failures (`action.error`).
    /// A missing path leaves the state untouched.
    Fork {
        next: Option<Reducer<S>>,
        throw: Option<Reducer<S>>,
    },
}

impl<S> Clone for ReducerHandler<S> {
    fn clone(&self) -> Self {
        match self {
            ReducerHandler::Plain(f) => ReducerHandler::Plain(Arc::clone(f)),
            ReducerHandler::Fork { next, throw } => ReducerHandler::Fork {
                next: next.clone(),
                throw: throw.clone(),
            },
        }
    }
}

impl<S> fmt::Debug for ReducerHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReducerHandler::Plain(_) => f.write_str("Plain"),
            ReducerHandler::Fork { next, throw } => f
                .debug_struct("Fork")
                .field("next", &next.is_some())
                .field("throw", &throw.is_some())
                .finish(),
        }
    }
}

impl<S> ReducerHandler<S> {
    fn apply(&self, state: S, action: &Action) -> S {
        match self {
            ReducerHandler::Plain(f) => f(state, action),
            ReducerHandler::Fork { next, throw } => {
                let path = if action.error { throw } else { next };
                match path {
                    Some(f) => f(state, action),
                    None => state,
                }
            }
        }
    }
}

/// Keyed reducer handlers, in declaration order.
pub type ReducerMap<S> = Keyed<ReducerHandler<S>>;

impl<S> Keyed<ReducerHandler<S>> {
    /// Registers a plain handler for `kind`.
    pub fn on<F>(self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.entry(kind, ReducerHandler::Plain(Arc::new(f)))
    }

    /// Registers a forked handler for `kind`.
    pub fn fork<N, T>(self, kind: impl Into<String>, next: N, throw: T) -> Self
    where
        N: Fn(S, &Action) -> S + Send + Sync + 'static,
        T: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.entry(
            kind,
            ReducerHandler::Fork {
                next: Some(Arc::new(next)),
                throw: Some(Arc::new(throw)),
            },
        )
    }
}

/// Combines a keyed map into one reducer.
///
/// Handlers sharing a key all run, in declaration order. Actions with no handler leave
/// the state unchanged.
pub fn handle_actions<S: 'static>(handlers: ReducerMap<S>) -> Reducer<S> {
    let handlers = Arc::new(handlers);
    Arc::new(move |state: S, action: &Action| {
        handlers
            .matching(action.kind())
            .fold(state, |state, handler| handler.apply(state, action))
    })
}

/// Runs every reducer in order, feeding each the previous one's output.
pub fn reduce_reducers<S: 'static>(reducers: Vec<Reducer<S>>) -> Reducer<S> {
    Arc::new(move |state: S, action: &Action| reducers.iter().fold(state, |state, f| f(state, action)))
}
