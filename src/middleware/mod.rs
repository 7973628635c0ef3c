//! Side-effect handlers (middlewares) and how they are assembled into a pipeline.
//!
//! A [`Middleware`] is a factory: the store calls it **once**, at construction time, with a
//! [`StoreHandle`] and gets back a [`BoundMiddleware`]. Anything the factory sets up
//! (clients, caches, counters) therefore lives exactly as long as that store.
//!
//! A bound middleware sees every action that reaches its stage together with [`Next`],
//! the rest of the pipeline. It decides whether and when to call `next`, may dispatch
//! further actions through the store handle, and returns an [`Outcome`].
//!
//! - [`chain`] composes bound stages around the store's base dispatch.
//! - [`router`] builds a single middleware out of handlers keyed by action type.

pub mod chain;
pub mod router;

pub use chain::compose;
pub use router::{handle_middlewares, MiddlewareMap};

use std::sync::Arc;

use crate::framework::{Action, Next, Outcome, StoreHandle};

/// A middleware bound to one store.
pub type BoundMiddleware = Arc<dyn Fn(Action, &Next) -> Outcome + Send + Sync>;

/// A per-store middleware factory.
pub type Middleware<S> = Arc<dyn Fn(&StoreHandle<S>) -> BoundMiddleware + Send + Sync>;

/// Wraps a factory closure as a [`Middleware`].
///
/// ```rust
/// use redux_boot::framework::{Action, Next};
/// use redux_boot::middleware::middleware;
///
/// let passthrough = middleware::<(), _, _>(|_store| {
///     move |action: Action, next: &Next| next.call(action)
/// });
/// # let _ = passthrough;
/// ```
pub fn middleware<S: 'static, F, H>(factory: F) -> Middleware<S>
where
    F: Fn(&StoreHandle<S>) -> H + Send + Sync + 'static,
    H: Fn(Action, &Next) -> Outcome + Send + Sync + 'static,
{
    Arc::new(move |store: &StoreHandle<S>| Arc::new(factory(store)) as BoundMiddleware)
}
