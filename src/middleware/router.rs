//! # Action-Typed Dispatch Router
//!
//! [`handle_middlewares`] turns a [`MiddlewareMap`] (handler factories keyed by action type)
//! into one [`Middleware`]. It is a single-dispatch router, not a broadcast: for each
//! action at most one keyed handler runs, and unmatched actions go straight to `next`.
//!
//! Binding happens once per store. Every factory in the map is called with the store
//! handle when the store is built, and the lookup table it produces is fixed from then
//! on. When a key is declared twice, the first declaration owns it; the later factory is
//! still bound (its setup runs) but its handler is never selected.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::framework::keyed::Keyed;
use crate::framework::{Action, Next, Outcome, StoreHandle};
use crate::middleware::{middleware, BoundMiddleware, Middleware};

/// Middleware factories keyed by action type, in declaration order.
pub type MiddlewareMap<S> = Keyed<Middleware<S>>;

impl<S: 'static> Keyed<Middleware<S>> {
    /// Registers the handler factory for `kind`.
    ///
    /// `factory` runs once per store; the handler it returns runs for every matching action.
    pub fn on<F, H>(self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&StoreHandle<S>) -> H + Send + Sync + 'static,
        H: Fn(Action, &Next) -> Outcome + Send + Sync + 'static,
    {
        self.entry(kind, middleware(factory))
    }
}

/// Builds the routing middleware for `handlers`.
pub fn handle_middlewares<S: 'static>(handlers: MiddlewareMap<S>) -> Middleware<S> {
    let handlers = Arc::new(handlers);
    Arc::new(move |store: &StoreHandle<S>| {
        let mut table: HashMap<String, BoundMiddleware> = HashMap::with_capacity(handlers.len());
        for (kind, factory) in handlers.iter() {
            let bound = factory(store);
            match table.entry(kind.to_owned()) {
                Entry::Vacant(slot) => {
                    slot.insert(bound);
                }
                Entry::Occupied(_) => {
                    debug!(action_type = kind, "Shadowed by an earlier handler");
                }
            }
        }

        Arc::new(move |action: Action, next: &Next| match table.get(action.kind()) {
            Some(handler) => {
                debug!(action_type = %action.kind, "Routed");
                handler(action, next)
            }
            None => next.call(action),
        }) as BoundMiddleware
    })
}
