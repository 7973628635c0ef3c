//! # Modules
//!
//! A [`Module`] is an independently authored slice of an application. It may contribute
//! up to three things, each optional:
//!
//! - a **reducer**: one state transition function, or transitions keyed by action type;
//! - a **middleware**: one side-effect handler factory, or factories keyed by action type;
//! - an **enhancer**: a transformation of the [`StoreBuilder`](crate::framework::StoreBuilder).
//!
//! Keyed contributions are turned into single ones by [`process_modules`]: reducers through
//! [`handle_actions`](crate::framework::handle_actions), middlewares through the
//! [router](crate::middleware::handle_middlewares).
//!
//! ```rust
//! use redux_boot::framework::{Action, Next, ReducerMap};
//! use redux_boot::middleware::MiddlewareMap;
//! use redux_boot::module::Module;
//! use redux_boot::BOOT;
//!
//! #[derive(Clone, Default)]
//! struct Counter { value: u64 }
//!
//! let counter = Module::<Counter>::named("counter")
//!     .reducers(ReducerMap::new().on("counter/ADD", |mut s: Counter, a: &Action| {
//!         s.value += a.payload.as_u64().unwrap_or(1);
//!         s
//!     }))
//!     .middlewares(MiddlewareMap::new().on(BOOT, |store| {
//!         let store = store.clone();
//!         move |action: Action, next: &Next| {
//!             let booted = next.call(action);
//!             let _ = store.dispatch(Action::new("counter/ADD", 10));
//!             booted
//!         }
//!     }));
//! assert_eq!(counter.name(), Some("counter"));
//! ```

pub mod aggregator;

pub use aggregator::{process_modules, Processed};

use std::sync::Arc;

use crate::framework::keyed::Keyed;
use crate::framework::{Action, Enhancer, Next, Outcome, Reducer, ReducerHandler, StoreBuilder, StoreHandle};
use crate::middleware::{middleware, Middleware};

/// One optional module contribution.
pub enum Contribution<D, K> {
    None,
    /// A single handler, used as-is.
    Direct(D),
    /// Handlers keyed by action type.
    Keyed(Keyed<K>),
}

impl<D, K> Default for Contribution<D, K> {
    fn default() -> Self {
        Contribution::None
    }
}

impl<D: Clone, K: Clone> Clone for Contribution<D, K> {
    fn clone(&self) -> Self {
        match self {
            Contribution::None => Contribution::None,
            Contribution::Direct(d) => Contribution::Direct(d.clone()),
            Contribution::Keyed(k) => Contribution::Keyed(k.clone()),
        }
    }
}

impl<D, K> Contribution<D, K> {
    pub fn is_none(&self) -> bool {
        matches!(self, Contribution::None)
    }
}

pub type ReducerContribution<S> = Contribution<Reducer<S>, ReducerHandler<S>>;
pub type MiddlewareContribution<S> = Contribution<Middleware<S>, Middleware<S>>;

/// A module descriptor. A module with no contributions is valid and contributes nothing.
pub struct Module<S> {
    pub name: Option<String>,
    pub reducer: ReducerContribution<S>,
    pub middleware: MiddlewareContribution<S>,
    pub enhancer: Option<Enhancer<S>>,
}

impl<S> Default for Module<S> {
    fn default() -> Self {
        Self {
            name: None,
            reducer: Contribution::None,
            middleware: Contribution::None,
            enhancer: None,
        }
    }
}

impl<S> Clone for Module<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            reducer: self.reducer.clone(),
            middleware: self.middleware.clone(),
            enhancer: self.enhancer.clone(),
        }
    }
}

impl<S: Clone + Send + 'static> Module<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A module with a name, used in logs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A single reducer that sees every action.
    pub fn reducer<F>(mut self, f: F) -> Self
    where
        F: Fn(S, &Action) -> S + Send + Sync + 'static,
    {
        self.reducer = Contribution::Direct(Arc::new(f));
        self
    }

    /// Reducers keyed by action type.
    pub fn reducers(mut self, handlers: Keyed<ReducerHandler<S>>) -> Self {
        self.reducer = Contribution::Keyed(handlers);
        self
    }

    /// A single middleware that sees every action.
    pub fn middleware<F, H>(mut self, factory: F) -> Self
    where
        F: Fn(&StoreHandle<S>) -> H + Send + Sync + 'static,
        H: Fn(Action, &Next) -> Outcome + Send + Sync + 'static,
    {
        self.middleware = Contribution::Direct(middleware(factory));
        self
    }

    /// Middlewares keyed by action type.
    pub fn middlewares(mut self, handlers: Keyed<Middleware<S>>) -> Self {
        self.middleware = Contribution::Keyed(handlers);
        self
    }

    pub fn enhancer<F>(mut self, f: F) -> Self
    where
        F: Fn(StoreBuilder<S>) -> StoreBuilder<S> + Send + Sync + 'static,
    {
        self.enhancer = Some(Arc::new(f));
        self
    }
}
