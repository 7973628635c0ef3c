//! # State Container
//!
//! [`Store`] holds the current state, runs dispatched actions through its middleware
//! pipeline and reducer, and notifies subscribers. It is assembled by a [`StoreBuilder`],
//! which is also what store enhancers transform.
//!
//! ## Ownership
//!
//! The store owns its pipeline, and the pipeline's middlewares were bound against a
//! [`StoreHandle`], a *non-owning* reference back to the store. That keeps the two from
//! holding each other alive: once every [`Store`] clone is dropped, the state, the
//! pipeline and everything the middleware factories set up are released. Calls made
//! through a handle after that fail with [`DispatchError::StoreClosed`].
//!
//! ## Locking
//!
//! The state lock is held only while the reducer runs. Subscribers are called after the
//! lock is released, so they may read the state or dispatch again.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use tracing::{debug, info, warn};

use crate::framework::action::{Action, DeferredAction};
use crate::framework::dispatch::{Dispatch, Outcome};
use crate::framework::error::DispatchError;
use crate::framework::reducer::Reducer;
use crate::middleware::{compose, BoundMiddleware, Middleware};

/// A state change subscriber.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Transforms a [`StoreBuilder`] before the store is built.
pub type Enhancer<S> = Arc<dyn Fn(StoreBuilder<S>) -> StoreBuilder<S> + Send + Sync>;

/// Wraps a closure as an [`Enhancer`].
pub fn enhancer<S, F>(f: F) -> Enhancer<S>
where
    F: Fn(StoreBuilder<S>) -> StoreBuilder<S> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct StoreInner<S> {
    state: Mutex<S>,
    reducer: Reducer<S>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    dispatch: OnceLock<Dispatch>,
}

impl<S: Clone> StoreInner<S> {
    fn reduce(&self, action: &Action) {
        {
            let mut state = lock(&self.state);
            let next = (self.reducer)(state.clone(), action);
            *state = next;
        }
        debug!(action_type = %action.kind, error = action.error, "Reduced");

        let listeners: Vec<Listener> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    fn add_listener(&self, listener: Listener) -> u64 {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push((id, listener));
        id
    }

    fn entry_point(&self) -> Option<Dispatch> {
        self.dispatch.get().cloned()
    }
}

/// Assembles a [`Store`]: reducer, seed state, middleware stages and initial subscribers.
pub struct StoreBuilder<S> {
    reducer: Reducer<S>,
    initial_state: S,
    middlewares: Vec<Middleware<S>>,
    listeners: Vec<Listener>,
}

impl<S: Clone + Send + 'static> StoreBuilder<S> {
    pub fn new(reducer: Reducer<S>, initial_state: S) -> Self {
        Self {
            reducer,
            initial_state,
            middlewares: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Appends a middleware stage. Stages added later sit closer to the reducer.
    pub fn middleware(mut self, middleware: Middleware<S>) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Replaces the reducer with a wrapped version of itself.
    pub fn wrap_reducer(mut self, wrap: impl FnOnce(Reducer<S>) -> Reducer<S>) -> Self {
        self.reducer = wrap(self.reducer);
        self
    }

    /// Registers a subscriber that is active from the very first dispatch.
    pub fn subscribe(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listeners.push(Arc::new(listener));
        self
    }

    pub fn enhance(self, enhancer: &Enhancer<S>) -> Self {
        enhancer(self)
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Builds the store, binding every middleware factory exactly once.
    pub fn build(self) -> Store<S> {
        let inner = Arc::new(StoreInner {
            state: Mutex::new(self.initial_state),
            reducer: self.reducer,
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            dispatch: OnceLock::new(),
        });
        for listener in self.listeners {
            inner.add_listener(listener);
        }

        let handle = StoreHandle {
            inner: Arc::downgrade(&inner),
        };
        let stages: Vec<BoundMiddleware> = self.middlewares.iter().map(|m| m(&handle)).collect();
        let stage_count = stages.len();

        let base = handle.clone();
        let chain = compose(
            stages,
            Dispatch::new(move |action| match base.inner.upgrade() {
                Some(inner) => {
                    inner.reduce(&action);
                    Outcome::ready(action)
                }
                None => Outcome::failed(DispatchError::StoreClosed),
            }),
        );
        if inner.dispatch.set(chain).is_err() {
            warn!("Store pipeline was already installed");
        }

        info!(middlewares = stage_count, "Store created");
        Store { inner }
    }
}

/// The application state container.
///
/// Cloning is cheap; all clones share the same state and pipeline.
pub struct Store<S> {
    inner: Arc<StoreInner<S>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone + Send + 'static> Store<S> {
    /// A snapshot of the current state.
    pub fn get_state(&self) -> S {
        lock(&self.inner.state).clone()
    }

    /// Runs `action` through the pipeline.
    ///
    /// Synchronous work happens before this returns; see [`Outcome`] for the rest.
    pub fn dispatch(&self, action: Action) -> Outcome {
        match self.inner.entry_point() {
            Some(dispatch) => dispatch.call(action),
            None => Outcome::failed(DispatchError::Constructing),
        }
    }

    /// Awaits the payload of `deferred`, then dispatches the resolved action.
    ///
    /// If the payload fails, a failure action (`error: true`, payload = error message) is
    /// dispatched instead and the outcome fails with [`DispatchError::PayloadRejected`].
    /// The returned outcome is always pending; dropping it leaves the work running.
    pub fn dispatch_deferred(&self, deferred: DeferredAction) -> Outcome {
        self.handle().dispatch_deferred(deferred)
    }

    /// Registers a subscriber called after every reduction.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription<S> {
        let id = self.inner.add_listener(Arc::new(listener));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// A non-owning handle to this store.
    pub fn handle(&self) -> StoreHandle<S> {
        StoreHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*lock(&self.inner.state))
            .field("listeners", &lock(&self.inner.listeners).len())
            .finish()
    }
}

/// A non-owning reference to a [`Store`], handed to middleware factories.
pub struct StoreHandle<S> {
    inner: Weak<StoreInner<S>>,
}

impl<S> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S: Clone + Send + 'static> StoreHandle<S> {
    pub fn upgrade(&self) -> Option<Store<S>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }

    pub fn get_state(&self) -> Result<S, DispatchError> {
        self.upgrade()
            .map(|store| store.get_state())
            .ok_or(DispatchError::StoreClosed)
    }

    pub fn dispatch(&self, action: Action) -> Outcome {
        match self.upgrade() {
            Some(store) => store.dispatch(action),
            None => Outcome::failed(DispatchError::StoreClosed),
        }
    }

    /// See [`Store::dispatch_deferred`].
    pub fn dispatch_deferred(&self, deferred: DeferredAction) -> Outcome {
        let store = self.clone();
        let DeferredAction { kind, payload } = deferred;
        debug!(action_type = %kind, "Awaiting deferred payload");

        Outcome::pending(async move {
            match payload.await {
                Ok(value) => store.dispatch(Action::new(kind, value)).await,
                Err(source) => {
                    warn!(action_type = %kind, error = %source, "Deferred payload rejected");
                    store
                        .dispatch(Action::failure(kind.clone(), source.to_string()))
                        .await?;
                    Err(DispatchError::PayloadRejected {
                        action_type: kind,
                        source,
                    })
                }
            }
        })
    }
}

/// A registered subscriber. Call [`unsubscribe`](Subscription::unsubscribe) to remove it;
/// dropping the subscription keeps the listener active.
pub struct Subscription<S> {
    id: u64,
    inner: Weak<StoreInner<S>>,
}

impl<S> Subscription<S> {
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner.listeners).retain(|(id, _)| *id != self.id);
        }
    }
}
