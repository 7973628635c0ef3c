//! # Dispatch & Outcomes
//!
//! Dispatching is **eager**: calling a [`Dispatch`] runs every synchronous step of the
//! middleware chain (handlers, the reducer, subscribers) before it returns. Whatever is
//! left to do asynchronously comes back as an [`Outcome::Pending`].
//!
//! That split is what the bootstrap relies on to know when a cascade is finished:
//!
//! - a handler that *returns* (or awaits inside its returned future) a nested dispatch
//!   makes the caller wait for it;
//! - a handler that drops or [`detach`](Outcome::detach)es a nested dispatch does not.
//!
//! A dispatch is never cancelled. A pending outcome that is dropped before it settles
//! keeps running on the Tokio runtime, exactly as if it had been detached.
//!
//! ## Without a runtime
//!
//! Synchronous chains work anywhere. Background work needs a Tokio runtime on the
//! current thread; without one it is discarded and an error is logged.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FusedFuture};
use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::framework::action::Action;
use crate::framework::error::{BoxError, DispatchError};

/// Result produced once a dispatch has settled.
pub type DispatchResult = Result<Action, DispatchError>;

/// A dispatch function: the store's own entry point, or the `next` stage of a pipeline.
#[derive(Clone)]
pub struct Dispatch(Arc<dyn Fn(Action) -> Outcome + Send + Sync>);

/// The remainder of the pipeline, as seen by a middleware.
pub type Next = Dispatch;

impl Dispatch {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Action) -> Outcome + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, action: Action) -> Outcome {
        (self.0)(action)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dispatch")
    }
}

/// Spawns `future` on the current Tokio runtime, logging failures.
fn spawn_background(future: BoxFuture<'static, DispatchResult>) -> Option<JoinHandle<DispatchResult>> {
    match Handle::try_current() {
        Ok(runtime) => Some(runtime.spawn(async move {
            let result = future.await;
            if let Err(e) = &result {
                warn!(error = %e, "Background dispatch failed");
            }
            result
        })),
        Err(_) => {
            error!("No Tokio runtime for background dispatch, work discarded");
            None
        }
    }
}

/// The asynchronous remainder of a dispatch.
///
/// Awaiting it waits for the remainder. Dropping it before it settles moves the
/// remainder to a background task instead of cancelling it.
pub struct PendingDispatch {
    future: Option<BoxFuture<'static, DispatchResult>>,
}

impl PendingDispatch {
    fn take(mut self) -> Option<BoxFuture<'static, DispatchResult>> {
        self.future.take()
    }
}

impl Future for PendingDispatch {
    type Output = DispatchResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(future) = self.future.as_mut() else {
            return Poll::Pending;
        };
        let result = futures::ready!(future.poll_unpin(cx));
        self.future = None;
        Poll::Ready(result)
    }
}

impl FusedFuture for PendingDispatch {
    fn is_terminated(&self) -> bool {
        self.future.is_none()
    }
}

impl Drop for PendingDispatch {
    fn drop(&mut self) {
        if let Some(future) = self.future.take() {
            let _ = spawn_background(future);
        }
    }
}

/// What a dispatch hands back to its caller.
pub enum Outcome {
    /// The chain finished synchronously.
    Ready(DispatchResult),
    /// Part of the chain is still running.
    Pending(PendingDispatch),
}

impl Outcome {
    pub fn ready(action: Action) -> Self {
        Outcome::Ready(Ok(action))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = DispatchResult> + Send + 'static,
    {
        Outcome::Pending(PendingDispatch {
            future: Some(future.boxed()),
        })
    }

    pub fn failed(error: DispatchError) -> Self {
        Outcome::Ready(Err(error))
    }

    /// Fails the dispatch of `action_type` with a module error.
    pub fn reject(action_type: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Outcome::failed(DispatchError::handler(action_type, source))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Fire-and-forget: runs the pending part on the current Tokio runtime.
    ///
    /// The returned handle can be ignored; dropping it does not cancel the task.
    /// Failures are logged. Returns `None` when there is nothing left to run, or when no
    /// runtime is available, in which case the pending part is discarded.
    pub fn detach(self) -> Option<JoinHandle<DispatchResult>> {
        match self {
            Outcome::Ready(Ok(_)) => None,
            Outcome::Ready(Err(e)) => {
                warn!(error = %e, "Detached dispatch failed");
                None
            }
            Outcome::Pending(pending) => pending.take().and_then(spawn_background),
        }
    }
}

impl From<DispatchResult> for Outcome {
    fn from(result: DispatchResult) -> Self {
        Outcome::Ready(result)
    }
}

impl IntoFuture for Outcome {
    type Output = DispatchResult;
    type IntoFuture = BoxFuture<'static, DispatchResult>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Outcome::Ready(result) => futures::future::ready(result).boxed(),
            Outcome::Pending(pending) => pending.boxed(),
        }
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_ready_outcome_settles_immediately() {
        let outcome = Outcome::ready(Action::empty("PING"));
        assert!(!outcome.is_pending());
        assert_eq!(outcome.await.unwrap(), Action::empty("PING"));
    }

    #[tokio::test]
    async fn test_pending_outcome_runs_when_awaited() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let outcome = Outcome::pending(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(Action::empty("PONG"))
        });

        assert!(outcome.is_pending());
        assert!(!ran.load(Ordering::SeqCst), "pending work must be lazy");
        assert_eq!(outcome.await.unwrap().kind(), "PONG");
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_dropped_pending_outcome_keeps_running() {
        let (tx, rx) = oneshot::channel();
        drop(Outcome::pending(async move {
            let _ = tx.send("finished");
            Ok(Action::empty("FORGOTTEN"))
        }));

        assert_eq!(rx.await.unwrap(), "finished");
    }

    #[tokio::test]
    async fn test_detach_runs_without_caller_waiting() {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = Outcome::pending(async move {
            rx.await.map_err(|e| DispatchError::handler("WAIT", e))?;
            Ok(Action::empty("WAIT"))
        })
        .detach()
        .expect("pending work is spawned");

        tokio::task::yield_now().await;
        assert!(!handle.is_finished(), "gate is still closed");
        tx.send(()).unwrap();
        assert_eq!(handle.await.unwrap().unwrap().kind(), "WAIT");
    }

    #[test]
    fn test_background_work_without_runtime_is_discarded() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let outcome = Outcome::pending(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(Action::empty("LOST"))
        });

        assert!(outcome.detach().is_none());
        drop(Outcome::pending(async { Ok(Action::empty("LOST")) }));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_reject_wraps_module_error() {
        let err = Outcome::reject("SAVE", "disk full").await.unwrap_err();
        assert!(matches!(err, DispatchError::Handler { ref action_type, .. } if action_type == "SAVE"));
        assert_eq!(err.to_string(), "Handler for SAVE failed: disk full");
    }
}
