//! # Mock Middleware
//!
//! Utilities for testing modules in isolation.
//!
//! [`MockMiddleware`] is a middleware stage that records every action reaching it and can
//! be told how to answer specific action types. Install it with
//! [`MockMiddleware::middleware`], drive the store, then call [`MockMiddleware::verify`].
//!
//! ```ignore
//! let mut mock = MockMiddleware::new();
//! mock.expect_action("user/FETCH").return_ok(Action::new("user/FETCH", json!({"id": 1})));
//! mock.expect_action("user/SAVE").return_err("read-only replica");
//!
//! let store = StoreBuilder::new(reducer, state).middleware(mock.middleware()).build();
//! // ... dispatch ...
//! mock.verify(); // Ensures all expectations were met
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::framework::{Action, Next, Outcome, StoreHandle};
use crate::middleware::{middleware, Middleware};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// How the mock answers an expected action.
enum Reply {
    /// Forward to the rest of the pipeline.
    PassThrough,
    /// Answer with this action without forwarding.
    Stub(Action),
    /// Fail the dispatch without forwarding.
    Fail(String),
}

struct Expectation {
    kind: String,
    reply: Reply,
}

#[derive(Default)]
struct Recorded {
    expectations: VecDeque<Expectation>,
    seen: Vec<Action>,
}

/// A recording middleware with an expectation queue.
///
/// Expectations are matched in order against incoming actions of the same type. Actions
/// that do not match the front of the queue are recorded and forwarded untouched.
#[derive(Clone, Default)]
pub struct MockMiddleware {
    recorded: Arc<Mutex<Recorded>>,
}

impl MockMiddleware {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// The middleware to install in a store. Every store it is bound to shares this mock.
    pub fn middleware<S: Clone + Send + 'static>(&self) -> Middleware<S> {
        let recorded = self.recorded.clone();
        middleware(move |_store: &StoreHandle<S>| {
            let recorded = recorded.clone();
            move |action: Action, next: &Next| {
                let reply = {
                    let mut recorded = recorded.lock().unwrap();
                    recorded.seen.push(action.clone());
                    let expected = recorded
                        .expectations
                        .front()
                        .is_some_and(|exp| exp.kind == action.kind);
                    if expected {
                        recorded.expectations.pop_front().map(|exp| exp.reply)
                    } else {
                        None
                    }
                };

                match reply {
                    None | Some(Reply::PassThrough) => next.call(action),
                    Some(Reply::Stub(response)) => Outcome::ready(response),
                    Some(Reply::Fail(message)) => Outcome::reject(action.kind, message),
                }
            }
        })
    }

    /// Expects an action of type `kind`.
    pub fn expect_action(&mut self, kind: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            kind: kind.into(),
            recorded: self.recorded.clone(),
        }
    }

    /// Every action seen so far, in arrival order.
    pub fn seen(&self) -> Vec<Action> {
        self.recorded.lock().unwrap().seen.clone()
    }

    /// The types of every action seen so far, in arrival order.
    pub fn seen_types(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap()
            .seen
            .iter()
            .map(|a| a.kind.clone())
            .collect()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let recorded = self.recorded.lock().unwrap();
        if !recorded.expectations.is_empty() {
            let pending: Vec<&str> = recorded.expectations.iter().map(|e| e.kind.as_str()).collect();
            panic!("Not all expectations were met. {} remaining: {:?}", pending.len(), pending);
        }
    }
}

/// Builder for action expectations.
pub struct ExpectationBuilder {
    kind: String,
    recorded: Arc<Mutex<Recorded>>,
}

impl ExpectationBuilder {
    fn push(self, reply: Reply) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.expectations.push_back(Expectation {
            kind: self.kind,
            reply,
        });
    }

    /// Lets the action continue down the pipeline.
    pub fn pass_through(self) {
        self.push(Reply::PassThrough);
    }

    /// Answers with `response`; the action does not reach later stages or the reducer.
    pub fn return_ok(self, response: Action) {
        self.push(Reply::Stub(response));
    }

    /// Fails the dispatch with a [`DispatchError::Handler`](crate::framework::DispatchError::Handler).
    pub fn return_err(self, message: impl Into<String>) {
        self.push(Reply::Fail(message.into()));
    }
}

impl std::fmt::Debug for MockMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let recorded = self.recorded.lock().unwrap();
        f.debug_struct("MockMiddleware")
            .field("seen", &recorded.seen.len())
            .field("pending", &recorded.expectations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{reducer, DispatchError, StoreBuilder};

    fn counter_store(mock: &MockMiddleware) -> crate::framework::Store<u32> {
        StoreBuilder::new(reducer(|n: u32, a: &Action| if a.kind == "INC" { n + 1 } else { n }), 0)
            .middleware(mock.middleware())
            .build()
    }

    #[tokio::test]
    async fn test_mock_records_and_stubs() {
        let mut mock = MockMiddleware::new();
        mock.expect_action("INC").pass_through();
        mock.expect_action("INC").return_ok(Action::empty("STUBBED"));
        mock.expect_action("INC").return_err("quota exceeded");

        let store = counter_store(&mock);
        store.dispatch(Action::empty("PING")).await.unwrap();
        store.dispatch(Action::empty("INC")).await.unwrap();
        let stubbed = store.dispatch(Action::empty("INC")).await.unwrap();
        let err = store.dispatch(Action::empty("INC")).await.unwrap_err();

        assert_eq!(stubbed.kind(), "STUBBED");
        assert!(matches!(err, DispatchError::Handler { .. }));
        assert_eq!(store.get_state(), 1, "only the pass-through reached the reducer");
        assert_eq!(mock.seen_types(), vec!["PING", "INC", "INC", "INC"]);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_on_unmet_expectation() {
        let mut mock = MockMiddleware::new();
        mock.expect_action("NEVER").pass_through();
        let _store = counter_store(&mock);
        mock.verify();
    }
}
