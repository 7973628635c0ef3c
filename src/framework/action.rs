//! # Actions
//!
//! An [`Action`] is the immutable record of something that happened: a type key and a
//! JSON payload. Modules route on the type key, reducers read the payload.
//!
//! Action creators keep the type key and the payload shape in one place:
//!
//! - [`ActionCreator`] builds ready actions, optionally through a payload transform.
//! - [`AsyncActionCreator`] builds a [`DeferredAction`] whose payload is still being
//!   computed. See [`Store::dispatch_deferred`](crate::framework::Store::dispatch_deferred).

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::framework::error::BoxError;

/// An event record `{type, payload, error}`.
///
/// `error == true` marks the failure outcome of an operation; forked reducer
/// handlers use it to pick their `throw` path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub error: bool,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
            error: false,
        }
    }

    /// An action with a `null` payload.
    pub fn empty(kind: impl Into<String>) -> Self {
        Self::new(kind, Value::Null)
    }

    /// A failure action; its payload usually describes the error.
    pub fn failure(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            error: true,
            ..Self::new(kind, payload)
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Deserializes the payload into a typed value.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// An action whose payload is produced asynchronously.
///
/// Nothing happens until it is handed to a store: the store awaits the payload and then
/// dispatches the resolved [`Action`] through the whole pipeline.
pub struct DeferredAction {
    pub(crate) kind: String,
    pub(crate) payload: BoxFuture<'static, Result<Value, BoxError>>,
}

impl DeferredAction {
    pub fn new<F>(kind: impl Into<String>, payload: F) -> Self
    where
        F: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Self {
            kind: kind.into(),
            payload: payload.boxed(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Builds actions of one type, mapping the creator's argument to a payload.
pub struct ActionCreator<T = Value> {
    kind: String,
    transform: Arc<dyn Fn(T) -> Value + Send + Sync>,
}

impl<T> Clone for ActionCreator<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            transform: Arc::clone(&self.transform),
        }
    }
}

impl ActionCreator<Value> {
    /// Creator whose argument becomes the payload as-is.
    pub fn new(kind: impl Into<String>) -> Self {
        Self::with_payload(kind, |value| value)
    }
}

impl<T> ActionCreator<T> {
    pub fn with_payload<F>(kind: impl Into<String>, transform: F) -> Self
    where
        F: Fn(T) -> Value + Send + Sync + 'static,
    {
        Self {
            kind: kind.into(),
            transform: Arc::new(transform),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn create(&self, arg: T) -> Action {
        Action::new(self.kind.clone(), (self.transform)(arg))
    }

    /// Same payload mapping, flagged as a failure.
    pub fn failure(&self, arg: T) -> Action {
        Action::failure(self.kind.clone(), (self.transform)(arg))
    }
}

type AsyncTransform<T> = Arc<dyn Fn(T) -> BoxFuture<'static, Result<Value, BoxError>> + Send + Sync>;

/// Builds [`DeferredAction`]s of one type from an async payload transform.
pub struct AsyncActionCreator<T> {
    kind: String,
    transform: AsyncTransform<T>,
}

impl<T> Clone for AsyncActionCreator<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            transform: Arc::clone(&self.transform),
        }
    }
}

impl<T> AsyncActionCreator<T> {
    pub fn new<F, Fut>(kind: impl Into<String>, transform: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        Self {
            kind: kind.into(),
            transform: Arc::new(move |arg: T| transform(arg).boxed()),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn create(&self, arg: T) -> DeferredAction {
        DeferredAction {
            kind: self.kind.clone(),
            payload: (self.transform)(arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Movie {
        title: String,
        year: u16,
    }

    #[test]
    fn test_action_serializes_with_type_key() {
        let action = Action::new("movies/LOADED", json!({ "title": "Heat", "year": 1995 }));
        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded["type"], "movies/LOADED");
        assert_eq!(encoded["error"], false);

        let movie: Movie = action.payload_as().unwrap();
        assert_eq!(movie, Movie { title: "Heat".into(), year: 1995 });
    }

    #[test]
    fn test_missing_payload_defaults_to_null() {
        let action: Action = serde_json::from_value(json!({ "type": "PING" })).unwrap();
        assert_eq!(action, Action::empty("PING"));
        assert!(!action.is_error());
    }

    #[test]
    fn test_creator_applies_transform() {
        let shout = ActionCreator::with_payload("SHOUT", |s: String| json!(s.to_uppercase()));
        let action = shout.create("hello".to_string());
        assert_eq!(action.kind(), "SHOUT");
        assert_eq!(action.payload, json!("HELLO"));

        let failed = shout.failure("boom".to_string());
        assert!(failed.is_error());
        assert_eq!(failed.payload, json!("BOOM"));
    }

    #[tokio::test]
    async fn test_async_creator_defers_payload() {
        let lookup = AsyncActionCreator::new("LOOKUP", |id: u32| async move {
            Ok::<_, BoxError>(json!({ "id": id }))
        });
        let deferred = lookup.create(7);
        assert_eq!(deferred.kind(), "LOOKUP");
        assert_eq!(deferred.payload.await.unwrap(), json!({ "id": 7 }));
    }
}
