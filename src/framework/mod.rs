//! State-container building blocks.
//!
//! This module provides the pieces every module and the bootstrap are written against:
//!
//! - [`Action`] / [`ActionCreator`] / [`AsyncActionCreator`] - Event records and their factories
//! - [`Reducer`], [`handle_actions`], [`reduce_reducers`] - Pure state transitions and their combination
//! - [`Store`] / [`StoreBuilder`] / [`StoreHandle`] - The state container and how it is assembled
//! - [`Dispatch`] / [`Outcome`] - Dispatch functions and what they return
//! - [`DispatchError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for a recording middleware to test modules without real side effects.

pub mod action;
pub mod dispatch;
pub mod error;
pub mod keyed;
pub mod mock;
pub mod reducer;
pub mod store;

pub use action::{Action, ActionCreator, AsyncActionCreator, DeferredAction};
pub use dispatch::{Dispatch, DispatchResult, Next, Outcome, PendingDispatch};
pub use error::{BoxError, DispatchError};
pub use keyed::Keyed;
pub use reducer::{handle_actions, reduce_reducers, reducer, Reducer, ReducerHandler, ReducerMap};
pub use store::{enhancer, Enhancer, Listener, Store, StoreBuilder, StoreHandle, Subscription};
