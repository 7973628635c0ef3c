//! # Application Lifecycle & Bootstrap
//!
//! This module turns a list of [`Module`](crate::module::Module)s into a running store and
//! starts it.
//!
//! ## The Bootstrap Pattern
//!
//! Individual modules are simple, but **wiring them together** is where complexity lives.
//! [`Bootstrap`] is the conductor:
//!
//! **Key Responsibilities:**
//! 1. **Aggregation** - Split module contributions into reducers, middlewares and enhancers
//! 2. **Assembly** - Combine reducers in order, stack middlewares in order, apply enhancers
//! 3. **Startup** - Dispatch the boot action so modules can initialize themselves
//! 4. **Completion** - Resolve only when the boot cascade has settled
//! 5. **Observability Setup** - Initialize tracing and logging infrastructure ([`tracing`])
//!
//! ```rust,ignore
//! setup_tracing();
//!
//! let Booted { action, store } = Bootstrap::new(BootConfig::from_env())
//!     .boot(AppState::default(), vec![counter::module(), loader::module()])
//!     .await?;
//!
//! info!(action_type = %action.kind(), state = ?store.get_state(), "Application ready");
//! ```
//!
//! ## The Cascade Rule
//!
//! Handlers of the boot action commonly dispatch more actions, and so do the handlers of
//! those. The boot waits for a nested dispatch when a handler returns its [`Outcome`] or
//! awaits it inside the future it returns. A dispatch that is dropped, or passed to
//! [`Outcome::detach`], runs on its own task and the boot does not wait for it.
//!
//! ```rust,ignore
//! MiddlewareMap::new().on(BOOT, |store| {
//!     let store = store.clone();
//!     move |action: Action, next: &Next| {
//!         let booted = next.call(action);
//!         let store = store.clone();
//!         Outcome::pending(async move {
//!             let action = booted.await?;
//!             store.dispatch(Action::empty("app/WARMED_UP")).await?; // waited for
//!             let _ = store.dispatch(Action::empty("app/PREFETCH")); // not waited for
//!             Ok(action)
//!         })
//!     }
//! })
//! ```
//!
//! [`Outcome`]: crate::framework::Outcome
//! [`Outcome::detach`]: crate::framework::Outcome::detach

pub mod boot;
pub mod tracing;

pub use boot::{boot, BootConfig, BootError, Booted, Bootstrap, BOOT, BOOT_TYPE_ENV};
