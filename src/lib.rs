#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Redux Boot
//!
//! > **Modular bootstrapping for Redux-style state containers.**
//!
//! An application is written as a list of independent **modules**. Each one may contribute
//! a reducer, a middleware and a store enhancer. This crate combines them into one
//! [`Store`](framework::Store), dispatches a boot action through it, and resolves once that
//! action and everything it set off has settled.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why modules?
//!
//! - **Independent authoring**: A module only knows the action types it reacts to.
//! - **Predictable composition**: Declaration order is the only ordering rule. Reducers run in
//!   module order; middlewares wrap in module order; enhancers apply in module order.
//! - **Explicit completion**: A handler states whether its follow-up work is part of the boot
//!   (return or await the [`Outcome`](framework::Outcome)) or not (drop or
//!   [`detach`](framework::Outcome::detach) it; it still runs, in the background).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Container ([`framework`])
//! Actions, reducers, the store and its dispatch outcomes.
//! - **Key items**: [`Action`](framework::Action), [`Store`](framework::Store),
//!   [`Outcome`](framework::Outcome), [`handle_actions`](framework::handle_actions).
//!
//! ### 2. The Pipeline ([`middleware`])
//! Middleware factories, their composition and the action-type router.
//! - **Key items**: [`Middleware`](middleware::Middleware),
//!   [`handle_middlewares`](middleware::handle_middlewares).
//!
//! ### 3. The Contributions ([`module`])
//! Module descriptors and their aggregation.
//! - **Key items**: [`Module`](module::Module), [`process_modules`](module::process_modules).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! Store assembly and the boot sequence.
//! - **Key items**: [`Bootstrap`], [`boot()`], [`BOOT`].
//!
//! ## 🧪 Testing
//!
//! See [`framework::mock`] for a recording middleware with expectations.
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -p boot-sample
//! ```

pub mod framework;
pub mod lifecycle;
pub mod middleware;
pub mod module;

pub use lifecycle::{boot, BootConfig, BootError, Booted, Bootstrap, BOOT};
