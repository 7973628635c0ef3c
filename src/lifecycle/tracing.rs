//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Applications call it once, before booting.
//!
//! ## Configuration
//!
//! Log levels come from the `RUST_LOG` environment variable. The compact format hides the
//! module prefix (`with_target(false)`); action types are carried as structured fields instead.
//!
//! ## What Gets Traced
//!
//! - **Boot**: a `boot` span carrying the boot action type and the module count
//! - **Assembly**: how many reducers, middlewares and enhancers the modules contributed
//! - **Dispatch**: every reduction and keyed routing decision (debug level)
//! - **Failures**: rejected payloads, failed background dispatches and failed boots
//!
//! ## Usage Examples
//!
//! ```bash
//! # Boot milestones only
//! RUST_LOG=info cargo run -p boot-sample
//!
//! # Every routed and reduced action
//! RUST_LOG=debug cargo run -p boot-sample
//!
//! # Only the router
//! RUST_LOG=redux_boot::middleware=debug cargo run -p boot-sample
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! DEBUG boot: Modules processed modules=3 reducers=2 middlewares=2 enhancers=1
//! INFO boot: Store created middlewares=3
//! INFO boot: Booting enhancers=1
//! DEBUG boot: Routed action_type="redux-boot/BOOT"
//! DEBUG boot: Reduced action_type="redux-boot/BOOT" error=false
//! DEBUG boot: Reduced action_type="counter/ADD" error=false
//! INFO boot: Boot settled
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // action types are logged as fields
        .compact()
        .init();
}
