//! # Redux Boot Sample Library
//!
//! Three modules booted together, each showing one way a module takes part in the boot:
//!
//! - [`counter`]: a synchronous nested dispatch from the `BOOT` handler.
//! - [`loader`]: an awaited asynchronous fetch, bracketed by loading actions.
//! - [`greeter`]: an enhancer and a detached (fire-and-forget) dispatch.

pub mod counter;
pub mod greeter;
pub mod loader;
pub mod model;

use std::time::Duration;

use redux_boot::module::Module;

use crate::loader::ProfileService;
use crate::model::AppState;

/// Settings for the sample modules.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seed: i64,
    pub user_id: String,
    pub welcome_delay: Duration,
    pub service: ProfileService,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 10,
            user_id: "user/23".to_string(),
            welcome_delay: Duration::from_millis(50),
            service: ProfileService::default(),
        }
    }
}

/// The application's modules, in pipeline order.
pub fn modules(config: SampleConfig) -> Vec<Module<AppState>> {
    vec![
        counter::module(config.seed),
        loader::module(config.service, config.user_id),
        greeter::module(config.welcome_delay),
    ]
}
