use std::env;

use tracing::{info, warn};

use crate::framework::{reduce_reducers, Action, DispatchError, Store, StoreBuilder};
use crate::module::{process_modules, Module};

/// Default action type of the bootstrap signal.
pub const BOOT: &str = "redux-boot/BOOT";

/// Environment variable read by [`BootConfig::from_env`].
pub const BOOT_TYPE_ENV: &str = "REDUX_BOOT_TYPE";

/// Errors that can occur while booting an application.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("Invalid boot action type: {0:?}")]
    InvalidBootType(String),
    #[error("Boot dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    /// Action type dispatched to start the application.
    pub boot_type: String,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            boot_type: BOOT.to_string(),
        }
    }
}

impl BootConfig {
    pub fn new(boot_type: impl Into<String>) -> Self {
        Self {
            boot_type: boot_type.into(),
        }
    }

    /// Reads the boot action type from `REDUX_BOOT_TYPE`, falling back to [`BOOT`].
    pub fn from_env() -> Self {
        match env::var(BOOT_TYPE_ENV) {
            Ok(boot_type) => Self::new(boot_type),
            Err(_) => Self::default(),
        }
    }

    fn validate(&self) -> Result<(), BootError> {
        if self.boot_type.trim().is_empty() {
            return Err(BootError::InvalidBootType(self.boot_type.clone()));
        }
        Ok(())
    }
}

/// A booted application: the boot action and the store it was dispatched to.
#[derive(Debug)]
pub struct Booted<S> {
    pub action: Action,
    pub store: Store<S>,
}

/// The bootstrap orchestrator.
///
/// `Bootstrap` is responsible for:
/// - **Aggregation**: Splitting module contributions with [`process_modules`]
/// - **Assembly**: Building the store with the combined reducer, the module middlewares
///   (in module order, outermost first) and every enhancer (in module order)
/// - **Startup**: Dispatching the boot action and waiting for its cascade to settle
///
/// # Completion
///
/// [`boot`](Bootstrap::boot) resolves once the outcome of the boot dispatch has settled.
/// Because dispatch is eager, every synchronous nested dispatch has already run by then;
/// every nested dispatch a handler awaits (or returns) is waited for, recursively.
/// Dispatches a handler drops or [`detach`](crate::framework::Outcome::detach)es still run
/// to completion, but are not waited for.
///
/// # Example
///
/// ```ignore
/// let booted = Bootstrap::new(BootConfig::new("app/START"))
///     .boot(AppState::default(), vec![session_module(), router_module()])
///     .await?;
///
/// let state = booted.store.get_state();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    config: BootConfig,
}

impl Bootstrap {
    pub fn new(config: BootConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BootConfig {
        &self.config
    }

    /// Assembles a store from `modules` and dispatches the boot action through it.
    ///
    /// # Errors
    ///
    /// - [`BootError::InvalidBootType`] if the configured boot type is blank
    /// - [`BootError::Dispatch`] if the boot cascade fails; state changes made before the
    ///   failure are not rolled back
    #[tracing::instrument(skip_all, fields(boot_type = %self.config.boot_type, modules = modules.len()))]
    pub async fn boot<S>(&self, initial_state: S, modules: Vec<Module<S>>) -> Result<Booted<S>, BootError>
    where
        S: Clone + Send + 'static,
    {
        self.config.validate()?;

        let processed = process_modules(&modules);
        let enhancer_count = processed.enhancers.len();

        let builder = processed.middlewares.into_iter().fold(
            StoreBuilder::new(reduce_reducers(processed.reducers), initial_state),
            StoreBuilder::middleware,
        );
        let builder = processed
            .enhancers
            .iter()
            .fold(builder, |builder, enhancer| builder.enhance(enhancer));
        let store = builder.build();

        let action = Action::empty(self.config.boot_type.clone());
        info!(enhancers = enhancer_count, "Booting");

        if let Err(e) = store.dispatch(action.clone()).await {
            warn!(error = %e, "Boot failed");
            return Err(e.into());
        }

        info!("Boot settled");
        Ok(Booted { action, store })
    }
}

/// Boots `modules` with the default configuration.
///
/// Shorthand for `Bootstrap::default().boot(initial_state, modules)`.
pub async fn boot<S>(initial_state: S, modules: Vec<Module<S>>) -> Result<Booted<S>, BootError>
where
    S: Clone + Send + 'static,
{
    Bootstrap::default().boot(initial_state, modules).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockMiddleware;
    use crate::framework::{Next, Outcome, ReducerMap, StoreBuilder};
    use crate::middleware::MiddlewareMap;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Flags {
        booted: bool,
        boots: u32,
    }

    fn flag_module(boot_type: &str) -> Module<Flags> {
        Module::named("flags").reducers(ReducerMap::new().on(boot_type, |mut s: Flags, _| {
            s.booted = true;
            s.boots += 1;
            s
        }))
    }

    #[tokio::test]
    async fn test_boot_dispatches_boot_action_once() {
        let booted = boot(Flags::default(), vec![flag_module(BOOT)]).await.unwrap();
        assert_eq!(booted.action, Action::empty(BOOT));
        assert_eq!(booted.store.get_state(), Flags { booted: true, boots: 1 });
    }

    #[tokio::test]
    async fn test_boot_type_is_injected() {
        let bootstrap = Bootstrap::new(BootConfig::new("tenant-a/START"));
        let booted = bootstrap
            .boot(Flags::default(), vec![flag_module(BOOT), flag_module("tenant-a/START")])
            .await
            .unwrap();

        assert_eq!(booted.action.kind(), "tenant-a/START");
        assert_eq!(booted.store.get_state().boots, 1, "default BOOT handler not triggered");
    }

    #[tokio::test]
    async fn test_blank_boot_type_is_rejected() {
        let err = Bootstrap::new(BootConfig::new("  "))
            .boot(Flags::default(), vec![flag_module(BOOT)])
            .await
            .unwrap_err();
        assert!(matches!(err, BootError::InvalidBootType(_)));
    }

    #[tokio::test]
    async fn test_boot_with_no_modules() {
        let booted = boot(Flags::default(), vec![]).await.unwrap();
        assert_eq!(booted.store.get_state(), Flags::default());
    }

    #[tokio::test]
    async fn test_middlewares_run_before_enhancer_stages() {
        let mock = MockMiddleware::new();
        let recorder = mock.clone();
        let modules = vec![
            Module::named("recorder").enhancer(move |builder: StoreBuilder<Flags>| {
                builder.middleware(recorder.middleware())
            }),
            Module::named("gate").middleware(|_store| {
                |action: Action, next: &Next| {
                    if action.kind() == "blocked" {
                        Outcome::ready(action)
                    } else {
                        next.call(action)
                    }
                }
            }),
        ];

        let booted = boot(Flags::default(), modules).await.unwrap();
        booted.store.dispatch(Action::empty("blocked")).await.unwrap();
        booted.store.dispatch(Action::empty("open")).await.unwrap();

        assert_eq!(mock.seen_types(), vec![BOOT, "open"]);
    }

    #[tokio::test]
    async fn test_keyed_boot_handler_failure_rejects_boot() {
        let failing = Module::named("failing").middlewares(MiddlewareMap::new().on(BOOT, |_store| {
            |_action: Action, _next: &Next| Outcome::reject(BOOT, "config missing")
        }));

        let err = boot(Flags::default(), vec![failing]).await.unwrap_err();
        match err {
            BootError::Dispatch(DispatchError::Handler { action_type, source }) => {
                assert_eq!(action_type, BOOT);
                assert_eq!(source.to_string(), "config missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_from_env() {
        env::remove_var(BOOT_TYPE_ENV);
        assert_eq!(BootConfig::from_env(), BootConfig::default());

        env::set_var(BOOT_TYPE_ENV, "app/START");
        assert_eq!(BootConfig::from_env().boot_type, "app/START");
        env::remove_var(BOOT_TYPE_ENV);
    }
}
