use std::time::Duration;

use boot_sample::model::AppState;
use boot_sample::{counter, modules, SampleConfig};
use redux_boot::lifecycle::tracing::setup_tracing;
use redux_boot::{BootConfig, Bootstrap};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application");

    let config = SampleConfig::default();
    let welcome_delay = config.welcome_delay;
    let bootstrap = Bootstrap::new(BootConfig::from_env());

    let booted = bootstrap
        .boot(AppState::default(), modules(config))
        .await
        .map_err(|e| e.to_string())?;

    let state = booted.store.get_state();
    info!(
        count = state.count,
        greeting = ?state.greeting,
        welcomed = state.welcomed,
        "Application booted"
    );

    let span = tracing::info_span!("counting");
    async {
        for _ in 0..3 {
            if let Err(e) = booted.store.dispatch(counter::increment()).await {
                error!(error = %e, "Increment failed");
            }
        }
        info!(count = booted.store.get_state().count, "Counted");
    }
    .instrument(span)
    .await;

    // The welcome runs detached from the boot
    tokio::time::sleep(welcome_delay + Duration::from_millis(10)).await;
    info!(welcomed = booted.store.get_state().welcomed, "Application completed successfully");
    Ok(())
}
