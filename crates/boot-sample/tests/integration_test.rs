use std::sync::Arc;
use std::time::Duration;

use boot_sample::loader::{self, ProfileService};
use boot_sample::model::{AppState, Profile};
use boot_sample::{counter, modules, SampleConfig};
use redux_boot::framework::mock::MockMiddleware;
use redux_boot::framework::{Action, StoreBuilder};
use redux_boot::module::Module;
use redux_boot::{boot, BootConfig, Bootstrap, BOOT};
use tokio::sync::Notify;

fn quick_config() -> SampleConfig {
    SampleConfig {
        service: ProfileService::new([Profile::new("user/23", "Irlanda")], Duration::from_millis(1)),
        welcome_delay: Duration::from_millis(20),
        ..SampleConfig::default()
    }
}

/// Full end-to-end boot with all sample modules.
#[tokio::test]
async fn test_full_sample_boot() {
    let booted = boot(AppState::default(), modules(quick_config()))
        .await
        .expect("Failed to boot");

    let state = booted.store.get_state();
    assert_eq!(state.count, 10, "counter seeded during boot");
    assert_eq!(state.profile, Some(Profile::new("user/23", "Irlanda")));
    assert!(!state.loading, "loader finished");
    assert_eq!(state.greeting.as_deref(), Some("Hello, Irlanda!"));
    assert!(!state.welcomed, "welcome is not part of the boot");

    let changed = Arc::new(Notify::new());
    let subscription = booted.store.subscribe({
        let changed = changed.clone();
        move || changed.notify_one()
    });
    tokio::time::timeout(Duration::from_secs(5), async {
        while !booted.store.get_state().welcomed {
            changed.notified().await;
        }
    })
    .await
    .expect("welcome never arrived");
    subscription.unsubscribe();

    for _ in 0..3 {
        booted.store.dispatch(counter::increment()).await.unwrap();
    }
    assert_eq!(booted.store.get_state().count, 13);
}

#[tokio::test]
async fn test_missing_profile_is_recorded_not_fatal() {
    let config = SampleConfig {
        user_id: "user/404".to_string(),
        ..quick_config()
    };

    let booted = boot(AppState::default(), modules(config)).await.expect("Failed to boot");

    let state = booted.store.get_state();
    assert_eq!(state.profile, None);
    assert_eq!(state.error.as_deref(), Some("Profile not found: user/404"));
    assert_eq!(state.greeting, None);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_action_flow_through_pipeline() {
    let mock = MockMiddleware::new();
    let mut all = modules(quick_config());
    all.push(Module::<AppState>::named("recorder").enhancer({
        let mock = mock.clone();
        move |builder: StoreBuilder<AppState>| builder.middleware(mock.middleware())
    }));

    Bootstrap::new(BootConfig::default())
        .boot(AppState::default(), all)
        .await
        .expect("Failed to boot");

    // The loader brackets the fetch; nested dispatches reach inner stages first.
    assert_eq!(
        mock.seen_types(),
        vec![counter::ADD, BOOT, loader::LOADING, loader::FETCH, loader::LOADING]
    );
}

#[tokio::test]
async fn test_stubbed_fetch_skips_reducer() {
    let mut mock = MockMiddleware::new();
    mock.expect_action(counter::ADD).pass_through();
    mock.expect_action(loader::FETCH)
        .return_ok(Action::new(loader::FETCH, serde_json::json!({"id": "stub", "name": "Stub"})));

    let mut all = modules(quick_config());
    all.push(Module::<AppState>::named("stub").enhancer({
        let mock = mock.clone();
        move |builder: StoreBuilder<AppState>| builder.middleware(mock.middleware())
    }));

    let booted = boot(AppState::default(), all).await.expect("Failed to boot");
    mock.verify();

    let state = booted.store.get_state();
    assert_eq!(state.count, 10);
    assert_eq!(state.profile, None, "stubbed fetch never reached the reducer");
    assert_eq!(state.greeting, None);
}
