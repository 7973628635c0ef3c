//! # Profile Loader
//!
//! Loads the current user's profile while the application boots.
//!
//! - The [`ProfileService`] is created once per store, when the middleware is bound.
//! - `profile/FETCH` carries an asynchronous payload. The store resolves it before the
//!   action enters the pipeline, so the handler below only ever sees resolved actions.
//! - The handler brackets the fetch with `loader/LOADING` true/false.
//! - The `BOOT` handler awaits the fetch, so the boot settles only once the profile (or
//!   its failure) is in the state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use redux_boot::framework::{
    Action, AsyncActionCreator, BoxError, Next, Outcome, ReducerMap, StoreHandle,
};
use redux_boot::middleware::MiddlewareMap;
use redux_boot::module::Module;
use redux_boot::BOOT;
use tracing::{info, warn};

use crate::model::{AppState, Profile};

pub const FETCH: &str = "profile/FETCH";
pub const LOADING: &str = "loader/LOADING";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
}

/// A simulated remote profile service.
#[derive(Debug, Clone)]
pub struct ProfileService {
    profiles: Arc<HashMap<String, Profile>>,
    latency: Duration,
}

impl ProfileService {
    pub fn new(profiles: impl IntoIterator<Item = Profile>, latency: Duration) -> Self {
        Self {
            profiles: Arc::new(profiles.into_iter().map(|p| (p.id.clone(), p)).collect()),
            latency,
        }
    }

    pub async fn fetch(&self, id: &str) -> Result<Profile, ProfileError> {
        tokio::time::sleep(self.latency).await;
        self.profiles
            .get(id)
            .cloned()
            .ok_or_else(|| ProfileError::NotFound(id.to_string()))
    }
}

impl Default for ProfileService {
    fn default() -> Self {
        Self::new([Profile::new("user/23", "Irlanda")], Duration::from_millis(20))
    }
}

/// `profile/FETCH` with the profile as payload, once the service answers.
pub fn fetch_profile(service: ProfileService) -> AsyncActionCreator<String> {
    AsyncActionCreator::new(FETCH, move |id: String| {
        let service = service.clone();
        async move {
            let profile = service.fetch(&id).await?;
            Ok::<_, BoxError>(serde_json::to_value(profile)?)
        }
    })
}

fn reducers() -> ReducerMap<AppState> {
    ReducerMap::new()
        .on(LOADING, |mut s: AppState, a: &Action| {
            s.loading = a.payload.as_bool().unwrap_or_default();
            s
        })
        .fork(
            FETCH,
            |mut s: AppState, a: &Action| {
                s.profile = a.payload_as().ok();
                s.error = None;
                s
            },
            |mut s: AppState, a: &Action| {
                s.error = a.payload.as_str().map(str::to_owned);
                s
            },
        )
}

/// The loader module, fetching `user_id` from `service` at boot.
pub fn module(service: ProfileService, user_id: impl Into<String>) -> Module<AppState> {
    let user_id = user_id.into();

    Module::named("loader").reducers(reducers()).middlewares(
        MiddlewareMap::new()
            .on(BOOT, move |store| {
                let store = store.clone();
                let fetch = fetch_profile(service.clone());
                let user_id = user_id.clone();
                move |action: Action, next: &Next| {
                    let booted = next.call(action);
                    let fetched = store.dispatch_deferred(fetch.create(user_id.clone()));
                    Outcome::pending(async move {
                        if let Err(e) = fetched.await {
                            // The failure is already in the state; the app still boots.
                            warn!(error = %e, "Profile unavailable");
                        }
                        booted.await
                    })
                }
            })
            .on(FETCH, |store: &StoreHandle<AppState>| {
                let store = store.clone();
                move |action: Action, next: &Next| {
                    let _ = store.dispatch(Action::new(LOADING, true));
                    let fetched = next.call(action);
                    let _ = store.dispatch(Action::new(LOADING, false));
                    if let Ok(state) = store.get_state() {
                        info!(profile = ?state.profile.as_ref().map(|p| &p.name), "Profile fetched");
                    }
                    fetched
                }
            }),
    )
}
