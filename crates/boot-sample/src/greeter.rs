//! Greets the loaded user.
//!
//! The enhancer keeps `greeting` derived from `profile` by wrapping the final reducer.
//! The middleware watches every action and, once a profile arrives, sends a welcome in
//! the background. The boot does not wait for the welcome.

use std::time::Duration;

use redux_boot::framework::{reducer, Action, BoxError, DeferredAction, Next, StoreBuilder};
use redux_boot::module::Module;
use serde_json::Value;
use tracing::debug;

use crate::loader;
use crate::model::AppState;

pub const WELCOMED: &str = "greeter/WELCOMED";

fn greeting(state: &AppState) -> Option<String> {
    state.profile.as_ref().map(|p| format!("Hello, {}!", p.name))
}

pub fn module(welcome_delay: Duration) -> Module<AppState> {
    Module::named("greeter")
        .reducer(|mut s: AppState, a: &Action| {
            if a.kind() == WELCOMED {
                s.welcomed = true;
            }
            s
        })
        .middleware(move |store| {
            let store = store.clone();
            move |action: Action, next: &Next| {
                let welcome = action.kind() == loader::FETCH && !action.is_error();
                let outcome = next.call(action);
                if welcome {
                    debug!("Scheduling welcome");
                    let deferred = DeferredAction::new(WELCOMED, async move {
                        tokio::time::sleep(welcome_delay).await;
                        Ok::<_, BoxError>(Value::Null)
                    });
                    let _ = store.dispatch_deferred(deferred).detach();
                }
                outcome
            }
        })
        .enhancer(|builder: StoreBuilder<AppState>| {
            builder.wrap_reducer(|inner| {
                reducer(move |state: AppState, action: &Action| {
                    let mut next = inner(state, action);
                    next.greeting = greeting(&next);
                    next
                })
            })
        })
}
