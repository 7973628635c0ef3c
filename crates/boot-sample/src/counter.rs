//! A counter that seeds itself at boot.
//!
//! The `BOOT` handler dispatches `counter/ADD` synchronously, so the seed is part of the
//! boot cascade without any awaiting.

use redux_boot::framework::{Action, ActionCreator, Next, ReducerMap};
use redux_boot::middleware::MiddlewareMap;
use redux_boot::module::Module;
use redux_boot::BOOT;
use serde_json::json;
use tracing::debug;

use crate::model::AppState;

pub const INCREMENT: &str = "counter/INCREMENT";
pub const ADD: &str = "counter/ADD";

pub fn increment() -> Action {
    Action::empty(INCREMENT)
}

pub fn add() -> ActionCreator<i64> {
    ActionCreator::with_payload(ADD, |amount: i64| json!(amount))
}

pub fn module(seed: i64) -> Module<AppState> {
    Module::named("counter")
        .reducers(
            ReducerMap::new()
                .on(INCREMENT, |mut s: AppState, _: &Action| {
                    s.count += 1;
                    s
                })
                .on(ADD, |mut s: AppState, a: &Action| {
                    s.count += a.payload.as_i64().unwrap_or_default();
                    s
                }),
        )
        .middlewares(MiddlewareMap::new().on(BOOT, move |store| {
            let store = store.clone();
            let add = add();
            move |action: Action, next: &Next| {
                debug!(seed, "Seeding counter");
                let _ = store.dispatch(add.create(seed));
                next.call(action)
            }
        }))
}
