//! Module aggregation: splitting module contributions into three ordered lists.

use tracing::debug;

use crate::framework::{handle_actions, Enhancer, Reducer};
use crate::middleware::{handle_middlewares, Middleware};
use crate::module::{Contribution, Module};

/// The contributions of a module list, ready for composition.
///
/// Each list keeps module declaration order and holds one entry per module that
/// contributed to it.
pub struct Processed<S> {
    pub reducers: Vec<Reducer<S>>,
    pub middlewares: Vec<Middleware<S>>,
    pub enhancers: Vec<Enhancer<S>>,
}

/// Partitions and normalizes module contributions.
///
/// Direct contributions pass through unchanged; keyed reducers are combined with
/// [`handle_actions`], keyed middlewares with [`handle_middlewares`]. Modules that do not
/// contribute to a list are left out of it.
pub fn process_modules<S: Clone + Send + 'static>(modules: &[Module<S>]) -> Processed<S> {
    for module in modules {
        debug!(
            module = module.name().unwrap_or("anonymous"),
            reducer = !module.reducer.is_none(),
            middleware = !module.middleware.is_none(),
            enhancer = module.enhancer.is_some(),
            "Module contributions"
        );
    }

    let reducers = modules
        .iter()
        .filter_map(|module| match &module.reducer {
            Contribution::None => None,
            Contribution::Direct(f) => Some(f.clone()),
            Contribution::Keyed(handlers) => Some(handle_actions(handlers.clone())),
        })
        .collect::<Vec<_>>();

    let middlewares = modules
        .iter()
        .filter_map(|module| match &module.middleware {
            Contribution::None => None,
            Contribution::Direct(m) => Some(m.clone()),
            Contribution::Keyed(handlers) => Some(handle_middlewares(handlers.clone())),
        })
        .collect::<Vec<_>>();

    let enhancers = modules
        .iter()
        .filter_map(|module| module.enhancer.clone())
        .collect::<Vec<_>>();

    debug!(
        modules = modules.len(),
        reducers = reducers.len(),
        middlewares = middlewares.len(),
        enhancers = enhancers.len(),
        "Modules processed"
    );

    Processed {
        reducers,
        middlewares,
        enhancers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{reduce_reducers, Action, Next, ReducerMap, StoreBuilder, StoreHandle};
    use crate::middleware::{middleware, MiddlewareMap};
    use std::sync::{Arc, Mutex};

    type Trail = Vec<String>;

    fn mark(tag: &'static str) -> impl Fn(Trail, &Action) -> Trail + Send + Sync + 'static {
        move |mut trail: Trail, _: &Action| {
            trail.push(tag.to_string());
            trail
        }
    }

    fn logging(tag: &'static str, log: Arc<Mutex<Trail>>) -> Middleware<Trail> {
        middleware(move |_store: &StoreHandle<Trail>| {
            let log = log.clone();
            move |action: Action, next: &Next| {
                log.lock().unwrap().push(tag.to_string());
                next.call(action)
            }
        })
    }

    #[test]
    fn test_empty_module_contributes_nothing() {
        let processed = process_modules::<Trail>(&[Module::new(), Module::named("blank")]);
        assert!(processed.reducers.is_empty());
        assert!(processed.middlewares.is_empty());
        assert!(processed.enhancers.is_empty());
    }

    #[tokio::test]
    async fn test_contributions_keep_module_order() {
        let log = Arc::new(Mutex::new(Trail::new()));
        let mut a = Module::named("a").reducer(mark("a"));
        a.middleware = Contribution::Direct(logging("a", log.clone()));
        let modules = vec![
            a,
            Module::named("b").enhancer(|builder: StoreBuilder<Trail>| builder.subscribe(|| {})),
            Module::named("c")
                .reducers(ReducerMap::new().on("GO", mark("c")))
                .middlewares(MiddlewareMap::new().entry("GO", logging("c", log.clone()))),
            Module::named("d").reducer(mark("d")),
        ];

        let processed = process_modules(&modules);
        assert_eq!(processed.reducers.len(), 3);
        assert_eq!(processed.middlewares.len(), 2);
        assert_eq!(processed.enhancers.len(), 1);

        let reduce = reduce_reducers(processed.reducers);
        assert_eq!(reduce(Trail::new(), &Action::empty("GO")), vec!["a", "c", "d"]);
        assert_eq!(reduce(Trail::new(), &Action::empty("OTHER")), vec!["a", "d"]);

        let store = processed
            .middlewares
            .into_iter()
            .fold(StoreBuilder::new(reduce_reducers(vec![]), Trail::new()), |b, m| b.middleware(m))
            .build();
        store.dispatch(Action::empty("GO")).await.unwrap();
        store.dispatch(Action::empty("OTHER")).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "c", "a"]);
    }
}
