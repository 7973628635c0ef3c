//! Middleware chain composition.

use crate::framework::Dispatch;
use crate::middleware::BoundMiddleware;

/// Composes bound stages around `base`, outermost first.
///
/// The first stage receives every dispatched action; its `next` is the second stage, and
/// the last stage's `next` is `base`.
pub fn compose(stages: Vec<BoundMiddleware>, base: Dispatch) -> Dispatch {
    stages.into_iter().rev().fold(base, |next, stage| {
        Dispatch::new(move |action| stage(action, &next))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{Action, Next, Outcome};
    use std::sync::{Arc, Mutex};

    fn tagging(tag: &'static str, log: Arc<Mutex<Vec<String>>>) -> BoundMiddleware {
        Arc::new(move |action: Action, next: &Next| {
            log.lock().unwrap().push(format!("{tag}>"));
            let outcome = next.call(action);
            log.lock().unwrap().push(format!("<{tag}"));
            outcome
        })
    }

    #[tokio::test]
    async fn test_stages_wrap_outer_to_inner() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let base_log = log.clone();
        let base = Dispatch::new(move |action| {
            base_log.lock().unwrap().push("base".to_string());
            Outcome::ready(action)
        });

        let dispatch = compose(
            vec![tagging("a", log.clone()), tagging("b", log.clone())],
            base,
        );
        let result = dispatch.call(Action::empty("GO")).await.unwrap();

        assert_eq!(result.kind(), "GO");
        assert_eq!(*log.lock().unwrap(), vec!["a>", "b>", "base", "<b", "<a"]);
    }

    #[tokio::test]
    async fn test_stage_can_swallow_action() {
        let base = Dispatch::new(|_| panic!("base must not run"));
        let swallow: BoundMiddleware =
            Arc::new(|action: Action, _next: &Next| Outcome::ready(action));

        let dispatch = compose(vec![swallow], base);
        assert!(dispatch.call(Action::empty("DROP")).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_chain_is_base() {
        let dispatch = compose(vec![], Dispatch::new(Outcome::ready));
        assert_eq!(dispatch.call(Action::empty("X")).await.unwrap(), Action::empty("X"));
    }
}
