//! `ensure`: efecto incondicional que no toca el outcome.

use std::future::Future;

use crate::chain::Stage;
use crate::stage::{Async, Body, Chainable, FailMode, Failability, OpKind, When};

impl<T, F, W, P> Stage<T, F, W, P>
    where T: Send + 'static,
          F: FailMode,
          W: When,
          P: Chainable
{
    pub fn ensure<H>(self, handler: H) -> Stage<T, F, W, P>
        where H: FnOnce() + Send + 'static
    {
        self.chain_sync(OpKind::Ensure, Body::instant(Failability::NeverFails), move |outcome| {
                handler();
                outcome
            })
    }

    pub fn ensure_async<H, Fut>(self, handler: H) -> Stage<T, F, Async, P>
        where H: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = ()> + Send + 'static
    {
        self.chain_async(OpKind::Ensure,
                         Body::asynchronous(Failability::NeverFails),
                         move |outcome| async move {
                             handler().await;
                             outcome
                         })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::ops::{attempt, try_attempt};

    #[derive(Debug, thiserror::Error)]
    #[error("fail")]
    struct Fail;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + Clone + 'static) {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        (calls, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn ensure_runs_on_success_and_failure() {
        let (calls, bump) = counter();
        assert_eq!(attempt(|| 1).ensure(bump.clone()).value(), 1);
        assert!(try_attempt(|| Err::<i32, _>(Fail)).ensure(bump.clone()).throws().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn ensure_keeps_the_classification() {
        let (_, bump) = counter();
        let stage = try_attempt(|| Err::<i32, _>(Fail)).catch(|_| {});
        let before = stage.classification();
        let after = stage.ensure(bump);
        assert_eq!(after.classification(), before);
        assert!(after.throws().unwrap_err().is::<Fail>());
    }

    #[tokio::test]
    async fn ensure_async_runs_before_extraction() {
        let (calls, bump) = counter();
        let v = attempt(|| 3).ensure_async(move || async move { bump() }).await_value().await;
        assert_eq!(v, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
