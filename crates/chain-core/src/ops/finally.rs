//! `finally`: efecto incondicional que cierra la cadena.
//!
//! Legal sobre etapas que no fallan o cuyo error ya fue manejado por un
//! `catch` infalible. Después sólo queda extraer el outcome.

use std::future::Future;

use crate::chain::Stage;
use crate::stage::{Async, Body, FailMode, Failability, Finalizable, Finalized, OpKind, Progress, When};

impl<T, F, W, P> Stage<T, F, W, P>
    where T: Send + 'static,
          F: FailMode,
          W: When,
          P: Progress,
          (F, P): Finalizable
{
    pub fn finally<H>(self, handler: H) -> Stage<T, F, W, Finalized>
        where H: FnOnce() + Send + 'static
    {
        self.chain_sync(OpKind::Finally, Body::instant(Failability::NeverFails), move |outcome| {
                handler();
                outcome
            })
    }

    pub fn finally_async<H, Fut>(self, handler: H) -> Stage<T, F, Async, Finalized>
        where H: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = ()> + Send + 'static
    {
        self.chain_async(OpKind::Finally,
                         Body::asynchronous(Failability::NeverFails),
                         move |outcome| async move {
                             handler().await;
                             outcome
                         })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::ops::{attempt, try_attempt_async};
    use crate::stage::CatchProgress;

    #[derive(Debug, thiserror::Error)]
    #[error("lost connection")]
    struct LostConnection;

    #[test]
    fn finally_on_never_fails_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = Arc::clone(&log);
        let stage = attempt(|| 1).then(|v| v + 1).finally(move || l.lock().unwrap().push("cleanup"));
        assert!(stage.classification().is_finalized());
        assert_eq!(stage.value(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["cleanup"]);
    }

    #[tokio::test]
    async fn finally_after_full_catch_still_surfaces_the_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (l1, l2) = (Arc::clone(&log), Arc::clone(&log));
        let stage = try_attempt_async(|| async { Err::<i32, _>(LostConnection) }).catch(move |_| {
                                                                                     l1.lock().unwrap().push("catch")
                                                                                 })
                                                                                 .finally_async(move || async move {
                                                                                     l2.lock().unwrap().push("finally")
                                                                                 });
        assert_eq!(stage.classification().progress, CatchProgress::Finalized);
        let err = stage.await_throws().await.unwrap_err();
        assert!(err.is::<LostConnection>());
        assert_eq!(*log.lock().unwrap(), vec!["catch", "finally"]);
    }
}
