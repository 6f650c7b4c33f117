//! `catch`: observa el error sin corregir el valor.
//!
//! El handler corre sólo ante un fallo y recibe ese error. La salida sigue
//! siendo el fallo original; si un handler falible falla, su error lo
//! reemplaza. Con éxito en la entrada el valor pasa sin tocar.

use std::error::Error;
use std::future::Future;

use crate::chain::Stage;
use crate::errors::StageError;
use crate::outcome::Outcome;
use crate::stage::{Async, Body, Chainable, Failability, FullyHandled, MayFail, OpKind, PartiallyHandled, When};

fn rethrow<T, E: Error + Send + Sync + 'static>(original: StageError, handled: Result<(), E>) -> Outcome<T> {
    match handled {
        Ok(()) => Outcome::Failure(original),
        Err(replacement) => Outcome::Failure(StageError::new(replacement)),
    }
}

impl<T, W, P> Stage<T, MayFail, W, P>
    where T: Send + 'static,
          W: When,
          P: Chainable
{
    pub fn catch<H>(self, handler: H) -> Stage<T, MayFail, W, FullyHandled>
        where H: FnOnce(StageError) + Send + 'static
    {
        self.chain_sync(OpKind::Catch, Body::instant(Failability::NeverFails), move |outcome| {
                if let Outcome::Failure(error) = &outcome {
                    handler(error.clone());
                }
                outcome
            })
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_catch<E, H>(self, handler: H) -> Stage<T, MayFail, W, PartiallyHandled>
        where E: Error + Send + Sync + 'static,
              H: FnOnce(StageError) -> Result<(), E> + Send + 'static
    {
        self.chain_sync(OpKind::Catch, Body::instant(Failability::MayFail), move |outcome| match outcome {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(error) => {
                    let handled = handler(error.clone());
                    rethrow(error, handled)
                }
            })
    }

    pub fn catch_async<H, Fut>(self, handler: H) -> Stage<T, MayFail, Async, FullyHandled>
        where H: FnOnce(StageError) -> Fut + Send + 'static,
              Fut: Future<Output = ()> + Send + 'static
    {
        self.chain_async(OpKind::Catch,
                         Body::asynchronous(Failability::NeverFails),
                         move |outcome| async move {
                             if let Outcome::Failure(error) = &outcome {
                                 handler(error.clone()).await;
                             }
                             outcome
                         })
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_catch_async<E, H, Fut>(self, handler: H) -> Stage<T, MayFail, Async, PartiallyHandled>
        where E: Error + Send + Sync + 'static,
              H: FnOnce(StageError) -> Fut + Send + 'static,
              Fut: Future<Output = Result<(), E>> + Send + 'static
    {
        self.chain_async(OpKind::Catch,
                         Body::asynchronous(Failability::MayFail),
                         move |outcome| async move {
                             match outcome {
                                 Outcome::Success(value) => Outcome::Success(value),
                                 Outcome::Failure(error) => {
                                     let handled = handler(error.clone()).await;
                                     rethrow(error, handled)
                                 }
                             }
                         })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::errors::StageError;
    use crate::ops::{try_attempt, try_attempt_async};
    use crate::stage::CatchProgress;

    #[derive(Debug, thiserror::Error)]
    #[error("rejected")]
    struct Rejected;

    #[derive(Debug, thiserror::Error)]
    #[error("handler failed")]
    struct HandlerFailed;

    #[test]
    fn catch_sees_the_error_and_reraises_it() {
        let original = StageError::new(Rejected);
        let raised = original.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let stage = try_attempt(move || Err::<i32, _>(raised)).catch(move |e| sink.lock().unwrap().push(e));
        assert_eq!(stage.classification().progress, CatchProgress::FullyHandled);

        let err = stage.throws().unwrap_err();
        assert!(err.ptr_eq(&original));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ptr_eq(&original));
    }

    #[test]
    fn catch_is_skipped_on_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let v = try_attempt(|| Ok::<_, Rejected>(6)).catch(move |_| {
                                                        c.fetch_add(1, Ordering::SeqCst);
                                                    })
                                                    .throws()
                                                    .unwrap();
        assert_eq!(v, 6);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failing_catch_handler_replaces_the_error() {
        let stage = try_attempt(|| Err::<i32, _>(Rejected)).try_catch(|_| Err(HandlerFailed));
        assert_eq!(stage.classification().progress, CatchProgress::PartiallyHandled);
        let err = stage.throws().unwrap_err();
        assert!(err.is::<HandlerFailed>());
    }

    #[test]
    fn partially_handled_can_be_caught_again() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let stage = try_attempt(|| Err::<i32, _>(Rejected)).try_catch(|_| Ok::<(), HandlerFailed>(()))
                                                           .catch(move |e| {
                                                               assert!(e.is::<Rejected>());
                                                               c.fetch_add(1, Ordering::SeqCst);
                                                           });
        assert_eq!(stage.classification().progress, CatchProgress::FullyHandled);
        assert!(stage.throws().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn async_catch_handlers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let err = try_attempt_async(|| async { Err::<i32, _>(Rejected) }).catch_async(move |_| async move {
                                                                             c.fetch_add(1, Ordering::SeqCst);
                                                                         })
                                                                         .await_throws()
                                                                         .await
                                                                         .unwrap_err();
        assert!(err.is::<Rejected>());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let err = try_attempt(|| Err::<i32, _>(Rejected)).try_catch_async(|_| async { Err(HandlerFailed) })
                                                         .await_throws()
                                                         .await
                                                         .unwrap_err();
        assert!(err.is::<HandlerFailed>());
    }
}
