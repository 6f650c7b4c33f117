//! `recover`: convierte un fallo en valor.
//!
//! Con éxito en la entrada el valor pasa sin tocar y el handler no corre.
//! Si un handler falible falla, su error reemplaza al original.

use std::error::Error;
use std::future::Future;

use crate::chain::Stage;
use crate::errors::StageError;
use crate::outcome::Outcome;
use crate::stage::{Async, Body, Failability, MayFail, NeverFails, OpKind, Open, When};

impl<T, W> Stage<T, MayFail, W, Open>
    where T: Send + 'static,
          W: When
{
    pub fn recover<H>(self, handler: H) -> Stage<T, NeverFails, W, Open>
        where H: FnOnce(StageError) -> T + Send + 'static
    {
        self.chain_sync(OpKind::Recover, Body::instant(Failability::NeverFails), move |outcome| match outcome {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(error) => Outcome::Success(handler(error)),
            })
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_recover<E, H>(self, handler: H) -> Stage<T, MayFail, W, Open>
        where E: Error + Send + Sync + 'static,
              H: FnOnce(StageError) -> Result<T, E> + Send + 'static
    {
        self.chain_sync(OpKind::Recover, Body::instant(Failability::MayFail), move |outcome| match outcome {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(error) => Outcome::from_result(handler(error)),
            })
    }

    pub fn recover_async<H, Fut>(self, handler: H) -> Stage<T, NeverFails, Async, Open>
        where H: FnOnce(StageError) -> Fut + Send + 'static,
              Fut: Future<Output = T> + Send + 'static
    {
        self.chain_async(OpKind::Recover,
                         Body::asynchronous(Failability::NeverFails),
                         move |outcome| async move {
                             match outcome {
                                 Outcome::Success(value) => Outcome::Success(value),
                                 Outcome::Failure(error) => Outcome::Success(handler(error).await),
                             }
                         })
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_recover_async<E, H, Fut>(self, handler: H) -> Stage<T, MayFail, Async, Open>
        where E: Error + Send + Sync + 'static,
              H: FnOnce(StageError) -> Fut + Send + 'static,
              Fut: Future<Output = Result<T, E>> + Send + 'static
    {
        self.chain_async(OpKind::Recover,
                         Body::asynchronous(Failability::MayFail),
                         move |outcome| async move {
                             match outcome {
                                 Outcome::Success(value) => Outcome::Success(value),
                                 Outcome::Failure(error) => Outcome::from_result(handler(error).await),
                             }
                         })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::errors::StageError;
    use crate::ops::{try_attempt, try_attempt_async};
    use crate::stage::Failability;

    #[derive(Debug, thiserror::Error)]
    #[error("division by zero")]
    struct DivideByZero;

    #[derive(Debug, thiserror::Error)]
    #[error("replacement")]
    struct Replacement;

    fn divide(a: i32, b: i32) -> Result<i32, DivideByZero> {
        if b == 0 {
            Err(DivideByZero)
        } else {
            Ok(a / b)
        }
    }

    #[test]
    fn recover_replaces_failure_with_value() {
        let stage = try_attempt(|| divide(1, 0)).recover(|e| {
                                                    assert!(e.is::<DivideByZero>());
                                                    42
                                                });
        assert_eq!(stage.classification().failability, Failability::NeverFails);
        assert_eq!(stage.value(), 42);
    }

    #[test]
    fn recover_leaves_success_untouched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&calls);
        let v = try_attempt(|| divide(9, 3)).recover(move |_| {
                                                c.fetch_add(1, Ordering::SeqCst);
                                                0
                                            })
                                            .value();
        assert_eq!(v, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failing_recovery_replaces_the_original_error() {
        let err = try_attempt(|| divide(1, 0)).try_recover(|_| Err::<i32, _>(Replacement))
                                              .throws()
                                              .unwrap_err();
        assert!(err.is::<Replacement>());
        assert!(!err.is::<DivideByZero>());
    }

    #[test]
    fn try_recover_can_rethrow_the_original() {
        let original = StageError::new(DivideByZero);
        let raised = original.clone();
        let err = try_attempt(move || Err::<i32, _>(raised)).try_recover(Err::<i32, StageError>)
                                                            .throws()
                                                            .unwrap_err();
        assert!(err.ptr_eq(&original));
        assert!(err.is::<DivideByZero>());
    }

    #[tokio::test]
    async fn async_recovery() {
        let v = try_attempt_async(|| async { divide(5, 0) }).recover_async(|_| async { -1 })
                                                            .await_value()
                                                            .await;
        assert_eq!(v, -1);

        let out = try_attempt(|| divide(5, 0)).try_recover_async(|_| async { Err::<i32, _>(Replacement) })
                                              .await_throws()
                                              .await;
        assert!(out.unwrap_err().is::<Replacement>());
    }
}
