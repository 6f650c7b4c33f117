//! `then`: transforma el valor de una etapa abierta.
//!
//! Si la entrada falló, el handler no se invoca y el fallo pasa tal cual.

use std::error::Error;
use std::future::Future;

use crate::chain::Stage;
use crate::outcome::Outcome;
use crate::stage::{Async, Body, FailMode, Failability, MayFail, OpKind, Open, When};

impl<T, F, W> Stage<T, F, W, Open>
    where T: Send + 'static,
          F: FailMode,
          W: When
{
    pub fn then<U, H>(self, handler: H) -> Stage<U, F, W, Open>
        where U: Send + 'static,
              H: FnOnce(T) -> U + Send + 'static
    {
        self.chain_sync(OpKind::Then, Body::instant(Failability::NeverFails), move |outcome| outcome.map(handler))
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_then<U, E, H>(self, handler: H) -> Stage<U, MayFail, W, Open>
        where U: Send + 'static,
              E: Error + Send + Sync + 'static,
              H: FnOnce(T) -> Result<U, E> + Send + 'static
    {
        self.chain_sync(OpKind::Then, Body::instant(Failability::MayFail), move |outcome| match outcome {
                Outcome::Success(value) => Outcome::from_result(handler(value)),
                Outcome::Failure(error) => Outcome::Failure(error),
            })
    }

    pub fn then_async<U, H, Fut>(self, handler: H) -> Stage<U, F, Async, Open>
        where U: Send + 'static,
              H: FnOnce(T) -> Fut + Send + 'static,
              Fut: Future<Output = U> + Send + 'static
    {
        self.chain_async(OpKind::Then,
                         Body::asynchronous(Failability::NeverFails),
                         move |outcome| async move {
                             match outcome {
                                 Outcome::Success(value) => Outcome::Success(handler(value).await),
                                 Outcome::Failure(error) => Outcome::Failure(error),
                             }
                         })
    }

    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_then_async<U, E, H, Fut>(self, handler: H) -> Stage<U, MayFail, Async, Open>
        where U: Send + 'static,
              E: Error + Send + Sync + 'static,
              H: FnOnce(T) -> Fut + Send + 'static,
              Fut: Future<Output = Result<U, E>> + Send + 'static
    {
        self.chain_async(OpKind::Then,
                         Body::asynchronous(Failability::MayFail),
                         move |outcome| async move {
                             match outcome {
                                 Outcome::Success(value) => Outcome::from_result(handler(value).await),
                                 Outcome::Failure(error) => Outcome::Failure(error),
                             }
                         })
    }

    /// Consume el valor sin producir otro. Equivale a un `then` que devuelve `()`.
    pub fn done<H>(self, handler: H) -> Stage<(), F, W, Open>
        where H: FnOnce(T) + Send + 'static
    {
        self.then(handler)
    }
}
