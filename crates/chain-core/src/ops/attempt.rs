//! Raíces sobre el builder global.
//!
//! Atajos para `ChainBuilder::global().attempt(..)` y compañía; usan el
//! executor tokio ambiente y la configuración de entorno.

use std::error::Error;
use std::future::Future;

use crate::chain::{ChainBuilder, Fallible, Guarantee, Promise, Value};

pub fn attempt<T, B>(body: B) -> Value<T>
    where T: Send + 'static,
          B: FnOnce() -> T
{
    ChainBuilder::global().attempt(body)
}

#[must_use = "the chain may hold an unobserved error"]
pub fn try_attempt<T, E, B>(body: B) -> Fallible<T>
    where T: Send + 'static,
          E: Error + Send + Sync + 'static,
          B: FnOnce() -> Result<T, E>
{
    ChainBuilder::global().try_attempt(body)
}

pub fn attempt_async<T, B, Fut>(body: B) -> Guarantee<T>
    where T: Send + 'static,
          B: FnOnce() -> Fut + Send + 'static,
          Fut: Future<Output = T> + Send + 'static
{
    ChainBuilder::global().attempt_async(body)
}

#[must_use = "the chain may hold an unobserved error"]
pub fn try_attempt_async<T, E, B, Fut>(body: B) -> Promise<T>
    where T: Send + 'static,
          E: Error + Send + Sync + 'static,
          B: FnOnce() -> Fut + Send + 'static,
          Fut: Future<Output = Result<T, E>> + Send + 'static
{
    ChainBuilder::global().try_attempt_async(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Classification, CatchProgress, Failability, Timing};

    #[derive(Debug, thiserror::Error)]
    #[error("nope")]
    struct Nope;

    #[test]
    fn roots_get_their_classification_from_the_body() {
        let v = attempt(|| 1);
        assert_eq!(v.classification(),
                   Classification::new(Failability::NeverFails, Timing::Instant, CatchProgress::Open));
        let f = try_attempt(|| Err::<i32, _>(Nope));
        assert_eq!(f.classification(),
                   Classification::new(Failability::MayFail, Timing::Instant, CatchProgress::Open));
        assert!(f.is_resolved());
        assert!(f.throws().is_err());
    }

    #[tokio::test]
    async fn async_roots_resolve_on_the_executor() {
        let g = attempt_async(|| async { 5 });
        assert_eq!(g.classification().timing, Timing::Asynchronous);
        assert_eq!(g.await_value().await, 5);

        let p = try_attempt_async(|| async { Ok::<_, Nope>("ok") });
        assert_eq!(p.await_optional().await, Some("ok"));
    }
}
