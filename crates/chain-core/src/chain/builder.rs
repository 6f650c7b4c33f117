//! Builder de cadenas.
//!
//! `ChainBuilder` fija el contexto (executor + observador) que heredan todos
//! los nodos de las cadenas que crea, y expone las cuatro variantes de
//! `attempt` para construir la raíz.
//!
//! Ejemplo de uso:
//!
//! ```
//! use chain_core::ChainBuilder;
//!
//! let builder = ChainBuilder::global();
//! let doubled = builder.attempt(|| 21).then(|v| v * 2).value();
//! assert_eq!(doubled, 42);
//! ```

use std::error::Error;
use std::future::Future;
use std::sync::Arc;

use log::debug;
use once_cell::sync::Lazy;

use super::stage::{Fallible, Guarantee, Promise, Stage, Value};
use crate::config::ChainConfig;
use crate::context::ChainContext;
use crate::executor::{Executor, TokioExecutor};
use crate::node::Node;
use crate::outcome::Outcome;
use crate::stage::{Body, Classification, Failability};
use crate::trace::{ChainObserver, LogObserver};

static GLOBAL_BUILDER: Lazy<ChainBuilder> = Lazy::new(|| ChainBuilder::from_config(ChainConfig::global()));

/// Punto de entrada para crear cadenas sobre un contexto común.
#[derive(Debug, Clone)]
pub struct ChainBuilder {
    context: Arc<ChainContext>,
}

impl ChainBuilder {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { context: Arc::new(ChainContext::new(executor)) }
    }

    pub fn with_observer(executor: Arc<dyn Executor>, observer: Arc<dyn ChainObserver>) -> Self {
        Self { context: Arc::new(ChainContext::with_observer(executor, observer)) }
    }

    /// Executor tokio ambiente; con `trace` activo adjunta un `LogObserver`.
    pub fn from_config(config: &ChainConfig) -> Self {
        let executor: Arc<dyn Executor> = Arc::new(TokioExecutor::ambient());
        if config.trace {
            Self::with_observer(executor, Arc::new(LogObserver))
        } else {
            Self::new(executor)
        }
    }

    /// Builder global usado por las funciones libres `attempt*`.
    pub fn global() -> Self {
        GLOBAL_BUILDER.clone()
    }

    pub fn context(&self) -> &Arc<ChainContext> {
        &self.context
    }

    fn root<T: Send + 'static>(&self, body: Body) -> Arc<Node<T>> {
        let node = Node::root(Arc::clone(&self.context), Classification::root(body));
        debug!("chain:start id={} body={:?}", node.id(), body);
        node
    }

    /// Raíz síncrona que no falla.
    pub fn attempt<T, B>(&self, body: B) -> Value<T>
        where T: Send + 'static,
              B: FnOnce() -> T
    {
        let node = self.root(Body::instant(Failability::NeverFails));
        node.resolve(Outcome::Success(body()));
        Stage::from_node(node)
    }

    /// Raíz síncrona que puede fallar.
    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_attempt<T, E, B>(&self, body: B) -> Fallible<T>
        where T: Send + 'static,
              E: Error + Send + Sync + 'static,
              B: FnOnce() -> Result<T, E>
    {
        let node = self.root(Body::instant(Failability::MayFail));
        node.resolve(Outcome::from_result(body()));
        Stage::from_node(node)
    }

    /// Raíz asíncrona que no falla; `body` corre en el executor.
    pub fn attempt_async<T, B, Fut>(&self, body: B) -> Guarantee<T>
        where T: Send + 'static,
              B: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = T> + Send + 'static
    {
        let node = self.root(Body::asynchronous(Failability::NeverFails));
        node.spawn(async move { Outcome::Success(body().await) });
        Stage::from_node(node)
    }

    /// Raíz asíncrona que puede fallar.
    #[must_use = "the chain may hold an unobserved error"]
    pub fn try_attempt_async<T, E, B, Fut>(&self, body: B) -> Promise<T>
        where T: Send + 'static,
              E: Error + Send + Sync + 'static,
              B: FnOnce() -> Fut + Send + 'static,
              Fut: Future<Output = Result<T, E>> + Send + 'static
    {
        let node = self.root(Body::asynchronous(Failability::MayFail));
        node.spawn(async move { Outcome::from_result(body().await) });
        Stage::from_node(node)
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::global()
    }
}
