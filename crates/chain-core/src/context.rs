//! Contexto compartido por los nodos de una cadena.

use std::fmt;
use std::sync::Arc;

use crate::executor::{Executor, Job};
use crate::node::NodeId;
use crate::trace::{ChainEventKind, ChainObserver};

/// Executor y observador heredados por cada nodo de la cadena.
///
/// No contiene estado mutable de la cadena: el único estado compartido es el
/// par outcome/sucesor de cada nodo, protegido por el lock del propio nodo.
pub struct ChainContext {
    executor: Arc<dyn Executor>,
    observer: Option<Arc<dyn ChainObserver>>,
}

impl ChainContext {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor,
               observer: None }
    }

    pub fn with_observer(executor: Arc<dyn Executor>, observer: Arc<dyn ChainObserver>) -> Self {
        Self { executor,
               observer: Some(observer) }
    }

    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    pub(crate) fn schedule(&self, job: Job) {
        self.executor.schedule(job);
    }

    pub(crate) fn record(&self, node: NodeId, kind: ChainEventKind) {
        if let Some(observer) = &self.observer {
            observer.record(node, kind);
        }
    }
}

impl fmt::Debug for ChainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainContext")
         .field("executor", &self.executor.name())
         .field("observed", &self.observer.is_some())
         .finish()
    }
}
