//! Handle tipado `Stage` y helpers de encadenado.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::node::link::fault;
use crate::node::{Node, NodeId};
use crate::outcome::Outcome;
use crate::stage::{classification_of, Async, Body, Classification, FailMode, Instant, MayFail, NeverFails, OpKind,
                   Open, Progress, When};

/// Handle tipado sobre un nodo de la cadena.
///
/// Los parámetros fantasma codifican la clasificación del nodo:
/// - `F`: `NeverFails` | `MayFail`
/// - `W`: `Instant` | `Async`
/// - `P`: `Open` | `PartiallyHandled` | `FullyHandled` | `Finalized`
///
/// Cada operación consume el handle y devuelve el del nodo nuevo, así que un
/// nodo tiene a lo sumo un sucesor.
pub struct Stage<T, F, W, P> {
    node: Arc<Node<T>>,
    _flags: PhantomData<fn() -> (F, W, P)>,
}

/// Valor disponible al instante que nunca falla.
pub type Value<T> = Stage<T, NeverFails, Instant, Open>;
/// Resultado disponible al instante que puede fallar.
pub type Fallible<T> = Stage<T, MayFail, Instant, Open>;
/// Valor asíncrono que nunca falla.
pub type Guarantee<T> = Stage<T, NeverFails, Async, Open>;
/// Resultado asíncrono que puede fallar.
pub type Promise<T> = Stage<T, MayFail, Async, Open>;

impl<T, F, W, P> Stage<T, F, W, P>
    where T: Send + 'static,
          F: FailMode,
          W: When,
          P: Progress
{
    pub(crate) fn from_node(node: Arc<Node<T>>) -> Self {
        debug_assert_eq!(node.classification(),
                         classification_of::<F, W, P>(),
                         "stage type does not match node classification");
        Self { node,
               _flags: PhantomData }
    }

    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    pub fn classification(&self) -> Classification {
        self.node.classification()
    }

    /// `true` si el outcome de esta etapa ya está disponible.
    pub fn is_resolved(&self) -> bool {
        self.node.is_resolved()
    }

    pub(crate) fn node(&self) -> &Arc<Node<T>> {
        &self.node
    }

    /// Crea el sucesor para `op`. La clasificación sale de la tabla de
    /// transiciones; una operación ilegal es una falla fatal.
    fn successor<U, F2, W2, P2>(&self, op: OpKind, body: Body) -> Arc<Node<U>>
        where U: Send + 'static,
              F2: FailMode,
              W2: When,
              P2: Progress
    {
        let classification = match self.node.classification().transition(op, body) {
            Ok(c) => c,
            Err(e) => fault(e),
        };
        debug_assert_eq!(classification, classification_of::<F2, W2, P2>());
        self.node.successor(classification, op)
    }

    /// Encadena una transformación síncrona del outcome.
    pub(crate) fn chain_sync<U, F2, W2, P2, X>(self, op: OpKind, body: Body, transform: X) -> Stage<U, F2, W2, P2>
        where U: Send + 'static,
              F2: FailMode,
              W2: When,
              P2: Progress,
              X: FnOnce(Outcome<T>) -> Outcome<U> + Send + 'static
    {
        let next = self.successor::<U, F2, W2, P2>(op, body);
        self.node.link_sync(Arc::clone(&next), transform);
        Stage::from_node(next)
    }

    /// Encadena una transformación asíncrona del outcome (vía executor).
    pub(crate) fn chain_async<U, F2, P2, X, Fut>(self, op: OpKind, body: Body, transform: X) -> Stage<U, F2, Async, P2>
        where U: Send + 'static,
              F2: FailMode,
              P2: Progress,
              X: FnOnce(Outcome<T>) -> Fut + Send + 'static,
              Fut: Future<Output = Outcome<U>> + Send + 'static
    {
        let next = self.successor::<U, F2, Async, P2>(op, body);
        self.node.link_async(Arc::clone(&next), transform);
        Stage::from_node(next)
    }
}

impl<T, F, W, P> fmt::Debug for Stage<T, F, W, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
         .field("node", &self.node)
         .finish()
    }
}
