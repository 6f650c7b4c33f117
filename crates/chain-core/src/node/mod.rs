//! Nodo: una etapa de la cadena.
//!
//! Un `Node<T>` es una celda compartida (identidad por referencia, vive en un
//! `Arc`) con:
//! - `classification`: fija desde la construcción.
//! - outcome: se escribe a lo sumo una vez.
//! - sucesor: se registra a lo sumo una vez, como continuación opaca.
//!
//! Ambos campos viven en un único `LinkState` protegido por el mutex del
//! nodo; el protocolo que los manipula está en `link`.

pub(crate) mod link;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use serde::Serialize;
use uuid::Uuid;

use crate::context::ChainContext;
use crate::outcome::Outcome;
use crate::stage::{Classification, OpKind};
use crate::trace::ChainEventKind;

/// Identidad de un nodo: cadena + profundidad dentro de ella.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId {
    pub chain: Uuid,
    pub depth: u32,
}

impl NodeId {
    pub fn new(chain: Uuid, depth: u32) -> Self {
        Self { chain, depth }
    }

    /// Id del sucesor en la misma cadena.
    pub fn next(self) -> Self {
        Self { chain: self.chain,
               depth: self.depth + 1 }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.chain, self.depth)
    }
}

/// Sucesor opaco: recibe el outcome del predecesor exactamente una vez.
pub(crate) type Continuation<T> = Box<dyn FnOnce(Outcome<T>) + Send + 'static>;

/// Estado combinado outcome/sucesor.
///
/// Transiciones:
/// - `Empty` -> `Resolved` (resolve) | `Waiting` (attach)
/// - `Resolved` -> `Forwarded` (attach o extracción)
/// - `Waiting` -> `Forwarded` (resolve)
///
/// `Forwarded` implica que ambos campos fueron escritos y que el outcome ya
/// salió del nodo.
pub(crate) enum LinkState<T> {
    Empty,
    Resolved(Outcome<T>),
    Waiting(Continuation<T>),
    Forwarded,
}

pub struct Node<T> {
    id: NodeId,
    classification: Classification,
    context: Arc<ChainContext>,
    state: Mutex<LinkState<T>>,
}

impl<T: Send + 'static> Node<T> {
    /// Raíz de una cadena nueva.
    pub fn root(context: Arc<ChainContext>, classification: Classification) -> Arc<Self> {
        Self::create(context, NodeId::new(Uuid::new_v4(), 0), classification, OpKind::Attempt)
    }

    /// Nodo sucesor de `self` en la misma cadena (aún sin enlazar).
    pub fn successor<U: Send + 'static>(&self, classification: Classification, op: OpKind) -> Arc<Node<U>> {
        Node::create(Arc::clone(&self.context), self.id.next(), classification, op)
    }

    fn create(context: Arc<ChainContext>, id: NodeId, classification: Classification, op: OpKind) -> Arc<Self> {
        debug!("node:create id={id} op={op} class={classification}");
        context.record(id, ChainEventKind::NodeCreated { classification, op });
        Arc::new(Self { id,
                        classification,
                        context,
                        state: Mutex::new(LinkState::Empty) })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn context(&self) -> &Arc<ChainContext> {
        &self.context
    }

    /// `true` si el outcome ya fue escrito (esté o no entregado).
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.lock(), LinkState::Resolved(_) | LinkState::Forwarded)
    }

    /// `true` si ya hay sucesor registrado.
    pub fn is_chained(&self) -> bool {
        matches!(&*self.lock(), LinkState::Waiting(_) | LinkState::Forwarded)
    }

    // Las secciones críticas nunca hacen panic ni llaman código de usuario,
    // así que un lock envenenado sólo puede venir de fuera; se recupera el
    // estado tal cual.
    fn lock(&self) -> MutexGuard<'_, LinkState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
         .field("id", &self.id)
         .field("classification", &self.classification)
         .finish_non_exhaustive()
    }
}
