use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use log::info;

use super::{ChainEvent, ChainEventKind};
use crate::node::NodeId;

/// Receptor de eventos de la cadena.
///
/// Se invoca fuera de las secciones críticas de los nodos, desde cualquier
/// hilo. Implementaciones deben ser baratas y no bloquear.
pub trait ChainObserver: Send + Sync {
    fn record(&self, node: NodeId, kind: ChainEventKind);
}

/// Store append-only en memoria. Útil en tests y en la demo.
#[derive(Default)]
pub struct InMemoryTrace {
    inner: Mutex<Vec<ChainEvent>>,
}

impl InMemoryTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copia de todos los eventos en orden de registro.
    pub fn events(&self) -> Vec<ChainEvent> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn events_for(&self, node: NodeId) -> Vec<ChainEvent> {
        self.events().into_iter().filter(|e| e.node == node).collect()
    }

    /// Cantidad de eventos de `node` que cumplen `pred`.
    pub fn count(&self, node: NodeId, pred: impl Fn(&ChainEventKind) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.node == node && pred(&e.kind))
            .count()
    }

    /// Secuencia compacta de eventos de un nodo (ver `ChainEventKind::code`).
    pub fn variants_for(&self, node: NodeId) -> String {
        self.events_for(node).iter().map(|e| e.kind.code()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChainObserver for InMemoryTrace {
    fn record(&self, node: NodeId, kind: ChainEventKind) {
        let mut events = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = events.len() as u64;
        events.push(ChainEvent { seq,
                                 node,
                                 kind,
                                 ts: Utc::now() });
    }
}

/// Escribe cada evento como JSON a través de `log`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ChainObserver for LogObserver {
    fn record(&self, node: NodeId, kind: ChainEventKind) {
        match serde_json::to_string(&kind) {
            Ok(json) => info!("chain node={node} event={json}"),
            Err(e) => info!("chain node={node} event={kind:?} (json error: {e})"),
        }
    }
}
