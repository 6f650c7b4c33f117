//! Tipos de evento emitidos por los nodos.
//!
//! Los eventos describen el protocolo de encadenado (creación, resolve,
//! attach, forward, extracción). Son observación pura: nunca influyen en el
//! comportamiento de la cadena.
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::node::NodeId;
use crate::stage::{Classification, OpKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChainEventKind {
    /// Nodo construido por `op` con su clasificación fija.
    NodeCreated { classification: Classification, op: OpKind },
    /// Se escribió el outcome del nodo.
    Resolved { success: bool },
    /// Se registró el sucesor del nodo.
    SuccessorAttached,
    /// El outcome se entregó al sucesor (exactamente una vez por nodo).
    Forwarded,
    /// El outcome se leyó directamente (`throws`, `optional`, ...).
    Extracted,
}

impl ChainEventKind {
    /// Letra compacta para secuencias de test.
    pub fn code(&self) -> &'static str {
        match self {
            ChainEventKind::NodeCreated { .. } => "N",
            ChainEventKind::Resolved { success: true } => "R",
            ChainEventKind::Resolved { success: false } => "X",
            ChainEventKind::SuccessorAttached => "A",
            ChainEventKind::Forwarded => "F",
            ChainEventKind::Extracted => "E",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainEvent {
    pub seq: u64, // asignado por el store (orden de registro)
    pub node: NodeId,
    pub kind: ChainEventKind,
    pub ts: DateTime<Utc>,
}
