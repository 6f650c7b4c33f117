//! Eventos del protocolo de encadenado y observadores.

mod store;
mod types;

pub use store::{ChainObserver, InMemoryTrace, LogObserver};
pub use types::{ChainEvent, ChainEventKind};
