//! Errores del core.
//!
//! Dos familias bien separadas:
//! - `StageError`: error de dominio que viaja dentro de un `Outcome::Failure`.
//!   Es opaco para el core; sólo `recover`/`catch` lo observan.
//! - `ChainFault`: violación de protocolo (doble resolve, doble attach,
//!   operación ilegal para la clasificación actual). Es un error de
//!   programación y los puntos de entrada normales lo convierten en panic.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::node::NodeId;
use crate::stage::{Classification, OpKind};

/// Violaciones del protocolo de encadenado.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ChainFault {
    #[error("node {node} already resolved")]
    AlreadyResolved { node: NodeId },
    #[error("node {node} already has a successor")]
    AlreadyChained { node: NodeId },
    #[error("operation `{op}` is illegal for stage {classification}")]
    IllegalOperation { op: OpKind, classification: Classification },
    #[error("synchronous extraction on asynchronous node {node}")]
    NotInstant { node: NodeId },
    #[error("instant node {node} has no outcome")]
    Unresolved { node: NodeId },
    #[error("never-fails node {node} produced a failure")]
    FailedInfallible { node: NodeId },
}

/// El nodo que debía producir el outcome se descartó sin resolverse
/// (típicamente porque su tarea hizo panic).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("stage {node} was dropped before resolving")]
pub struct StageAbandoned {
    pub node: NodeId,
}

#[derive(Debug, Error)]
#[error("{0}")]
struct MessageError(String);

/// Error de dominio transportado por la cadena.
///
/// Clonable (comparte el error original) para que `catch` pueda entregarlo
/// al handler y re-lanzarlo sin perderlo.
#[derive(Clone)]
pub struct StageError {
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl StageError {
    /// Envuelve `error`. Si ya es un `StageError` se devuelve tal cual, así
    /// que re-lanzar el error recibido conserva su identidad.
    pub fn new<E>(error: E) -> Self
        where E: Error + Send + Sync + 'static
    {
        let boxed: Box<dyn Error + Send + Sync + 'static> = Box::new(error);
        match boxed.downcast::<StageError>() {
            Ok(existing) => *existing,
            Err(other) => Self { inner: Arc::from(other) },
        }
    }

    /// Error ad-hoc a partir de un mensaje.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Intenta ver el error concreto.
    pub fn downcast_ref<E>(&self) -> Option<&E>
        where E: Error + 'static
    {
        let inner: &(dyn Error + 'static) = &*self.inner;
        inner.downcast_ref::<E>()
    }

    pub fn is<E>(&self) -> bool
        where E: Error + 'static
    {
        self.downcast_ref::<E>().is_some()
    }

    /// `true` si ambos valores comparten el mismo error original.
    pub fn ptr_eq(&self, other: &StageError) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner, f)
    }
}

impl Error for StageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}
