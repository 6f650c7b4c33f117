//! Extracción terminal del outcome.
//!
//! - Síncrona (`outcome`, `throws`, `optional`, `value`): sólo sobre etapas
//!   `Instant`, que siempre están resueltas al construirse.
//! - Asíncrona (`await_*`): sobre cualquier etapa. Registra una continuación
//!   interna por el mismo protocolo de enlace y suspende hasta recibirla.
//!
//! Todas consumen el handle: el nodo ya no admite sucesor después.

use log::error;
use tokio::sync::oneshot;

use super::stage::Stage;
use crate::errors::{ChainFault, StageAbandoned, StageError};
use crate::node::link::fault;
use crate::outcome::Outcome;
use crate::stage::{FailMode, Instant, NeverFails, Progress, When};

impl<T, F, P> Stage<T, F, Instant, P>
    where T: Send + 'static,
          F: FailMode,
          P: Progress
{
    /// Outcome de una etapa instantánea.
    pub fn outcome(self) -> Outcome<T> {
        let node = self.node();
        if !node.classification().is_instant() {
            fault(ChainFault::NotInstant { node: node.id() });
        }
        match node.take_resolved() {
            Ok(outcome) => outcome,
            Err(e) => fault(e),
        }
    }

    /// El valor, o el error almacenado.
    pub fn throws(self) -> Result<T, StageError> {
        self.outcome().into_result()
    }

    /// El valor, o `None` ante cualquier fallo.
    pub fn optional(self) -> Option<T> {
        self.outcome().ok()
    }
}

impl<T, P> Stage<T, NeverFails, Instant, P>
    where T: Send + 'static,
          P: Progress
{
    /// El valor de una etapa que no puede fallar.
    pub fn value(self) -> T {
        let id = self.id();
        match self.outcome() {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => fault(ChainFault::FailedInfallible { node: id }),
        }
    }
}

impl<T, F, W, P> Stage<T, F, W, P>
    where T: Send + 'static,
          F: FailMode,
          W: When,
          P: Progress
{
    /// Espera el outcome de la etapa.
    ///
    /// Si la tarea que debía resolver el nodo desaparece (p.ej. un handler
    /// hizo panic), devuelve un fallo con `StageAbandoned`.
    pub async fn await_outcome(self) -> Outcome<T> {
        let id = self.id();
        let (tx, rx) = oneshot::channel();
        self.node().attach(move |outcome| {
                               // el receptor puede haberse descartado
                               let _ = tx.send(outcome);
                           });
        // sin el handle, el nodo sólo vive mientras viva su productor
        drop(self);

        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("stage {id} abandoned before resolving");
                Outcome::Failure(StageError::new(StageAbandoned { node: id }))
            }
        }
    }

    pub async fn await_throws(self) -> Result<T, StageError> {
        self.await_outcome().await.into_result()
    }

    pub async fn await_optional(self) -> Option<T> {
        self.await_outcome().await.ok()
    }
}

impl<T, W, P> Stage<T, NeverFails, W, P>
    where T: Send + 'static,
          W: When,
          P: Progress
{
    /// Espera el valor de una etapa que no puede fallar.
    ///
    /// Una etapa abandonada no tiene valor que entregar: es fatal.
    pub async fn await_value(self) -> T {
        let id = self.id();
        match self.await_outcome().await {
            Outcome::Success(value) => value,
            Outcome::Failure(e) if e.is::<StageAbandoned>() => {
                error!("never-fails stage {id} abandoned: {e}");
                panic!("{e}");
            }
            Outcome::Failure(_) => fault(ChainFault::FailedInfallible { node: id }),
        }
    }
}
