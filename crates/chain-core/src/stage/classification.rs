//! Clasificación runtime de un nodo y tabla de transiciones.
//!
//! La clasificación se fija al construir el nodo y no se muta. Cada operación
//! calcula la clasificación de salida con `Classification::transition`, que es
//! una función pura de (clasificación de entrada, operación, tipo de handler).
//! Si la operación no está permitida devuelve `ChainFault::IllegalOperation`.

use std::fmt;

use serde::Serialize;

use crate::errors::ChainFault;

/// ¿Puede el resultado del nodo ser un fallo?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Failability {
    NeverFails,
    MayFail,
}

/// ¿El resultado está disponible al encadenar o llega de forma asíncrona?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Timing {
    Instant,
    Asynchronous,
}

/// Progreso del manejo de errores.
///
/// Los nodos `NeverFails` sólo usan `Open` (encadenable) y `Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CatchProgress {
    /// Todavía no corrió ningún `catch`.
    Open,
    /// Corrió un `catch` cuyo handler puede fallar.
    PartiallyHandled,
    /// Corrió un `catch` cuyo handler no puede fallar.
    FullyHandled,
    /// Terminal: sólo queda extraer el outcome.
    Finalized,
}

/// Operaciones de la librería.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpKind {
    Attempt,
    Then,
    Recover,
    Catch,
    Ensure,
    Finally,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpKind::Attempt => "attempt",
            OpKind::Then => "then",
            OpKind::Recover => "recover",
            OpKind::Catch => "catch",
            OpKind::Ensure => "ensure",
            OpKind::Finally => "finally",
        };
        f.write_str(name)
    }
}

/// Forma del handler (o body) entregado a una operación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Body {
    pub failability: Failability,
    pub timing: Timing,
}

impl Body {
    pub const fn new(failability: Failability, timing: Timing) -> Self {
        Self { failability, timing }
    }

    pub const fn instant(failability: Failability) -> Self {
        Self::new(failability, Timing::Instant)
    }

    pub const fn asynchronous(failability: Failability) -> Self {
        Self::new(failability, Timing::Asynchronous)
    }
}

/// Triple (failability, timing, catch-progress) de un nodo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Classification {
    pub failability: Failability,
    pub timing: Timing,
    pub progress: CatchProgress,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}/{:?}", self.failability, self.timing, self.progress)
    }
}

impl Classification {
    pub const fn new(failability: Failability, timing: Timing, progress: CatchProgress) -> Self {
        Self { failability,
               timing,
               progress }
    }

    /// Clasificación de la raíz creada por `attempt`.
    pub const fn root(body: Body) -> Self {
        Self::new(body.failability, body.timing, CatchProgress::Open)
    }

    pub fn may_fail(&self) -> bool {
        self.failability == Failability::MayFail
    }

    pub fn is_instant(&self) -> bool {
        self.timing == Timing::Instant
    }

    pub fn is_finalized(&self) -> bool {
        self.progress == CatchProgress::Finalized
    }

    /// ¿Se puede llamar `op` sobre un nodo con esta clasificación?
    pub fn permits(&self, op: OpKind) -> bool {
        use CatchProgress::*;
        match op {
            OpKind::Attempt => false,
            OpKind::Then => self.progress == Open,
            OpKind::Recover => self.may_fail() && self.progress == Open,
            OpKind::Catch => self.may_fail() && matches!(self.progress, Open | PartiallyHandled | FullyHandled),
            OpKind::Ensure => self.progress != Finalized,
            OpKind::Finally => match self.failability {
                Failability::NeverFails => self.progress == Open,
                Failability::MayFail => self.progress == FullyHandled,
            },
        }
    }

    /// Clasificación del nodo producido por `op` con un handler `body`.
    pub fn transition(self, op: OpKind, body: Body) -> Result<Classification, ChainFault> {
        if !self.permits(op) {
            return Err(ChainFault::IllegalOperation { op,
                                                      classification: self });
        }
        // ensure/finally no observan el outcome: sus handlers no pueden fallar
        if matches!(op, OpKind::Ensure | OpKind::Finally) && body.failability == Failability::MayFail {
            return Err(ChainFault::IllegalOperation { op,
                                                      classification: self });
        }

        let timing = if self.is_instant() && body.timing == Timing::Instant {
            Timing::Instant
        } else {
            Timing::Asynchronous
        };

        let (failability, progress) = match op {
            OpKind::Attempt => unreachable!("attempt is rejected by permits"),
            OpKind::Then => {
                let failability = if self.may_fail() || body.failability == Failability::MayFail {
                    Failability::MayFail
                } else {
                    Failability::NeverFails
                };
                (failability, CatchProgress::Open)
            }
            OpKind::Recover => (body.failability, CatchProgress::Open),
            OpKind::Catch => {
                let progress = match body.failability {
                    Failability::NeverFails => CatchProgress::FullyHandled,
                    Failability::MayFail => CatchProgress::PartiallyHandled,
                };
                (Failability::MayFail, progress)
            }
            OpKind::Ensure => (self.failability, self.progress),
            OpKind::Finally => (self.failability, CatchProgress::Finalized),
        };

        Ok(Classification::new(failability, timing, progress))
    }
}
