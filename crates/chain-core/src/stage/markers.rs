//! Marcadores de tipo para cada eje de la clasificación.
//!
//! `Stage<T, F, W, P>` lleva estos marcadores como parámetros fantasma; los
//! bounds de cada operación sólo se cumplen para las combinaciones legales,
//! así que una operación ilegal (p.ej. `then` después de `catch`) no compila.
//! Cada marcador expone su valor runtime (`KIND`) para poder comprobar que el
//! tipo y la `Classification` guardada en el nodo coinciden.

use super::classification::{CatchProgress, Classification, Failability, Timing};

/// El resultado nunca es un fallo.
#[derive(Debug)]
pub enum NeverFails {}

/// El resultado puede ser un fallo.
#[derive(Debug)]
pub enum MayFail {}

/// Resultado disponible en el mismo llamado que lo construye.
#[derive(Debug)]
pub enum Instant {}

/// Resultado producido por una tarea del executor.
#[derive(Debug)]
pub enum Async {}

#[derive(Debug)]
pub enum Open {}

#[derive(Debug)]
pub enum PartiallyHandled {}

#[derive(Debug)]
pub enum FullyHandled {}

#[derive(Debug)]
pub enum Finalized {}

pub trait FailMode: 'static {
    const KIND: Failability;
}

pub trait When: 'static {
    const KIND: Timing;
}

pub trait Progress: 'static {
    const KIND: CatchProgress;
}

/// Progresos que todavía admiten operaciones (`catch`, `ensure`).
pub trait Chainable: Progress {}

/// Combinaciones (failability, progress) sobre las que `finally` es legal.
pub trait Finalizable {}

impl FailMode for NeverFails {
    const KIND: Failability = Failability::NeverFails;
}
impl FailMode for MayFail {
    const KIND: Failability = Failability::MayFail;
}

impl When for Instant {
    const KIND: Timing = Timing::Instant;
}
impl When for Async {
    const KIND: Timing = Timing::Asynchronous;
}

impl Progress for Open {
    const KIND: CatchProgress = CatchProgress::Open;
}
impl Progress for PartiallyHandled {
    const KIND: CatchProgress = CatchProgress::PartiallyHandled;
}
impl Progress for FullyHandled {
    const KIND: CatchProgress = CatchProgress::FullyHandled;
}
impl Progress for Finalized {
    const KIND: CatchProgress = CatchProgress::Finalized;
}

impl Chainable for Open {}
impl Chainable for PartiallyHandled {}
impl Chainable for FullyHandled {}

impl Finalizable for (NeverFails, Open) {}
impl Finalizable for (MayFail, FullyHandled) {}

/// Clasificación runtime que corresponde a los marcadores `F`, `W`, `P`.
pub fn classification_of<F: FailMode, W: When, P: Progress>() -> Classification {
    Classification::new(F::KIND, W::KIND, P::KIND)
}
