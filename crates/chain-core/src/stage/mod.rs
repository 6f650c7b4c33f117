//! Clasificación de etapas.
//!
//! - `classification`: valores runtime (`Classification`, `OpKind`, `Body`) y
//!   la tabla de transiciones.
//! - `markers`: los mismos ejes como tipos, usados por `Stage<T, F, W, P>`
//!   para rechazar operaciones ilegales en compilación.

pub mod classification;
pub mod markers;

pub use classification::{Body, CatchProgress, Classification, Failability, OpKind, Timing};
pub use markers::{classification_of, Async, Chainable, FailMode, Finalizable, Finalized, FullyHandled, Instant,
                  MayFail, NeverFails, Open, PartiallyHandled, Progress, When};
