//! chain-core: cadenas tipadas de etapas síncronas/asíncronas.
//!
//! Una cadena empieza con `attempt` (o sus variantes) y crece con `then`,
//! `recover`, `catch`, `ensure` y `finally`. Cada etapa es un nodo con un
//! outcome que se escribe una vez y a lo sumo un sucesor; el protocolo de
//! enlace garantiza que el sucesor recibe el outcome exactamente una vez,
//! sin importar si el valor llega antes o después de encadenar.
//!
//! ```
//! use chain_core::{try_attempt, StageError};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("division by zero")]
//! struct DivideByZero;
//!
//! let answer = try_attempt(|| if true { Err(DivideByZero) } else { Ok(1) })
//!     .recover(|_: StageError| 42)
//!     .value();
//! assert_eq!(answer, 42);
//! ```
//!
//! La clasificación de cada etapa vive en su tipo, así que una operación
//! ilegal no compila. `then` después de `catch`:
//!
//! ```compile_fail
//! use chain_core::try_attempt;
//! # #[derive(Debug, thiserror::Error)] #[error("e")] struct E;
//! let _ = try_attempt(|| Err::<i32, _>(E)).catch(|_| {}).then(|v| v + 1);
//! ```
//!
//! `recover` después de `catch`:
//!
//! ```compile_fail
//! use chain_core::try_attempt;
//! # #[derive(Debug, thiserror::Error)] #[error("e")] struct E;
//! let _ = try_attempt(|| Err::<i32, _>(E)).catch(|_| {}).recover(|_| 0);
//! ```
//!
//! `then` después de `finally`:
//!
//! ```compile_fail
//! use chain_core::attempt;
//! let _ = attempt(|| 1).finally(|| {}).then(|v| v + 1);
//! ```
//!
//! `recover` sobre una etapa que no puede fallar:
//!
//! ```compile_fail
//! use chain_core::attempt;
//! let _ = attempt(|| 1).recover(|_| 2);
//! ```
//!
//! `finally` sobre una etapa que puede fallar sin `catch` previo:
//!
//! ```compile_fail
//! use chain_core::try_attempt;
//! # #[derive(Debug, thiserror::Error)] #[error("e")] struct E;
//! let _ = try_attempt(|| Err::<i32, _>(E)).finally(|| {});
//! ```
//!
//! Nada después de `finally`:
//!
//! ```compile_fail
//! use chain_core::attempt;
//! let _ = attempt(|| 1).finally(|| {}).ensure(|| {});
//! ```
pub mod chain;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod executor;
pub mod node;
pub mod ops;
pub mod outcome;
pub mod stage;
pub mod trace;

pub use chain::{ChainBuilder, Fallible, Guarantee, Promise, Stage, Value};
pub use config::ChainConfig;
pub use context::ChainContext;
pub use errors::{ChainFault, StageAbandoned, StageError};
pub use executor::{after, Executor, Job, TokioExecutor};
pub use node::{Node, NodeId};
pub use ops::{attempt, attempt_async, try_attempt, try_attempt_async};
pub use outcome::Outcome;
pub use stage::{Async, Classification, FailMode, Finalized, FullyHandled, Instant, MayFail, NeverFails, Open,
                PartiallyHandled, Progress, When};
pub use trace::{ChainEvent, ChainEventKind, ChainObserver, InMemoryTrace, LogObserver};
