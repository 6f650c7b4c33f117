//! Handles tipados de la cadena.
//!
//! - `stage`: `Stage<T, F, W, P>` y sus alias.
//! - `builder`: `ChainBuilder`, crea raíces sobre un contexto.
//! - `extract`: lectura terminal del outcome.

pub mod builder;
mod extract;
pub mod stage;

pub use builder::ChainBuilder;
pub use stage::{Fallible, Guarantee, Promise, Stage, Value};
