//! Librería de operaciones.
//!
//! Cada operación consume un `Stage`, crea el nodo sucesor con la
//! clasificación que dicta la tabla de transiciones y lo enlaza al
//! predecesor. Los handlers síncronos corren en el hilo que entrega el
//! outcome; los asíncronos se despachan siempre por el executor.
//!
//! Entrada requerida -> salida:
//! - `then`: `Open` -> falla si la entrada o el handler pueden fallar.
//! - `recover`: `MayFail` + `Open` -> falla sólo si el handler puede fallar.
//! - `catch`: `MayFail` no finalizado -> `FullyHandled` o `PartiallyHandled`.
//! - `ensure`: no finalizado -> sin cambios.
//! - `finally`: `NeverFails` + `Open` o `MayFail` + `FullyHandled` -> `Finalized`.

mod attempt;
mod catch;
mod ensure;
mod finally;
mod recover;
mod then;

pub use attempt::{attempt, attempt_async, try_attempt, try_attempt_async};
