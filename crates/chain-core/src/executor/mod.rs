//! Adaptador de ejecución.
//!
//! El core sólo necesita "ejecuta este trabajo y avísame del resultado". El
//! trabajo (`Job`) ya incluye la escritura del outcome en su nodo, así que la
//! notificación de completitud ocurre dentro del propio job.

mod runtime;
mod timer;

use std::future::Future;
use std::pin::Pin;

pub use runtime::{build_runtime, TokioExecutor};
pub use timer::after;

/// Trabajo asíncrono listo para ejecutarse. Resuelve su nodo al terminar.
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Capacidad de ejecutar trabajos asíncronos.
///
/// Contrato:
/// - Cada job entregado se ejecuta a lo sumo una vez.
/// - `schedule` no debe ejecutar el job inline ni bloquear esperando su fin.
///
/// `schedule` no devuelve handle: el job resuelve su propio nodo al
/// terminar, así que la completitud se observa sólo a través del nodo
/// (sucesor o extracción `await_*`).
pub trait Executor: Send + Sync + 'static {
    fn schedule(&self, job: Job);

    /// Nombre para logs.
    fn name(&self) -> &str {
        "executor"
    }
}
