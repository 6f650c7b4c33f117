//! Constantes del core.
//!
//! Nombres de variables de entorno y valores por defecto usados por
//! `ChainConfig`.

/// Hilos del runtime de respaldo (si no se define, se usa el paralelismo
/// disponible).
pub const ENV_WORKER_THREADS: &str = "CHAINFLOW_WORKER_THREADS";

/// Prefijo de nombre de los hilos del runtime de respaldo.
pub const ENV_THREAD_NAME: &str = "CHAINFLOW_THREAD_NAME";

/// `1`/`true` adjunta un `LogObserver` a las cadenas creadas desde config.
pub const ENV_TRACE: &str = "CHAINFLOW_TRACE";

pub const DEFAULT_THREAD_NAME: &str = "chainflow-worker";

/// Usado si `available_parallelism` no está disponible.
pub const FALLBACK_WORKER_THREADS: usize = 4;
