//! Carga de configuración desde variables de entorno.
//! Usa convención `CHAINFLOW_*` (ver `constants`) y un `.env` opcional.

use std::env;
use std::thread;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{DEFAULT_THREAD_NAME, ENV_THREAD_NAME, ENV_TRACE, ENV_WORKER_THREADS, FALLBACK_WORKER_THREADS};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

static GLOBAL: Lazy<ChainConfig> = Lazy::new(ChainConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Hilos del runtime de respaldo (sólo se crea si no hay runtime tokio activo).
    pub worker_threads: usize,
    pub thread_name: String,
    /// Adjuntar `LogObserver` en `ChainBuilder::from_config`.
    pub trace: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        let worker_threads = thread::available_parallelism().map(|n| n.get())
                                                            .unwrap_or(FALLBACK_WORKER_THREADS);
        Self { worker_threads,
               thread_name: DEFAULT_THREAD_NAME.to_string(),
               trace: false }
    }
}

impl ChainConfig {
    /// Lee la configuración del entorno. Valores ausentes o inválidos caen
    /// a los defaults.
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let worker_threads = lookup(ENV_WORKER_THREADS).and_then(|v| v.trim().parse::<usize>().ok())
                                                       .filter(|n| *n > 0)
                                                       .unwrap_or(defaults.worker_threads);
        let thread_name = lookup(ENV_THREAD_NAME).map(|v| v.trim().to_string())
                                                 .filter(|v| !v.is_empty())
                                                 .unwrap_or(defaults.thread_name);
        let trace = lookup(ENV_TRACE).map(|v| parse_flag(&v)).unwrap_or(defaults.trace);
        Self { worker_threads,
               thread_name,
               trace }
    }

    /// Configuración global perezosa, evaluada una sola vez.
    pub fn global() -> &'static ChainConfig {
        &GLOBAL
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
