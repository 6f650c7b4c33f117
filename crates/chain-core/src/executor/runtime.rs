//! Executor respaldado por tokio.

use std::io;

use log::{debug, error};
use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Handle, Runtime};

use super::{Executor, Job};
use crate::config::ChainConfig;

// Runtime de respaldo para cuando se agenda trabajo fuera de un runtime tokio.
// Se construye una sola vez con la configuración global y vive hasta el final
// del proceso.
static FALLBACK_RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    let config = ChainConfig::global();
    match build_runtime(config) {
        Ok(rt) => {
            debug!("fallback runtime started threads={} name={}", config.worker_threads, config.thread_name);
            rt
        }
        Err(e) => {
            error!("fallback runtime build failed: {e}");
            panic!("unable to build fallback tokio runtime: {e}");
        }
    }
});

/// Construye un runtime multi-hilo según `config`.
pub fn build_runtime(config: &ChainConfig) -> io::Result<Runtime> {
    Builder::new_multi_thread().worker_threads(config.worker_threads)
                               .thread_name(config.thread_name.clone())
                               .enable_all()
                               .build()
}

#[derive(Debug, Clone)]
enum Target {
    /// Siempre sobre este runtime.
    Handle(Handle),
    /// Runtime actual del hilo que agenda; si no hay, el de respaldo.
    Ambient,
}

/// `Executor` que hace `spawn` de cada job en tokio.
#[derive(Debug, Clone)]
pub struct TokioExecutor {
    target: Target,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { target: Target::Handle(handle) }
    }

    /// Executor fijado al runtime actual, si existe.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Executor que resuelve el runtime en cada `schedule`.
    pub fn ambient() -> Self {
        Self { target: Target::Ambient }
    }
}

impl Default for TokioExecutor {
    fn default() -> Self {
        Self::ambient()
    }
}

impl Executor for TokioExecutor {
    fn schedule(&self, job: Job) {
        // el JoinHandle se descarta: la completitud se observa en el nodo
        match &self.target {
            Target::Handle(handle) => {
                handle.spawn(job);
            }
            Target::Ambient => match Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(job);
                }
                Err(_) => {
                    FALLBACK_RUNTIME.spawn(job);
                }
            },
        }
    }

    fn name(&self) -> &str {
        match self.target {
            Target::Handle(_) => "tokio",
            Target::Ambient => "tokio-ambient",
        }
    }
}
