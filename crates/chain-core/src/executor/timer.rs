//! Colaborador de tiempo.

use std::time::Duration;

/// Suspende la tarea actual durante `duration`.
///
/// Colaborador de tiempo para bodies de ejemplo y tests; el core no lo usa.
pub async fn after(duration: Duration) {
    tokio::time::sleep(duration).await;
}
