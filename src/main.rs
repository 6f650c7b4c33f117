//! Demo de chain-core: corre los escenarios básicos y muestra la traza.

use std::sync::Arc;
use std::time::Duration;

use chain_core::config::init_dotenv;
use chain_core::executor::build_runtime;
use chain_core::{after, ChainBuilder, ChainConfig, InMemoryTrace, StageError, TokioExecutor};

#[derive(Debug, thiserror::Error)]
#[error("division by zero")]
struct DivideByZero;

#[derive(Debug, thiserror::Error)]
#[error("value {0} is too big")]
struct TooBig(i32);

fn divide(a: i32, b: i32) -> Result<i32, DivideByZero> {
    if b == 0 {
        Err(DivideByZero)
    } else {
        Ok(a / b)
    }
}

/// Escenarios instantáneos: todo se resuelve sin pasar por el executor.
fn run_instant(chains: &ChainBuilder) {
    let recovered = chains.try_attempt(|| divide(1, 0)).recover(|_: StageError| 42).value();
    println!("1/0 recuperado -> {recovered}");

    let checked = chains.attempt(|| 10)
                        .then(|x| x * 2)
                        .try_then(|x| if x > 15 { Err(TooBig(x)) } else { Ok(x) })
                        .throws();
    match checked {
        Ok(v) => println!("10*2 -> {v}"),
        Err(e) => println!("10*2 -> error: {e}"),
    }
}

/// Escenario asíncrono: se encadena después de que el body terminó.
async fn run_async(chains: &ChainBuilder) -> Result<(), StageError> {
    let stage = chains.try_attempt_async(|| async {
                          after(Duration::from_millis(20)).await;
                          divide(84, 2)
                      });
    after(Duration::from_millis(50)).await;
    println!("body async terminado antes de encadenar: {}", stage.is_resolved());

    let value = stage.then(|v| v / 2)
                     .catch(|e| println!("catch observó: {e}"))
                     .finally(|| println!("finally"))
                     .await_throws()
                     .await?;
    println!("resultado async -> {value}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env opcional antes de leer la configuración
    init_dotenv();
    let config = ChainConfig::from_env();
    let runtime: tokio::runtime::Runtime = build_runtime(&config)?;

    let trace = Arc::new(InMemoryTrace::new());
    let chains = ChainBuilder::with_observer(Arc::new(TokioExecutor::new(runtime.handle().clone())), trace.clone());

    run_instant(&chains);
    runtime.block_on(run_async(&chains))?;

    println!("eventos registrados: {}", trace.len());
    println!("{}", serde_json::to_string_pretty(&trace.events())?);
    Ok(())
}
