use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chain_core::stage::Timing;
use chain_core::{ChainBuilder, Executor, InMemoryTrace, Job, StageAbandoned, TokioExecutor};

/// Executor que cuenta los jobs y delega en tokio.
#[derive(Default)]
struct CountingExecutor {
    scheduled: AtomicUsize,
    inner: TokioExecutor,
}

impl Executor for CountingExecutor {
    fn schedule(&self, job: Job) {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
        self.inner.schedule(job);
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn builder() -> (ChainBuilder, Arc<CountingExecutor>) {
    let exec = Arc::new(CountingExecutor::default());
    (ChainBuilder::new(exec.clone()), exec)
}

#[test]
fn instant_chains_never_touch_the_executor() {
    let (b, exec) = builder();
    let v = b.attempt(|| 1).then(|v| v + 1).ensure(|| {}).finally(|| {}).value();
    assert_eq!(v, 2);
    assert_eq!(exec.scheduled.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn async_handler_on_resolved_instant_stage_is_dispatched() {
    let (b, exec) = builder();
    let root = b.attempt(|| 4);
    assert!(root.is_resolved());

    let stage = root.then_async(|v| async move { v * v });
    // current_thread: el job no puede haber corrido todavía
    assert!(!stage.is_resolved());
    assert_eq!(stage.classification().timing, Timing::Asynchronous);
    assert_eq!(exec.scheduled.load(Ordering::SeqCst), 1);

    assert_eq!(stage.await_value().await, 16);
}

#[tokio::test]
async fn each_async_step_schedules_one_job() {
    let (b, exec) = builder();
    let v = b.attempt_async(|| async { 1 })
             .then(|v| v + 1)
             .then_async(|v| async move { v * 10 })
             .ensure_async(|| async {})
             .await_value()
             .await;
    assert_eq!(v, 20);
    assert_eq!(exec.scheduled.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn observer_sees_every_node_of_the_chain() {
    let trace = Arc::new(InMemoryTrace::new());
    let b = ChainBuilder::with_observer(Arc::new(TokioExecutor::ambient()), trace.clone());
    let root = b.attempt_async(|| async { "x" });
    let id = root.id();
    let _ = root.then(str::len).await_value().await;

    assert_eq!(trace.variants_for(id.next()).chars().next(), Some('N'));
    assert!(trace.variants_for(id).contains('R'));
    assert_eq!(trace.count(id, |k| matches!(k, chain_core::ChainEventKind::Forwarded)), 1);
}

#[tokio::test]
async fn panicking_handler_abandons_downstream_stages() {
    let (b, _) = builder();
    let out = b.attempt(|| 0)
               .then_async(|v: i32| async move {
                   if v == 0 {
                       panic!("handler exploded");
                   }
                   v
               })
               .try_then(|v| Ok::<_, StageAbandoned>(v + 1))
               .await_throws()
               .await;
    assert!(out.unwrap_err().is::<StageAbandoned>());
}
