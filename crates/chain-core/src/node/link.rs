//! Protocolo de enlace (resolve / attach).
//!
//! `resolve` y `attach` hacen, cada uno bajo el mismo lock, "escribir mi
//! campo y leer el otro". Así exactamente uno de los dos ve el otro campo ya
//! escrito y queda a cargo de entregar el outcome. La entrega se hace siempre
//! después de soltar el lock: el sucesor puede ser arbitrariamente largo o
//! necesitar el lock de otro nodo.

use std::future::Future;
use std::mem;
use std::sync::Arc;

use log::{debug, error};

use super::{Continuation, LinkState, Node};
use crate::errors::ChainFault;
use crate::outcome::Outcome;
use crate::trace::ChainEventKind;

/// Falla fatal de protocolo.
pub(crate) fn fault(fault: ChainFault) -> ! {
    error!("chain protocol violation: {fault}");
    panic!("{fault}");
}

impl<T: Send + 'static> Node<T> {
    /// Escribe el outcome. Si ya hay sucesor, se lo entrega.
    ///
    /// Un segundo resolve es rechazado y el primer outcome queda intacto.
    pub fn try_resolve(&self, outcome: Outcome<T>) -> Result<(), ChainFault> {
        let success = outcome.is_success();
        let ready = {
            let mut state = self.lock();
            match mem::replace(&mut *state, LinkState::Forwarded) {
                LinkState::Empty => {
                    *state = LinkState::Resolved(outcome);
                    None
                }
                LinkState::Waiting(next) => Some((next, outcome)),
                previous => {
                    *state = previous;
                    return Err(ChainFault::AlreadyResolved { node: self.id });
                }
            }
        };

        debug!("node:resolve id={} success={success} forward={}", self.id, ready.is_some());
        self.context.record(self.id, ChainEventKind::Resolved { success });
        if let Some((next, outcome)) = ready {
            self.forward(next, outcome);
        }
        Ok(())
    }

    /// Registra el sucesor. Si el outcome ya está, se lo entrega en el acto.
    ///
    /// Un segundo attach es rechazado y el primer sucesor queda intacto.
    pub fn try_attach<K>(&self, next: K) -> Result<(), ChainFault>
        where K: FnOnce(Outcome<T>) + Send + 'static
    {
        let next: Continuation<T> = Box::new(next);
        let ready = {
            let mut state = self.lock();
            match mem::replace(&mut *state, LinkState::Forwarded) {
                LinkState::Empty => {
                    *state = LinkState::Waiting(next);
                    None
                }
                LinkState::Resolved(outcome) => Some((next, outcome)),
                previous => {
                    *state = previous;
                    return Err(ChainFault::AlreadyChained { node: self.id });
                }
            }
        };

        debug!("node:attach id={} forward={}", self.id, ready.is_some());
        self.context.record(self.id, ChainEventKind::SuccessorAttached);
        if let Some((next, outcome)) = ready {
            self.forward(next, outcome);
        }
        Ok(())
    }

    /// Como `try_resolve`, pero una violación de protocolo es fatal.
    pub fn resolve(&self, outcome: Outcome<T>) {
        if let Err(e) = self.try_resolve(outcome) {
            fault(e);
        }
    }

    /// Como `try_attach`, pero una violación de protocolo es fatal.
    pub fn attach<K>(&self, next: K)
        where K: FnOnce(Outcome<T>) + Send + 'static
    {
        if let Err(e) = self.try_attach(next) {
            fault(e);
        }
    }

    fn forward(&self, next: Continuation<T>, outcome: Outcome<T>) {
        self.context.record(self.id, ChainEventKind::Forwarded);
        next(outcome);
    }

    /// Saca el outcome de un nodo ya resuelto (extracción síncrona).
    pub(crate) fn take_resolved(&self) -> Result<Outcome<T>, ChainFault> {
        let taken = {
            let mut state = self.lock();
            match mem::replace(&mut *state, LinkState::Forwarded) {
                LinkState::Resolved(outcome) => Ok(outcome),
                LinkState::Empty => {
                    *state = LinkState::Empty;
                    Err(ChainFault::Unresolved { node: self.id })
                }
                previous => {
                    *state = previous;
                    Err(ChainFault::AlreadyChained { node: self.id })
                }
            }
        };
        if taken.is_ok() {
            self.context.record(self.id, ChainEventKind::Extracted);
        }
        taken
    }

    /// Enlaza `next` como sucesor; `transform` corre en el hilo que entregue
    /// el outcome (inline si `self` ya estaba resuelto).
    pub(crate) fn link_sync<U, F>(&self, next: Arc<Node<U>>, transform: F)
        where U: Send + 'static,
              F: FnOnce(Outcome<T>) -> Outcome<U> + Send + 'static
    {
        self.attach(move |outcome| next.resolve(transform(outcome)));
    }

    /// Enlaza `next` como sucesor; `transform` se despacha siempre por el
    /// executor, aunque `self` ya estuviera resuelto.
    pub(crate) fn link_async<U, F, Fut>(&self, next: Arc<Node<U>>, transform: F)
        where U: Send + 'static,
              F: FnOnce(Outcome<T>) -> Fut + Send + 'static,
              Fut: Future<Output = Outcome<U>> + Send + 'static
    {
        self.attach(move |outcome| {
                let context = Arc::clone(next.context());
                context.schedule(Box::pin(async move {
                                     let produced = transform(outcome).await;
                                     next.resolve(produced);
                                 }));
            });
    }

    /// Agenda `body` en el executor y resuelve `self` con su resultado.
    pub(crate) fn spawn<Fut>(self: &Arc<Self>, body: Fut)
        where Fut: Future<Output = Outcome<T>> + Send + 'static
    {
        let node = Arc::clone(self);
        self.context.schedule(Box::pin(async move {
                                  let produced = body.await;
                                  node.resolve(produced);
                              }));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::context::ChainContext;
    use crate::errors::StageError;
    use crate::executor::TokioExecutor;
    use crate::stage::{Body, Classification, Failability};
    use crate::trace::InMemoryTrace;

    fn traced() -> (Arc<ChainContext>, Arc<InMemoryTrace>) {
        let trace = Arc::new(InMemoryTrace::new());
        let ctx = ChainContext::with_observer(Arc::new(TokioExecutor::ambient()), trace.clone());
        (Arc::new(ctx), trace)
    }

    fn root(ctx: &Arc<ChainContext>) -> Arc<Node<i32>> {
        Node::root(Arc::clone(ctx), Classification::root(Body::asynchronous(Failability::MayFail)))
    }

    fn recorder() -> (Arc<Mutex<Vec<i32>>>, impl FnOnce(Outcome<i32>) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |o: Outcome<i32>| sink.lock().unwrap().push(o.ok().unwrap_or(-1)))
    }

    #[test]
    fn resolve_then_attach_forwards_once() {
        let (ctx, trace) = traced();
        let node = root(&ctx);
        let (seen, k) = recorder();

        node.resolve(Outcome::Success(5));
        assert!(node.is_resolved());
        assert!(!node.is_chained());
        node.attach(k);

        assert_eq!(*seen.lock().unwrap(), vec![5]);
        assert_eq!(trace.variants_for(node.id()), "NRAF");
    }

    #[test]
    fn attach_then_resolve_forwards_once() {
        let (ctx, trace) = traced();
        let node = root(&ctx);
        let (seen, k) = recorder();

        node.attach(k);
        assert!(seen.lock().unwrap().is_empty());
        node.resolve(Outcome::Success(9));

        assert_eq!(*seen.lock().unwrap(), vec![9]);
        assert_eq!(trace.variants_for(node.id()), "NARF");
    }

    #[test]
    fn second_resolve_is_rejected_and_first_value_kept() {
        let (ctx, _) = traced();
        let node = root(&ctx);
        node.resolve(Outcome::Success(1));

        let err = node.try_resolve(Outcome::Success(2)).unwrap_err();
        assert_eq!(err, ChainFault::AlreadyResolved { node: node.id() });

        let (seen, k) = recorder();
        node.attach(k);
        assert_eq!(*seen.lock().unwrap(), vec![1]);

        // después de entregar, resolve sigue rechazado
        assert!(node.try_resolve(Outcome::Failure(StageError::msg("late"))).is_err());
    }

    #[test]
    fn second_attach_is_rejected_and_first_successor_kept() {
        let (ctx, _) = traced();
        let node = root(&ctx);
        let calls = Arc::new(AtomicUsize::new(0));
        let c1 = Arc::clone(&calls);
        node.attach(move |_| {
                c1.fetch_add(1, Ordering::SeqCst);
            });

        let err = node.try_attach(|_| panic!("second successor must never run")).unwrap_err();
        assert_eq!(err, ChainFault::AlreadyChained { node: node.id() });

        node.resolve(Outcome::Success(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(node.try_attach(|_| {}).is_err());
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn double_resolve_is_fatal() {
        let (ctx, _) = traced();
        let node = root(&ctx);
        node.resolve(Outcome::Success(1));
        node.resolve(Outcome::Success(1));
    }

    #[test]
    #[should_panic(expected = "already has a successor")]
    fn double_attach_is_fatal() {
        let (ctx, _) = traced();
        let node = root(&ctx);
        node.attach(|_| {});
        node.attach(|_| {});
    }

    #[test]
    fn take_resolved_requires_outcome() {
        let (ctx, trace) = traced();
        let node = root(&ctx);
        assert_eq!(node.take_resolved().unwrap_err(), ChainFault::Unresolved { node: node.id() });

        node.resolve(Outcome::Success(4));
        assert_eq!(node.take_resolved().unwrap().ok(), Some(4));
        assert!(node.take_resolved().is_err());
        assert_eq!(trace.variants_for(node.id()), "NRE");
    }

    #[test]
    fn forwarding_recurses_down_the_chain() {
        let (ctx, _) = traced();
        let a = root(&ctx);
        let class = a.classification();
        let b: Arc<Node<i32>> = a.successor(class, crate::stage::OpKind::Then);
        let c: Arc<Node<String>> = b.successor(class, crate::stage::OpKind::Then);
        assert_eq!(c.id().depth, 2);

        a.link_sync(Arc::clone(&b), |o| o.map(|v| v + 1));
        b.link_sync(Arc::clone(&c), |o| o.map(|v| format!("v={v}")));
        assert!(!c.is_resolved());

        a.resolve(Outcome::Success(1));
        assert_eq!(c.take_resolved().unwrap().ok().as_deref(), Some("v=2"));
    }
}
