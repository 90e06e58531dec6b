//! Blocking-work offload.
//!
//! `execute` is the runtime's only parallelism surface: it runs a
//! blocking closure on a throwaway OS thread and resumes the calling
//! task via its waker once the closure finishes. This is deliberately
//! narrower than a worker-pool executor — there is no reuse of the
//! spawned thread and no queueing of multiple offloaded jobs against
//! it.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};
use std::thread;

/// Runs `f` on a detached OS thread and resolves to its result once it
/// completes.
///
/// # Panics
///
/// Propagates a panic from `f` into the awaiting task when it is
/// polled, mirroring `std::thread::JoinHandle::join`'s own panic
/// propagation on `unwrap`.
pub async fn execute<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Execute::new(f).await
}

struct Shared<T> {
    result: Option<thread::Result<T>>,
    waker: Option<Waker>,
}

/// Future returned by [`execute`].
struct Execute<T> {
    shared: Arc<Mutex<Shared<T>>>,
    started: bool,
}

impl<T: Send + 'static> Execute<T> {
    fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let execute = Self {
            shared: Arc::new(Mutex::new(Shared {
                result: None,
                waker: None,
            })),
            started: false,
        };

        let shared = execute.shared.clone();

        thread::spawn(move || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

            let waker = {
                let mut guard = shared.lock().unwrap();
                guard.result = Some(result);
                guard.waker.take()
            };

            if let Some(waker) = waker {
                waker.wake();
            }
        });

        execute
    }
}

impl<T: Send + 'static> Future for Execute<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        this.started = true;

        let mut guard = this.shared.lock().unwrap();

        if let Some(result) = guard.result.take() {
            drop(guard);
            return Poll::Ready(result.unwrap_or_else(|payload| std::panic::resume_unwind(payload)));
        }

        guard.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
