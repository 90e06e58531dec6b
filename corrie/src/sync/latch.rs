use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicIsize, Ordering};
use std::task::{Context, Poll, Waker};

/// A countdown rendezvous primitive.
///
/// A `Latch` starts with an expected count and lets any number of tasks
/// wait until that count reaches zero. Counting down past zero is a
/// logic error on the caller's part but does not panic: `expected` is
/// simply left negative.
///
/// Waiters registered before the 0-crossing are woken exactly once, as
/// a batch, by whichever `count_down` call observes the crossing.
/// Waiters registered after the crossing see `try_wait() == true` and
/// complete immediately without suspending.
pub struct Latch {
    expected: AtomicIsize,
    waiters: Mutex<Vec<Waker>>,
}

impl Latch {
    /// Creates a new latch expecting `expected` count-downs before it
    /// releases its waiters.
    pub fn new(expected: isize) -> Self {
        Self {
            expected: AtomicIsize::new(expected),
            waiters: Mutex::new(Vec::new()),
        }
    }

    /// Subtracts `n` from the remaining count.
    ///
    /// If this call's decrement is exactly the one that carries the
    /// count from a positive value to zero or below, every registered
    /// waiter is woken, once.
    pub fn count_down(&self, n: isize) {
        let previous = self.expected.fetch_sub(n, Ordering::AcqRel);

        if previous > 0 && previous <= n {
            self.notify_all();
        }
    }

    /// Returns `true` if the latch has already reached zero.
    pub fn try_wait(&self) -> bool {
        self.expected.load(Ordering::Acquire) <= 0
    }

    /// Waits until the latch reaches zero.
    pub fn wait(&self) -> Wait<'_> {
        Wait { latch: self }
    }

    /// Decrements the count by `n` and then waits for it to reach zero.
    pub async fn arrive_and_wait(&self, n: isize) {
        self.count_down(n);
        self.wait().await
    }

    fn notify_all(&self) {
        let mut waiters = self.waiters.lock().unwrap();
        for waker in waiters.drain(..) {
            waker.wake();
        }
    }
}

/// Future returned by [`Latch::wait`].
pub struct Wait<'a> {
    latch: &'a Latch,
}

impl<'a> Future for Wait<'a> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.latch.try_wait() {
            return Poll::Ready(());
        }

        self.latch.waiters.lock().unwrap().push(cx.waker().clone());

        if self.latch.try_wait() {
            return Poll::Ready(());
        }

        Poll::Pending
    }
}
