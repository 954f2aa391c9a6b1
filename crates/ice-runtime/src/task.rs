//! Fire-and-forget tasks
//!
//! A [`Task`] owns a top-level suspendable body. Nothing awaits it, so
//! there is nobody to hand a failure to: if the body returns an error the
//! process logs it and aborts.
//!
//! There is no executor behind a task. [`Task::spawn`] polls the body on
//! the calling thread until it first suspends, and every later wake polls
//! it again on the waking thread. For a body suspended on a
//! [`Context`](crate::Context) that is the thread inside
//! [`Context::run`](crate::Context::run).
//!
//! A wake from another thread while the body is being polled waits for
//! that poll to return, then polls on the waking thread. Only a wake from
//! the polling thread itself is deferred to a re-poll (NOTIFIED), so a
//! resumption handed to a context never runs on the thread that queued it.
//!
//! ```text
//!          spawn            wake (not running)        poll -> Ready
//!   ─────► RUNNING ◄──────────────── IDLE       RUNNING ─────────────► DONE
//!            │  ▲  poll -> Pending     ▲
//!            │  └──────────────────────┘
//!            │ wake from the polling thread
//!            ▼
//!         NOTIFIED ── poll again ──► RUNNING
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use ice_core::{kerror, SpinLock};
use ice_error::Error;

use crate::waker::task_waker;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const NOTIFIED: u8 = 2;
const DONE: u8 = 3;

type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub(crate) struct TaskInner {
    state: AtomicU8,
    /// `thread_marker()` of the thread polling right now, 0 otherwise
    poller: AtomicUsize,
    future: SpinLock<Option<BoxFuture>>,
}

/// Per-thread address, unique among live threads.
fn thread_marker() -> usize {
    thread_local!(static MARKER: u8 = 0);
    MARKER.with(|m| m as *const u8 as usize)
}

impl TaskInner {
    /// Poll the task on this thread, or flag it for another poll if this
    /// thread is already polling it.
    pub(crate) fn schedule(this: &Arc<TaskInner>) {
        let me = thread_marker();
        let mut spins = 0u32;
        loop {
            match this.state.load(Ordering::Acquire) {
                IDLE => {
                    if this
                        .state
                        .compare_exchange(IDLE, RUNNING, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        break;
                    }
                }
                RUNNING | NOTIFIED if this.poller.load(Ordering::Relaxed) == me => {
                    // Re-entrant wake; the poll loop below picks it up.
                    let _ = this.state.compare_exchange(
                        RUNNING,
                        NOTIFIED,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    );
                    return;
                }
                RUNNING | NOTIFIED => {
                    spins += 1;
                    if spins < 64 {
                        std::hint::spin_loop();
                    } else {
                        std::thread::yield_now();
                    }
                }
                _ => return,
            }
        }
        TaskInner::run(this);
    }

    /// Poll until the body is done or suspends with no wake pending.
    /// The caller must have moved the state to RUNNING.
    fn run(this: &Arc<TaskInner>) {
        this.poller.store(thread_marker(), Ordering::Relaxed);
        let waker = task_waker(Arc::clone(this));
        let mut cx = Context::from_waker(&waker);
        loop {
            let finished = {
                let mut slot = this.future.lock();
                match slot.as_mut() {
                    Some(future) => match future.as_mut().poll(&mut cx) {
                        Poll::Ready(()) => {
                            *slot = None;
                            true
                        }
                        Poll::Pending => false,
                    },
                    None => true,
                }
            };
            if finished {
                this.poller.store(0, Ordering::Relaxed);
                this.state.store(DONE, Ordering::Release);
                return;
            }
            this.poller.store(0, Ordering::Relaxed);
            match this
                .state
                .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return,
                // NOTIFIED: woken during the poll, go again.
                Err(_) => {
                    this.state.store(RUNNING, Ordering::Release);
                    this.poller.store(thread_marker(), Ordering::Relaxed);
                }
            }
        }
    }
}

/// Handle to a spawned top-level body.
///
/// Dropping the handle does not cancel the task.
pub struct Task {
    inner: Arc<TaskInner>,
}

impl Task {
    /// Start `body` on the current thread.
    ///
    /// The body runs synchronously up to its first real suspension.
    /// Awaiting a failed `ice_error::Result` is not a suspension: it
    /// returns the error from the body straight away.
    ///
    /// # Aborts
    ///
    /// If `body` completes with an error. The error's type, code and text
    /// are logged at error level first.
    pub fn spawn<F>(body: F) -> Task
    where
        F: Future<Output = core::result::Result<(), Error>> + Send + 'static,
    {
        let future: BoxFuture = Box::pin(async move {
            if let Err(error) = body.await {
                unhandled(error.or_invalid());
            }
        });
        let inner = Arc::new(TaskInner {
            state: AtomicU8::new(RUNNING),
            poller: AtomicUsize::new(0),
            future: SpinLock::new(Some(future)),
        });
        TaskInner::run(&inner);
        Task { inner }
    }

    /// Whether the body has run to completion.
    pub fn is_finished(&self) -> bool {
        self.inner.state.load(Ordering::Acquire) == DONE
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cold]
fn unhandled(error: Error) -> ! {
    kerror!(
        "unhandled {} error {}: {}",
        error.error_type(),
        error.code(),
        error
    );
    std::process::abort()
}
