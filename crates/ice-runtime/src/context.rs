//! Single-consumer execution context
//!
//! A [`Context`] owns an MPSC [`Queue`] of resumptions. Any thread may
//! suspend a task onto it (`context.schedule().await`) or [`post`] a
//! callback; the one thread inside [`Context::run`] resumes them one at a
//! time, in enqueue order per producer.
//!
//! ```text
//!   producer threads                       consumer (run)
//!   ────────────────                       ──────────────
//!   schedule().await ──┐                 ┌─► dequeue ─► wake ─► task polls
//!   post(f) ───────────┼─► Queue ────────┘       │
//!   work() ── size+1   │   (lock-free)           ├─ empty, size > 0 ─► park
//!                      │                         └─ empty, size == 0 ─► return
//!                      └─► notify if parked
//! ```
//!
//! `size` counts outstanding work: queued resumptions plus live [`Work`]
//! guards. `run` returns once it reaches zero, or as soon as [`stop`] is
//! observed. Stopping with work still outstanding is reported as
//! [`Errc::ContextNotEmpty`].
//!
//! # Parking
//!
//! The queue needs no lock. The mutex/condvar pair exists only so an idle
//! consumer can sleep. The consumer publishes `parked` and re-checks for
//! work behind a `SeqCst` fence before waiting; producers fence after
//! enqueuing and notify only if they see `parked`. One side always sees
//! the other, so a wake-up is never lost and producers skip the mutex
//! while the consumer is busy.
//!
//! A node can be queued yet unreachable while its producer sits between
//! the tail swap and the link store. The consumer then sleeps for at most
//! a few hundred microseconds instead of spinning; the producer's own
//! notify usually ends the wait sooner.
//!
//! [`post`]: Context::post
//! [`stop`]: Context::stop

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::ptr::{self, NonNull};
use std::sync::atomic::{fence, AtomicBool, AtomicPtr, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::task::{Context as TaskContext, Poll, Waker};
use std::time::Duration;

use ice_core::{kdebug, kinfo, kwarn, Node, Queue, SpinLock};
use ice_error::{Errc, Error, Result};

use crate::config::ContextConfig;
use crate::task::Task;

/// Longest park while a queued node is still unlinked by its producer.
const STALL_WAIT: Duration = Duration::from_micros(200);

/// Set by the consumer once the node has been resumed.
const FIRED: u8 = 1;
/// Set by a [`Schedule`] dropped before it saw `FIRED`.
const ABANDONED: u8 = 2;

/// One suspended task waiting in the queue.
///
/// Shared between the queue and the [`Schedule`] that pushed it. Whichever
/// side sets the second of `FIRED`/`ABANDONED` frees the node.
struct Resumption {
    waker: Option<Waker>,
    state: AtomicU8,
    next: AtomicPtr<Resumption>,
}

// Safety: `next` is only ever touched by the queue.
unsafe impl Node for Resumption {
    fn next(&self) -> &AtomicPtr<Self> {
        &self.next
    }
}

impl Resumption {
    fn resume(self: Box<Self>) {
        let node = Box::into_raw(self);
        // Safety: the consumer is the only user of `waker`, and only
        // before `FIRED` is published.
        let waker = unsafe { (*node).waker.take() };
        // Safety: `node` stays allocated until both flags are set.
        let prev = unsafe { state(node) }.fetch_or(FIRED, Ordering::AcqRel);
        if prev & ABANDONED != 0 {
            // Safety: the schedule is gone, nothing else refers to `node`.
            drop(unsafe { Box::from_raw(node) });
            return;
        }
        // `node` now belongs to the schedule.
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// The state flags of `node`, without borrowing its other fields.
///
/// # Safety
///
/// `node` must point to a live `Resumption` for the returned lifetime.
unsafe fn state<'n>(node: *const Resumption) -> &'n AtomicU8 {
    &(*node).state
}

/// How long an idle consumer may sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParkWait {
    Skip,
    Forever,
    For(Duration),
}

fn park_wait(
    queue_empty: bool,
    stopped: bool,
    outstanding: usize,
    timeout: Option<Duration>,
) -> ParkWait {
    if stopped || outstanding == 0 {
        return ParkWait::Skip;
    }
    if !queue_empty {
        // Queued but not yet reachable: a producer is between its tail
        // swap and its link.
        return ParkWait::For(timeout.map_or(STALL_WAIT, |t| t.min(STALL_WAIT)));
    }
    match timeout {
        Some(t) => ParkWait::For(t),
        None => ParkWait::Forever,
    }
}

/// Single-consumer scheduler.
///
/// Not `Clone`; share it by reference or through an `Arc`.
pub struct Context {
    queue: Queue<Resumption>,
    size: AtomicUsize,
    run: AtomicUsize,
    stop: AtomicBool,
    parked: AtomicBool,
    consumer: SpinLock<()>,
    lock: Mutex<()>,
    cond: Condvar,
    config: ContextConfig,
}

impl Context {
    /// Context configured from the environment
    /// (see [`ContextConfig::from_env`]).
    pub fn new() -> Self {
        Self::with_config(ContextConfig::from_env())
    }

    /// An invalid `config` is logged and replaced by the defaults.
    pub fn with_config(config: ContextConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(msg) => {
                kwarn!("invalid context config ({}), using defaults", msg);
                ContextConfig::default()
            }
        };
        Context {
            queue: Queue::new(),
            size: AtomicUsize::new(0),
            run: AtomicUsize::new(0),
            stop: AtomicBool::new(false),
            parked: AtomicBool::new(false),
            consumer: SpinLock::new(()),
            lock: Mutex::new(()),
            cond: Condvar::new(),
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Suspension point: the awaiting task is queued and resumed later by
    /// the thread in [`run`](Context::run).
    ///
    /// `(&context).await` is equivalent.
    pub fn schedule(&self) -> Schedule<'_> {
        Schedule {
            context: self,
            stage: Stage::Start,
        }
    }

    /// Run `callback` on the consumer thread.
    pub fn post<F>(self: &Arc<Self>, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let context = Arc::clone(self);
        Task::spawn(async move {
            context.schedule().await;
            callback();
            Ok::<(), Error>(())
        });
    }

    /// Announce work that will be queued later.
    ///
    /// `run` keeps waiting while the guard is alive, even if the queue is
    /// empty.
    pub fn work(&self) -> Work<'_> {
        self.size.fetch_add(1, Ordering::AcqRel);
        Work {
            context: Some(self),
        }
    }

    /// Resume queued tasks on this thread until no work is outstanding or
    /// [`stop`](Context::stop) is called.
    ///
    /// Returns [`Errc::ContextNotEmpty`] if stopped while work was still
    /// outstanding. May be re-entered from a resumed task on the same
    /// thread, but never run from two threads at once (debug builds
    /// assert).
    pub fn run(&self) -> Result<()> {
        let depth = self.run.fetch_add(1, Ordering::AcqRel) + 1;
        kdebug!("context run enter (depth {})", depth);

        let mut resumed = 0usize;
        let mut spins = 0u32;
        loop {
            if self.stop.load(Ordering::Acquire) {
                break;
            }
            if let Some(node) = self.pop() {
                spins = 0;
                resumed += 1;
                node.resume();
                self.finish_one();
                continue;
            }
            if self.size.load(Ordering::Acquire) == 0 {
                break;
            }
            if spins < self.config.idle_spins {
                spins += 1;
                std::hint::spin_loop();
                continue;
            }
            spins = 0;
            self.park();
        }

        self.run.fetch_sub(1, Ordering::AcqRel);
        let outstanding = self.size.load(Ordering::Acquire);
        kdebug!(
            "context run exit (depth {}, resumed {}, outstanding {})",
            depth,
            resumed,
            outstanding
        );
        if self.stop.load(Ordering::Acquire) && outstanding > 0 {
            return Errc::ContextNotEmpty.into();
        }
        Result::new(())
    }

    /// Ask [`run`](Context::run) to return. Idempotent.
    pub fn stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            kinfo!("context stop requested ({} outstanding)", self.len());
        }
        let _guard = self.lock();
        self.cond.notify_all();
    }

    /// Outstanding work: queued resumptions plus live [`Work`] guards.
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_running(&self) -> bool {
        self.run.load(Ordering::Acquire) > 0
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    // ── internals ─────────────────────────────────────────────────

    fn push(&self, node: Box<Resumption>) {
        // Count before publishing so the consumer can't resume and
        // decrement first.
        self.size.fetch_add(1, Ordering::AcqRel);
        self.queue.enqueue(node);
        fence(Ordering::SeqCst);
        if self.parked.load(Ordering::Relaxed) {
            let _guard = self.lock();
            self.cond.notify_one();
        }
    }

    fn pop(&self) -> Option<Box<Resumption>> {
        match self.consumer.try_lock() {
            // Safety: `consumer` is held, so no other dequeue is in progress.
            Some(_consumer) => unsafe { self.queue.dequeue() },
            None => {
                debug_assert!(false, "Context::run entered from two threads at once");
                None
            }
        }
    }

    fn finish_one(&self) {
        if self.size.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _guard = self.lock();
            self.cond.notify_all();
        }
    }

    fn park(&self) {
        let mut guard = self.lock();
        self.parked.store(true, Ordering::Relaxed);
        fence(Ordering::SeqCst);
        let wait = park_wait(
            self.queue.is_empty(),
            self.stop.load(Ordering::Acquire),
            self.size.load(Ordering::Acquire),
            self.config.park_timeout,
        );
        guard = match wait {
            ParkWait::Skip => guard,
            ParkWait::For(timeout) => self
                .cond
                .wait_timeout(guard, timeout)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0),
            ParkWait::Forever => self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner),
        };
        self.parked.store(false, Ordering::Relaxed);
        drop(guard);
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("outstanding", &self.len())
            .field("running", &self.is_running())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl<'a> IntoFuture for &'a Context {
    type Output = ();
    type IntoFuture = Schedule<'a>;

    fn into_future(self) -> Schedule<'a> {
        self.schedule()
    }
}

/// Future returned by [`Context::schedule`].
///
/// The first poll always suspends. The future completes once the consumer
/// has resumed it; polls before that are spurious and stay pending.
#[must_use = "futures do nothing unless awaited"]
pub struct Schedule<'a> {
    context: &'a Context,
    stage: Stage,
}

#[derive(Clone, Copy)]
enum Stage {
    Start,
    Queued(NonNull<Resumption>),
    Done,
}

// Safety: the queued node is only reached through its atomic `state`, and
// it is freed exactly once by whichever side sets the second flag.
unsafe impl Send for Schedule<'_> {}
unsafe impl Sync for Schedule<'_> {}

impl Future for Schedule<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<()> {
        match self.stage {
            Stage::Start => {
                let node = Box::into_raw(Box::new(Resumption {
                    waker: Some(cx.waker().clone()),
                    state: AtomicU8::new(0),
                    next: AtomicPtr::new(ptr::null_mut()),
                }));
                // Safety: `Box::into_raw` never returns null.
                self.stage = Stage::Queued(unsafe { NonNull::new_unchecked(node) });
                // Safety: ownership moves to the queue; this side keeps only
                // the address for `state`.
                self.context.push(unsafe { Box::from_raw(node) });
                Poll::Pending
            }
            Stage::Queued(node) => {
                // Safety: the node lives until this future releases it.
                let fired = unsafe { state(node.as_ptr()) }.load(Ordering::Acquire) & FIRED != 0;
                if !fired {
                    return Poll::Pending;
                }
                self.stage = Stage::Done;
                // Safety: `FIRED` without `ABANDONED` hands the node back here.
                drop(unsafe { Box::from_raw(node.as_ptr()) });
                Poll::Ready(())
            }
            Stage::Done => Poll::Ready(()),
        }
    }
}

impl Drop for Schedule<'_> {
    fn drop(&mut self) {
        if let Stage::Queued(node) = self.stage {
            // Safety: not yet released by this side, so still allocated.
            let prev = unsafe { state(node.as_ptr()) }.fetch_or(ABANDONED, Ordering::AcqRel);
            if prev & FIRED != 0 {
                // Safety: the consumer is done with it.
                drop(unsafe { Box::from_raw(node.as_ptr()) });
            }
        }
    }
}

/// Outstanding-work guard from [`Context::work`].
///
/// Released on drop or by [`release`](Work::release).
#[must_use = "dropping the guard releases the work immediately"]
pub struct Work<'a> {
    context: Option<&'a Context>,
}

impl Work<'_> {
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(context) = self.context.take() {
            context.finish_one();
        }
    }
}

impl Drop for Work<'_> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waker::poll_once;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;
    use std::thread;
    use std::time::Duration;

    fn context() -> Arc<Context> {
        Arc::new(Context::with_config(ContextConfig::default()))
    }

    #[test]
    fn test_run_empty_returns_success() {
        let ctx = context();
        assert!(ctx.run().is_ok());
        assert!(!ctx.is_running());
    }

    #[test]
    fn test_run_stopped_empty_returns_success() {
        let ctx = context();
        ctx.stop();
        ctx.stop();
        assert!(ctx.is_stopped());
        assert!(ctx.run().is_ok());
    }

    #[test]
    fn test_run_stopped_with_pending_item() {
        let ctx = context();
        let hit = Arc::new(AtomicBool::new(false));
        let h = Arc::clone(&hit);
        ctx.post(move || h.store(true, Ordering::SeqCst));
        assert_eq!(ctx.len(), 1);

        ctx.stop();
        let r = ctx.run();
        assert_eq!(r, Errc::ContextNotEmpty);
        assert!(!hit.load(Ordering::SeqCst));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_post_runs_on_consumer_thread() {
        let ctx = context();
        let seen = Arc::new(StdMutex::new(Vec::new()));
        for i in 0..3 {
            let seen = Arc::clone(&seen);
            ctx.post(move || seen.lock().unwrap().push((i, thread::current().id())));
        }
        // Nothing runs until the consumer runs.
        assert!(seen.lock().unwrap().is_empty());

        assert!(ctx.run().is_ok());
        let seen = seen.lock().unwrap();
        let me = thread::current().id();
        assert_eq!(*seen, vec![(0, me), (1, me), (2, me)]);
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_await_context_resumes_in_run() {
        let ctx = context();
        let stage = Arc::new(AtomicUsize::new(0));
        let task = {
            let ctx = Arc::clone(&ctx);
            let stage = Arc::clone(&stage);
            Task::spawn(async move {
                stage.store(1, Ordering::SeqCst);
                (&*ctx).await;
                stage.store(2, Ordering::SeqCst);
                ctx.schedule().await;
                stage.store(3, Ordering::SeqCst);
                Ok(())
            })
        };
        assert_eq!(stage.load(Ordering::SeqCst), 1);
        assert!(!task.is_finished());

        assert!(ctx.run().is_ok());
        assert_eq!(stage.load(Ordering::SeqCst), 3);
        assert!(task.is_finished());
    }

    #[test]
    fn test_work_guard_keeps_run_alive() {
        let ctx = context();
        let done = Arc::new(AtomicBool::new(false));

        thread::scope(|s| {
            let work = ctx.work();
            assert_eq!(ctx.len(), 1);

            let consumer = s.spawn(|| ctx.run());

            thread::sleep(Duration::from_millis(20));
            let d = Arc::clone(&done);
            ctx.post(move || d.store(true, Ordering::SeqCst));
            work.release();

            assert!(consumer.join().unwrap().is_ok());
        });

        assert!(done.load(Ordering::SeqCst));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_stop_wakes_parked_consumer() {
        let ctx = Arc::new(Context::with_config(ContextConfig::new().idle_spins(0)));
        let _work = ctx.work();

        let consumer = {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || ctx.run())
        };
        thread::sleep(Duration::from_millis(20));
        ctx.stop();

        assert_eq!(consumer.join().unwrap(), Errc::ContextNotEmpty);
    }

    #[test]
    fn test_park_timeout_rechecks() {
        let config = ContextConfig::new()
            .idle_spins(0)
            .park_timeout(Some(Duration::from_millis(1)));
        let ctx = Context::with_config(config);
        thread::scope(|s| {
            let work = ctx.work();
            let consumer = s.spawn(|| ctx.run());
            thread::sleep(Duration::from_millis(10));
            drop(work);
            assert!(consumer.join().unwrap().is_ok());
        });
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let ctx = Context::with_config(ContextConfig::new().park_timeout(Some(Duration::ZERO)));
        assert_eq!(*ctx.config(), ContextConfig::default());
    }

    #[test]
    fn test_nested_run() {
        let ctx = context();
        let order = Arc::new(StdMutex::new(Vec::new()));
        let nested = Arc::new(StdMutex::new(None));

        {
            let ctx2 = Arc::clone(&ctx);
            let order = Arc::clone(&order);
            let nested = Arc::clone(&nested);
            ctx.post(move || {
                order.lock().unwrap().push("outer");
                let (c, o) = (Arc::clone(&ctx2), Arc::clone(&order));
                ctx2.post(move || {
                    o.lock().unwrap().push("inner");
                    c.stop();
                });
                // The outer callback is still outstanding, so the nested
                // run can only come back through stop.
                *nested.lock().unwrap() = Some(ctx2.run());
            });
        }

        assert!(ctx.run().is_ok());
        assert_eq!(*order.lock().unwrap(), vec!["outer", "inner"]);
        assert_eq!(
            nested.lock().unwrap().take(),
            Some(Result::fail(Errc::ContextNotEmpty))
        );
        assert!(!ctx.is_running());
    }

    #[test]
    fn test_many_producers() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 500;

        let ctx = context();
        let seen = Arc::new(StdMutex::new(HashSet::new()));
        let consumer_id = Arc::new(StdMutex::new(None));

        thread::scope(|s| {
            let work = ctx.work();
            let consumer = {
                let ctx = Arc::clone(&ctx);
                let consumer_id = Arc::clone(&consumer_id);
                s.spawn(move || {
                    *consumer_id.lock().unwrap() = Some(thread::current().id());
                    ctx.run()
                })
            };

            let producers: Vec<_> = (0..PRODUCERS)
                .map(|p| {
                    let ctx = Arc::clone(&ctx);
                    let seen = Arc::clone(&seen);
                    let consumer_id = Arc::clone(&consumer_id);
                    s.spawn(move || {
                        for i in 0..PER_PRODUCER {
                            let seen = Arc::clone(&seen);
                            let consumer_id = Arc::clone(&consumer_id);
                            ctx.post(move || {
                                let expected = *consumer_id.lock().unwrap();
                                assert_eq!(expected, Some(thread::current().id()));
                                assert!(seen.lock().unwrap().insert(p * PER_PRODUCER + i));
                            });
                        }
                    })
                })
                .collect();

            for h in producers {
                h.join().unwrap();
            }
            drop(work);
            assert!(consumer.join().unwrap().is_ok());
        });

        assert_eq!(seen.lock().unwrap().len(), PRODUCERS * PER_PRODUCER);
        assert!(ctx.is_empty());
    }

    struct Flag(AtomicBool);

    impl std::task::Wake for Flag {
        fn wake(self: Arc<Self>) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn flag_waker() -> (Arc<Flag>, Waker) {
        let flag = Arc::new(Flag(AtomicBool::new(false)));
        let waker = Waker::from(Arc::clone(&flag));
        (flag, waker)
    }

    #[test]
    fn test_schedule_pending_until_resumed() {
        let ctx = context();
        let (flag, waker) = flag_waker();
        let mut cx = TaskContext::from_waker(&waker);
        let mut fut = Box::pin(ctx.schedule());

        assert!(fut.as_mut().poll(&mut cx).is_pending());
        assert!(fut.as_mut().poll(&mut cx).is_pending());
        assert_eq!(ctx.len(), 1);
        drop(cx);
        drop(waker);
        assert_eq!(Arc::strong_count(&flag), 2);

        assert!(ctx.run().is_ok());
        assert!(flag.0.load(Ordering::SeqCst));
        assert_eq!(Arc::strong_count(&flag), 1);
        assert!(poll_once(fut.as_mut()).is_ready());
        assert!(poll_once(fut.as_mut()).is_ready());
    }

    #[test]
    fn test_schedule_dropped_before_resume() {
        let ctx = context();
        let (flag, waker) = flag_waker();
        let mut cx = TaskContext::from_waker(&waker);
        let mut fut = Box::pin(ctx.schedule());
        assert!(fut.as_mut().poll(&mut cx).is_pending());
        drop(fut);
        drop(waker);
        assert_eq!(ctx.len(), 1);

        assert!(ctx.run().is_ok());
        assert!(ctx.is_empty());
        // Resumed without waking; the node and its waker are freed.
        assert!(!flag.0.load(Ordering::SeqCst));
        assert_eq!(Arc::strong_count(&flag), 1);
    }

    #[test]
    fn test_schedule_dropped_after_resume() {
        let ctx = context();
        let (flag, waker) = flag_waker();
        let mut cx = TaskContext::from_waker(&waker);
        let mut fut = Box::pin(ctx.schedule());
        assert!(fut.as_mut().poll(&mut cx).is_pending());
        drop(waker);

        assert!(ctx.run().is_ok());
        assert!(flag.0.load(Ordering::SeqCst));
        drop(fut);
        assert_eq!(Arc::strong_count(&flag), 1);
    }

    #[test]
    fn test_dropped_context_frees_queued_nodes() {
        let ctx = context();
        let (flag, waker) = flag_waker();
        let mut cx = TaskContext::from_waker(&waker);
        {
            let mut fut = Box::pin(ctx.schedule());
            assert!(fut.as_mut().poll(&mut cx).is_pending());
        }
        drop(waker);
        assert_eq!(Arc::strong_count(&flag), 2);
        drop(ctx);
        assert_eq!(Arc::strong_count(&flag), 1);
    }

    #[test]
    fn test_park_wait() {
        let ms = Duration::from_millis;
        assert_eq!(park_wait(true, true, 3, None), ParkWait::Skip);
        assert_eq!(park_wait(false, false, 0, None), ParkWait::Skip);
        assert_eq!(park_wait(true, false, 1, None), ParkWait::Forever);
        assert_eq!(park_wait(true, false, 1, Some(ms(50))), ParkWait::For(ms(50)));
    }

    #[test]
    fn test_park_wait_bounded_while_producer_unlinked() {
        let us = Duration::from_micros;
        assert_eq!(park_wait(false, false, 2, None), ParkWait::For(STALL_WAIT));
        assert_eq!(park_wait(false, false, 2, Some(Duration::from_secs(1))), ParkWait::For(STALL_WAIT));
        assert_eq!(park_wait(false, false, 2, Some(us(10))), ParkWait::For(us(10)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "two threads")]
    fn test_pop_from_second_consumer_asserts() {
        let ctx = context();
        let _held = ctx.consumer.lock();
        let _ = ctx.pop();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_pop_from_second_consumer_yields_nothing() {
        let ctx = context();
        ctx.post(|| {});
        let _held = ctx.consumer.lock();
        assert!(ctx.pop().is_none());
    }
}
