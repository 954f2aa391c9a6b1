//! Raw wakers
//!
//! Task wakers are `Arc<TaskInner>` pointers behind a hand-written vtable;
//! waking polls the task inline on the waking thread.

use std::mem;
use std::pin::Pin;
use std::ptr;
use std::sync::Arc;
use std::future::Future;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use crate::task::TaskInner;

static TASK_VTABLE: RawWakerVTable =
    RawWakerVTable::new(clone_raw, wake_raw, wake_by_ref_raw, drop_raw);

pub(crate) fn task_waker(task: Arc<TaskInner>) -> Waker {
    // Safety: the vtable functions below treat the data pointer as an
    // `Arc<TaskInner>` produced by `Arc::into_raw`.
    unsafe { Waker::from_raw(RawWaker::new(Arc::into_raw(task) as *const (), &TASK_VTABLE)) }
}

fn clone_raw(ptr: *const ()) -> RawWaker {
    let arc = unsafe { Arc::<TaskInner>::from_raw(ptr as *const TaskInner) };
    let cloned = Arc::clone(&arc);
    mem::forget(arc);
    RawWaker::new(Arc::into_raw(cloned) as *const (), &TASK_VTABLE)
}

fn wake_raw(ptr: *const ()) {
    let arc = unsafe { Arc::<TaskInner>::from_raw(ptr as *const TaskInner) };
    TaskInner::schedule(&arc);
}

fn wake_by_ref_raw(ptr: *const ()) {
    let arc = unsafe { Arc::<TaskInner>::from_raw(ptr as *const TaskInner) };
    TaskInner::schedule(&arc);
    mem::forget(arc);
}

fn drop_raw(ptr: *const ()) {
    unsafe { drop(Arc::<TaskInner>::from_raw(ptr as *const TaskInner)) };
}

// ── Noop waker ────────────────────────────────────────────────────

static NOOP_VTABLE: RawWakerVTable = RawWakerVTable::new(noop_clone, noop, noop, noop);

fn noop_clone(_: *const ()) -> RawWaker {
    RawWaker::new(ptr::null(), &NOOP_VTABLE)
}

fn noop(_: *const ()) {}

/// A waker that does nothing when woken.
pub fn noop_waker() -> Waker {
    // Safety: every vtable entry ignores the data pointer.
    unsafe { Waker::from_raw(RawWaker::new(ptr::null(), &NOOP_VTABLE)) }
}

/// Poll `future` exactly once with a [`noop_waker`].
pub fn poll_once<F: Future + ?Sized>(future: Pin<&mut F>) -> Poll<F::Output> {
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    future.poll(&mut cx)
}
