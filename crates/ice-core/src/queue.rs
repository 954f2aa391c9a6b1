//! Intrusive lock-free MPSC queue
//!
//! Any number of threads may [`Queue::enqueue`] concurrently; exactly one
//! thread at a time may dequeue. Nodes carry their own link field (see
//! [`Node`]) so the queue never allocates.
//!
//! # Ownership
//!
//! A node is handed to the queue as a `Box<T>` and handed back out of
//! [`Queue::dequeue`] as a `Box<T>`. While queued, the queue owns it.
//! Nodes still queued when the queue is dropped are dropped with it.
//!
//! # Algorithm
//!
//! ```text
//!   producers                           consumer
//!   ─────────                           ────────
//!   prev = tail.swap(n)                 h = head
//!   prev == null ? head = n             h.next != null ? head = h.next
//!                : prev.next = n        : tail.cas(h, null), head.cas(h, null)
//! ```
//!
//! The tail swap serializes producers. Between a producer's swap and its
//! link store the new node is not yet reachable from `head`; a dequeue in
//! that window reports empty and the node shows up on the next attempt.
//! Enqueue never waits for the consumer and dequeue never waits for a
//! producer.
//!
//! # Progress
//!
//! Enqueue is wait-free: one swap and one store. Dequeue never blocks but
//! is not lock-free in the strict sense. A producer preempted between its
//! swap and its link store hides its own node, every node enqueued after
//! it, and the node just ahead of it (which cannot be claimed while `tail`
//! points past it). Until that producer resumes, `dequeue`
//! returns `None` while [`Queue::is_empty`] reports `false`. Consumers that
//! sleep on an empty queue must treat that state as "retry shortly", not as
//! "empty".
//!
//! Advancing `head` by CAS instead of claiming `tail` avoids the stall but
//! can drop a node that a producer links onto one the consumer has just
//! taken, so the stall is accepted.
//!
//! # Memory ordering
//!
//! Link stores (`head` and `prev.next`) are `Release`, link loads are
//! `Acquire`, and the `tail` swap/CAS are `AcqRel`. A dequeued node is
//! therefore always observed fully constructed.

use core::marker::PhantomData;
use core::ops::Deref;
use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

cfg_if::cfg_if! {
    if #[cfg(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "powerpc64"))] {
        /// Keeps `head` and `tail` on separate cache lines (adjacent-line
        /// prefetch pulls pairs of 64-byte lines on these targets).
        #[repr(align(128))]
        struct Padded<T>(T);
    } else {
        #[repr(align(64))]
        struct Padded<T>(T);
    }
}

impl<T> Deref for Padded<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

/// A type that can be linked into a [`Queue`].
///
/// # Safety
///
/// `next` must return the same atomic on every call for the lifetime of
/// the node, and nothing but the queue may write it while the node is
/// queued. A node handed to [`Queue::enqueue`] must have a null link.
pub unsafe trait Node: Sized {
    fn next(&self) -> &AtomicPtr<Self>;
}

/// Unbounded intrusive multiple-producer / single-consumer queue.
pub struct Queue<T: Node> {
    head: Padded<AtomicPtr<T>>,
    tail: Padded<AtomicPtr<T>>,
    _owns: PhantomData<Box<T>>,
}

// Safety: nodes move between threads by value; the queue itself only
// touches them through atomics.
unsafe impl<T: Node + Send> Send for Queue<T> {}
unsafe impl<T: Node + Send> Sync for Queue<T> {}

impl<T: Node> Queue<T> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Queue {
            head: Padded(AtomicPtr::new(ptr::null_mut())),
            tail: Padded(AtomicPtr::new(ptr::null_mut())),
            _owns: PhantomData,
        }
    }

    /// Append `node`. Lock-free; callable from any thread.
    ///
    /// The node's link must be null (debug-asserted).
    pub fn enqueue(&self, node: Box<T>) {
        debug_assert!(
            node.next().load(Ordering::Relaxed).is_null(),
            "enqueue of a node that is still linked"
        );
        let node = Box::into_raw(node);
        let prev = self.tail.swap(node, Ordering::AcqRel);
        if prev.is_null() {
            self.head.store(node, Ordering::Release);
        } else {
            // Safety: `prev` cannot be dequeued until this link lands: the
            // consumer only takes a node whose link is set or that is
            // still the tail, and `prev` is no longer the tail.
            unsafe { (*prev).next().store(node, Ordering::Release) };
        }
    }

    /// Remove the oldest node, or `None` if nothing is reachable yet.
    ///
    /// The returned node has a null link and may be re-enqueued as is.
    ///
    /// # Safety
    ///
    /// At most one thread may be inside `dequeue` at any time. Concurrent
    /// consumers can free a node another consumer is still reading.
    pub unsafe fn dequeue(&self) -> Option<Box<T>> {
        let head = self.head.load(Ordering::Acquire);
        if head.is_null() {
            return None;
        }
        let next = (*head).next().load(Ordering::Acquire);
        if !next.is_null() {
            self.head.store(next, Ordering::Release);
        } else {
            // `head` looks like the last node. Claim it by clearing tail;
            // if that fails a producer has swapped in behind it and is
            // about to link, so report empty for now.
            if self
                .tail
                .compare_exchange(head, ptr::null_mut(), Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return None;
            }
            // A producer that saw the null tail may already have set head.
            let _ = self.head.compare_exchange(
                head,
                ptr::null_mut(),
                Ordering::AcqRel,
                Ordering::Relaxed,
            );
        }
        (*head).next().store(ptr::null_mut(), Ordering::Relaxed);
        Some(Box::from_raw(head))
    }

    /// Dequeue through exclusive access.
    ///
    /// With `&mut self` no producer can be mid-enqueue, so `None` here
    /// always means the queue is empty.
    #[inline]
    pub fn dequeue_mut(&mut self) -> Option<Box<T>> {
        // Safety: `&mut self` rules out every other consumer.
        unsafe { self.dequeue() }
    }

    /// Whether the queue was empty at the time of the call.
    ///
    /// Approximate under concurrency; a node that is swapped in but not yet
    /// linked counts as present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tail.load(Ordering::Acquire).is_null()
    }
}

impl<T: Node> Default for Queue<T> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<T: Node> Drop for Queue<T> {
    fn drop(&mut self) {
        while let Some(node) = self.dequeue_mut() {
            drop(node);
        }
    }
}

impl<T: Node> core::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Queue")
            .field("empty", &self.is_empty())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
