//! Suspendable functions
//!
//! A suspendable function is an `async` body whose output is
//! `core::result::Result<T, Error>`, wrapped with [`suspendable`]. Inside
//! it:
//!
//! - `other().await?` calls another suspendable function and propagates
//!   its failure;
//! - `result.await?` does the same for an already computed
//!   [`ice_error::Result`] and never suspends;
//! - `context.schedule().await` suspends until the context's consumer
//!   resumes it.
//!
//! ```
//! use ice_error::{Errc, Result};
//! use ice_runtime::{suspendable, Step};
//!
//! fn parse(s: &str) -> Result<u32> {
//!     match s.parse() {
//!         Ok(v) => Result::new(v),
//!         Err(_) => Errc::NotAvailable.into(),
//!     }
//! }
//!
//! let mut f = std::pin::pin!(suspendable(async {
//!     let v = parse("41").await?;
//!     Ok(v + 1)
//! }));
//! match f.as_mut().step() {
//!     Step::Done(r) => assert_eq!(*r.value(), 42),
//!     Step::Suspended => unreachable!(),
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use ice_error::{Error, Result};

use crate::waker::poll_once;

/// Outcome of driving a suspendable function once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<T> {
    /// The body ran to completion.
    Done(T),
    /// The body is parked at a suspension point.
    ///
    /// There is no separate continuation handle: the waker passed to the
    /// suspending poll is the token. Whatever the body suspended on (a
    /// [`Context`](crate::Context) queue, say) holds it, and waking it
    /// makes the body ready to be polled again.
    Suspended,
}

impl<T> Step<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Step::Done(value) => Some(value),
            Step::Suspended => None,
        }
    }
}

/// Adapter returned by [`suspendable`].
#[must_use = "suspendable functions do nothing unless awaited or stepped"]
pub struct Suspendable<F> {
    body: F,
}

/// Turn an `async` body into a suspendable function.
///
/// A failure whose code is zero is replaced by
/// [`Errc::InvalidResultValue`](ice_error::Errc::InvalidResultValue).
pub fn suspendable<F, T>(body: F) -> Suspendable<F>
where
    F: Future<Output = core::result::Result<T, Error>>,
{
    Suspendable { body }
}

impl<F> Suspendable<F> {
    fn body(self: Pin<&mut Self>) -> Pin<&mut F> {
        // Safety: `body` is structurally pinned; it is never moved out of
        // a pinned `Suspendable`.
        unsafe { self.map_unchecked_mut(|s| &mut s.body) }
    }
}

impl<F, T> Suspendable<F>
where
    F: Future<Output = core::result::Result<T, Error>>,
{
    /// Poll once without a real waker.
    ///
    /// Useful for bodies that are known not to suspend, and in tests.
    pub fn step(self: Pin<&mut Self>) -> Step<Result<T>> {
        match poll_once(self) {
            Poll::Ready(result) => Step::Done(Result::from_std(result)),
            Poll::Pending => Step::Suspended,
        }
    }
}

impl<F, T> Future for Suspendable<F>
where
    F: Future<Output = core::result::Result<T, Error>>,
{
    type Output = core::result::Result<T, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.body()
            .poll(cx)
            .map(|result| result.map_err(Error::or_invalid))
    }
}
