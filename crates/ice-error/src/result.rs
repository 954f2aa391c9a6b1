//! Value-or-error result
//!
//! [`Result<T>`] holds either a `T` or an [`Error`], never both. Failures
//! are built from anything error-like (an [`ErrorCodeType`] value, an
//! [`ErrorCode`], an [`Error`], an `io::Error`), and a zero ("no error")
//! value passed as a failure is turned into
//! [`Errc::InvalidResultValue`] so a failure can never look like success.
//!
//! Awaiting a `Result` never suspends; it yields the inner
//! `core::result::Result`, so inside a suspendable body `r.await?` either
//! continues with the value or returns the error to the caller.
//!
//! ```
//! use ice_error::{Errc, Generic, Result};
//!
//! let ok = Result::new(42);
//! assert!(ok.is_ok());
//! assert_eq!(*ok.value(), 42);
//!
//! let failed: Result<i32> = Generic::NoSuchFileOrDirectory.into();
//! assert!(failed.is_err());
//! assert_eq!(failed.code(), libc::ENOENT);
//!
//! let zero: Result<i32> = Generic::Success.into();
//! assert_eq!(zero, Errc::InvalidResultValue);
//! ```

use core::fmt;
use core::future::{ready, IntoFuture, Ready};
use std::io;

use crate::code::{ErrorCode, ErrorCodeType};
use crate::error::Error;
use crate::id::ErrorType;

/// Either a `T` or an [`Error`].
#[must_use = "this `Result` may be a failure, which should be handled"]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Result<T> {
    inner: core::result::Result<T, Error>,
}

impl<T> Result<T> {
    /// A successful result.
    #[inline]
    pub const fn new(value: T) -> Self {
        Result { inner: Ok(value) }
    }

    /// A failed result. A zero error becomes
    /// [`Errc::InvalidResultValue`](crate::Errc::InvalidResultValue).
    #[inline]
    pub fn fail(error: impl Into<Error>) -> Self {
        Result {
            inner: Err(error.into().or_invalid()),
        }
    }

    /// Adopt a standard result, applying the same zero-error check as
    /// [`fail`](Result::fail).
    #[inline]
    pub fn from_std(result: core::result::Result<T, Error>) -> Self {
        Result {
            inner: result.map_err(Error::or_invalid),
        }
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    #[inline]
    pub const fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    /// The success value.
    ///
    /// # Panics
    ///
    /// If the result is a failure. Check [`is_ok`](Result::is_ok) first;
    /// reading the value of a failure is a bug, not an error path.
    #[inline]
    #[track_caller]
    pub fn value(&self) -> &T {
        match &self.inner {
            Ok(value) => value,
            Err(error) => failed_value(*error),
        }
    }

    /// # Panics
    ///
    /// If the result is a failure.
    #[inline]
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Ok(value) => value,
            Err(error) => failed_value(*error),
        }
    }

    /// # Panics
    ///
    /// If the result is a failure.
    #[inline]
    #[track_caller]
    pub fn into_value(self) -> T {
        match self.inner {
            Ok(value) => value,
            Err(error) => failed_value(error),
        }
    }

    #[inline]
    pub fn ok(self) -> Option<T> {
        self.inner.ok()
    }

    #[inline]
    pub fn error(&self) -> Option<Error> {
        self.inner.as_ref().err().copied()
    }

    /// [`ErrorType::SUCCESS`] for a successful result.
    #[inline]
    pub fn error_type(&self) -> ErrorType {
        self.error().map_or(ErrorType::SUCCESS, Error::error_type)
    }

    /// `0` for a successful result.
    #[inline]
    pub fn code(&self) -> i32 {
        self.error().map_or(0, Error::code)
    }

    #[inline]
    pub fn as_std(&self) -> &core::result::Result<T, Error> {
        &self.inner
    }

    #[inline]
    pub fn into_std(self) -> core::result::Result<T, Error> {
        self.inner
    }

    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Result<U> {
        Result {
            inner: self.inner.map(f),
        }
    }

    #[inline]
    pub fn and_then<U, F: FnOnce(T) -> Result<U>>(self, f: F) -> Result<U> {
        match self.inner {
            Ok(value) => f(value),
            Err(error) => Result { inner: Err(error) },
        }
    }
}

#[cold]
#[track_caller]
fn failed_value(error: Error) -> ! {
    panic!("value of a failed result: {:?}", error)
}

impl<T: Default> Default for Result<T> {
    #[inline]
    fn default() -> Self {
        Result::new(T::default())
    }
}

// ── Construction from errors ──────────────────────────────────────

impl<T, E: ErrorCodeType> From<E> for Result<T> {
    #[inline]
    fn from(value: E) -> Self {
        Result::fail(Error::from(value))
    }
}

impl<T, E: ErrorCodeType> From<ErrorCode<E>> for Result<T> {
    #[inline]
    fn from(ec: ErrorCode<E>) -> Self {
        Result::fail(Error::from(ec))
    }
}

impl<T> From<Error> for Result<T> {
    #[inline]
    fn from(error: Error) -> Self {
        Result::fail(error)
    }
}

impl<T> From<io::Error> for Result<T> {
    #[inline]
    fn from(err: io::Error) -> Self {
        Result::fail(Error::from(err))
    }
}

impl<T> From<Result<T>> for core::result::Result<T, Error> {
    #[inline]
    fn from(result: Result<T>) -> Self {
        result.inner
    }
}

// ── Comparison with errors ────────────────────────────────────────

impl<T> PartialEq<Error> for Result<T> {
    #[inline]
    fn eq(&self, other: &Error) -> bool {
        self.error() == Some(*other)
    }
}

impl<T, E: ErrorCodeType> PartialEq<ErrorCode<E>> for Result<T> {
    #[inline]
    fn eq(&self, other: &ErrorCode<E>) -> bool {
        self.error().map_or(false, |e| e == *other)
    }
}

impl<T, E: ErrorCodeType> PartialEq<E> for Result<T> {
    #[inline]
    fn eq(&self, other: &E) -> bool {
        self.error() == Some(Error::from(*other))
    }
}

// ── Awaiting ──────────────────────────────────────────────────────

/// Always ready: yields the inner result without suspending.
impl<T> IntoFuture for Result<T> {
    type Output = core::result::Result<T, Error>;
    type IntoFuture = Ready<Self::Output>;

    #[inline]
    fn into_future(self) -> Self::IntoFuture {
        ready(self.inner)
    }
}

impl<T: fmt::Debug> fmt::Debug for Result<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(value) => f.debug_tuple("Ok").field(value).finish(),
            Err(error) => f.debug_tuple("Err").field(error).finish(),
        }
    }
}
