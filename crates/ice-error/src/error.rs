//! Type-erased error value

use core::fmt;

use crate::code::{ErrorCode, ErrorCodeType};
use crate::codes::Errc;
use crate::id::ErrorType;
use crate::info::ErrorInfo;

/// An error code with its concrete type erased.
///
/// Eight bytes, `Copy`, allocation-free to build and compare. Only the
/// [`ErrorType`] and the `i32` code survive, so there is no way back to
/// the original enum. Code `0` means "no error" whatever the type.
///
/// Ordering is by type, then code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Error {
    type_: ErrorType,
    code: i32,
}

impl Error {
    #[inline]
    pub const fn new(type_: ErrorType, code: i32) -> Self {
        Error { type_, code }
    }

    #[inline]
    pub const fn error_type(self) -> ErrorType {
        self.type_
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self.code
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.code != 0
    }

    /// `self` if it carries an error, otherwise
    /// [`Errc::InvalidResultValue`].
    ///
    /// Applied wherever an error is about to become a failure, so a zero
    /// code can never masquerade as success.
    #[inline]
    pub fn or_invalid(self) -> Self {
        if self.is_error() {
            self
        } else {
            Error::from(Errc::InvalidResultValue)
        }
    }

    /// The registered text for this error.
    #[inline]
    pub fn text(self) -> String {
        ErrorInfo::text(self.type_, self.code)
    }
}

impl<E: ErrorCodeType> From<E> for Error {
    #[inline]
    fn from(value: E) -> Self {
        Error::new(E::TYPE, value.code())
    }
}

impl<E: ErrorCodeType> From<ErrorCode<E>> for Error {
    #[inline]
    fn from(ec: ErrorCode<E>) -> Self {
        Error::new(E::TYPE, ec.code())
    }
}

impl<E: ErrorCodeType> PartialEq<ErrorCode<E>> for Error {
    #[inline]
    fn eq(&self, other: &ErrorCode<E>) -> bool {
        self.type_ == E::TYPE && self.code == other.code()
    }
}

impl<E: ErrorCodeType> PartialEq<Error> for ErrorCode<E> {
    #[inline]
    fn eq(&self, other: &Error) -> bool {
        other == self
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("type", &self.type_)
            .field("code", &self.code)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl std::error::Error for Error {}
