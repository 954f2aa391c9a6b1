//! Typed error codes
//!
//! An [`ErrorCodeType`] is any small integer-backed type (usually an enum)
//! whose zero value means "no error". [`ErrorCode<E>`] carries one of its
//! values as an `i32` without losing track of `E`.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use crate::id::ErrorType;

mod sealed {
    pub trait Sealed {}
}

/// Integer representations an error code type may use.
///
/// Signed and unsigned integers of at most 32 bits. `bool` and wider
/// integers are deliberately absent.
pub trait Underlying: sealed::Sealed + Copy + Eq + fmt::Debug + 'static {
    /// Reduce to the shared `i32` code (two's complement for `u32`).
    fn to_code(self) -> i32;
    /// Truncating inverse of [`to_code`](Underlying::to_code).
    fn from_code(code: i32) -> Self;
}

macro_rules! underlying {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Underlying for $t {
            #[inline]
            fn to_code(self) -> i32 {
                self as i32
            }

            #[inline]
            fn from_code(code: i32) -> Self {
                code as $t
            }
        }
    )*};
}

underlying!(i8, i16, i32, u8, u16, u32);

/// A type whose values are error codes.
///
/// Implement it with [`error_code_type!`](crate::error_code_type), or by
/// hand for open code spaces such as [`System`](crate::System).
///
/// The value whose representation is zero must mean success.
pub trait ErrorCodeType: Copy + Eq + 'static {
    type Repr: Underlying;

    /// Canonical name, conventionally `concat!(module_path!(), "::Name")`.
    const NAME: &'static str;

    const TYPE: ErrorType = ErrorType::from_name(Self::NAME);

    fn into_repr(self) -> Self::Repr;

    /// `None` if `repr` names no value of this type.
    fn from_repr(repr: Self::Repr) -> Option<Self>;

    #[inline]
    fn code(self) -> i32 {
        self.into_repr().to_code()
    }

    /// `None` if `code` is out of range for `Repr` or names no value.
    #[inline]
    fn from_code(code: i32) -> Option<Self> {
        let repr = Self::Repr::from_code(code);
        if repr.to_code() != code {
            return None;
        }
        Self::from_repr(repr)
    }
}

/// A code of error type `E`.
///
/// Falsy (no error) iff the code is zero.
pub struct ErrorCode<E> {
    code: i32,
    _type: PhantomData<fn() -> E>,
}

impl<E: ErrorCodeType> ErrorCode<E> {
    #[inline]
    pub fn new(value: E) -> Self {
        ErrorCode::from_raw(value.code())
    }

    /// Wrap a raw code of `E`. The code need not name a value of `E`.
    #[inline]
    pub const fn from_raw(code: i32) -> Self {
        ErrorCode {
            code,
            _type: PhantomData,
        }
    }

    #[inline]
    pub const fn code(self) -> i32 {
        self.code
    }

    #[inline]
    pub fn error_type(self) -> ErrorType {
        E::TYPE
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.code != 0
    }

    /// Recover the typed value, if the code names one.
    #[inline]
    pub fn get(self) -> Option<E> {
        E::from_code(self.code)
    }
}

impl<E: ErrorCodeType> From<E> for ErrorCode<E> {
    #[inline]
    fn from(value: E) -> Self {
        ErrorCode::new(value)
    }
}

impl<E> Clone for ErrorCode<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for ErrorCode<E> {}

impl<E> Default for ErrorCode<E> {
    #[inline]
    fn default() -> Self {
        ErrorCode {
            code: 0,
            _type: PhantomData,
        }
    }
}

/// Codes of different types are never equal.
impl<E: ErrorCodeType, F: ErrorCodeType> PartialEq<ErrorCode<F>> for ErrorCode<E> {
    #[inline]
    fn eq(&self, other: &ErrorCode<F>) -> bool {
        E::TYPE == F::TYPE && self.code == other.code
    }
}

impl<E: ErrorCodeType> Eq for ErrorCode<E> {}

impl<E: ErrorCodeType> Hash for ErrorCode<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        E::TYPE.hash(state);
        self.code.hash(state);
    }
}

impl<E: ErrorCodeType> fmt::Debug for ErrorCode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCode")
            .field("type", &E::NAME)
            .field("code", &self.code)
            .finish()
    }
}

impl<E: ErrorCodeType> fmt::Display for ErrorCode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::info::ErrorInfo::text(E::TYPE, self.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::error_code_type! {
        enum Small: u8 {
            Ok = 0,
            Busy = 1,
            Full = 200,
        }
    }

    crate::error_code_type! {
        enum Signed: i16 {
            Ok = 0,
            Negative = -5,
        }
    }

    crate::error_code_type! {
        enum Wide: u32 {
            Ok = 0,
            High = 0xFFFF_FFF0,
        }
    }

    #[test]
    fn round_trips_every_value() {
        for value in [Small::Busy, Small::Full] {
            let ec = ErrorCode::new(value);
            assert_eq!(ec.code(), value.code());
            assert_eq!(ec.get(), Some(value));
            assert_eq!(ErrorCode::<Small>::from_raw(ec.code()).code(), ec.code());
        }
        assert_eq!(ErrorCode::new(Signed::Negative).code(), -5);
        assert_eq!(ErrorCode::new(Signed::Negative).get(), Some(Signed::Negative));
        assert_eq!(ErrorCode::new(Wide::High).get(), Some(Wide::High));
    }

    #[test]
    fn zero_is_falsy() {
        assert!(!ErrorCode::new(Small::Ok).is_error());
        assert!(!ErrorCode::<Signed>::default().is_error());
        assert!(ErrorCode::new(Small::Busy).is_error());
    }

    #[test]
    fn out_of_range_codes_do_not_decode() {
        assert_eq!(ErrorCode::<Small>::from_raw(300).get(), None);
        assert_eq!(ErrorCode::<Small>::from_raw(2).get(), None);
        assert_eq!(Small::from_code(-1), None);
    }

    #[test]
    fn equality_respects_type() {
        assert_eq!(ErrorCode::new(Small::Busy), ErrorCode::<Small>::from_raw(1));
        assert_ne!(ErrorCode::new(Small::Busy), ErrorCode::new(Small::Full));
        assert!(ErrorCode::new(Small::Busy) != ErrorCode::<Signed>::from_raw(1));
    }

    #[test]
    fn type_comes_from_name() {
        assert_eq!(ErrorCode::new(Small::Busy).error_type(), Small::TYPE);
        assert_eq!(Small::TYPE, ErrorType::from_name(Small::NAME));
        assert!(Small::NAME.ends_with("::Small"));
        assert_ne!(Small::TYPE, Signed::TYPE);
    }
}
