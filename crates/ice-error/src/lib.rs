//! # ice-error
//!
//! Zero-overhead, type-erased error codes.
//!
//! ## Design
//!
//! Any small integer-backed enum can be an error code type
//! ([`ErrorCodeType`]). Its identity is an [`ErrorType`]: a 32-bit FNV-1a
//! hash of the type's canonical name computed at compile time, so a new
//! error enum needs no registration and no central list.
//!
//! | Type              | Carries               | Size    |
//! |-------------------|-----------------------|---------|
//! | [`ErrorCode<E>`]  | code, type static     | 4 bytes |
//! | [`Error`]         | type id + code        | 8 bytes |
//! | [`Result<T>`]     | `T` or [`Error`]      | -       |
//!
//! Building, copying and comparing any of these is plain integer work.
//! Human-readable text lives in a separate registry ([`info`]) that is
//! consulted only when an error is displayed.
//!
//! ## Quick Start
//!
//! ```rust
//! use ice_error::{error_code_type, info, Error, Result};
//!
//! error_code_type! {
//!     pub enum ConfigErrc: u8 {
//!         Success = 0,
//!         MissingKey = 1,
//!     }
//! }
//!
//! fn port() -> Result<u16> {
//!     ConfigErrc::MissingKey.into()
//! }
//!
//! let r = port();
//! assert!(r.is_err());
//! assert_eq!(r, ConfigErrc::MissingKey);
//! assert_eq!(r.error(), Some(Error::from(ConfigErrc::MissingKey)));
//!
//! info::load_defaults();
//! ```

mod macros;

pub mod id;
pub mod code;
pub mod error;
pub mod info;
pub mod codes;
pub mod result;
mod convert;

pub use id::ErrorType;
pub use code::{ErrorCode, ErrorCodeType, Underlying};
pub use error::Error;
pub use info::{Describe, ErrorInfo, TextFn};
pub use codes::{Errc, Generic, System};
pub use result::Result;
