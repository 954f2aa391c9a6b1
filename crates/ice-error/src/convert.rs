//! Conversions between [`Error`] and `std::io::Error`.

use std::io;

use crate::codes::{Errc, Generic, System};
use crate::error::Error;
use crate::ErrorCodeType;

// ── io::ErrorKind → Generic ───────────────────────────────────────

fn kind_code(kind: io::ErrorKind) -> Option<Generic> {
    let code = match kind {
        io::ErrorKind::NotFound => Generic::NoSuchFileOrDirectory,
        io::ErrorKind::PermissionDenied => Generic::PermissionDenied,
        io::ErrorKind::ConnectionRefused => Generic::ConnectionRefused,
        io::ErrorKind::ConnectionReset => Generic::ConnectionReset,
        io::ErrorKind::ConnectionAborted => Generic::ConnectionAborted,
        io::ErrorKind::NotConnected => Generic::NotConnected,
        io::ErrorKind::AddrInUse => Generic::AddressInUse,
        io::ErrorKind::AddrNotAvailable => Generic::AddressNotAvailable,
        io::ErrorKind::BrokenPipe => Generic::BrokenPipe,
        io::ErrorKind::AlreadyExists => Generic::FileExists,
        io::ErrorKind::WouldBlock => Generic::ResourceUnavailableTryAgain,
        io::ErrorKind::InvalidInput => Generic::InvalidArgument,
        io::ErrorKind::InvalidData => Generic::InvalidArgument,
        io::ErrorKind::TimedOut => Generic::TimedOut,
        io::ErrorKind::Interrupted => Generic::Interrupted,
        io::ErrorKind::Unsupported => Generic::NotSupported,
        io::ErrorKind::OutOfMemory => Generic::NotEnoughMemory,
        _ => return None,
    };
    Some(code)
}

// ── From<io::Error> ───────────────────────────────────────────────

impl From<io::Error> for Error {
    /// Raw OS errors keep their exact code as [`System`]; anything else is
    /// classified by kind into [`Generic`], or [`Errc::Unknown`].
    fn from(err: io::Error) -> Self {
        if let Some(code) = err.raw_os_error() {
            return Error::from(System(code));
        }
        match kind_code(err.kind()) {
            Some(code) => Error::from(code),
            None => Error::from(Errc::Unknown),
        }
    }
}

impl From<io::ErrorKind> for Error {
    fn from(kind: io::ErrorKind) -> Self {
        match kind_code(kind) {
            Some(code) => Error::from(code),
            None => Error::from(Errc::Unknown),
        }
    }
}

// ── Into<io::Error> ───────────────────────────────────────────────

impl From<Error> for io::Error {
    /// `System` and `Generic` codes become raw OS errors (they share the
    /// `errno` space); other types are wrapped.
    fn from(err: Error) -> Self {
        let ty = err.error_type();
        if ty == System::TYPE || ty == Generic::TYPE {
            return io::Error::from_raw_os_error(err.code());
        }
        io::Error::new(io::ErrorKind::Other, err)
    }
}
