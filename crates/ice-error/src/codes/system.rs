use std::io;

use crate::code::ErrorCodeType;
use crate::info::{Describe, ErrorInfo};

/// A raw OS error code, as returned by `io::Error::raw_os_error`.
///
/// Unlike the enum-backed code types every `i32` is a valid `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct System(pub i32);

impl System {
    /// The calling thread's last OS error.
    pub fn last() -> Self {
        System(io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }
}

impl ErrorCodeType for System {
    type Repr = i32;

    const NAME: &'static str = concat!(module_path!(), "::System");

    #[inline]
    fn into_repr(self) -> i32 {
        self.0
    }

    #[inline]
    fn from_repr(repr: i32) -> Option<Self> {
        Some(System(repr))
    }
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn text(code: i32) -> String {
            use nix::errno::Errno;

            match Errno::from_raw(code) {
                Errno::UnknownErrno => ErrorInfo::format(code),
                errno => errno.desc().to_string(),
            }
        }
    } else {
        fn text(code: i32) -> String {
            io::Error::from_raw_os_error(code).to_string()
        }
    }
}

impl Describe for System {
    fn describe() -> ErrorInfo {
        ErrorInfo::new(Some("system"), Some(text))
    }
}
