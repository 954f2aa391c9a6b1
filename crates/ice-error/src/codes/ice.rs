use crate::code::ErrorCodeType;
use crate::info::{Describe, ErrorInfo};

crate::error_code_type! {
    /// Failures raised by the runtime itself.
    pub enum Errc: u32 {
        Success = 0,
        /// A resource or facility is not available.
        NotAvailable = 1,
        NotImplemented = 2,
        NotInitialized = 3,
        /// A context was stopped while posted work was still outstanding.
        ContextNotEmpty = 4,
        /// A zero ("no error") value was used to build a failure.
        InvalidResultValue = 5,
        Unknown = 0x0FFF_FFFF,
    }
}

impl Errc {
    pub const fn as_str(self) -> &'static str {
        match self {
            Errc::Success => "success",
            Errc::NotAvailable => "not available",
            Errc::NotImplemented => "not implemented",
            Errc::NotInitialized => "not initialized",
            Errc::ContextNotEmpty => "context not empty",
            Errc::InvalidResultValue => "invalid result value",
            Errc::Unknown => "unknown error",
        }
    }
}

fn text(code: i32) -> String {
    match Errc::from_code(code) {
        Some(errc) => errc.as_str().to_string(),
        None => ErrorInfo::format(code),
    }
}

impl Describe for Errc {
    fn describe() -> ErrorInfo {
        ErrorInfo::new(Some("ice"), Some(text))
    }
}
