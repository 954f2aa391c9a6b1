use core::fmt;

const FNV_OFFSET: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a, usable in const context.
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Opaque identifier of an error code type.
///
/// Derived at compile time from the type's canonical name
/// (`module::path::Name`), so no registration step is needed and the value
/// is stable for a given build. Two unrelated types may collide; nothing
/// checks for that at runtime.
///
/// | Value        | Meaning                     |
/// |--------------|-----------------------------|
/// | `0`          | success, no type            |
/// | `0xFFFFFFFF` | unknown                     |
/// | other        | hash of a type name         |
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct ErrorType(u32);

impl ErrorType {
    pub const SUCCESS: ErrorType = ErrorType(0);
    pub const UNKNOWN: ErrorType = ErrorType(u32::MAX);

    /// Hash a canonical type name.
    ///
    /// Fails const evaluation if the name hashes to one of the reserved
    /// values.
    pub const fn from_name(name: &str) -> Self {
        let hash = fnv1a(name.as_bytes());
        assert!(
            hash != 0 && hash != u32::MAX,
            "error type name hashes to a reserved value"
        );
        ErrorType(hash)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ErrorType(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::info::ErrorInfo::name(*self) {
            Some(name) => write!(f, "{}({:08X})", name, self.0),
            None => write!(f, "ErrorType({:08X})", self.0),
        }
    }
}

/// The registered name, or the id as 8 hex digits.
impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match crate::info::ErrorInfo::name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "{:08X}", self.0),
        }
    }
}
