//! Error info registry
//!
//! A process-wide table, keyed by [`ErrorType`], of display names and
//! `code -> text` formatters. It exists purely for diagnostics: building,
//! copying and comparing errors never touches it.
//!
//! Entries are added and removed by explicit calls ([`load`], [`unload`],
//! [`load_defaults`]); nothing registers itself. Types without an entry
//! format as 8 hex digits.
//!
//! ```
//! use ice_error::{info, Errc, Error};
//!
//! info::load::<Errc>();
//! assert_eq!(Error::from(Errc::NotImplemented).to_string(), "not implemented");
//! ```

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::code::ErrorCodeType;
use crate::codes::{Errc, Generic, System};
use crate::id::ErrorType;

/// Renders one code of a registered type.
pub type TextFn = fn(i32) -> String;

/// Display metadata for one error type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorInfo {
    pub name: Option<&'static str>,
    pub text: Option<TextFn>,
}

/// Implemented by error code types that ship their own display metadata.
pub trait Describe: ErrorCodeType {
    fn describe() -> ErrorInfo;
}

struct Registry {
    names: BTreeMap<ErrorType, &'static str>,
    texts: BTreeMap<ErrorType, TextFn>,
}

static REGISTRY: Mutex<Registry> = Mutex::new(Registry {
    names: BTreeMap::new(),
    texts: BTreeMap::new(),
});

// Formatting must not fail, so a panic while holding the lock does not
// disable the registry.
fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ErrorInfo {
    pub const fn new(name: Option<&'static str>, text: Option<TextFn>) -> Self {
        ErrorInfo { name, text }
    }

    /// Set (or with `None`, remove) the display name of `ty`.
    pub fn set_name(ty: ErrorType, name: Option<&'static str>) {
        let mut reg = registry();
        match name {
            Some(name) => {
                reg.names.insert(ty, name);
            }
            None => {
                reg.names.remove(&ty);
            }
        }
    }

    /// Set (or with `None`, remove) the text formatter of `ty`.
    pub fn set_text(ty: ErrorType, text: Option<TextFn>) {
        let mut reg = registry();
        match text {
            Some(text) => {
                reg.texts.insert(ty, text);
            }
            None => {
                reg.texts.remove(&ty);
            }
        }
    }

    pub fn name(ty: ErrorType) -> Option<&'static str> {
        registry().names.get(&ty).copied()
    }

    /// Render `code` of `ty` with its formatter, or as 8 hex digits.
    pub fn text(ty: ErrorType, code: i32) -> String {
        // The formatter runs unlocked; it may itself format errors.
        let text = registry().texts.get(&ty).copied();
        match text {
            Some(text) => text(code),
            None => format!("{:08X}", code as u32),
        }
    }

    /// Fallback wording for formatters that don't recognize a code.
    pub fn format(code: i32) -> String {
        format!("error code {:08X}", code as u32)
    }
}

/// Register `E`'s name and formatter, replacing any previous entry.
pub fn load<E: Describe>() {
    let info = E::describe();
    ErrorInfo::set_name(E::TYPE, info.name);
    ErrorInfo::set_text(E::TYPE, info.text);
}

/// Remove whatever is registered for `E`.
pub fn unload<E: ErrorCodeType>() {
    ErrorInfo::set_name(E::TYPE, None);
    ErrorInfo::set_text(E::TYPE, None);
}

/// Register the built-in code types: [`Errc`], [`Generic`], [`System`].
pub fn load_defaults() {
    load::<Errc>();
    load::<Generic>();
    load::<System>();
}

pub fn unload_defaults() {
    unload::<Errc>();
    unload::<Generic>();
    unload::<System>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ErrorCode};

    // The registry is global and tests run in parallel: every test here
    // works on its own code type.

    crate::error_code_type! {
        enum Loaded: u8 {
            Ok = 0,
            Broken = 1,
            Missing = 2,
        }
    }

    impl Describe for Loaded {
        fn describe() -> ErrorInfo {
            ErrorInfo::new(Some("loaded"), Some(loaded_text))
        }
    }

    fn loaded_text(code: i32) -> String {
        match Loaded::from_code(code) {
            Some(Loaded::Ok) => "ok".into(),
            Some(Loaded::Broken) => "broken".into(),
            Some(Loaded::Missing) => "missing".into(),
            None => ErrorInfo::format(code),
        }
    }

    crate::error_code_type! {
        enum Named: i32 {
            Ok = 0,
            Oops = 3,
        }
    }

    crate::error_code_type! {
        enum Bare: i16 {
            Ok = 0,
            Bad = -1,
        }
    }

    #[test]
    fn load_then_unload_restores_fallback() {
        let before = Error::from(Loaded::Broken).to_string();
        let before_type = Loaded::TYPE.to_string();
        assert_eq!(before, "00000001");

        load::<Loaded>();
        assert_eq!(Error::from(Loaded::Broken).to_string(), "broken");
        assert_eq!(ErrorCode::new(Loaded::Missing).to_string(), "missing");
        assert_eq!(Error::new(Loaded::TYPE, 9).to_string(), "error code 00000009");
        assert_eq!(Loaded::TYPE.to_string(), "loaded");

        unload::<Loaded>();
        assert_eq!(Error::from(Loaded::Broken).to_string(), before);
        assert_eq!(Loaded::TYPE.to_string(), before_type);
        assert!(ErrorInfo::name(Loaded::TYPE).is_none());
    }

    #[test]
    fn name_and_text_are_independent() {
        ErrorInfo::set_name(Named::TYPE, Some("named"));
        assert_eq!(ErrorInfo::name(Named::TYPE), Some("named"));
        assert_eq!(ErrorInfo::text(Named::TYPE, 3), "00000003");

        ErrorInfo::set_name(Named::TYPE, Some("renamed"));
        assert_eq!(Named::TYPE.to_string(), "renamed");

        ErrorInfo::set_name(Named::TYPE, None);
        assert_eq!(ErrorInfo::name(Named::TYPE), None);
    }

    #[test]
    fn unregistered_formats_as_hex() {
        assert_eq!(Error::from(Bare::Bad).to_string(), "FFFFFFFF");
        assert_eq!(ErrorInfo::format(-1), "error code FFFFFFFF");
        assert_eq!(ErrorInfo::format(0x2A), "error code 0000002A");
    }

    #[test]
    fn defaults_describe_builtin_types() {
        load_defaults();
        assert_eq!(ErrorInfo::name(Errc::TYPE), Some("ice"));
        assert_eq!(ErrorInfo::name(Generic::TYPE), Some("generic"));
        assert_eq!(ErrorInfo::name(System::TYPE), Some("system"));
        assert_eq!(
            Error::from(Errc::ContextNotEmpty).to_string(),
            "context not empty"
        );
    }
}
