//! Built-in error code types.
//!
//! | Type        | Name      | Codes                                   |
//! |-------------|-----------|-----------------------------------------|
//! | [`Errc`]    | `ice`     | failures raised by the runtime itself   |
//! | [`Generic`] | `generic` | portable POSIX `errno` values           |
//! | [`System`]  | `system`  | raw OS error codes, open-ended          |
//!
//! Call [`load_defaults`](crate::info::load_defaults) to get readable text
//! for all three.

mod ice;
mod generic;
mod system;

pub use self::ice::Errc;
pub use self::generic::Generic;
pub use self::system::System;
