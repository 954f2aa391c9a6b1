//! # ice-core
//!
//! Low-level building blocks shared by the ice crates.
//!
//! ## Modules
//!
//! - `queue` - Intrusive lock-free MPSC queue
//! - `spinlock` - Spin lock for tiny critical sections
//! - `kprint` - Kernel-style logging macros
//! - `env` - Environment variable helpers

pub mod queue;
pub mod spinlock;
pub mod kprint;
pub mod env;

pub use queue::{Node, Queue};
pub use spinlock::{SpinLock, SpinLockGuard};
pub use kprint::{set_log_level, LogLevel};
pub use env::{env_get, env_get_bool, env_get_duration_ms, env_get_opt, env_get_str, env_is_set};
