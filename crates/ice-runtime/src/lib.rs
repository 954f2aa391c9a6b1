//! # ice-runtime
//!
//! Cooperative single-consumer runtime for the ice crates.
//!
//! This crate provides:
//! - [`Context`]: run loop that resumes queued tasks on one thread
//! - [`Task`]: fire-and-forget top-level suspendable body
//! - [`suspendable`]: adapter for `async` bodies returning `Result<T, Error>`
//! - Raw wakers ([`noop_waker`], [`poll_once`])
//!
//! There is no thread pool and no work stealing. Producers on any thread
//! enqueue resumptions; the thread inside [`Context::run`] executes them
//! one at a time.

pub mod config;
pub mod context;
pub mod suspend;
pub mod task;
pub mod waker;

pub use config::ContextConfig;
pub use context::{Context, Schedule, Work};
pub use suspend::{suspendable, Step, Suspendable};
pub use task::Task;
pub use waker::{noop_waker, poll_once};
