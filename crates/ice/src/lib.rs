//! # ice - cooperative single-consumer runtime
//!
//! Lets many threads hand ready-to-resume work to one consumer thread
//! without locks, and lets chains of fallible calls propagate errors
//! without branching at every call site.
//!
//! ## Features
//!
//! - **Lock-free handoff**: intrusive MPSC queue, one atomic swap per enqueue
//! - **Single consumer**: [`Context::run`] resumes queued tasks one at a time
//! - **Type-erased errors**: 8-byte [`Error`] built from any error enum
//! - **Short-circuiting results**: `result.await?` inside a suspendable body
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use ice::{Context, Task};
//!
//! let ctx = Arc::new(Context::new());
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..3 {
//!     let hits = Arc::clone(&hits);
//!     ctx.post(move || {
//!         hits.fetch_add(1, Ordering::SeqCst);
//!     });
//! }
//!
//! let c = Arc::clone(&ctx);
//! Task::spawn(async move {
//!     c.schedule().await;
//!     Ok(())
//! });
//!
//! assert!(ctx.run().is_ok());
//! assert_eq!(hits.load(Ordering::SeqCst), 3);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      User Code                              │
//! │       Task::spawn, suspendable, ctx.post, ctx.schedule      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┴───────────────────┐
//!          ▼                                       ▼
//! ┌─────────────────────────┐         ┌─────────────────────────┐
//! │     ice-runtime         │         │       ice-error         │
//! │  Context, Task, wakers  │ ──────► │  Error, Result, codes   │
//! └─────────────────────────┘         └─────────────────────────┘
//!          │
//!          ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ice-core                               │
//! │          MPSC queue, spin lock, kprint, env helpers         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// Re-export core types
pub use ice_core::{Node, Queue, SpinLock, SpinLockGuard};

// Re-export kprint macros for debug logging
pub use ice_core::{kdebug, kerror, kinfo, klog, kprint, kprintln, ktrace, kwarn};
pub use ice_core::kprint::{init as init_logging, set_flush_enabled, set_log_level, LogLevel};

// Re-export env utilities
pub use ice_core::env::{env_get, env_get_bool, env_get_duration_ms, env_get_opt, env_get_str, env_is_set};

// Re-export error types
pub use ice_error::{
    error_code_type,
    info,
    Describe,
    Errc,
    Error,
    ErrorCode,
    ErrorCodeType,
    ErrorInfo,
    ErrorType,
    Generic,
    Result,
    System,
};

// Re-export runtime types
pub use ice_runtime::{
    noop_waker,
    poll_once,
    suspendable,
    Context,
    ContextConfig,
    Schedule,
    Step,
    Suspendable,
    Task,
    Work,
};
