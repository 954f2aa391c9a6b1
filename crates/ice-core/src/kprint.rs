//! Kernel-style logging macros
//!
//! Leveled, line-atomic output to stderr in the manner of `printk`.
//!
//! # Environment Variables
//!
//! - `ICE_LOG_LEVEL=<level>` - `off|error|warn|info|debug|trace` or `0`-`5`
//! - `ICE_FLUSH_EPRINT=1` - flush stderr after every line (crash debugging)
//! - `ICE_LOG_TIME=1` - prefix lines with seconds since the first log call
//!
//! # Usage
//!
//! ```ignore
//! use ice_core::{kdebug, kerror, kinfo};
//!
//! kinfo!("context started");
//! kdebug!("resumed {} items", n);
//! kerror!("unhandled {} error {}: {}", ty, code, text);
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use crate::env::env_get_bool;

/// Log levels, least verbose first.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Values above 5 saturate to `Trace`.
    pub fn from_u8(v: u8) -> Self {
        Self::ALL[usize::from(v.min(5))]
    }

    /// Parse a level name or digit; `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return (n <= 5).then(|| Self::from_u8(n));
        }
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s))
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

static FLUSH_ENABLED: AtomicBool = AtomicBool::new(false);
static TIME_ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Read the logging environment once.
///
/// Runs implicitly on the first log call; call it early for a
/// deterministic time base.
pub fn init() {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    EPOCH.get_or_init(Instant::now);

    FLUSH_ENABLED.store(env_get_bool("ICE_FLUSH_EPRINT", false), Ordering::Relaxed);
    TIME_ENABLED.store(env_get_bool("ICE_LOG_TIME", false), Ordering::Relaxed);

    if let Ok(val) = std::env::var("ICE_LOG_LEVEL") {
        let level = LogLevel::parse(&val).unwrap_or(LogLevel::Info);
        LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    }
}

#[inline]
fn ensure_init() {
    if !INITIALIZED.load(Ordering::Relaxed) {
        init();
    }
}

#[inline]
pub fn flush_enabled() -> bool {
    ensure_init();
    FLUSH_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn log_level() -> LogLevel {
    ensure_init();
    LogLevel::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Override `ICE_LOG_LEVEL`.
pub fn set_log_level(level: LogLevel) {
    ensure_init();
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn set_flush_enabled(enabled: bool) {
    ensure_init();
    FLUSH_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level <= log_level()
}

enum Line {
    Raw,
    Newline,
    Leveled(LogLevel),
}

fn emit(line: Line, args: std::fmt::Arguments<'_>) {
    let mut out = std::io::stderr().lock();
    if let Line::Leveled(level) = line {
        if TIME_ENABLED.load(Ordering::Relaxed) {
            let secs = EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64();
            let _ = write!(out, "[{:>12.6}] ", secs);
        }
        let _ = write!(out, "[{:<5}] ", level.label());
    }
    let _ = out.write_fmt(args);
    if !matches!(line, Line::Raw) {
        let _ = out.write_all(b"\n");
    }
    if flush_enabled() {
        let _ = out.flush();
    }
}

#[doc(hidden)]
pub fn _kprint_impl(args: std::fmt::Arguments<'_>) {
    emit(Line::Raw, args);
}

#[doc(hidden)]
pub fn _kprintln_impl(args: std::fmt::Arguments<'_>) {
    emit(Line::Newline, args);
}

#[doc(hidden)]
pub fn _klog_impl(level: LogLevel, args: std::fmt::Arguments<'_>) {
    if level_enabled(level) {
        emit(Line::Leveled(level), args);
    }
}

// ============================================================================
// Public Macros
// ============================================================================

/// `eprint!` with optional auto-flush.
#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        $crate::kprint::_kprint_impl(format_args!($($arg)*))
    };
}

/// `eprintln!` with optional auto-flush.
#[macro_export]
macro_rules! kprintln {
    () => {
        $crate::kprint::_kprintln_impl(format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::kprint::_kprintln_impl(format_args!($($arg)*))
    };
}

/// Log one line at `$level` (a [`LogLevel`](crate::kprint::LogLevel) variant).
///
/// Arguments are not evaluated when the level is disabled.
#[macro_export]
macro_rules! klog {
    ($level:ident, $($arg:tt)*) => {
        if $crate::kprint::level_enabled($crate::kprint::LogLevel::$level) {
            $crate::kprint::_klog_impl(
                $crate::kprint::LogLevel::$level,
                format_args!($($arg)*),
            )
        }
    };
}

#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => { $crate::klog!(Error, $($arg)*) };
}

#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => { $crate::klog!(Warn, $($arg)*) };
}

#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => { $crate::klog!(Info, $($arg)*) };
}

#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => { $crate::klog!(Debug, $($arg)*) };
}

#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => { $crate::klog!(Trace, $($arg)*) };
}

// ============================================================================
// Tests
// ============================================================================
