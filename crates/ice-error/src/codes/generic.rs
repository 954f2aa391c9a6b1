//! Portable `errno` values.
//!
//! The discriminants are the platform's own `errno` numbers, so a
//! [`Generic`] code can be handed to `io::Error::from_raw_os_error`
//! unchanged.

use crate::code::ErrorCodeType;
use crate::info::{Describe, ErrorInfo};

// ── Codes ─────────────────────────────────────────────────────────

crate::error_code_type! {
    /// POSIX error conditions, by `errno` value.
    pub enum Generic: i32 {
        Success = 0,

        // Process / permission
        OperationNotPermitted = libc::EPERM,
        NoSuchFileOrDirectory = libc::ENOENT,
        NoSuchProcess = libc::ESRCH,
        Interrupted = libc::EINTR,
        IoError = libc::EIO,
        NoSuchDeviceOrAddress = libc::ENXIO,
        ArgumentListTooLong = libc::E2BIG,
        ExecutableFormatError = libc::ENOEXEC,
        BadFileDescriptor = libc::EBADF,
        NoChildProcess = libc::ECHILD,
        PermissionDenied = libc::EACCES,
        BadAddress = libc::EFAULT,
        DeviceOrResourceBusy = libc::EBUSY,
        FileExists = libc::EEXIST,
        CrossDeviceLink = libc::EXDEV,
        NoSuchDevice = libc::ENODEV,
        NotADirectory = libc::ENOTDIR,
        IsADirectory = libc::EISDIR,
        InvalidArgument = libc::EINVAL,

        // Memory / resources
        ResourceUnavailableTryAgain = libc::EAGAIN,
        NotEnoughMemory = libc::ENOMEM,
        TooManyFilesOpenInSystem = libc::ENFILE,
        TooManyFilesOpen = libc::EMFILE,
        FileTooLarge = libc::EFBIG,
        NoSpaceOnDevice = libc::ENOSPC,
        ReadOnlyFileSystem = libc::EROFS,
        TooManyLinks = libc::EMLINK,
        BrokenPipe = libc::EPIPE,
        ArgumentOutOfDomain = libc::EDOM,
        ResultOutOfRange = libc::ERANGE,
        ResourceDeadlockWouldOccur = libc::EDEADLK,
        FilenameTooLong = libc::ENAMETOOLONG,
        NoLockAvailable = libc::ENOLCK,
        FunctionNotSupported = libc::ENOSYS,
        DirectoryNotEmpty = libc::ENOTEMPTY,
        TooManySymbolicLinkLevels = libc::ELOOP,
        NotSupported = libc::EOPNOTSUPP,

        // Networking
        AddressInUse = libc::EADDRINUSE,
        AddressNotAvailable = libc::EADDRNOTAVAIL,
        NetworkDown = libc::ENETDOWN,
        NetworkUnreachable = libc::ENETUNREACH,
        ConnectionAborted = libc::ECONNABORTED,
        ConnectionReset = libc::ECONNRESET,
        NoBufferSpace = libc::ENOBUFS,
        AlreadyConnected = libc::EISCONN,
        NotConnected = libc::ENOTCONN,
        TimedOut = libc::ETIMEDOUT,
        ConnectionRefused = libc::ECONNREFUSED,
        HostUnreachable = libc::EHOSTUNREACH,
        ConnectionAlreadyInProgress = libc::EALREADY,
        OperationInProgress = libc::EINPROGRESS,
        OperationCanceled = libc::ECANCELED,
    }
}

impl Generic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Generic::Success => "success",
            Generic::OperationNotPermitted => "operation not permitted",
            Generic::NoSuchFileOrDirectory => "no such file or directory",
            Generic::NoSuchProcess => "no such process",
            Generic::Interrupted => "interrupted",
            Generic::IoError => "io error",
            Generic::NoSuchDeviceOrAddress => "no such device or address",
            Generic::ArgumentListTooLong => "argument list too long",
            Generic::ExecutableFormatError => "executable format error",
            Generic::BadFileDescriptor => "bad file descriptor",
            Generic::NoChildProcess => "no child process",
            Generic::PermissionDenied => "permission denied",
            Generic::BadAddress => "bad address",
            Generic::DeviceOrResourceBusy => "device or resource busy",
            Generic::FileExists => "file exists",
            Generic::CrossDeviceLink => "cross device link",
            Generic::NoSuchDevice => "no such device",
            Generic::NotADirectory => "not a directory",
            Generic::IsADirectory => "is a directory",
            Generic::InvalidArgument => "invalid argument",
            Generic::ResourceUnavailableTryAgain => "resource unavailable try again",
            Generic::NotEnoughMemory => "not enough memory",
            Generic::TooManyFilesOpenInSystem => "too many files open in system",
            Generic::TooManyFilesOpen => "too many files open",
            Generic::FileTooLarge => "file too large",
            Generic::NoSpaceOnDevice => "no space on device",
            Generic::ReadOnlyFileSystem => "read only file system",
            Generic::TooManyLinks => "too many links",
            Generic::BrokenPipe => "broken pipe",
            Generic::ArgumentOutOfDomain => "argument out of domain",
            Generic::ResultOutOfRange => "result out of range",
            Generic::ResourceDeadlockWouldOccur => "resource deadlock would occur",
            Generic::FilenameTooLong => "filename too long",
            Generic::NoLockAvailable => "no lock available",
            Generic::FunctionNotSupported => "function not supported",
            Generic::DirectoryNotEmpty => "directory not empty",
            Generic::TooManySymbolicLinkLevels => "too many symbolic link levels",
            Generic::NotSupported => "not supported",
            Generic::AddressInUse => "address in use",
            Generic::AddressNotAvailable => "address not available",
            Generic::NetworkDown => "network down",
            Generic::NetworkUnreachable => "network unreachable",
            Generic::ConnectionAborted => "connection aborted",
            Generic::ConnectionReset => "connection reset",
            Generic::NoBufferSpace => "no buffer space",
            Generic::AlreadyConnected => "already connected",
            Generic::NotConnected => "not connected",
            Generic::TimedOut => "timed out",
            Generic::ConnectionRefused => "connection refused",
            Generic::HostUnreachable => "host unreachable",
            Generic::ConnectionAlreadyInProgress => "connection already in progress",
            Generic::OperationInProgress => "operation in progress",
            Generic::OperationCanceled => "operation canceled",
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────

fn text(code: i32) -> String {
    match Generic::from_code(code) {
        Some(errc) => errc.as_str().to_string(),
        None => ErrorInfo::format(code),
    }
}

impl Describe for Generic {
    fn describe() -> ErrorInfo {
        ErrorInfo::new(Some("generic"), Some(text))
    }
}
