// ── Central error type ────────────────────────────────────────────────────────
//
// Most window operations are fire-and-forget requests to the OS and report
// nothing.  Only calls whose output the caller consumes (`get_title`,
// `run_app`) and configuration loading return `error::Result<T>`.

use thiserror::Error;

/// Every error that native-frame can produce.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value).
        code: u32,
    },

    /// A native string object could not be decoded as UTF-8 / UTF-16.
    #[error("cannot decode native string returned by {0}")]
    StringConversion(&'static str),

    /// The operation has no implementation on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// Reading a window configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A window configuration file is not valid JSON for `WindowConfig`.
    #[error("invalid window configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrameError>;
