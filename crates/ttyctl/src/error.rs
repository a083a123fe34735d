//! Failure classes for terminal-control operations.
//!
//! Every variant that wraps an OS failure carries the `std::io::Error`
//! captured at the failed call site, so callers can match on
//! `raw_os_error()` and decide whether a failure is expected (a redirected
//! stream reporting `ENOTTY`) or substantive.

use std::io;

use thiserror::Error;

/// Errors reported by [`Terminal`](crate::Terminal) operations.
#[derive(Error, Debug)]
pub enum TtyError {
    #[error("Failed to read from terminal: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to query terminal attributes: {0}")]
    QueryAttrs(#[source] io::Error),
    #[error("Failed to apply terminal attributes: {0}")]
    ApplyAttrs(#[source] io::Error),
    #[error("Failed to query terminal window size: {0}")]
    QueryWinsize(#[source] io::Error),
    #[error("Descriptor reports no usable terminal geometry")]
    NoGeometry,
}

impl TtyError {
    /// Returns whether the failure means the descriptor is simply not
    /// connected to a usable terminal device.
    ///
    /// Callers probing a possibly-redirected stream treat this as an
    /// ordinary negative answer rather than an I/O problem.
    pub fn is_not_a_tty(&self) -> bool {
        match self {
            TtyError::NoGeometry => true,
            TtyError::Read(err)
            | TtyError::QueryAttrs(err)
            | TtyError::ApplyAttrs(err)
            | TtyError::QueryWinsize(err) => err.raw_os_error() == Some(libc::ENOTTY),
        }
    }

    /// Returns the raw OS error code behind this failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            TtyError::NoGeometry => None,
            TtyError::Read(err)
            | TtyError::QueryAttrs(err)
            | TtyError::ApplyAttrs(err)
            | TtyError::QueryWinsize(err) => err.raw_os_error(),
        }
    }
}
