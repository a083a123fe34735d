//! Non-owning terminal handle and its operations.

use std::os::unix::io::RawFd;

use tracing::{debug, trace};

use crate::attrs::TermAttrs;
use crate::error::TtyError;
use crate::sys::retry_eintr;

/// Terminal window dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
}

/// Handle to a descriptor that may be connected to a terminal device.
///
/// The handle owns no state, holds no lock and never closes the
/// descriptor; every operation is a fresh, synchronous OS call that may
/// block the calling thread. Concurrent `set_*` calls from different
/// threads can interleave their read-modify-apply cycles, so callers
/// needing atomic compound changes serialize externally.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    fd: RawFd,
}

impl Terminal {
    /// Handle on the process's standard input.
    pub fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }

    /// Handle on the process's standard output.
    pub fn stdout() -> Self {
        Self {
            fd: libc::STDOUT_FILENO,
        }
    }

    /// Handle on an arbitrary open descriptor.
    ///
    /// The caller keeps the descriptor open for as long as the handle is
    /// used.
    pub fn from_fd(fd: RawFd) -> Self {
        Self { fd }
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }

    /// Reads one byte, blocking until a byte arrives, the stream ends or
    /// the OS reports an error.
    ///
    /// `Ok(None)` is end-of-stream and never a failure; an error is
    /// reported only when the read itself fails. A signal interrupting
    /// the wait restarts the read transparently.
    pub fn read_byte(&self) -> Result<Option<u8>, TtyError> {
        let mut byte = 0u8;
        // SAFETY: the buffer is one valid writable byte.
        let n = retry_eintr(|| unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) })
            .map_err(TtyError::Read)?;
        if n == 0 {
            trace!(fd = self.fd, "end of input stream");
            return Ok(None);
        }
        Ok(Some(byte))
    }

    /// Whether the terminal echoes typed characters.
    pub fn echo(&self) -> Result<bool, TtyError> {
        Ok(TermAttrs::capture(self.fd)?.echo())
    }

    /// Turns character echo on or off, applying immediately.
    ///
    /// Echo and newline echo move together; no other attribute changes.
    /// If the apply fails the terminal keeps whatever state the OS left
    /// it in.
    pub fn set_echo(&self, enabled: bool) -> Result<(), TtyError> {
        let attrs = TermAttrs::capture(self.fd)?;
        if attrs.echo() != enabled {
            debug!(fd = self.fd, enabled, "changing echo mode");
        }
        attrs.with_echo(enabled).commit(self.fd)
    }

    /// Whether canonical (line-buffered) input mode is active.
    pub fn line_mode(&self) -> Result<bool, TtyError> {
        Ok(TermAttrs::capture(self.fd)?.canonical())
    }

    /// Turns canonical (line-buffered) mode on or off, applying
    /// immediately. Same read-modify-apply contract as [`set_echo`].
    ///
    /// [`set_echo`]: Terminal::set_echo
    pub fn set_line_mode(&self, enabled: bool) -> Result<(), TtyError> {
        let attrs = TermAttrs::capture(self.fd)?;
        if attrs.canonical() != enabled {
            debug!(fd = self.fd, enabled, "changing line mode");
        }
        attrs.with_canonical(enabled).commit(self.fd)
    }

    /// Queries the window size of the descriptor's terminal.
    ///
    /// A descriptor that answers the query but reports zero columns and
    /// zero rows (typically a redirected stream) is not a usable terminal
    /// and yields [`TtyError::NoGeometry`], never a zero-size success.
    /// Pixel dimensions reported by the OS are ignored.
    pub fn window_size(&self) -> Result<WindowSize, TtyError> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        // SAFETY: TIOCGWINSZ writes a winsize through the pointer.
        retry_eintr(|| unsafe { libc::ioctl(self.fd, libc::TIOCGWINSZ, &mut ws) })
            .map_err(TtyError::QueryWinsize)?;
        if ws.ws_col == 0 && ws.ws_row == 0 {
            return Err(TtyError::NoGeometry);
        }
        trace!(
            fd = self.fd,
            cols = ws.ws_col,
            rows = ws.ws_row,
            "queried window size"
        );
        Ok(WindowSize {
            cols: ws.ws_col,
            rows: ws.ws_row,
        })
    }
}
