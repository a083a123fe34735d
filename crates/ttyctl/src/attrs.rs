//! Immutable snapshots of a terminal's line-discipline attributes.

use std::fmt;
use std::mem::MaybeUninit;
use std::os::unix::io::RawFd;

use tracing::trace;

use crate::error::TtyError;
use crate::sys::retry_eintr;

/// A point-in-time copy of a terminal's attribute struct.
///
/// Captured fresh from the OS on every query, never cached. Derivations
/// flip only the bits they name; every other field rides through a
/// capture/derive/commit cycle unchanged. The capture-to-commit window is
/// not atomic across threads: two overlapping cycles can interleave, and
/// callers needing compound atomicity must serialize externally.
#[derive(Clone, Copy)]
pub struct TermAttrs {
    raw: libc::termios,
}

impl TermAttrs {
    /// Reads the current attributes of the terminal behind `fd`.
    pub fn capture(fd: RawFd) -> Result<Self, TtyError> {
        let mut raw = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr writes a full termios through the pointer on
        // success and touches nothing on failure.
        retry_eintr(|| unsafe { libc::tcgetattr(fd, raw.as_mut_ptr()) })
            .map_err(TtyError::QueryAttrs)?;
        trace!(fd, "captured terminal attributes");
        // SAFETY: tcgetattr returned 0, so `raw` is initialized.
        Ok(Self {
            raw: unsafe { raw.assume_init() },
        })
    }

    /// Whether typed characters are echoed back to the display.
    pub fn echo(&self) -> bool {
        self.raw.c_lflag & libc::ECHO != 0
    }

    /// Whether canonical (line-buffered) input mode is active.
    pub fn canonical(&self) -> bool {
        self.raw.c_lflag & libc::ICANON != 0
    }

    /// Copy with `ECHO` and `ECHONL` both set or both cleared.
    ///
    /// The two move together so that disabling echo also suppresses the
    /// newline echoed in canonical mode.
    #[must_use]
    pub fn with_echo(mut self, enabled: bool) -> Self {
        if enabled {
            self.raw.c_lflag |= libc::ECHO | libc::ECHONL;
        } else {
            self.raw.c_lflag &= !(libc::ECHO | libc::ECHONL);
        }
        self
    }

    /// Copy with `ICANON` set or cleared; no other flag moves.
    #[must_use]
    pub fn with_canonical(mut self, enabled: bool) -> Self {
        if enabled {
            self.raw.c_lflag |= libc::ICANON;
        } else {
            self.raw.c_lflag &= !libc::ICANON;
        }
        self
    }

    /// Applies the snapshot to `fd` immediately (`TCSANOW`): no wait for
    /// pending output to drain, no flush of unread input.
    ///
    /// On failure the terminal keeps whatever state the OS left it in.
    pub fn commit(&self, fd: RawFd) -> Result<(), TtyError> {
        // SAFETY: `self.raw` is a valid termios obtained from tcgetattr.
        retry_eintr(|| unsafe { libc::tcsetattr(fd, libc::TCSANOW, &self.raw) })
            .map_err(TtyError::ApplyAttrs)?;
        trace!(fd, "committed terminal attributes");
        Ok(())
    }
}

// libc::termios has no Debug without extra_traits; show the two bits this
// crate cares about.
impl fmt::Debug for TermAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermAttrs")
            .field("echo", &self.echo())
            .field("canonical", &self.canonical())
            .finish_non_exhaustive()
    }
}
