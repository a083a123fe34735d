//! EINTR-tolerant wrapper for raw libc calls.

use std::io;

/// Return types of the raw calls this crate makes; -1 is the failure
/// sentinel for all of them.
pub(crate) trait SysReturn: Copy {
    fn is_failure(self) -> bool;
}

impl SysReturn for libc::c_int {
    fn is_failure(self) -> bool {
        self == -1
    }
}

impl SysReturn for isize {
    fn is_failure(self) -> bool {
        self == -1
    }
}

/// Repeats `call` while it fails with `EINTR`.
///
/// A signal landing during a blocking call is not a substantive outcome;
/// the call restarts until it returns a value or fails for a real reason.
pub(crate) fn retry_eintr<T, F>(mut call: F) -> io::Result<T>
where
    T: SysReturn,
    F: FnMut() -> T,
{
    loop {
        let ret = call();
        if !ret.is_failure() {
            return Ok(ret);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_value_passes_through() {
        let value: libc::c_int = retry_eintr(|| 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_zero_is_not_a_failure() {
        let value: isize = retry_eintr(|| 0).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn test_substantive_failure_is_not_retried() {
        let mut calls = 0;
        // close(-1) fails with EBADF and leaves errno set for real.
        let err = retry_eintr(|| {
            calls += 1;
            unsafe { libc::close(-1) }
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[test]
    fn test_eintr_is_retried_until_a_real_outcome() {
        let mut calls = 0;
        let value: libc::c_int = retry_eintr(|| {
            calls += 1;
            if calls < 3 {
                unsafe { *libc::__errno_location() = libc::EINTR };
                -1
            } else {
                0
            }
        })
        .unwrap();
        assert_eq!(value, 0);
        assert_eq!(calls, 3);
    }
}
