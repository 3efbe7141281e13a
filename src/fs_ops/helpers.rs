//! I/O error hints.
//!
//! Maps an io::Error to a short, actionable hint for logs. Raw OS codes are checked
//! first (platform-specific), then the portable ErrorKind.
//!
//! Usage:
//!   warn!(error = %e, hint = io_hint(&e).unwrap_or(""), "rename failed");

use std::io;

#[cfg(unix)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
        libc::EBUSY => Some("resource busy; ensure no other process is writing"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted"),
        libc::EEXIST => Some("already exists"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE | libc::ENFILE => Some("too many open files"),
        _ => None,
    }
}

#[cfg(windows)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    // Common Win32 errors
    match code {
        5 => Some("access denied; check permissions"),        // ERROR_ACCESS_DENIED
        17 => Some("not same device; cross-filesystem move"), // ERROR_NOT_SAME_DEVICE
        32 => Some("sharing violation; file is in use"),      // ERROR_SHARING_VIOLATION
        2 | 3 => Some("path not found; it may have been moved or deleted"),
        80 | 183 => Some("already exists"),
        112 => Some("insufficient disk space"),
        19 => Some("write protected / read-only media"),
        206 => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn hint_for_os_code(_code: i32) -> Option<&'static str> {
    None
}

/// Actionable hint for `e`, if one is known.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(hint) = e.raw_os_error().and_then(hint_for_os_code) {
        return Some(hint);
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy; retry after the current write finishes")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback() {
        let e = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(io_hint(&e).unwrap().contains("permission"));
        let e = io::Error::other("boom");
        assert!(io_hint(&e).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn cross_device_code() {
        let e = io::Error::from_raw_os_error(libc::EXDEV);
        assert!(io_hint(&e).unwrap().contains("cross-filesystem"));
    }
}
