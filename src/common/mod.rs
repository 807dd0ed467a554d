pub mod io;

/// Restore the default SIGPIPE action so `fhsort ... | head` exits quietly
/// instead of failing on a broken pipe. Call first thing in `main()`.
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// An I/O error message without Rust's " (os error N)" suffix.
pub fn io_error_msg(e: &std::io::Error) -> String {
    match e.raw_os_error() {
        Some(raw) => {
            let msg = std::io::Error::from_raw_os_error(raw).to_string();
            msg.replace(&format!(" (os error {})", raw), "")
        }
        None => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_msg_strips_os_code() {
        let e = std::io::Error::from_raw_os_error(libc::ENOENT);
        let msg = io_error_msg(&e);
        assert!(!msg.contains("os error"), "{}", msg);
        assert!(!msg.is_empty());
    }

    #[test]
    fn test_io_error_msg_custom() {
        let e = std::io::Error::other("bad input");
        assert_eq!(io_error_msg(&e), "bad input");
    }

    #[test]
    fn test_read_file_small_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.txt");
        std::fs::write(&path, b"3\n1\n2\n").unwrap();
        assert_eq!(&*io::read_file(&path).unwrap(), b"3\n1\n2\n");

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, b"").unwrap();
        assert!(io::read_file(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_read_file_large_is_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        let body = "12345\n".repeat(300_000);
        std::fs::write(&path, &body).unwrap();
        let data = io::read_file(&path).unwrap();
        assert_eq!(data.len(), body.len());
        assert_eq!(&data[..6], b"12345\n");
    }

    #[test]
    fn test_read_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(io::read_file(&dir.path().join("nope")).is_err());
    }
}
