//! Wall-clock and memory reporting helpers.

use std::time::Duration;

/// Formats a duration as a compact human string: `431ms`, `12.4s`, `3m 07s`,
/// `1h 02m`.
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else if secs < 3600.0 {
        format!("{}m {:02}s", d.as_secs() / 60, d.as_secs() % 60)
    } else {
        format!("{}h {:02}m", d.as_secs() / 3600, (d.as_secs() % 3600) / 60)
    }
}

/// Returns peak resident set size in bytes, or None if unavailable.
#[must_use]
pub fn peak_memory_bytes() -> Option<u64> {
    #[cfg(any(target_os = "macos", target_os = "linux"))]
    {
        use std::mem::MaybeUninit;
        let mut usage = MaybeUninit::<libc::rusage>::uninit();
        // SAFETY: RUSAGE_SELF with a properly aligned, writable rusage
        // pointer is well-defined; MaybeUninit provides both.
        let ret = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if ret == 0 {
            // SAFETY: a zero return means the struct was fully written.
            let usage = unsafe { usage.assume_init() };
            // ru_maxrss is bytes on macOS, kilobytes on Linux.
            let bytes = if cfg!(target_os = "macos") {
                usage.ru_maxrss as u64
            } else {
                usage.ru_maxrss as u64 * 1024
            };
            return Some(bytes);
        }
    }
    None
}

/// Formats a byte count with a binary-unit suffix.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1 << 10;
    const MB: u64 = 1 << 20;
    const GB: u64 = 1 << 30;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_scales_units() {
        assert_eq!(format_elapsed(Duration::from_millis(431)), "431ms");
        assert_eq!(format_elapsed(Duration::from_millis(12_400)), "12.4s");
        assert_eq!(format_elapsed(Duration::from_secs(187)), "3m 07s");
        assert_eq!(format_elapsed(Duration::from_secs(3720)), "1h 02m");
    }

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn peak_memory_returns_value() {
        if cfg!(any(target_os = "macos", target_os = "linux")) {
            let mem = peak_memory_bytes();
            assert!(mem.is_some());
            assert!(mem.unwrap() > 0);
        }
    }
}
