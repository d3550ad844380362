//! Numeric helpers for progress labels.
//!
//! These only format values for display; stored unit counts are never
//! rounded or rescaled.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with base-1024 units.
///
/// Bytes are shown as a whole number, larger units with one decimal.
///
/// ```rust
/// use ezpl::progress::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(512_000), "500.0 KB");
/// assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Completion fraction in `[0.0, 1.0]`, or `None` without a positive total.
pub fn fraction(completed: u64, total: Option<u64>) -> Option<f64> {
    match total {
        Some(total) if total > 0 => Some((completed.min(total) as f64) / (total as f64)),
        _ => None,
    }
}

/// Percentage text rounded for display, e.g. `"75%"`.
pub fn percent_text(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}
