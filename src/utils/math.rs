//! Mathematical utility functions for report statistics
//!
//! Percentage helpers with zero-division handling.

/// Calculate percentage safely for u64 values, returning 0.0 if total is zero.
///
/// **Precision Note**: Large u64 values (>2^53) may lose precision when cast to f64.
/// This is acceptable for percentage display purposes.
///
/// # Examples
/// ```
/// use overseer_reports::utils::math::safe_percentage_u64;
///
/// assert_eq!(safe_percentage_u64(50, 100), 50.0);
/// assert_eq!(safe_percentage_u64(0, 100), 0.0);
/// assert_eq!(safe_percentage_u64(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage_u64(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Round a percentage to two decimal places for display and JSON output
#[inline]
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
