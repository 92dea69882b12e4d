//! Conversions from stored integers to domain units.

/// Stored elevation meaning "no value".
pub const NO_ELEVATION: i32 = -999_999_999;

/// Convert a stored coordinate (degrees × 10⁷) to degrees.
pub fn coordinate(raw: i32) -> f64 {
    raw as f64 / 10_000_000.0
}

/// Convert a stored elevation (millimeters) to meters.
///
/// The "no value" marker becomes `0.0`.
pub fn elevation(raw: i32) -> f64 {
    if raw == NO_ELEVATION {
        0.0
    } else {
        raw as f64 / 1000.0
    }
}

/// Convert a stored timestamp (epoch milliseconds) to epoch seconds.
///
/// Zero means no timestamp was recorded. Division truncates toward zero.
pub fn timestamp(raw: i64) -> Option<i64> {
    (raw != 0).then_some(raw / 1000)
}
