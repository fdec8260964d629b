/// Numeric conversion helpers.
///
/// Safe conversions between `i64` and `f64` (loop counters, truncated loop
/// bounds) and the float formatting used when numbers are displayed.
pub mod num;
