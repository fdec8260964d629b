use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use ram::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Truncates an `f64` toward zero and converts it to `i64`.
///
/// Loop bounds go through this: `2.9` becomes `2` and `-1.5` becomes `-1`.
/// Non-finite values and values outside the `i64` range are rejected rather
/// than saturated.
///
/// ## Errors
/// Returns `RuntimeError::InvalidLoopBounds` for NaN, infinities and values
/// that do not fit in an `i64`.
///
/// ## Example
/// ```
/// use ram::{error::RuntimeError, util::num::f64_to_i64_truncated};
///
/// assert_eq!(f64_to_i64_truncated(3.0, 1).unwrap(), 3);
/// assert_eq!(f64_to_i64_truncated(2.9, 1).unwrap(), 2);
/// assert_eq!(f64_to_i64_truncated(-1.5, 1).unwrap(), -1);
///
/// let err = f64_to_i64_truncated(f64::NAN, 7).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidLoopBounds { line: 7, .. }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_truncated(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidLoopBounds { details: format!("{value} is not a finite number"),
                                                     line });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(RuntimeError::InvalidLoopBounds { details: format!("{value} is out of range"),
                                                     line });
    }
    Ok(truncated as i64)
}

/// Renders an `f64` the way Ram displays numbers.
///
/// Integral values keep a trailing `.0`, very large or very small magnitudes
/// switch to exponent notation with an explicit sign and at least two
/// exponent digits.
///
/// ## Example
/// ```
/// use ram::util::num::format_real;
///
/// assert_eq!(format_real(9.0), "9.0");
/// assert_eq!(format_real(2.5), "2.5");
/// assert_eq!(format_real(-0.25), "-0.25");
/// assert_eq!(format_real(1e16), "1e+16");
/// assert_eq!(format_real(0.00001), "1e-05");
/// assert_eq!(format_real(-2.5e-7), "-2.5e-07");
/// assert_eq!(format_real(1e-100), "1e-100");
/// assert_eq!(format_real(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            },
            None => formatted,
        };
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
