//! Numeric helpers.

/// Clamps `value` into `min..=max`.
///
/// The lower bound is applied first, so when `min > max` the result is `max`.
#[must_use]
pub fn limit<T: PartialOrd>(min: T, value: T, max: T) -> T {
    let raised = if value < min { min } else { value };
    if raised > max {
        max
    } else {
        raised
    }
}

/// Rounds `value` to `decimals` decimal places, ties away from negative
/// infinity.
///
/// The shift is done on the decimal representation rather than by
/// multiplying, so values such as `1.005` round as written.
/// Non-finite inputs are returned unchanged.
#[must_use]
pub fn round(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let Ok(shifted) = format!("{value}e{decimals}").parse::<f64>() else {
        return value;
    };

    let floor = shifted.floor();
    let rounded = if shifted - floor >= 0.5 { floor + 1.0 } else { floor };

    format!("{rounded}e-{decimals}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit() {
        assert_eq!(limit(0, -5, 10), 0);
        assert_eq!(limit(0, 15, 10), 10);
        assert_eq!(limit(0, 5, 10), 5);
        assert_eq!(limit(0, 0, 10), 0);
        assert_eq!(limit(0, 10, 10), 10);
    }

    #[test]
    fn test_limit_floats() {
        assert_eq!(limit(-1.0, 2.5, 1.0), 1.0);
        assert_eq!(limit(-1.0, -2.5, 1.0), -1.0);
    }

    #[test]
    fn test_limit_inverted_bounds() {
        assert_eq!(limit(10, 5, 0), 0);
    }

    #[test]
    fn test_round() {
        assert_eq!(round(1.2345, 2), 1.23);
        assert_eq!(round(1.005, 2), 1.01);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(-1.236, 2), -1.24);
        assert_eq!(round(10.0, 3), 10.0);
    }

    #[test]
    fn test_round_non_finite() {
        assert!(round(f64::NAN, 2).is_nan());
        assert_eq!(round(f64::INFINITY, 2), f64::INFINITY);
    }
}
