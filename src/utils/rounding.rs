/// Round to a fixed number of decimal places, halves away from zero.
///
/// Scales, rounds and scales back, so binary representation error is kept:
/// `1.005` becomes `1.0`, not `1.01`. Negative halves round down, `-2.5`
/// becomes `-3.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Money fields
pub fn round_money(value: f64) -> f64 {
    round_to(value, 2)
}

/// Percentage fields
pub fn round_percent(value: f64) -> f64 {
    round_to(value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333333, 1), 33.3);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(89.5, 0), 90.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_round_helpers() {
        assert_eq!(round_money(150.00000000000003), 150.0);
        assert_eq!(round_percent(66.66666), 66.7);
    }
}
