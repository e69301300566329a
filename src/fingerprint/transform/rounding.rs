/// An f64 carries at most 17 significant decimal digits.
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Rounds `value` to `digits` significant decimal digits.
///
/// Zero, non-finite values and `digits == 0` are returned unchanged. More
/// than `MAX_SIGNIFICANT_DIGITS` digits is treated as that maximum.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || digits == 0 {
        return value;
    }
    let digits = digits.min(MAX_SIGNIFICANT_DIGITS);

    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits as i32 - 1 - magnitude;

    if shift >= 0 {
        let factor = 10f64.powi(shift);
        if !factor.is_finite() {
            return value;
        }
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}
