/// Convert a raw textual handicap into a signed decimal with one fractional
/// digit, or `None` for absent, unparseable, or non-finite input.
///
/// A leading `+` marks a plus-handicap golfer (better than scratch); the
/// stored value is negated in that case, so `"+2.0"` becomes `-2.0` while
/// `"-2.0"` and `"2.0"` are stored as parsed. Rounding is half-away-from-zero
/// at one decimal place (`"3.05"` rounds to `3.1`).
pub fn normalize_handicap(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // f64::parse accepts "NaN" and "inf"; neither is a handicap.
    let value: f64 = trimmed.parse().ok().filter(|v: &f64| v.is_finite())?;
    let value = if trimmed.starts_with('+') && value > 0.0 {
        -value
    } else {
        value
    };
    Some((value * 10.0).round() / 10.0)
}
