//! Guarded ratios and percentages.
//!
//! Every rate shown on the dashboard goes through these helpers so that an
//! empty group yields `0` instead of `NaN`.

/// Returns `part / whole`, or `0.0` when `whole` is zero.
///
/// # Examples
///
/// ```
/// # use oncoreg_stats::rate::ratio;
/// assert_eq!(ratio(1, 2), 0.5);
/// assert_eq!(ratio(1, 0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Returns `part / whole * 100`, or `0.0` when `whole` is zero.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    ratio(part, whole) * 100.0
}

/// Percentage rounded to the nearest whole percent.
///
/// Halves round up, so `12.5` becomes `13`.
///
/// # Examples
///
/// ```
/// # use oncoreg_stats::rate::rounded_percentage;
/// assert_eq!(rounded_percentage(1, 8), 13);
/// assert_eq!(rounded_percentage(2, 3), 67);
/// assert_eq!(rounded_percentage(0, 0), 0);
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    round_half_up(percentage(part, whole)) as u32
}

/// Rounds to the given number of decimal places.
///
/// # Examples
///
/// ```
/// # use oncoreg_stats::rate::round_to;
/// assert_eq!(round_to(33.333_33, 1), 33.3);
/// assert_eq!(round_to(66.666_67, 1), 66.7);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Rounds halves towards positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Arithmetic mean, or `0.0` for an empty input.
///
/// # Examples
///
/// ```
/// # use oncoreg_stats::rate::mean_or_zero;
/// assert_eq!(mean_or_zero([10.0, 30.0]), 20.0);
/// assert_eq!(mean_or_zero(std::iter::empty()), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_or_zero<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}
