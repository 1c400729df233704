//! Threshold survival curves.
//!
//! A threshold survival curve reports, for each month mark `m`, the percentage
//! of a group whose recorded duration is at least `m`. It is not a
//! Kaplan-Meier estimate: censoring is either ignored
//! ([`ThresholdSurvivalCurve::from_durations`]) or treated optimistically
//! ([`ThresholdSurvivalCurve::from_observations`]), where a censored
//! observation counts as surviving at every mark.
//!
//! ```text
//! durations: 6, 18, 30, 42
//! mark  0  -> 4/4 = 100%
//! mark 12  -> 3/4 =  75%
//! mark 24  -> 2/4 =  50%
//! ```

use serde::Serialize;

use crate::rate;

/// A single point of a survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivalPoint {
    /// Month mark.
    pub month: f64,
    /// Percentage (0-100) of the group surviving at least `month`.
    pub percent: f64,
}

/// Percentage surviving at each of a list of month marks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThresholdSurvivalCurve {
    /// Points in the order the marks were given.
    pub points: Vec<SurvivalPoint>,
}

impl ThresholdSurvivalCurve {
    /// Builds a curve from uncensored durations.
    ///
    /// Every mark evaluates to `0.0` when `durations` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oncoreg_stats::survival::ThresholdSurvivalCurve;
    /// let curve = ThresholdSurvivalCurve::from_durations(&[10.0, 30.0], &[0.0, 12.0, 36.0]);
    /// let percents: Vec<_> = curve.points.iter().map(|p| p.percent).collect();
    /// assert_eq!(percents, [100.0, 50.0, 0.0]);
    /// ```
    #[must_use]
    pub fn from_durations(durations: &[f64], marks: &[f64]) -> Self {
        let mut sorted = durations.to_vec();
        sorted.sort_by(f64::total_cmp);
        let points = marks
            .iter()
            .map(|&month| SurvivalPoint {
                month,
                percent: rate::percentage(count_at_least(&sorted, month), sorted.len()),
            })
            .collect();
        Self { points }
    }

    /// Builds a curve from `(duration, is_censored)` observations.
    ///
    /// A censored observation counts as surviving at every mark regardless of
    /// its recorded duration.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oncoreg_stats::survival::ThresholdSurvivalCurve;
    /// // 5 months and censored, 15 months and not censored
    /// let curve = ThresholdSurvivalCurve::from_observations(&[(5.0, true), (15.0, false)], &[10.0, 20.0]);
    /// assert_eq!(curve.percent_at(10.0), Some(100.0));
    /// assert_eq!(curve.percent_at(20.0), Some(50.0));
    /// ```
    #[must_use]
    pub fn from_observations(observations: &[(f64, bool)], marks: &[f64]) -> Self {
        let censored = observations.iter().filter(|(_, c)| *c).count();
        let mut complete = observations
            .iter()
            .filter(|(_, c)| !*c)
            .map(|(d, _)| *d)
            .collect::<Vec<_>>();
        complete.sort_by(f64::total_cmp);

        let points = marks
            .iter()
            .map(|&month| SurvivalPoint {
                month,
                percent: rate::percentage(
                    censored + count_at_least(&complete, month),
                    observations.len(),
                ),
            })
            .collect();
        Self { points }
    }

    /// Returns the percentage at an exact month mark, if that mark is on the curve.
    #[must_use]
    pub fn percent_at(&self, month: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.month == month)
            .map(|p| p.percent)
    }

    #[must_use]
    pub fn months(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.month).collect()
    }

    #[must_use]
    pub fn percents(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.percent).collect()
    }
}

/// Number of sorted values greater than or equal to `threshold`.
fn count_at_least(sorted: &[f64], threshold: f64) -> usize {
    sorted.len() - sorted.partition_point(|&v| v < threshold)
}

/// Most marks [`month_marks`] will produce.
pub const MAX_MARKS: usize = 10_000;

/// Multiples of `step` from zero up to and including `upper`, truncated to
/// [`MAX_MARKS`] entries.
///
/// # Examples
///
/// ```
/// # use oncoreg_stats::survival::month_marks;
/// assert_eq!(month_marks(12.0, 36.0), [0.0, 12.0, 24.0, 36.0]);
/// assert_eq!(month_marks(10.0, 25.0), [0.0, 10.0, 20.0]);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn month_marks(step: f64, upper: f64) -> Vec<f64> {
    assert!(step > 0.0, "step must be positive");
    let count = ((upper.max(0.0) / step).floor() as usize).min(MAX_MARKS - 1);
    (0..=count).map(|i| i as f64 * step).collect()
}
