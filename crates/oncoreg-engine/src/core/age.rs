use std::fmt;

use serde::{Deserialize, Serialize};

/// Age band at diagnosis.
///
/// Bands are closed on the right: 30 belongs to `10-30`, 30.5 to `31-50`.
/// Ages under ten fall into the first band and ages over ninety into the last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AgeGroup {
    #[serde(rename = "10-30")]
    UpTo30,
    #[serde(rename = "31-50")]
    From31To50,
    #[serde(rename = "51-70")]
    From51To70,
    #[serde(rename = "71-90")]
    From71,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::UpTo30,
        AgeGroup::From31To50,
        AgeGroup::From51To70,
        AgeGroup::From71,
    ];

    /// Band for an age in years; `None` for a non-finite age.
    ///
    /// ```
    /// # use oncoreg_engine::AgeGroup;
    /// assert_eq!(AgeGroup::from_age(30.0), Some(AgeGroup::UpTo30));
    /// assert_eq!(AgeGroup::from_age(50.5), Some(AgeGroup::From51To70));
    /// assert_eq!(AgeGroup::from_age(f64::NAN), None);
    /// ```
    #[must_use]
    pub fn from_age(age: f64) -> Option<Self> {
        if !age.is_finite() {
            return None;
        }
        let group = if age <= 30.0 {
            AgeGroup::UpTo30
        } else if age <= 50.0 {
            AgeGroup::From31To50
        } else if age <= 70.0 {
            AgeGroup::From51To70
        } else {
            AgeGroup::From71
        };
        Some(group)
    }

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            AgeGroup::UpTo30 => "10-30",
            AgeGroup::From31To50 => "31-50",
            AgeGroup::From51To70 => "51-70",
            AgeGroup::From71 => "71-90",
        }
    }

    /// Short description shown next to the band.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            AgeGroup::UpTo30 => "Young adults",
            AgeGroup::From31To50 => "Working age",
            AgeGroup::From51To70 => "Prime diagnosis",
            AgeGroup::From71 => "Senior patients",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let groups: Vec<_> = [25.0, 45.0, 65.0, 85.0]
            .into_iter()
            .map(|age| AgeGroup::from_age(age).unwrap())
            .collect();
        assert_eq!(groups, AgeGroup::ALL);
    }

    #[test]
    fn test_edges() {
        assert_eq!(AgeGroup::from_age(0.0), Some(AgeGroup::UpTo30));
        assert_eq!(AgeGroup::from_age(50.0), Some(AgeGroup::From31To50));
        assert_eq!(AgeGroup::from_age(70.0), Some(AgeGroup::From51To70));
        assert_eq!(AgeGroup::from_age(104.0), Some(AgeGroup::From71));
        assert_eq!(AgeGroup::from_age(f64::INFINITY), None);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, group) in AgeGroup::ALL.into_iter().enumerate() {
            assert_eq!(group.index(), i);
        }
    }

    #[test]
    fn test_band_descriptions() {
        assert_eq!(AgeGroup::From51To70.description(), "Prime diagnosis");
        assert_eq!(AgeGroup::From71.description(), "Senior patients");
    }
}
