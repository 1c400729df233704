use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseLabelError;

/// Disease stage at diagnosis.
///
/// `StageI` through `StageIV` are ordinal and carry a rank of 1-4.
/// `Unknown` has no rank and is left out of every per-stage matrix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Stage {
    #[serde(rename = "Stage I")]
    StageI,
    #[serde(rename = "Stage II")]
    StageII,
    #[serde(rename = "Stage III")]
    StageIII,
    #[serde(rename = "Stage IV")]
    StageIV,
    Unknown,
}

impl Stage {
    /// All stages, ranked stages first.
    pub const ALL: [Stage; 5] = [
        Stage::StageI,
        Stage::StageII,
        Stage::StageIII,
        Stage::StageIV,
        Stage::Unknown,
    ];

    /// The four ranked stages, earliest first.
    pub const RANKED: [Stage; 4] = [Stage::StageI, Stage::StageII, Stage::StageIII, Stage::StageIV];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Stage::StageI => "Stage I",
            Stage::StageII => "Stage II",
            Stage::StageIII => "Stage III",
            Stage::StageIV => "Stage IV",
            Stage::Unknown => "Unknown",
        }
    }

    /// Ordinal rank, 1 for Stage I through 4 for Stage IV.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Stage::StageI => Some(1),
            Stage::StageII => Some(2),
            Stage::StageIII => Some(3),
            Stage::StageIV => Some(4),
            Stage::Unknown => None,
        }
    }

    /// Position in [`Stage::RANKED`].
    #[must_use]
    pub const fn ranked_index(self) -> Option<usize> {
        match self.rank() {
            Some(rank) => Some(rank as usize - 1),
            None => None,
        }
    }

    /// Parses a label, mapping anything unrecognised to [`Stage::Unknown`].
    ///
    /// ```
    /// # use oncoreg_engine::Stage;
    /// assert_eq!(Stage::from_label_lossy("stage iii"), Stage::StageIII);
    /// assert_eq!(Stage::from_label_lossy(""), Stage::Unknown);
    /// assert_eq!(Stage::from_label_lossy("Stage 0"), Stage::Unknown);
    /// ```
    #[must_use]
    pub fn from_label_lossy(label: &str) -> Self {
        label.parse().unwrap_or(Stage::Unknown)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl FromStr for Stage {
    type Err = ParseLabelError;

    /// Accepts `Stage III`, `stage iii` and the bare roman numeral `III`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let numeral = label
            .get(..6)
            .filter(|prefix| prefix.eq_ignore_ascii_case("stage "))
            .map_or(label, |_| label[6..].trim_start());
        Self::ALL
            .into_iter()
            .find(|stage| {
                stage.to_str().eq_ignore_ascii_case(label)
                    || stage
                        .to_str()
                        .strip_prefix("Stage ")
                        .is_some_and(|n| n.eq_ignore_ascii_case(numeral))
            })
            .ok_or_else(|| ParseLabelError::new("stage", s))
    }
}
