use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseLabelError;

/// Cancer type recorded for a patient.
///
/// The set is closed. Series and charts follow the declaration order; the
/// matrix views list the types present sorted by label
/// (see [`CancerType::sorted_by_label`]).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CancerType {
    Breast,
    Lung,
    Colon,
    Prostate,
    Liver,
    Stomach,
    Pancreas,
    Ovarian,
}

impl CancerType {
    /// All cancer types in display order.
    pub const ALL: [CancerType; 8] = [
        CancerType::Breast,
        CancerType::Lung,
        CancerType::Colon,
        CancerType::Prostate,
        CancerType::Liver,
        CancerType::Stomach,
        CancerType::Pancreas,
        CancerType::Ovarian,
    ];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            CancerType::Breast => "Breast",
            CancerType::Lung => "Lung",
            CancerType::Colon => "Colon",
            CancerType::Prostate => "Prostate",
            CancerType::Liver => "Liver",
            CancerType::Stomach => "Stomach",
            CancerType::Pancreas => "Pancreas",
            CancerType::Ovarian => "Ovarian",
        }
    }

    /// Distinct types from `types`, sorted alphabetically by label.
    ///
    /// ```
    /// # use oncoreg_engine::CancerType;
    /// let types = CancerType::sorted_by_label([CancerType::Lung, CancerType::Liver, CancerType::Lung]);
    /// assert_eq!(types, [CancerType::Liver, CancerType::Lung]);
    /// ```
    #[must_use]
    pub fn sorted_by_label<I>(types: I) -> Vec<CancerType>
    where
        I: IntoIterator<Item = CancerType>,
    {
        let mut types = types.into_iter().collect::<Vec<_>>();
        types.sort_unstable_by_key(|ty| ty.to_str());
        types.dedup();
        types
    }

    /// Whether this type carries a histological subtype column.
    #[must_use]
    pub const fn has_subtypes(self) -> bool {
        matches!(self, CancerType::Lung)
    }
}

impl fmt::Display for CancerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl FromStr for CancerType {
    type Err = ParseLabelError;

    /// Parses a cancer type label, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.to_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| ParseLabelError::new("cancer type", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("lung".parse::<CancerType>().unwrap(), CancerType::Lung);
        assert_eq!(" OVARIAN ".parse::<CancerType>().unwrap(), CancerType::Ovarian);
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "Skin".parse::<CancerType>().unwrap_err();
        assert_eq!(err.kind(), "cancer type");
        assert_eq!(err.label(), "Skin");
    }

    #[test]
    fn test_display_roundtrip() {
        for ty in CancerType::ALL {
            assert_eq!(ty.to_string().parse::<CancerType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&CancerType::Pancreas).unwrap();
        assert_eq!(json, "\"Pancreas\"");
    }
}
