use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseLabelError;

/// Vital status at the last registry update.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
pub enum VitalStatus {
    Alive,
    Deceased,
}

impl VitalStatus {
    pub const ALL: [VitalStatus; 2] = [VitalStatus::Alive, VitalStatus::Deceased];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            VitalStatus::Alive => "Alive",
            VitalStatus::Deceased => "Deceased",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.to_str(), f)
    }
}

impl FromStr for VitalStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.to_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| ParseLabelError::new("vital status", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("alive".parse::<VitalStatus>().unwrap(), VitalStatus::Alive);
        assert_eq!("Deceased".parse::<VitalStatus>().unwrap(), VitalStatus::Deceased);
        assert!("Dead".parse::<VitalStatus>().is_err());
    }

    #[test]
    fn test_is_variant() {
        assert!(VitalStatus::Alive.is_alive());
        assert!(!VitalStatus::Alive.is_deceased());
    }
}
