//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Invalid tournament stage value.
    #[error("invalid stage: {value}")]
    InvalidStage { value: String },
}

/// Tournament stage a match belongs to.
///
/// Ordered by progression, so `Stage::Group < Stage::Final`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Group,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

impl Stage {
    /// Knockout stages in bracket order.
    pub const KNOCKOUT: [Self; 4] = [
        Self::RoundOf16,
        Self::QuarterFinal,
        Self::SemiFinal,
        Self::Final,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::RoundOf16 => "round_of_16",
            Self::QuarterFinal => "quarter_final",
            Self::SemiFinal => "semi_final",
            Self::Final => "final",
        }
    }

    /// Human-readable round name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Group => "Group Stage",
            Self::RoundOf16 => "Round of 16",
            Self::QuarterFinal => "Quarter Final",
            Self::SemiFinal => "Semi Final",
            Self::Final => "Final",
        }
    }

    #[must_use]
    pub const fn is_knockout(&self) -> bool {
        !matches!(self, Self::Group)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(Self::Group),
            "round_of_16" => Ok(Self::RoundOf16),
            "quarter_final" => Ok(Self::QuarterFinal),
            "semi_final" => Ok(Self::SemiFinal),
            "final" => Ok(Self::Final),
            _ => Err(ValidationError::InvalidStage {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated, non-empty string newtype with common trait implementations.
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after trimming and validation.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_name!(
    /// A validated team name.
    ///
    /// Team names are the identity of a team across matches, so comparison
    /// is exact after trimming surrounding whitespace.
    TeamName, "team name"
);

define_name!(
    /// A validated group identifier (e.g. "A").
    GroupId, "group"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_name_rejects_empty_and_blank() {
        assert!(TeamName::new("").is_err());
        assert!(TeamName::new("   ").is_err());
        assert_eq!(TeamName::new(" Brazil ").unwrap().as_str(), "Brazil");
    }

    #[test]
    fn team_name_serde_rejects_empty() {
        let result: Result<TeamName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn group_id_serde_roundtrip() {
        let group = GroupId::new("A").unwrap();
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, "\"A\"");
        let parsed: GroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, group);
    }

    #[test]
    fn stage_from_str_accepts_wire_names() {
        for stage in [
            Stage::Group,
            Stage::RoundOf16,
            Stage::QuarterFinal,
            Stage::SemiFinal,
            Stage::Final,
        ] {
            let parsed: Stage = stage.as_str().parse().unwrap();
            assert_eq!(parsed, stage);
        }
        assert!("semifinal".parse::<Stage>().is_err());
    }

    #[test]
    fn stage_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Stage::RoundOf16).unwrap(),
            "\"round_of_16\""
        );
        let parsed: Stage = serde_json::from_str("\"quarter_final\"").unwrap();
        assert_eq!(parsed, Stage::QuarterFinal);
    }

    #[test]
    fn knockout_stages_are_in_progression_order() {
        let mut sorted = Stage::KNOCKOUT;
        sorted.sort();
        assert_eq!(sorted, Stage::KNOCKOUT);
        assert!(Stage::KNOCKOUT.iter().all(Stage::is_knockout));
        assert!(!Stage::Group.is_knockout());
    }
}
