//! Closed enumerations used by group, guide and variable declarations.
//!
//! Declarations keep these fields as the authored string so that an unknown
//! value is reported by validation rather than by the YAML decoder. The enums
//! here are the parsed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Skill level a group is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Enabler,
    Commander,
    Guardian,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Enabler,
        SkillLevel::Commander,
        SkillLevel::Guardian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "BEGINNER",
            SkillLevel::Enabler => "ENABLER",
            SkillLevel::Commander => "COMMANDER",
            SkillLevel::Guardian => "GUARDIAN",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Guide difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Kind of resource a chapter variable refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Stack,
    Policy,
    AwsIntegration,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Stack,
        ResourceType::Policy,
        ResourceType::AwsIntegration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Stack => "stack",
            ResourceType::Policy => "policy",
            ResourceType::AwsIntegration => "aws_integration",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A string that is not a member of the enumeration it was parsed as
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant: {0:?}")]
pub struct UnknownVariant(pub String);

/// Join enumeration names as "A, B, or C" for error messages
pub(crate) fn one_of(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_is_case_sensitive() {
        assert_eq!("GUARDIAN".parse::<SkillLevel>().unwrap(), SkillLevel::Guardian);
        assert!("guardian".parse::<SkillLevel>().is_err());
        assert!("EXPERT".parse::<SkillLevel>().is_err());
        assert!("".parse::<SkillLevel>().is_err());
    }

    #[test]
    fn test_resource_type_from_str() {
        assert_eq!(
            "aws_integration".parse::<ResourceType>().unwrap(),
            ResourceType::AwsIntegration
        );
        assert_eq!("stack".parse::<ResourceType>().unwrap(), ResourceType::Stack);
        assert!("module".parse::<ResourceType>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
    }

    #[test]
    fn test_one_of_formatting() {
        assert_eq!(one_of(&["easy", "medium", "hard"]), "easy, medium, or hard");
        assert_eq!(one_of(&["http", "https"]), "http or https");
        assert_eq!(one_of(&["x"]), "x");
    }
}
