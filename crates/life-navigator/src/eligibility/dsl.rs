//! Eligibility rule definitions
//!
//! A rule set is a list of path rules evaluated in order. A path applies to a
//! profile when any one of its conditions holds.

use navigator_common::{PathId, Profile, Relationship};
use serde::{Deserialize, Serialize};

/// Schema version of the rule file format
pub const RULES_VERSION: &str = "1.0";

/// Ordered eligibility rules for every path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Schema version for backward compatibility
    #[serde(default = "default_version")]
    pub version: String,

    /// Rules in display order
    pub rules: Vec<PathRule>,
}

fn default_version() -> String {
    RULES_VERSION.to_string()
}

/// Eligibility rule for a single path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRule {
    /// Path this rule unlocks
    pub path: PathId,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// The path applies if any condition matches
    pub conditions: Vec<Condition>,
}

/// A single eligibility test against a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// The profile lists at least one of these challenge tags
    ChallengeAny {
        tags: Vec<String>,
    },

    /// The user's relationship to the martyr is one of these
    RelationshipIs {
        relationships: Vec<Relationship>,
    },

    /// An age is recorded and is strictly below this many years
    AgeBelow {
        years: u32,
    },

    /// Always matches
    Always,
}

impl Condition {
    /// Evaluate against a profile. Missing fields never match.
    pub fn matches(&self, profile: &Profile) -> bool {
        match self {
            Condition::ChallengeAny { tags } => tags.iter().any(|tag| profile.has_challenge(tag)),
            Condition::RelationshipIs { relationships } => profile
                .relationship
                .is_some_and(|r| relationships.contains(&r)),
            Condition::AgeBelow { years } => profile.age.is_some_and(|age| age < *years),
            Condition::Always => true,
        }
    }

    /// Short name of the condition type
    pub fn condition_type(&self) -> &str {
        match self {
            Condition::ChallengeAny { .. } => "challenge_any",
            Condition::RelationshipIs { .. } => "relationship_is",
            Condition::AgeBelow { .. } => "age_below",
            Condition::Always => "always",
        }
    }
}

impl PathRule {
    pub fn applies_to(&self, profile: &Profile) -> bool {
        self.conditions.iter().any(|c| c.matches(profile))
    }
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl RuleSet {
    /// The rules the portal ships with
    pub fn builtin() -> Self {
        Self {
            version: default_version(),
            rules: vec![
                PathRule {
                    path: PathId::GovernmentProcesses,
                    description: "Pension, documentation or legal support needed".to_string(),
                    conditions: vec![Condition::ChallengeAny {
                        tags: tags(&["pension", "document", "legal"]),
                    }],
                },
                PathRule {
                    path: PathId::EducationCareer,
                    description: "Education need, or a child or young dependant".to_string(),
                    conditions: vec![
                        Condition::ChallengeAny {
                            tags: tags(&["education"]),
                        },
                        Condition::RelationshipIs {
                            relationships: vec![Relationship::Child],
                        },
                        Condition::AgeBelow { years: 25 },
                    ],
                },
                PathRule {
                    path: PathId::SkillJob,
                    description: "Employment, skills or financial support needed".to_string(),
                    conditions: vec![
                        Condition::ChallengeAny {
                            tags: tags(&["job", "skill"]),
                        },
                        Condition::RelationshipIs {
                            relationships: vec![Relationship::Widow],
                        },
                        Condition::ChallengeAny {
                            tags: tags(&["finance"]),
                        },
                    ],
                },
                PathRule {
                    path: PathId::FamilyDashboard,
                    description: "Available to every family".to_string(),
                    conditions: vec![Condition::Always],
                },
            ],
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}
