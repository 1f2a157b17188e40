//! Self-reported family profile

use crate::{Error, PathId, Roadmap};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relationship of the user to the martyr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Widow,
    Child,
    Parent,
    Other,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Widow => "widow",
            Relationship::Child => "child",
            Relationship::Parent => "parent",
            Relationship::Other => "other",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "widow" => Ok(Relationship::Widow),
            "child" => Ok(Relationship::Child),
            "parent" => Ok(Relationship::Parent),
            "other" => Ok(Relationship::Other),
            _ => Err(Error::InvalidRelationship(s.to_string())),
        }
    }
}

/// Details about the deceased service member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MartyrDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<String>,

    /// ISO 8601 date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<String>,
}

/// Identity document the user registered with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
}

/// The user's profile.
///
/// `generated_paths` and `life_roadmap` are derived the first time the
/// profile is marked complete and are left alone afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,

    /// Only meaningful for children, but honored for any relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    pub martyr: MartyrDetails,

    pub identification: Identification,

    /// Support topics the user selected, e.g. "pension" or "education"
    pub challenges: Vec<String>,

    pub is_profile_complete: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_paths: Option<Vec<PathId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_roadmap: Option<Roadmap>,
}

impl Profile {
    /// Create an empty profile with a fresh identifier
    pub fn new() -> Self {
        Self {
            id: Some(uuid::Uuid::new_v4().to_string()),
            ..Self::default()
        }
    }

    /// Case-insensitive challenge tag lookup
    pub fn has_challenge(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.challenges
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(tag))
    }

    /// Whether paths and roadmap have already been derived
    pub fn is_generated(&self) -> bool {
        self.generated_paths.is_some()
    }

    /// Shallow-merge an update into the profile.
    ///
    /// Nested records (`martyr`, `identification`) are replaced wholesale.
    /// Returns true when this update marked the profile complete and no
    /// paths have been generated yet.
    pub fn merge(&mut self, update: ProfileUpdate) -> bool {
        let was_complete = self.is_profile_complete;

        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(relationship) = update.relationship {
            self.relationship = Some(relationship);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(martyr) = update.martyr {
            self.martyr = martyr;
        }
        if let Some(identification) = update.identification {
            self.identification = identification;
        }
        if let Some(challenges) = update.challenges {
            self.challenges = challenges;
        }
        if let Some(complete) = update.is_profile_complete {
            self.is_profile_complete = complete;
        }

        !was_complete && self.is_profile_complete && !self.is_generated()
    }
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub relationship: Option<Relationship>,
    pub age: Option<u32>,
    pub martyr: Option<MartyrDetails>,
    pub identification: Option<Identification>,
    pub challenges: Option<Vec<String>>,
    pub is_profile_complete: Option<bool>,
}

impl ProfileUpdate {
    /// Update that only marks the profile complete
    pub fn complete() -> Self {
        Self {
            is_profile_complete: Some(true),
            ..Self::default()
        }
    }
}
