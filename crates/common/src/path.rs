use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category of support a family can be routed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathId {
    /// Pension, canteen card, certificates and other paperwork
    GovernmentProcesses,
    /// Scholarships, admissions and career counseling
    EducationCareer,
    /// Skill training and employment
    SkillJob,
    /// Family overview; every profile gets it
    FamilyDashboard,
}

impl PathId {
    pub const ALL: [PathId; 4] = [
        PathId::GovernmentProcesses,
        PathId::EducationCareer,
        PathId::SkillJob,
        PathId::FamilyDashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathId::GovernmentProcesses => "government-processes",
            PathId::EducationCareer => "education-career",
            PathId::SkillJob => "skill-job",
            PathId::FamilyDashboard => "family-dashboard",
        }
    }

    /// Display name used in the roadmap
    pub fn display_name(&self) -> &'static str {
        match self {
            PathId::GovernmentProcesses => "Government Processes",
            PathId::EducationCareer => "Education & Career",
            PathId::SkillJob => "Skill Development & Employment",
            PathId::FamilyDashboard => "Family Dashboard",
        }
    }

    /// Whether this path produces roadmap entries and seed tasks
    pub fn is_actionable(&self) -> bool {
        !matches!(self, PathId::FamilyDashboard)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathId::ALL
            .into_iter()
            .find(|path| path.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidPath(s.to_string()))
    }
}
