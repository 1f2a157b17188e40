//! Path generation from a profile
//!
//! Maps a profile onto the support paths that apply to it. Evaluation is
//! pure: the same profile always yields the same paths, in rule order.

pub mod dsl;
pub mod parser;

pub use dsl::{Condition, PathRule, RuleSet};
pub use parser::RuleParser;

use navigator_common::{Error, PathId, Profile, Result};
use std::path::Path;
use tracing::{debug, info};

impl RuleSet {
    /// Paths whose rule matches the profile, in rule order
    pub fn generate_paths(&self, profile: &Profile) -> Vec<PathId> {
        let mut paths = Vec::new();
        for rule in &self.rules {
            if rule.applies_to(profile) && !paths.contains(&rule.path) {
                paths.push(rule.path);
            }
        }
        debug!(?paths, "Generated life paths");
        paths
    }
}

/// Load and validate a rule file
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
    let rules = RuleParser::parse_file(path.as_ref())
        .map_err(|e| Error::RuleParsing(format!("{:#}", e)))?;
    info!(
        "Loaded {} eligibility rules from {}",
        rules.rules.len(),
        path.as_ref().display()
    );
    Ok(rules)
}

/// Generate paths with the built-in rules
pub fn generate_paths(profile: &Profile) -> Vec<PathId> {
    RuleSet::builtin().generate_paths(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navigator_common::Relationship;

    fn profile(relationship: Option<Relationship>, age: Option<u32>, challenges: &[&str]) -> Profile {
        Profile {
            relationship,
            age,
            challenges: challenges.iter().map(|c| c.to_string()).collect(),
            ..Profile::default()
        }
    }

    #[test]
    fn test_child_gets_education_only() {
        let paths = generate_paths(&profile(Some(Relationship::Child), Some(10), &[]));
        assert_eq!(paths, vec![PathId::EducationCareer, PathId::FamilyDashboard]);
    }

    #[test]
    fn test_widow_with_pension_and_skill() {
        let paths = generate_paths(&profile(
            Some(Relationship::Widow),
            None,
            &["pension", "skill"],
        ));
        assert_eq!(
            paths,
            vec![
                PathId::GovernmentProcesses,
                PathId::SkillJob,
                PathId::FamilyDashboard
            ]
        );
    }

    #[test]
    fn test_empty_profile_gets_dashboard() {
        assert_eq!(generate_paths(&Profile::default()), vec![PathId::FamilyDashboard]);
    }

    #[test]
    fn test_young_parent_by_age() {
        let paths = generate_paths(&profile(Some(Relationship::Parent), Some(24), &[]));
        assert!(paths.contains(&PathId::EducationCareer));

        let paths = generate_paths(&profile(Some(Relationship::Parent), Some(25), &[]));
        assert!(!paths.contains(&PathId::EducationCareer));
    }

    #[test]
    fn test_finance_unlocks_skill_job() {
        let paths = generate_paths(&profile(Some(Relationship::Other), None, &["finance"]));
        assert_eq!(paths, vec![PathId::SkillJob, PathId::FamilyDashboard]);
    }

    #[test]
    fn test_legal_and_document_unlock_government() {
        for tag in ["legal", "document"] {
            let paths = generate_paths(&profile(None, None, &[tag]));
            assert_eq!(paths[0], PathId::GovernmentProcesses);
        }
    }

    #[test]
    fn test_every_path() {
        let paths = generate_paths(&profile(
            Some(Relationship::Widow),
            Some(22),
            &["pension", "education"],
        ));
        assert_eq!(paths, PathId::ALL.to_vec());
    }

    #[test]
    fn test_load_missing_rules_file() {
        let result = load_rules("/nonexistent/rules.json");
        assert!(matches!(result, Err(Error::RuleParsing(_))));
    }

    #[test]
    fn test_deterministic() {
        let p = profile(Some(Relationship::Widow), Some(30), &["legal", "job"]);
        assert_eq!(generate_paths(&p), generate_paths(&p));
    }
}
