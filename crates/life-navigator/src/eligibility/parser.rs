//! Rule file parser and validator

use crate::eligibility::dsl::*;
use anyhow::{Context, Result};
use navigator_common::PathId;
use std::collections::HashSet;
use std::path::Path;

/// Parser for eligibility rule files
pub struct RuleParser;

impl RuleParser {
    /// Parse a rule set from a JSON string
    pub fn parse_str(json_str: &str) -> Result<RuleSet> {
        let rules: RuleSet =
            serde_json::from_str(json_str).context("Failed to parse eligibility rules")?;

        Self::validate(&rules)?;

        Ok(rules)
    }

    /// Parse a rule set from a JSON file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
        let json_str = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read rules file: {}", path.as_ref().display())
        })?;

        Self::parse_str(&json_str)
    }

    /// Validate a parsed rule set
    ///
    /// Checks for:
    /// - A supported version
    /// - At least one rule
    /// - Each path appearing at most once
    /// - Usable conditions on every rule
    /// - An unconditional `family-dashboard` rule
    pub fn validate(rules: &RuleSet) -> Result<()> {
        if rules.version != RULES_VERSION {
            anyhow::bail!("unsupported rules version '{}'", rules.version);
        }

        if rules.rules.is_empty() {
            anyhow::bail!("At least one path rule is required");
        }

        let mut seen = HashSet::new();
        for (idx, rule) in rules.rules.iter().enumerate() {
            if !seen.insert(rule.path) {
                anyhow::bail!("path '{}' has more than one rule", rule.path);
            }
            Self::validate_rule(rule).with_context(|| format!("Path rule {} is invalid", idx))?;
        }

        let dashboard = rules
            .rules
            .iter()
            .find(|rule| rule.path == PathId::FamilyDashboard);
        match dashboard {
            None => anyhow::bail!("a '{}' rule is required", PathId::FamilyDashboard),
            Some(rule) if rule.conditions != [Condition::Always] => {
                anyhow::bail!(
                    "'{}' must have exactly one 'always' condition",
                    PathId::FamilyDashboard
                )
            }
            Some(_) => {}
        }

        Ok(())
    }

    fn validate_rule(rule: &PathRule) -> Result<()> {
        if rule.conditions.is_empty() {
            anyhow::bail!("{}: at least one condition is required", rule.path);
        }

        for condition in &rule.conditions {
            match condition {
                Condition::ChallengeAny { tags } => {
                    if tags.is_empty() {
                        anyhow::bail!("challenge_any: tags cannot be empty");
                    }
                    if tags.iter().any(|t| t.trim().is_empty()) {
                        anyhow::bail!("challenge_any: tags cannot contain blank entries");
                    }
                }
                Condition::RelationshipIs { relationships } => {
                    if relationships.is_empty() {
                        anyhow::bail!("relationship_is: relationships cannot be empty");
                    }
                }
                Condition::AgeBelow { years } => {
                    if *years == 0 {
                        anyhow::bail!("age_below: years must be greater than 0");
                    }
                }
                Condition::Always => {}
            }
        }

        Ok(())
    }
}
