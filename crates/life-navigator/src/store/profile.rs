use crate::eligibility::RuleSet;
use crate::roadmap::generate_roadmap;
use chrono::{DateTime, Utc};
use navigator_common::{PathId, Profile, ProfileUpdate};
use tracing::info;

/// Holds the user's profile and derives paths on first completion
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profile: Profile,
    rules: RuleSet,
}

impl ProfileStore {
    pub fn new(profile: Profile, rules: RuleSet) -> Self {
        Self { profile, rules }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Merge an update into the profile.
    ///
    /// On the first completion, paths and roadmap are generated and the new
    /// paths are returned so the caller can seed tasks. Later updates never
    /// touch the generated paths or roadmap.
    pub fn update(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> Option<Vec<PathId>> {
        if !self.profile.merge(update) {
            return None;
        }

        let paths = self.rules.generate_paths(&self.profile);
        let roadmap = generate_roadmap(&paths, now);

        info!(
            paths = paths.len(),
            roadmap_paths = roadmap.len(),
            "Profile completed, life roadmap generated"
        );

        self.profile.generated_paths = Some(paths.clone());
        self.profile.life_roadmap = Some(roadmap);
        Some(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use navigator_common::Relationship;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_generates_once() {
        let mut store = ProfileStore::new(Profile::new(), RuleSet::builtin());

        let first = store.update(
            ProfileUpdate {
                relationship: Some(Relationship::Widow),
                challenges: Some(vec!["pension".to_string()]),
                is_profile_complete: Some(true),
                ..ProfileUpdate::default()
            },
            now(),
        );
        assert_eq!(
            first,
            Some(vec![
                PathId::GovernmentProcesses,
                PathId::SkillJob,
                PathId::FamilyDashboard
            ])
        );
        let roadmap = store.profile().life_roadmap.clone().unwrap();
        assert_eq!(roadmap.len(), 2);

        let second = store.update(
            ProfileUpdate {
                challenges: Some(vec![]),
                is_profile_complete: Some(true),
                ..ProfileUpdate::default()
            },
            now(),
        );
        assert!(second.is_none());
        assert_eq!(
            store.profile().generated_paths.as_deref().unwrap()[0],
            PathId::GovernmentProcesses
        );
        assert_eq!(store.profile().life_roadmap.as_ref(), Some(&roadmap));
    }

    #[test]
    fn test_recompletion_does_not_regenerate() {
        let mut store = ProfileStore::new(Profile::new(), RuleSet::builtin());
        assert!(store.update(ProfileUpdate::complete(), now()).is_some());

        store.update(
            ProfileUpdate {
                is_profile_complete: Some(false),
                ..ProfileUpdate::default()
            },
            now(),
        );
        assert!(store.update(ProfileUpdate::complete(), now()).is_none());
    }

    #[test]
    fn test_incomplete_profile_generates_nothing() {
        let mut store = ProfileStore::new(Profile::new(), RuleSet::builtin());
        let generated = store.update(
            ProfileUpdate {
                name: Some("Rekha".to_string()),
                ..ProfileUpdate::default()
            },
            now(),
        );
        assert!(generated.is_none());
        assert!(store.profile().generated_paths.is_none());
        assert!(store.profile().life_roadmap.is_none());
    }
}
