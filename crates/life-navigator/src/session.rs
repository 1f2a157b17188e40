//! A user's navigator session
//!
//! Owns the profile and task state, runs generation when the profile is first
//! completed, and mirrors every mutation to the persistence adapters. Failed
//! saves are logged and never surface to the caller. A blob that could not be
//! read is never overwritten during the session.

use crate::eligibility::RuleSet;
use crate::persistence::Store;
use crate::seeder::seed_tasks;
use crate::store::{ProfileStore, TaskStore};
use crate::timeline::{filter_by_category, Timeline, TimelineGrouper};
use chrono::{DateTime, Utc};
use navigator_common::{
    CategoryFilter, NewTask, Profile, ProfileUpdate, Result, Roadmap, Task, TaskPatch, TaskStatus,
};
use serde::Serialize;
use tracing::{info, warn};

/// Progress counts for the family dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Completed share, rounded down
    pub completion_percent: u8,
}

pub struct Navigator<P, T>
where
    P: Store<Profile>,
    T: Store<Vec<Task>>,
{
    profile: ProfileStore,
    tasks: TaskStore,
    grouper: TimelineGrouper,
    profile_store: P,
    task_store: T,
    profile_writable: bool,
    tasks_writable: bool,
}

impl<P, T> Navigator<P, T>
where
    P: Store<Profile>,
    T: Store<Vec<Task>>,
{
    /// Open a session with the built-in rules
    pub fn open(profile_store: P, task_store: T) -> Self {
        Self::with_rules(profile_store, task_store, RuleSet::builtin())
    }

    /// Open a session, recovering from missing or unreadable saved state
    pub fn with_rules(profile_store: P, task_store: T, rules: RuleSet) -> Self {
        let (profile, profile_writable) = match profile_store.load() {
            Ok(Some(profile)) => (profile, true),
            Ok(None) => (Profile::new(), true),
            Err(e) => {
                warn!("Saved profile is unreadable, starting fresh and leaving it untouched: {}", e);
                (Profile::new(), false)
            }
        };

        let (tasks, tasks_writable) = match task_store.load() {
            Ok(Some(tasks)) => (tasks, true),
            Ok(None) => (Vec::new(), true),
            Err(e) => {
                warn!("Saved tasks are unreadable, starting with none and leaving them untouched: {}", e);
                (Vec::new(), false)
            }
        };

        info!(
            complete = profile.is_profile_complete,
            tasks = tasks.len(),
            "Navigator session opened"
        );

        Self {
            profile: ProfileStore::new(profile, rules),
            tasks: TaskStore::new(tasks),
            grouper: TimelineGrouper::default(),
            profile_store,
            task_store,
            profile_writable,
            tasks_writable,
        }
    }

    /// Use a different "upcoming" window for timelines
    pub fn with_upcoming_days(mut self, days: i64) -> Self {
        self.grouper = TimelineGrouper::new(days);
        self
    }

    pub fn profile(&self) -> &Profile {
        self.profile.profile()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.profile().life_roadmap.as_ref()
    }

    /// Merge a profile update; seeds tasks the first time the profile is completed
    pub fn update_profile(&mut self, update: ProfileUpdate) -> &Profile {
        self.update_profile_at(update, Utc::now())
    }

    pub fn update_profile_at(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> &Profile {
        if let Some(paths) = self.profile.update(update, now) {
            let existing = self.tasks.tasks();
            let seeded: Vec<Task> = seed_tasks(&paths, now)
                .into_iter()
                .filter(|draft| {
                    !existing
                        .iter()
                        .any(|t| t.title == draft.title && t.related_path == draft.related_path)
                })
                .collect();
            info!("Seeded {} tasks", seeded.len());
            self.tasks.extend(seeded);
            self.persist_tasks();
        }
        self.persist_profile();
        self.profile.profile()
    }

    pub fn add_task(&mut self, draft: NewTask) -> Task {
        self.add_task_at(draft, Utc::now())
    }

    pub fn add_task_at(&mut self, draft: NewTask, now: DateTime<Utc>) -> Task {
        let task = self.tasks.add(draft, now);
        self.persist_tasks();
        task
    }

    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<Task> {
        self.update_task_at(task_id, patch, Utc::now())
    }

    pub fn update_task_at(
        &mut self,
        task_id: &str,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let task = self.tasks.update(task_id, patch, now)?;
        self.persist_tasks();
        Ok(task)
    }

    /// Status-cycle request from a task card
    pub fn advance_task(&mut self, task_id: &str) -> Result<Task> {
        let task = self.tasks.advance(task_id, Utc::now())?;
        self.persist_tasks();
        Ok(task)
    }

    pub fn set_document_submitted(
        &mut self,
        task_id: &str,
        document: &str,
        submitted: bool,
    ) -> Result<Task> {
        let task = self
            .tasks
            .set_document_submitted(task_id, document, submitted, Utc::now())?;
        self.persist_tasks();
        Ok(task)
    }

    pub fn timeline(&self, now: DateTime<Utc>) -> Timeline {
        self.grouper.group(self.tasks.tasks(), now)
    }

    pub fn tasks_in(&self, filter: CategoryFilter) -> Vec<Task> {
        filter_by_category(self.tasks.tasks(), filter)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> TaskSummary {
        let tasks = self.tasks.tasks();
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();

        let completed = count(TaskStatus::Completed);
        let overdue = self
            .timeline(now)
            .overdue
            .iter()
            .filter(|t| !t.is_completed())
            .count();
        let completion_percent = if tasks.is_empty() {
            0
        } else {
            (completed * 100 / tasks.len()) as u8
        };

        TaskSummary {
            total: tasks.len(),
            not_started: count(TaskStatus::NotStarted),
            in_progress: count(TaskStatus::InProgress),
            completed,
            overdue,
            completion_percent,
        }
    }

    /// Whether both saved blobs were readable when the session opened
    pub fn is_writable(&self) -> bool {
        self.profile_writable && self.tasks_writable
    }

    fn persist_profile(&self) {
        if !self.profile_writable {
            warn!("Not saving profile: the stored profile could not be read");
            return;
        }
        if let Err(e) = self.profile_store.save(self.profile.profile()) {
            warn!("Failed to save profile: {}", e);
        }
    }

    fn persist_tasks(&self) {
        if !self.tasks_writable {
            warn!("Not saving tasks: the stored tasks could not be read");
            return;
        }
        if let Err(e) = self.task_store.save(&self.tasks.tasks().to_vec()) {
            warn!("Failed to save tasks: {}", e);
        }
    }
}
