//! Initial tasks for a freshly completed profile

use crate::roadmap::deadline_after;
use chrono::{DateTime, Utc};
use navigator_common::{NewTask, PathId, Task};

/// Documents the pension office asks for
pub const PENSION_DOCUMENTS: [&str; 3] = ["Death Certificate", "Service Record", "NOK Certificate"];

fn seed_draft(path: PathId, now: DateTime<Utc>) -> Option<NewTask> {
    let draft = match path {
        PathId::GovernmentProcesses => NewTask::pension("Submit Pension Application")
            .with_description("Gather the required documents and file the family pension claim")
            .with_deadline(deadline_after(now, 30))
            .with_documents(PENSION_DOCUMENTS),
        PathId::EducationCareer => NewTask::education("Apply for Scholarships")
            .with_description("Apply for the education scholarships available to martyr families")
            .with_deadline(deadline_after(now, 60)),
        PathId::SkillJob => NewTask::skill("Enroll in Skill Training")
            .with_description("Join a skill development program to prepare for employment")
            .with_deadline(deadline_after(now, 15)),
        PathId::FamilyDashboard => return None,
    };
    Some(draft)
}

/// One seed task per actionable path, in path order
pub fn seed_tasks(paths: &[PathId], now: DateTime<Utc>) -> Vec<Task> {
    paths
        .iter()
        .filter_map(|&path| seed_draft(path, now))
        .map(|draft| Task::create(draft, now))
        .collect()
}
