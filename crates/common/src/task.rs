//! Actionable tasks and their vocabulary

use crate::{Error, PathId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

static TASK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Task progress.
///
/// Older saves use `pending` for tasks that were never started; it is read
/// as `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[serde(alias = "pending")]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not-started",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Next status in the cycle the task cards step through
    pub fn next(&self) -> Self {
        match self {
            TaskStatus::NotStarted => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::NotStarted,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "not-started" | "pending" => Ok(TaskStatus::NotStarted),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Pension,
    Education,
    Skill,
    Job,
    Document,
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Pension,
        TaskCategory::Education,
        TaskCategory::Skill,
        TaskCategory::Job,
        TaskCategory::Document,
        TaskCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Pension => "pension",
            TaskCategory::Education => "education",
            TaskCategory::Skill => "skill",
            TaskCategory::Job => "job",
            TaskCategory::Document => "document",
            TaskCategory::Other => "other",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        TaskCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| Error::InvalidCategory(s.to_string()))
    }
}

/// Category selector for task lists: everything, or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TaskCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: TaskCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<TaskCategory> for CategoryFilter {
    fn from(category: TaskCategory) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// An entry in a task's document checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub name: String,

    /// Older saves call this `isSubmitted` or `isUploaded`
    #[serde(default, alias = "isSubmitted", alias = "isUploaded")]
    pub submitted: bool,
}

impl DocumentItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            submitted: false,
        }
    }
}

/// A tracked unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Kept as the raw string so a malformed value survives a load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    pub status: TaskStatus,

    pub category: TaskCategory,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_path: Option<PathId>,

    #[serde(default)]
    pub documents: Vec<DocumentItem>,

    /// Older saves may lack timestamps; they read as the Unix epoch
    #[serde(default = "legacy_timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "legacy_timestamp")]
    pub updated_at: DateTime<Utc>,
}

fn legacy_timestamp() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Task {
    /// Materialize a draft with a fresh id and timestamps
    pub fn create(draft: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: next_task_id(now),
            title: draft.title,
            description: draft.description,
            deadline: draft.deadline,
            status: draft.status,
            category: draft.category,
            related_path: draft.related_path,
            documents: draft.documents,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields of a patch; returns whether anything changed
    pub fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) -> bool {
        let before = self.clone();

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(related_path) = patch.related_path {
            self.related_path = related_path;
        }
        if let Some(documents) = patch.documents {
            self.documents = documents;
        }

        let changed = *self != before;
        self.updated_at = now;
        changed
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Documents still missing from the checklist
    pub fn pending_documents(&self) -> impl Iterator<Item = &DocumentItem> {
        self.documents.iter().filter(|doc| !doc.submitted)
    }
}

/// Generate a task id: clock milliseconds plus a process-wide sequence number
pub fn next_task_id(now: DateTime<Utc>) -> String {
    let seq = TASK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("task-{}-{}", now.timestamp_millis(), seq)
}

/// A task before it is stored (no id, no timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub deadline: Option<String>,

    #[serde(default = "default_status")]
    pub status: TaskStatus,

    pub category: TaskCategory,

    #[serde(default)]
    pub related_path: Option<PathId>,

    #[serde(default)]
    pub documents: Vec<DocumentItem>,
}

fn default_status() -> TaskStatus {
    TaskStatus::NotStarted
}

impl NewTask {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            deadline: None,
            status: default_status(),
            category,
            related_path: None,
            documents: Vec::new(),
        }
    }

    /// Draft from the education screen
    pub fn education(title: impl Into<String>) -> Self {
        Self::new(title, TaskCategory::Education).with_path(PathId::EducationCareer)
    }

    /// Draft from the pension screen
    pub fn pension(title: impl Into<String>) -> Self {
        Self::new(title, TaskCategory::Pension).with_path(PathId::GovernmentProcesses)
    }

    /// Draft from the skills screen
    pub fn skill(title: impl Into<String>) -> Self {
        Self::new(title, TaskCategory::Skill).with_path(PathId::SkillJob)
    }

    /// Draft from the jobs screen
    pub fn job(title: impl Into<String>) -> Self {
        Self::new(title, TaskCategory::Job).with_path(PathId::SkillJob)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    pub fn with_path(mut self, path: PathId) -> Self {
        self.related_path = Some(path);
        self
    }

    pub fn with_documents<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documents = names.into_iter().map(DocumentItem::new).collect();
        self
    }
}

/// Partial task update. `None` leaves the field untouched; the nested
/// options of `deadline` and `related_path` allow clearing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub category: Option<TaskCategory>,
    pub related_path: Option<Option<PathId>>,
    pub documents: Option<Vec<DocumentItem>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_task_without_timestamps() {
        let json = r#"[
            { "id": "1", "title": "Old task", "status": "pending", "category": "pension" },
            { "id": "2", "title": "New task", "status": "completed", "category": "job",
              "createdAt": "2024-01-10T00:00:00Z", "updatedAt": "2024-01-11T00:00:00Z" }
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].created_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(tasks[0].updated_at, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(tasks[1].created_at, fixed_now());
    }

    #[test]
    fn test_legacy_pending_status() {
        let status: TaskStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, TaskStatus::NotStarted);
        assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::NotStarted);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"not-started\"");
    }

    #[test]
    fn test_status_cycle() {
        let status = TaskStatus::NotStarted;
        assert_eq!(status.next(), TaskStatus::InProgress);
        assert_eq!(status.next().next(), TaskStatus::Completed);
        assert_eq!(status.next().next().next(), TaskStatus::NotStarted);
    }

    #[test]
    fn test_legacy_document_field_names() {
        let submitted: DocumentItem =
            serde_json::from_str(r#"{"name":"Death Certificate","isSubmitted":true}"#).unwrap();
        let uploaded: DocumentItem =
            serde_json::from_str(r#"{"name":"Service Record","isUploaded":true}"#).unwrap();
        let missing: DocumentItem = serde_json::from_str(r#"{"name":"NOK Certificate"}"#).unwrap();

        assert!(submitted.submitted);
        assert!(uploaded.submitted);
        assert!(!missing.submitted);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Education".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(TaskCategory::Education)
        );
        assert!("sports".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_task_ids_unique() {
        let now = fixed_now();
        let a = Task::create(NewTask::education("Apply for scholarship"), now);
        let b = Task::create(NewTask::education("Apply for scholarship"), now);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("task-"));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let created = fixed_now();
        let mut task = Task::create(
            NewTask::pension("Submit pension application")
                .with_deadline("2024-02-09T00:00:00Z")
                .with_documents(["Death Certificate"]),
            created,
        );
        let before = task.clone();
        let later = created + chrono::Duration::hours(1);

        assert!(task.apply(TaskPatch::status(TaskStatus::Completed), later));
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.title, before.title);
        assert_eq!(task.deadline, before.deadline);
        assert_eq!(task.documents, before.documents);
        assert_eq!(task.created_at, before.created_at);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_apply_can_clear_deadline() {
        let mut task = Task::create(
            NewTask::skill("Join skill training").with_deadline("2024-01-25"),
            fixed_now(),
        );
        task.apply(
            TaskPatch {
                deadline: Some(None),
                ..TaskPatch::default()
            },
            fixed_now(),
        );
        assert!(task.deadline.is_none());
    }
}
