use chrono::{DateTime, Utc};
use navigator_common::{Error, NewTask, Result, Task, TaskPatch};
use tracing::{debug, info};

/// Ordered task list with create and update operations. Tasks are never removed.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Store a new task with a fresh id and timestamps
    pub fn add(&mut self, draft: NewTask, now: DateTime<Utc>) -> Task {
        let task = Task::create(draft, now);
        info!("Added task: {} ({})", task.id, task.category);
        self.tasks.push(task.clone());
        task
    }

    /// Append already-built tasks, e.g. seeded ones
    pub fn extend(&mut self, tasks: Vec<Task>) {
        self.tasks.extend(tasks);
    }

    /// Apply a partial update to one task
    pub fn update(&mut self, task_id: &str, patch: TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        let task = self.get_mut(task_id)?;
        let changed = task.apply(patch, now);
        debug!("Updated task: {} status: {} changed: {}", task.id, task.status, changed);
        Ok(task.clone())
    }

    /// Move a task to the next status in the cycle
    pub fn advance(&mut self, task_id: &str, now: DateTime<Utc>) -> Result<Task> {
        let next = self.get_mut(task_id)?.status.next();
        self.update(task_id, TaskPatch::status(next), now)
    }

    /// Mark a checklist document as submitted or not
    pub fn set_document_submitted(
        &mut self,
        task_id: &str,
        document: &str,
        submitted: bool,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let task = self.get_mut(task_id)?;
        let mut documents = task.documents.clone();
        let item = documents
            .iter_mut()
            .find(|d| d.name.eq_ignore_ascii_case(document.trim()))
            .ok_or_else(|| Error::DocumentNotFound {
                task_id: task_id.to_string(),
                document: document.to_string(),
            })?;
        item.submitted = submitted;

        self.update(
            task_id,
            TaskPatch {
                documents: Some(documents),
                ..TaskPatch::default()
            },
            now,
        )
    }

    fn get_mut(&mut self, task_id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }
}
