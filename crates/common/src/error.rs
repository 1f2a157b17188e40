use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Document '{document}' not found on task {task_id}")]
    DocumentNotFound { task_id: String, document: String },

    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    #[error("Invalid task category: {0}")]
    InvalidCategory(String),

    #[error("Invalid path identifier: {0}")]
    InvalidPath(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("Rule parsing error: {0}")]
    RuleParsing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
