use crate::{PathId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A milestone within a roadmap path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub title: String,

    pub description: String,

    /// RFC 3339 timestamp, only for time-bound steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    pub status: TaskStatus,
}

/// One path of the roadmap with its ordered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPath {
    pub path: PathId,
    pub path_name: String,
    pub description: String,
    pub steps: Vec<RoadmapStep>,
}

/// Ordered list of roadmap paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roadmap(pub Vec<RoadmapPath>);

impl Roadmap {
    pub fn paths(&self) -> &[RoadmapPath] {
        &self.0
    }

    pub fn get(&self, path: PathId) -> Option<&RoadmapPath> {
        self.0.iter().find(|entry| entry.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
