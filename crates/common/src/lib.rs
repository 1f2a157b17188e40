pub mod error;
pub mod path;
pub mod profile;
pub mod roadmap;
pub mod task;

pub use error::{Error, Result};
pub use path::PathId;
pub use profile::{Identification, MartyrDetails, Profile, ProfileUpdate, Relationship};
pub use roadmap::{Roadmap, RoadmapPath, RoadmapStep};
pub use task::{
    CategoryFilter, DocumentItem, NewTask, Task, TaskCategory, TaskPatch, TaskStatus,
};
