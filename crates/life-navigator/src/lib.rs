//! Life Navigator
//!
//! Turns a family's self-reported profile into support paths, a milestone
//! roadmap and a tracked task list, and keeps them persisted.

pub mod eligibility;
pub mod persistence;
pub mod roadmap;
pub mod seeder;
pub mod session;
pub mod store;
pub mod timeline;

pub use eligibility::{generate_paths, load_rules, RuleParser, RuleSet};
pub use persistence::{JsonFileStore, MemoryStore, RedisStore, Store};
pub use roadmap::generate_roadmap;
pub use seeder::seed_tasks;
pub use session::{Navigator, TaskSummary};
pub use store::{ProfileStore, TaskStore};
pub use timeline::{filter_by_category, group_by_deadline, Timeline, TimelineGrouper};
