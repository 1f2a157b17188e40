//! In-memory profile and task state

pub mod profile;
pub mod tasks;

pub use profile::ProfileStore;
pub use tasks::TaskStore;
