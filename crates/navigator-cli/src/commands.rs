//! Subcommands and their execution against a session

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use life_navigator::persistence::Store;
use life_navigator::timeline::parse_deadline;
use life_navigator::Navigator;
use navigator_common::{
    CategoryFilter, Identification, MartyrDetails, NewTask, PathId, Profile, ProfileUpdate,
    Relationship, Task, TaskCategory, TaskPatch, TaskStatus,
};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "life-navigator")]
#[command(about = "Personal support roadmap and task tracker for martyr families")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or edit the family profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Show the life roadmap generated when the profile was completed
    Roadmap,

    /// List, add and update tasks
    Tasks {
        #[command(subcommand)]
        action: TaskCommand,
    },

    /// Tasks grouped into overdue, upcoming, future and no-deadline
    Timeline {
        /// Reference time (RFC 3339 or YYYY-MM-DD), defaults to now
        #[arg(long)]
        now: Option<String>,
    },

    /// Progress counts across all tasks
    Summary {
        /// Reference time (RFC 3339 or YYYY-MM-DD), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Print the stored profile
    Show,

    /// Update profile fields; only the given flags change
    Set(ProfileArgs),
}

#[derive(Args, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// widow, child, parent or other
    #[arg(long)]
    pub relationship: Option<Relationship>,

    #[arg(long)]
    pub age: Option<u32>,

    /// Support topic, repeatable; replaces the stored list
    #[arg(long = "challenge")]
    pub challenges: Vec<String>,

    /// Remove every stored support topic
    #[arg(long, conflicts_with = "challenges")]
    pub clear_challenges: bool,

    #[arg(long)]
    pub martyr_name: Option<String>,

    #[arg(long)]
    pub martyr_rank: Option<String>,

    #[arg(long)]
    pub martyr_force: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub martyr_date_of_death: Option<String>,

    #[arg(long)]
    pub id_type: Option<String>,

    #[arg(long)]
    pub id_number: Option<String>,

    /// Mark the profile complete
    #[arg(long)]
    pub complete: bool,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// List tasks, optionally for one category
    List {
        /// all, pension, education, skill, job, document or other
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },

    /// Add a task
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        category: TaskCategory,

        #[arg(long, default_value = "")]
        description: String,

        /// RFC 3339 or YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,

        /// Path the task belongs to
        #[arg(long)]
        path: Option<PathId>,

        /// Checklist document, repeatable
        #[arg(long = "document")]
        documents: Vec<String>,
    },

    /// Set a task's status
    Status { id: String, status: TaskStatus },

    /// Move a task to its next status
    Advance { id: String },

    /// Tick a checklist document
    Document {
        id: String,
        name: String,

        /// Mark the document as not submitted instead
        #[arg(long)]
        unsubmitted: bool,
    },
}

impl ProfileArgs {
    /// Turn flags into a shallow update. Nested records are rebuilt from the
    /// current profile so unspecified sub-fields are kept.
    pub fn into_update(self, current: &Profile) -> ProfileUpdate {
        let martyr_changed = self.martyr_name.is_some()
            || self.martyr_rank.is_some()
            || self.martyr_force.is_some()
            || self.martyr_date_of_death.is_some();
        let martyr = martyr_changed.then(|| MartyrDetails {
            name: self.martyr_name.or_else(|| current.martyr.name.clone()),
            rank: self.martyr_rank.or_else(|| current.martyr.rank.clone()),
            force: self.martyr_force.or_else(|| current.martyr.force.clone()),
            date_of_death: self
                .martyr_date_of_death
                .or_else(|| current.martyr.date_of_death.clone()),
        });

        let identification_changed = self.id_type.is_some() || self.id_number.is_some();
        let identification = identification_changed.then(|| Identification {
            id_type: self.id_type.or_else(|| current.identification.id_type.clone()),
            id_number: self
                .id_number
                .or_else(|| current.identification.id_number.clone()),
        });

        ProfileUpdate {
            name: self.name,
            relationship: self.relationship,
            age: self.age,
            martyr,
            identification,
            challenges: if self.clear_challenges {
                Some(Vec::new())
            } else {
                (!self.challenges.is_empty()).then_some(self.challenges)
            },
            is_profile_complete: self.complete.then_some(true),
        }
    }
}

/// Parse a `--now` flag, defaulting to the current time
pub fn reference_time(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_deadline(raw).with_context(|| format!("Invalid --now value: {}", raw)),
        None => Ok(Utc::now()),
    }
}

fn tasks_json(tasks: &[Task]) -> Result<Value> {
    Ok(serde_json::to_value(tasks)?)
}

/// Run one command and return what should be printed
pub fn execute<P, T>(navigator: &mut Navigator<P, T>, command: Commands) -> Result<Value>
where
    P: Store<Profile>,
    T: Store<Vec<Task>>,
{
    let output = match command {
        Commands::Profile { action } => match action {
            ProfileCommand::Show => serde_json::to_value(navigator.profile())?,
            ProfileCommand::Set(args) => {
                let update = args.into_update(navigator.profile());
                serde_json::to_value(navigator.update_profile(update))?
            }
        },

        Commands::Roadmap => match navigator.roadmap() {
            Some(roadmap) => serde_json::to_value(roadmap)?,
            None => json!({ "message": "Complete the profile to generate a roadmap" }),
        },

        Commands::Tasks { action } => match action {
            TaskCommand::List { category } => tasks_json(&navigator.tasks_in(category))?,
            TaskCommand::Add {
                title,
                category,
                description,
                deadline,
                path,
                documents,
            } => {
                if let Some(raw) = deadline.as_deref() {
                    if parse_deadline(raw).is_none() {
                        anyhow::bail!("Invalid deadline: {}", raw);
                    }
                }
                let mut draft = NewTask::new(title, category)
                    .with_description(description)
                    .with_documents(documents);
                draft.deadline = deadline;
                draft.related_path = path;
                serde_json::to_value(navigator.add_task(draft))?
            }
            TaskCommand::Status { id, status } => {
                serde_json::to_value(navigator.update_task(&id, TaskPatch::status(status))?)?
            }
            TaskCommand::Advance { id } => serde_json::to_value(navigator.advance_task(&id)?)?,
            TaskCommand::Document {
                id,
                name,
                unsubmitted,
            } => serde_json::to_value(navigator.set_document_submitted(&id, &name, !unsubmitted)?)?,
        },

        Commands::Timeline { now } => {
            let now = reference_time(now.as_deref())?;
            serde_json::to_value(navigator.timeline(now))?
        }

        Commands::Summary { now } => {
            let now = reference_time(now.as_deref())?;
            serde_json::to_value(navigator.summary(now))?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use life_navigator::MemoryStore;

    fn navigator() -> Navigator<MemoryStore, MemoryStore> {
        Navigator::open(MemoryStore::new(), MemoryStore::new())
    }

    fn run(navigator: &mut Navigator<MemoryStore, MemoryStore>, args: &[&str]) -> Value {
        let mut argv = vec!["life-navigator"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("Failed to parse arguments");
        execute(navigator, cli.command).expect("Command failed")
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_profile_completion_seeds_tasks() {
        let mut nav = navigator();
        let profile = run(
            &mut nav,
            &[
                "profile",
                "set",
                "--name",
                "Anita",
                "--relationship",
                "widow",
                "--challenge",
                "pension",
                "--complete",
            ],
        );
        assert_eq!(profile["isProfileComplete"], true);
        assert_eq!(
            profile["generatedPaths"],
            json!(["government-processes", "skill-job", "family-dashboard"])
        );

        let tasks = run(&mut nav, &["tasks", "list"]);
        assert_eq!(tasks.as_array().unwrap().len(), 2);

        let pension = run(&mut nav, &["tasks", "list", "--category", "pension"]);
        assert_eq!(pension.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_martyr_flags_keep_other_fields() {
        let mut nav = navigator();
        run(
            &mut nav,
            &["profile", "set", "--martyr-name", "Naik S. Kumar", "--martyr-rank", "Naik"],
        );
        let profile = run(&mut nav, &["profile", "set", "--martyr-rank", "Havildar"]);
        assert_eq!(profile["martyr"]["name"], "Naik S. Kumar");
        assert_eq!(profile["martyr"]["rank"], "Havildar");
    }

    #[test]
    fn test_clear_challenges() {
        let mut nav = navigator();
        let profile = run(
            &mut nav,
            &["profile", "set", "--challenge", "pension", "--challenge", "legal"],
        );
        assert_eq!(profile["challenges"], json!(["pension", "legal"]));

        let profile = run(&mut nav, &["profile", "set", "--age", "40"]);
        assert_eq!(profile["challenges"], json!(["pension", "legal"]));

        let profile = run(&mut nav, &["profile", "set", "--clear-challenges"]);
        assert_eq!(profile["challenges"], json!([]));

        assert!(Cli::try_parse_from([
            "life-navigator",
            "profile",
            "set",
            "--challenge",
            "pension",
            "--clear-challenges",
        ])
        .is_err());
    }

    #[test]
    fn test_task_lifecycle() {
        let mut nav = navigator();
        let task = run(
            &mut nav,
            &[
                "tasks",
                "add",
                "--title",
                "Collect NOK certificate",
                "--category",
                "document",
                "--deadline",
                "2024-01-12",
                "--document",
                "NOK Certificate",
            ],
        );
        let id = task["id"].as_str().unwrap().to_string();

        let advanced = run(&mut nav, &["tasks", "advance", &id]);
        assert_eq!(advanced["status"], "in-progress");

        let documented = run(&mut nav, &["tasks", "document", &id, "NOK Certificate"]);
        assert_eq!(documented["documents"][0]["submitted"], true);

        let completed = run(&mut nav, &["tasks", "status", &id, "completed"]);
        assert_eq!(completed["status"], "completed");

        let timeline = run(&mut nav, &["timeline", "--now", "2024-01-10"]);
        assert_eq!(timeline["upcoming"].as_array().unwrap().len(), 1);

        let summary = run(&mut nav, &["summary", "--now", "2024-01-10"]);
        assert_eq!(summary["completionPercent"], 100);
    }

    #[test]
    fn test_invalid_deadline_rejected() {
        let mut nav = navigator();
        let cli = Cli::try_parse_from([
            "life-navigator",
            "tasks",
            "add",
            "--title",
            "x",
            "--category",
            "other",
            "--deadline",
            "soon",
        ])
        .unwrap();
        assert!(execute(&mut nav, cli.command).is_err());
    }

    #[test]
    fn test_unknown_task_fails() {
        let mut nav = navigator();
        let cli = Cli::try_parse_from(["life-navigator", "tasks", "advance", "nope"]).unwrap();
        let err = execute(&mut nav, cli.command).unwrap_err();
        assert!(err.to_string().contains("Task not found"));
    }

    #[test]
    fn test_roadmap_before_completion() {
        let mut nav = navigator();
        let roadmap = run(&mut nav, &["roadmap"]);
        assert!(roadmap["message"].is_string());
    }
}
