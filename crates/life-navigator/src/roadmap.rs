//! Roadmap generation
//!
//! Each actionable path has a fixed four-step template. Only which paths are
//! present depends on the profile; step text never does.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use navigator_common::{PathId, Roadmap, RoadmapPath, RoadmapStep, TaskStatus};

struct StepTemplate {
    title: &'static str,
    description: &'static str,
    due_in_days: Option<i64>,
}

static GOVERNMENT_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        title: "Gather Required Documents",
        description: "Collect the death certificate, service record and NOK certificate",
        due_in_days: None,
    },
    StepTemplate {
        title: "Submit Pension Application",
        description: "File the family pension claim with the record office",
        due_in_days: Some(30),
    },
    StepTemplate {
        title: "Apply for Canteen Card",
        description: "Register the family for CSD canteen facilities",
        due_in_days: None,
    },
    StepTemplate {
        title: "Check Pension Application Status",
        description: "Follow up with the pension disbursing authority",
        due_in_days: Some(45),
    },
];

static EDUCATION_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        title: "Apply for Scholarship",
        description: "Apply for scholarships reserved for wards of martyrs",
        due_in_days: None,
    },
    StepTemplate {
        title: "School/College Admission",
        description: "Secure admission using the reserved quota",
        due_in_days: None,
    },
    StepTemplate {
        title: "Career Counseling",
        description: "Book a counseling session to choose a stream or course",
        due_in_days: None,
    },
    StepTemplate {
        title: "Entrance Exam Registration",
        description: "Register for the entrance exams of the chosen course",
        due_in_days: None,
    },
];

static SKILL_STEPS: [StepTemplate; 4] = [
    StepTemplate {
        title: "Skill Assessment",
        description: "Identify existing skills and areas of interest",
        due_in_days: None,
    },
    StepTemplate {
        title: "Join Skill Training",
        description: "Enroll in a government-sponsored skill development program",
        due_in_days: Some(15),
    },
    StepTemplate {
        title: "Create Resume",
        description: "Prepare a resume highlighting skills and training",
        due_in_days: None,
    },
    StepTemplate {
        title: "Apply for Government Jobs",
        description: "Apply for posts under the dependant and compassionate quota",
        due_in_days: None,
    },
];

fn template(path: PathId) -> Option<(&'static str, &'static [StepTemplate])> {
    match path {
        PathId::GovernmentProcesses => Some((
            "Pension, benefits and official paperwork",
            &GOVERNMENT_STEPS[..],
        )),
        PathId::EducationCareer => Some((
            "Scholarships, admissions and career planning",
            &EDUCATION_STEPS[..],
        )),
        PathId::SkillJob => Some((
            "Skill training and employment opportunities",
            &SKILL_STEPS[..],
        )),
        PathId::FamilyDashboard => None,
    }
}

/// RFC 3339 timestamp `days` after `now`, millisecond precision
pub(crate) fn deadline_after(now: DateTime<Utc>, days: i64) -> String {
    (now + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the roadmap for a set of paths; `family-dashboard` has no entry
pub fn generate_roadmap(paths: &[PathId], now: DateTime<Utc>) -> Roadmap {
    let entries = paths
        .iter()
        .filter_map(|&path| {
            let (description, steps) = template(path)?;
            Some(RoadmapPath {
                path,
                path_name: path.display_name().to_string(),
                description: description.to_string(),
                steps: steps
                    .iter()
                    .map(|step| RoadmapStep {
                        title: step.title.to_string(),
                        description: step.description.to_string(),
                        deadline: step.due_in_days.map(|days| deadline_after(now, days)),
                        status: TaskStatus::NotStarted,
                    })
                    .collect(),
            })
        })
        .collect();

    Roadmap(entries)
}
