use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for job postings managed by the console.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Project,
    Task,
}

impl JobType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::FullTime,
            Self::PartTime,
            Self::Contract,
            Self::Project,
            Self::Task,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Project => "Project",
            Self::Task => "Task",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    High,
    Medium,
    Low,
}

impl JobPriority {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    /// Severity rank used when sorting: high outranks medium outranks low.
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Failed,
    Expired,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Draft,
            Self::Active,
            Self::Paused,
            Self::Completed,
            Self::Failed,
            Self::Expired,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Expired => "expired",
        }
    }
}

/// A posting tracked by the admin console, from draft through completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub department: String,
    pub kind: JobType,
    pub description: String,
    pub priority: JobPriority,
    pub deadline: NaiveDate,
    pub resources: Vec<String>,
    pub assigned_to: Vec<String>,
    pub status: JobStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mutable form state mirroring a job's editable fields, prior to commit.
///
/// `deadline` stays optional until the form supplies one; validation reports
/// the missing value instead of failing the submission outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub company: String,
    pub location: String,
    pub department: String,
    pub kind: JobType,
    pub description: String,
    pub priority: JobPriority,
    pub deadline: Option<NaiveDate>,
    pub resources: Vec<String>,
    pub assigned_to: Vec<String>,
    pub status: JobStatus,
}

impl Default for JobDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            department: String::new(),
            kind: JobType::FullTime,
            description: String::new(),
            priority: JobPriority::Medium,
            deadline: None,
            resources: Vec::new(),
            assigned_to: Vec::new(),
            status: JobStatus::Draft,
        }
    }
}
