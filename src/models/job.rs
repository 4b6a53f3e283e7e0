//! Job posting data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

/// Where a posting came from. `Extension` is the detailed page-capture
/// path, `Manual` a hand-entered record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JobSource {
    LinkedIn,
    Indeed,
    Generic,
    Manual,
    #[serde(rename = "extension")]
    Extension,
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::LinkedIn => "LinkedIn",
            JobSource::Indeed => "Indeed",
            JobSource::Generic => "Generic",
            JobSource::Manual => "Manual",
            JobSource::Extension => "extension",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    /// Immutable once assigned; the only identity the store keys on.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// Skill-vocabulary hits, in vocabulary order (not order of appearance).
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub remote: bool,
    pub url: String,
    /// Time of extraction, not the posting's real publish date. The source
    /// page's own date is never parsed.
    pub date_posted: DateTime<Utc>,
    pub source: JobSource,
    /// Role/domain-vocabulary hits, in vocabulary order.
    pub tags: Vec<String>,
}

/// Generate a fresh posting id: `job_<millis>_<9-char suffix>`.
///
/// Uniqueness is best effort, not a cryptographic guarantee.
pub fn new_job_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("job_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}
