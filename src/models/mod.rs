mod job;
mod preferences;

pub use job::{new_job_id, JobPosting, JobSource, JobType};
pub use preferences::{SalaryRange, UserPreferences, UserProfile};
