pub mod api;
pub mod extract;
pub mod models;
pub mod settings;
pub mod store;

pub use api::{ApiClient, AuthSession};
pub use extract::{is_job_site, CandidateOutcome, Extractor, PageCapture, Vocabulary};
pub use models::{JobPosting, JobSource, JobType, UserPreferences, UserProfile};
pub use settings::SettingsStore;
pub use store::{JobStore, MemoryBackend, SqliteBackend, StorageBackend};
