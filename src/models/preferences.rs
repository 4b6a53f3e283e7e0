use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

/// Stored under the `user_preferences` key as a single JSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub job_types: Vec<String>,
    pub salary_range: SalaryRange,
    pub remote_only: bool,
    pub notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            locations: Vec::new(),
            job_types: Vec::new(),
            salary_range: SalaryRange { min: 0, max: 0 },
            remote_only: false,
            notifications: true,
        }
    }
}

/// Identity returned by a backend login, stored under the `user_data` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub uid: String,
}
