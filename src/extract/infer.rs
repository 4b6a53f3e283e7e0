//! Text-derived inference shared by every site strategy.

use crate::models::JobType;

/// Technology terms scanned against a posting's description.
const SKILL_TERMS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "vue",
    "angular",
    "node.js",
    "python",
    "java",
    "c++",
    "c#",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "html",
    "css",
    "sass",
    "less",
    "sql",
    "mongodb",
    "postgresql",
    "mysql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "jenkins",
    "ci/cd",
];

/// Role and domain terms scanned against title + description.
const TAG_TERMS: &[&str] = &[
    "senior",
    "junior",
    "lead",
    "manager",
    "director",
    "architect",
    "frontend",
    "backend",
    "fullstack",
    "devops",
    "qa",
    "testing",
    "mobile",
    "web",
    "desktop",
    "cloud",
    "ai",
    "ml",
    "data",
];

/// An ordered list of lowercase terms matched by case-insensitive
/// substring. Hits come back in vocabulary order, not order of
/// appearance in the text.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(|t| t.into().to_lowercase()).collect(),
        }
    }

    /// The default technology-skill vocabulary.
    pub fn skills() -> Self {
        Self::new(SKILL_TERMS.iter().copied())
    }

    /// The default role/domain tag vocabulary.
    pub fn role_tags() -> Self {
        Self::new(TAG_TERMS.iter().copied())
    }

    pub fn matches_in(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .cloned()
            .collect()
    }
}

/// Keyword checks run in priority order against title + description;
/// the first hit wins, anything else is full-time.
pub fn infer_job_type(title: &str, description: &str) -> JobType {
    let text = format!("{} {}", title, description).to_lowercase();

    if text.contains("intern") {
        JobType::Internship
    } else if text.contains("contract") || text.contains("freelance") {
        JobType::Contract
    } else if text.contains("part-time") || text.contains("part time") {
        JobType::PartTime
    } else {
        JobType::FullTime
    }
}

pub fn is_remote(title: &str, description: &str, location: &str) -> bool {
    let text = format!("{} {} {}", title, description, location).to_lowercase();
    text.contains("remote") || text.contains("work from home") || text.contains("wfh")
}
