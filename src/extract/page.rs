//! Detailed capture of a single posting page.
//!
//! The list-oriented strategies in this module's parent read many small
//! listing cards; this path reads one opened posting with richer selector
//! chains, including salary, and is the only extraction path that fills
//! the salary field.

use anyhow::Result;
use chrono::Utc;
use scraper::Html;
use serde::{Deserialize, Serialize};
use url::Url;

use super::selectors::SelectorChain;
use super::{infer_job_type, is_remote, or_default, Extractor};
use crate::models::{new_job_id, JobPosting, JobSource};

/// Raw field text captured from one posting page. Fields that did not
/// resolve are empty strings; callers may edit them before promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCapture {
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub(super) struct PageRules {
    company: SelectorChain,
    position: SelectorChain,
    location: SelectorChain,
    salary: SelectorChain,
    description: SelectorChain,
}

impl PageRules {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            company: SelectorChain::parse(&[
                "[data-testid=\"inlineHeader-companyName\"]",
                ".jobsearch-InlineCompanyRating a",
                ".employer-name",
                ".company-name",
                "[itemprop=\"hiringOrganization\"]",
                "[data-company-name]",
                "[class*=\"company\"]",
                "[class*=\"employer\"]",
            ])?,
            position: SelectorChain::parse(&[
                "h1[data-testid=\"job-title\"]",
                "h1.jobsearch-JobInfoHeader-title",
                "h1[itemprop=\"title\"]",
                "h1[class*=\"title\"]",
                "h1[class*=\"position\"]",
                "h1.job-title",
                "h1",
                "[data-testid=\"job-title\"]",
                ".jobsearch-JobInfoHeader-title",
            ])?,
            location: SelectorChain::parse(&[
                "[data-testid=\"job-location\"]",
                ".jobsearch-JobInfoHeader-subtitle div",
                "[itemprop=\"jobLocation\"]",
                "[class*=\"location\"]",
                ".location",
            ])?,
            salary: SelectorChain::parse(&[
                "[data-testid=\"salary-range\"]",
                ".jobsearch-JobMetadataHeader-item",
                "[itemprop=\"baseSalary\"]",
                "[class*=\"salary\"]",
                "[class*=\"compensation\"]",
            ])?,
            description: SelectorChain::parse(&[
                "[data-testid=\"job-description\"]",
                "#jobDescriptionText",
                "[itemprop=\"description\"]",
                "[class*=\"description\"]",
            ])?,
        })
    }
}

impl Extractor {
    /// Read one opened posting page. Always succeeds; unresolved fields
    /// come back empty.
    pub fn capture_page(&self, html: &str, page_url: &Url) -> PageCapture {
        let document = Html::parse_document(html);
        let root = document.root_element();

        PageCapture {
            company: self.page.company.resolve(root),
            position: self.page.position.resolve(root),
            location: self.page.location.resolve(root),
            salary: self.page.salary.resolve(root),
            description: self.page.description.resolve(root),
            url: page_url.to_string(),
        }
    }

    /// Promote a capture to a saveable posting. Position and company are
    /// both required on this path; anything less returns `None`.
    pub fn promote(&self, capture: PageCapture) -> Option<JobPosting> {
        let position = capture.position.trim().to_string();
        let company = capture.company.trim().to_string();
        if position.is_empty() || company.is_empty() {
            return None;
        }

        let salary = capture.salary.trim();
        let salary = if salary.is_empty() {
            None
        } else {
            Some(salary.to_string())
        };

        Some(JobPosting {
            id: new_job_id(),
            requirements: self.skills.matches_in(&capture.description),
            job_type: infer_job_type(&position, &capture.description),
            remote: is_remote(&position, &capture.description, &capture.location),
            tags: self
                .role_tags
                .matches_in(&format!("{} {}", position, capture.description)),
            title: position,
            company,
            location: or_default(capture.location, "Not specified"),
            description: or_default(capture.description, "No description available"),
            salary,
            url: capture.url,
            date_posted: Utc::now(),
            source: JobSource::Extension,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobType;

    const POSTING_PAGE: &str = r#"
        <html><body>
            <h1 class="jobsearch-JobInfoHeader-title">Staff Platform Engineer</h1>
            <div class="jobsearch-InlineCompanyRating"><a>Globex</a></div>
            <div class="jobsearch-JobInfoHeader-subtitle"><div>Toronto, ON</div></div>
            <div class="jobsearch-JobMetadataHeader-item">$150,000 - $180,000 a year</div>
            <div id="jobDescriptionText">Kubernetes, Go and Terraform. Fully remote.</div>
        </body></html>
    "#;

    #[test]
    fn capture_resolves_all_fields() {
        let ex = Extractor::new().unwrap();
        let capture = ex.capture_page(
            POSTING_PAGE,
            &Url::parse("https://www.indeed.com/viewjob?jk=abc").unwrap(),
        );

        assert_eq!(capture.position, "Staff Platform Engineer");
        assert_eq!(capture.company, "Globex");
        assert_eq!(capture.location, "Toronto, ON");
        assert_eq!(capture.salary, "$150,000 - $180,000 a year");
        assert!(capture.description.contains("Kubernetes"));
    }

    #[test]
    fn promote_builds_extension_sourced_job_with_salary() {
        let ex = Extractor::new().unwrap();
        let capture = ex.capture_page(
            POSTING_PAGE,
            &Url::parse("https://www.indeed.com/viewjob?jk=abc").unwrap(),
        );
        let job = ex.promote(capture).unwrap();

        assert_eq!(job.source, JobSource::Extension);
        assert_eq!(job.salary.as_deref(), Some("$150,000 - $180,000 a year"));
        assert_eq!(job.title, "Staff Platform Engineer");
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(job.remote);
        assert!(job.requirements.contains(&"kubernetes".to_string()));
    }

    #[test]
    fn promote_requires_position_and_company() {
        let ex = Extractor::new().unwrap();
        let capture = ex.capture_page(
            "<html><body><h1>Engineer</h1></body></html>",
            &Url::parse("https://example.com/job").unwrap(),
        );
        // A title alone is not enough on the detailed path.
        assert!(ex.promote(capture).is_none());
    }

    #[test]
    fn salary_stays_absent_when_unresolved() {
        let page = r#"
            <html><body>
                <h1>Engineer</h1>
                <span class="company-name">Acme</span>
            </body></html>
        "#;
        let ex = Extractor::new().unwrap();
        let capture = ex.capture_page(page, &Url::parse("https://example.com/job").unwrap());
        let job = ex.promote(capture).unwrap();
        assert!(job.salary.is_none());
        assert_eq!(job.description, "No description available");
    }
}
