//! Selector fallback chains and the per-site lookup tables.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Selector};

use crate::models::JobSource;

/// An ordered list of CSS selectors tried against one scope. The first
/// selector whose match carries non-empty trimmed text wins; if none do,
/// the field stays empty (a selector miss is never an error).
#[derive(Debug, Clone)]
pub(crate) struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    pub(crate) fn parse(chain: &[&str]) -> Result<Self> {
        let selectors = chain
            .iter()
            .map(|css| parse_selector(css))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    pub(crate) fn resolve(&self, scope: ElementRef) -> String {
        for selector in &self.selectors {
            if let Some(element) = scope.select(selector).next() {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return text;
                }
            }
        }
        String::new()
    }
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow!("invalid selector '{}': {:?}", css, err))
}

/// Lookup table for one site strategy: how to find candidate listing
/// nodes and how to read each field out of them.
#[derive(Debug, Clone)]
pub(crate) struct SiteRules {
    pub(crate) source: JobSource,
    pub(crate) candidates: Selector,
    pub(crate) title: SelectorChain,
    pub(crate) company: SelectorChain,
    /// LinkedIn and Indeed skip candidates without a company; the generic
    /// strategy falls back to "Unknown Company".
    pub(crate) company_required: bool,
    pub(crate) location: SelectorChain,
    pub(crate) description: SelectorChain,
}

impl SiteRules {
    pub(crate) fn linkedin() -> Result<Self> {
        Ok(Self {
            source: JobSource::LinkedIn,
            candidates: parse_selector(
                "[data-job-id], .job-card, .jobs-search-results__list-item",
            )?,
            title: SelectorChain::parse(&["[data-job-title]", ".job-title", "h3 a"])?,
            company: SelectorChain::parse(&["[data-company-name]", ".company-name", "h4 a"])?,
            company_required: true,
            location: SelectorChain::parse(&["[data-job-location]", ".job-location"])?,
            description: SelectorChain::parse(&[".job-description", "[data-job-description]"])?,
        })
    }

    pub(crate) fn indeed() -> Result<Self> {
        Ok(Self {
            source: JobSource::Indeed,
            candidates: parse_selector(
                "[data-jk], .job_seen_beacon, .slider_container .slider_item",
            )?,
            title: SelectorChain::parse(&["[data-jk] h2 a", ".jobTitle a"])?,
            company: SelectorChain::parse(&["[data-testid=\"company-name\"]", ".companyName"])?,
            company_required: true,
            location: SelectorChain::parse(&[
                "[data-testid=\"job-location\"]",
                ".companyLocation",
            ])?,
            description: SelectorChain::parse(&["[data-testid=\"job-snippet\"]", ".summary"])?,
        })
    }

    pub(crate) fn generic() -> Result<Self> {
        Ok(Self {
            source: JobSource::Generic,
            candidates: parse_selector(
                ".job, .job-item, .position, .listing, [class*=\"job\"]",
            )?,
            title: SelectorChain::parse(&[
                "h1",
                "h2",
                "h3",
                "h4",
                "[class*=\"title\"]",
                "[class*=\"position\"]",
            ])?,
            company: SelectorChain::parse(&["[class*=\"company\"]", "[class*=\"employer\"]"])?,
            company_required: false,
            location: SelectorChain::parse(&["[class*=\"location\"]", "[class*=\"city\"]"])?,
            description: SelectorChain::parse(&[
                "[class*=\"description\"]",
                "[class*=\"summary\"]",
                "p",
            ])?,
        })
    }
}
