//! Client for the remote tracking backend.
//!
//! Saving locally and saving remotely are independent call sites layered
//! on the same `JobPosting` shape; nothing in the extractor or the local
//! store depends on this module.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::models::JobPosting;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub email: String,
    pub uid: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| anyhow!("not signed in; run login first"))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("login request failed")?;

        if !response.status().is_success() {
            bail!("login failed: {}", Self::error_message(response).await);
        }

        response
            .json::<AuthSession>()
            .await
            .context("login response was not the expected shape")
    }

    pub async fn save_job(&self, job: &JobPosting) -> Result<()> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.endpoint("/api/jobs"))
            .bearer_auth(token)
            .json(job)
            .send()
            .await
            .context("save request failed")?;

        if !response.status().is_success() {
            bail!("failed to save job: {}", Self::error_message(response).await);
        }
        Ok(())
    }

    pub async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.endpoint("/api/jobs"))
            .bearer_auth(token)
            .send()
            .await
            .context("fetch request failed")?;

        if !response.status().is_success() {
            bail!("failed to fetch jobs: {}", Self::error_message(response).await);
        }

        response
            .json::<Vec<JobPosting>>()
            .await
            .context("job list response was not the expected shape")
    }

    pub async fn delete_job(&self, id: &str) -> Result<()> {
        let token = self.bearer()?;
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/jobs/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .context("delete request failed")?;

        if !response.status().is_success() {
            bail!(
                "failed to delete job: {}",
                Self::error_message(response).await
            );
        }
        Ok(())
    }

    /// Pull the server's `message`/`error` field out of a failure body,
    /// falling back to the status line.
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body
                .message
                .or(body.error)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/", None).unwrap();
        assert_eq!(
            client.endpoint("/api/jobs"),
            "http://localhost:3001/api/jobs"
        );
    }

    #[test]
    fn calls_require_a_token() {
        let client = ApiClient::new("http://localhost:3001", None).unwrap();
        assert!(client.bearer().is_err());

        let client = ApiClient::new("http://localhost:3001", Some("tok".into())).unwrap();
        assert_eq!(client.bearer().unwrap(), "tok");
    }
}
