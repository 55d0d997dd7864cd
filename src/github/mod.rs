//! GitHub Actions API client.
//!
//! Fetch workflow-run history from the Actions REST API: run pages, job
//! listings, and per-run log archives. All HTTP mechanics hidden in
//! internal.rs; the driver only sees the `ActionsApi` trait, which is also
//! the seam the sync tests stub out.

mod internal;
pub mod logs;
pub mod types;

use std::fmt;

use anyhow::Result;

pub use types::{Actor, HeadCommit, Job, LogFile, Repository, Step, WorkflowRun};

/// Runs per page. API maximum.
pub const PER_PAGE: usize = 100;

/// Read-only access to a repository's Actions history.
pub trait ActionsApi {
    /// Fetch one page of completed runs, newest first, 100 per page.
    fn list_runs(&self, repo: &str, page: u32) -> Result<Vec<WorkflowRun>>;

    /// Fetch a run's job listing, steps nested.
    fn list_jobs(&self, jobs_url: &str) -> Result<Vec<Job>>;

    /// Fetch a run's log archive. Non-success responses yield an empty set.
    fn fetch_logs(&self, logs_url: &str) -> Result<Vec<LogFile>>;
}

/// A 2xx response whose body does not match the documented shape.
///
/// The upstream contract was violated; callers abort the whole process
/// rather than ingest partial data. Recognized via `downcast_ref` at the
/// top-level repository loop.
#[derive(Debug)]
pub struct ProtocolViolation(pub String);

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected API response shape: {}", self.0)
    }
}

impl std::error::Error for ProtocolViolation {}

/// Real client against api.github.com (or a GHES base URL).
pub struct GitHubClient {
    client: reqwest::blocking::Client,
    token: String,
    owner: String,
    api_base: String,
}

impl GitHubClient {
    pub fn new(token: &str, owner: &str, api_base: &str) -> Result<Self> {
        Ok(Self {
            client: internal::build_client()?,
            token: token.to_string(),
            owner: owner.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl ActionsApi for GitHubClient {
    fn list_runs(&self, repo: &str, page: u32) -> Result<Vec<WorkflowRun>> {
        internal::fetch_runs_page(
            &self.client,
            &self.token,
            &self.api_base,
            &self.owner,
            repo,
            page,
        )
    }

    fn list_jobs(&self, jobs_url: &str) -> Result<Vec<Job>> {
        internal::fetch_jobs(&self.client, &self.token, jobs_url)
    }

    fn fetch_logs(&self, logs_url: &str) -> Result<Vec<LogFile>> {
        internal::fetch_log_archive(&self.client, &self.token, logs_url)
    }
}
