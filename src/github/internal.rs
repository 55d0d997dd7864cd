//! Internal implementation for the GitHub Actions client.
//!
//! Contains the reqwest calls and response decoding.
//! Not exposed in public interface.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;

use super::logs::extract_log_archive;
use super::types::{Job, JobsPage, LogFile, RunsPage, WorkflowRun};
use super::{ProtocolViolation, PER_PAGE};

/// Fixed timeout applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch one page of completed workflow runs, newest first.
pub(crate) fn fetch_runs_page(
    client: &Client,
    token: &str,
    api_base: &str,
    owner: &str,
    repo: &str,
    page: u32,
) -> Result<Vec<WorkflowRun>> {
    let url = format!(
        "{}/repos/{}/{}/actions/runs?status=completed&per_page={}&page={}",
        api_base, owner, repo, PER_PAGE, page
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("token {}", token))
        .send()
        .with_context(|| format!("Failed to GET {}", url))?;

    if !response.status().is_success() {
        bail!("HTTP {} fetching runs for {}/{}", response.status(), owner, repo);
    }

    let body = response.bytes().context("Failed to read runs response")?;
    let parsed: RunsPage = serde_json::from_slice(&body).map_err(|e| {
        // A 2xx body without the run list means the API contract changed
        // under us. Continuing risks silent data loss, so this is fatal.
        ProtocolViolation(format!("runs page {} for {}/{}: {}", page, owner, repo, e))
    })?;

    Ok(parsed.workflow_runs)
}

/// Fetch a run's job listing (with nested steps).
pub(crate) fn fetch_jobs(client: &Client, token: &str, jobs_url: &str) -> Result<Vec<Job>> {
    let response = client
        .get(jobs_url)
        .header("Authorization", format!("token {}", token))
        .send()
        .with_context(|| format!("Failed to GET {}", jobs_url))?;

    if !response.status().is_success() {
        bail!("HTTP {} fetching jobs: {}", response.status(), jobs_url);
    }

    let body = response.bytes().context("Failed to read jobs response")?;
    let parsed: JobsPage = serde_json::from_slice(&body)
        .map_err(|e| ProtocolViolation(format!("jobs listing {}: {}", jobs_url, e)))?;

    Ok(parsed.jobs)
}

/// Fetch and extract a run's log archive.
///
/// Missing logs are not fatal: any non-success status yields an empty set
/// and the run is stored without log rows.
pub(crate) fn fetch_log_archive(
    client: &Client,
    token: &str,
    logs_url: &str,
) -> Result<Vec<LogFile>> {
    let response = client
        .get(logs_url)
        .header("Authorization", format!("token {}", token))
        .send()
        .with_context(|| format!("Failed to GET {}", logs_url))?;

    if !response.status().is_success() {
        return Ok(Vec::new());
    }

    let body = response.bytes().context("Failed to read log archive body")?;
    extract_log_archive(&body)
}
