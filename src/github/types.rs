//! Typed GitHub Actions API responses.
//!
//! Strongly-typed mirrors of the run/job/step payloads. Parsing happens once
//! at the HTTP boundary; a field the API stops sending surfaces as a single
//! deserialization error instead of a lookup failure deep in the driver.

use serde::Deserialize;

/// Response envelope for the run-listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RunsPage {
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Response envelope for a run's jobs endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsPage {
    pub jobs: Vec<Job>,
}

/// One completed workflow run, with its actor, head commit, and repository
/// nested the way the API returns them.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub id: i64,
    pub name: String,
    pub head_branch: Option<String>,
    pub head_sha: String,
    pub path: String,
    pub display_title: String,
    pub run_number: i64,
    pub event: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub workflow_id: i64,
    pub check_suite_id: i64,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub run_attempt: i64,
    pub run_started_at: String,
    pub workflow_url: String,
    pub jobs_url: Option<String>,
    pub logs_url: Option<String>,
    #[serde(default)]
    pub referenced_workflows: Vec<ReferencedWorkflow>,
    pub actor: Actor,
    pub head_commit: HeadCommit,
    pub repository: Repository,
}

impl WorkflowRun {
    /// SHA of the first referenced workflow, or empty when there is none.
    pub fn referenced_workflow_sha(&self) -> &str {
        self.referenced_workflows
            .first()
            .map(|w| w.sha.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencedWorkflow {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub login: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub site_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    pub id: String,
    pub tree_id: String,
    pub message: String,
    pub timestamp: String,
    pub author: CommitIdent,
    pub committer: CommitIdent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitIdent {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner: RepoOwner,
    pub url: String,
    pub html_url: String,
    pub description: Option<String>,
    pub fork: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
    pub id: i64,
    pub site_admin: bool,
}

/// One job of a run, with its steps inline.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: i64,
    pub run_id: i64,
    pub workflow_name: Option<String>,
    pub head_branch: Option<String>,
    pub run_url: String,
    pub run_attempt: i64,
    pub head_sha: String,
    pub url: String,
    pub html_url: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub created_at: String,
    pub started_at: String,
    pub completed_at: Option<String>,
    pub name: String,
    pub check_run_url: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub number: i64,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
}

/// One extracted file from a run's log archive.
#[derive(Debug, Clone)]
pub struct LogFile {
    pub name: String,
    pub content: String,
}
