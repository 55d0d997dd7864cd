//! Shared fixtures for store and sync tests.

use crate::github::types::{
    Actor, CommitIdent, HeadCommit, Job, RepoOwner, Repository, Step, WorkflowRun,
};

/// A fully-populated completed run with the given id. Jobs and logs URLs
/// are left unset so tests opt into fan-out fetches explicitly.
pub(crate) fn sample_run(id: i64) -> WorkflowRun {
    WorkflowRun {
        id,
        name: "CI".to_string(),
        head_branch: Some("main".to_string()),
        head_sha: "abc123".to_string(),
        path: ".github/workflows/ci.yml".to_string(),
        display_title: format!("Run {}", id),
        run_number: id,
        event: "push".to_string(),
        status: "completed".to_string(),
        conclusion: Some("success".to_string()),
        workflow_id: 9,
        check_suite_id: 11,
        url: format!("https://api.github.com/repos/o/r/actions/runs/{}", id),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:10:00Z".to_string(),
        run_attempt: 1,
        run_started_at: "2024-01-01T00:01:00Z".to_string(),
        workflow_url: "https://api.github.com/repos/o/r/actions/workflows/9".to_string(),
        jobs_url: None,
        logs_url: None,
        referenced_workflows: Vec::new(),
        actor: Actor {
            id: 1,
            login: "dev".to_string(),
            url: "https://api.github.com/users/dev".to_string(),
            kind: "User".to_string(),
            site_admin: false,
        },
        head_commit: HeadCommit {
            id: "abc123".to_string(),
            tree_id: "tree1".to_string(),
            message: "fix tests".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            author: CommitIdent {
                name: "Dev".to_string(),
                email: "dev@example.com".to_string(),
            },
            committer: CommitIdent {
                name: "Dev".to_string(),
                email: "dev@example.com".to_string(),
            },
        },
        repository: Repository {
            id: 3,
            name: "r".to_string(),
            full_name: "o/r".to_string(),
            private: false,
            owner: RepoOwner {
                login: "o".to_string(),
                id: 2,
                site_admin: false,
            },
            url: "https://api.github.com/repos/o/r".to_string(),
            html_url: "https://github.com/o/r".to_string(),
            description: None,
            fork: false,
        },
    }
}

/// A job with two steps, belonging to the given run.
pub(crate) fn sample_job(id: i64, run_id: i64) -> Job {
    Job {
        id,
        run_id,
        workflow_name: Some("CI".to_string()),
        head_branch: Some("main".to_string()),
        run_url: format!("https://api.github.com/repos/o/r/actions/runs/{}", run_id),
        run_attempt: 1,
        head_sha: "abc123".to_string(),
        url: format!("https://api.github.com/repos/o/r/actions/jobs/{}", id),
        html_url: format!("https://github.com/o/r/actions/runs/{}", run_id),
        status: "completed".to_string(),
        conclusion: Some("success".to_string()),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        started_at: "2024-01-01T00:01:00Z".to_string(),
        completed_at: Some("2024-01-01T00:05:00Z".to_string()),
        name: "build".to_string(),
        check_run_url: format!("https://api.github.com/repos/o/r/check-runs/{}", id),
        labels: vec!["ubuntu-latest".to_string()],
        steps: vec![
            Step {
                name: "checkout".to_string(),
                status: "completed".to_string(),
                conclusion: Some("success".to_string()),
                number: 1,
                started_at: Some("2024-01-01T00:01:00Z".to_string()),
                completed_at: Some("2024-01-01T00:02:00Z".to_string()),
            },
            Step {
                name: "test".to_string(),
                status: "completed".to_string(),
                conclusion: Some("success".to_string()),
                number: 2,
                started_at: Some("2024-01-01T00:02:00Z".to_string()),
                completed_at: Some("2024-01-01T00:05:00Z".to_string()),
            },
        ],
    }
}
