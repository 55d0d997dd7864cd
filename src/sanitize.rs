//! NUL-byte sanitization.
//!
//! SQLite text columns cannot carry embedded NUL bytes, and CI logs do
//! occasionally contain them. Every string field of a fetched record is
//! scrubbed in place before anything reaches the store - never surfaced
//! as an error.

use crate::github::types::{
    Actor, CommitIdent, HeadCommit, Job, LogFile, ReferencedWorkflow, RepoOwner, Repository, Step,
    WorkflowRun,
};

/// Strip characters the store cannot persist from every string field,
/// recursively through nested records.
pub trait Sanitize {
    fn sanitize(&mut self);
}

impl Sanitize for String {
    fn sanitize(&mut self) {
        if self.contains('\0') {
            self.retain(|c| c != '\0');
        }
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(&mut self) {
        if let Some(inner) = self {
            inner.sanitize();
        }
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(&mut self) {
        for item in self.iter_mut() {
            item.sanitize();
        }
    }
}

impl Sanitize for WorkflowRun {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.head_branch.sanitize();
        self.head_sha.sanitize();
        self.path.sanitize();
        self.display_title.sanitize();
        self.event.sanitize();
        self.status.sanitize();
        self.conclusion.sanitize();
        self.url.sanitize();
        self.created_at.sanitize();
        self.updated_at.sanitize();
        self.run_started_at.sanitize();
        self.workflow_url.sanitize();
        self.jobs_url.sanitize();
        self.logs_url.sanitize();
        self.referenced_workflows.sanitize();
        self.actor.sanitize();
        self.head_commit.sanitize();
        self.repository.sanitize();
    }
}

impl Sanitize for ReferencedWorkflow {
    fn sanitize(&mut self) {
        self.sha.sanitize();
    }
}

impl Sanitize for Actor {
    fn sanitize(&mut self) {
        self.login.sanitize();
        self.url.sanitize();
        self.kind.sanitize();
    }
}

impl Sanitize for HeadCommit {
    fn sanitize(&mut self) {
        self.id.sanitize();
        self.tree_id.sanitize();
        self.message.sanitize();
        self.timestamp.sanitize();
        self.author.sanitize();
        self.committer.sanitize();
    }
}

impl Sanitize for CommitIdent {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.email.sanitize();
    }
}

impl Sanitize for Repository {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.full_name.sanitize();
        self.owner.sanitize();
        self.url.sanitize();
        self.html_url.sanitize();
        self.description.sanitize();
    }
}

impl Sanitize for RepoOwner {
    fn sanitize(&mut self) {
        self.login.sanitize();
    }
}

impl Sanitize for Job {
    fn sanitize(&mut self) {
        self.workflow_name.sanitize();
        self.head_branch.sanitize();
        self.run_url.sanitize();
        self.head_sha.sanitize();
        self.url.sanitize();
        self.html_url.sanitize();
        self.status.sanitize();
        self.conclusion.sanitize();
        self.created_at.sanitize();
        self.started_at.sanitize();
        self.completed_at.sanitize();
        self.name.sanitize();
        self.check_run_url.sanitize();
        self.labels.sanitize();
        self.steps.sanitize();
    }
}

impl Sanitize for Step {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.status.sanitize();
        self.conclusion.sanitize();
        self.started_at.sanitize();
        self.completed_at.sanitize();
    }
}

impl Sanitize for LogFile {
    fn sanitize(&mut self) {
        self.name.sanitize();
        self.content.sanitize();
    }
}
