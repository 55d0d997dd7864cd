//! SQLite storage for run history.
//!
//! One `RunStore` owns one connection. Natural-key tables (runs, actors,
//! commits, repositories, jobs) insert with ON CONFLICT DO NOTHING - first
//! writer wins, re-ingestion is a no-op. Steps and log blobs always insert;
//! they only ever arrive alongside a run that was previously absent.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::github::types::{Actor, HeadCommit, Job, LogFile, Repository, Step, WorkflowRun};

/// Embedded SQLite store for workflow-run history.
pub struct RunStore {
    conn: Connection,
}

impl RunStore {
    /// Open or create the archive database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open archive database")?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory store for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Create all tables if absent. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .context("Failed to create schema")
    }

    /// Has this run id been stored before?
    pub fn run_exists(&self, run_id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM runs WHERE id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Persist one run and everything fetched for it as a single unit.
    ///
    /// Parents first (actor, commit, repository), then the run, its log
    /// blobs, and its jobs with their steps. Any failure rolls the whole
    /// run back - no partial trace. Returns whether the run row was new.
    pub fn store_run(&mut self, run: &WorkflowRun, logs: &[LogFile], jobs: &[Job]) -> Result<bool> {
        let tx = self.conn.transaction()?;

        insert_actor(&tx, &run.actor)?;
        insert_commit(&tx, &run.head_commit)?;
        insert_repository(&tx, &run.repository)?;
        let inserted = insert_run(&tx, run)? > 0;

        for log in logs {
            insert_log(&tx, run.id, &log.name, &log.content)?;
        }

        for job in jobs {
            insert_job(&tx, job)?;
            for step in &job.steps {
                insert_step(&tx, step, job.id)?;
            }
        }

        tx.commit().context("Failed to commit run")?;
        Ok(inserted)
    }

    /// Rows inserted (0 if the actor id was already present).
    pub fn insert_actor(&self, actor: &Actor) -> Result<usize> {
        insert_actor(&self.conn, actor)
    }

    pub fn insert_commit(&self, commit: &HeadCommit) -> Result<usize> {
        insert_commit(&self.conn, commit)
    }

    pub fn insert_repository(&self, repository: &Repository) -> Result<usize> {
        insert_repository(&self.conn, repository)
    }

    pub fn insert_run(&self, run: &WorkflowRun) -> Result<usize> {
        insert_run(&self.conn, run)
    }

    pub fn insert_job(&self, job: &Job) -> Result<usize> {
        insert_job(&self.conn, job)
    }

    pub fn insert_step(&self, step: &Step, job_id: i64) -> Result<()> {
        insert_step(&self.conn, step, job_id)
    }

    pub fn insert_log(&self, run_id: i64, identifier: &str, content: &str) -> Result<()> {
        insert_log(&self.conn, run_id, identifier, content)
    }

    /// Row counts per table, for status reporting.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        const TABLES: [&str; 7] = [
            "runs",
            "actors",
            "commits",
            "repositories",
            "jobs",
            "steps",
            "logs",
        ];

        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let count: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })?;
            counts.push((table, count));
        }
        Ok(counts)
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn configure(conn: &Connection) -> Result<()> {
    // Cascade delete on logs.run_id requires foreign keys to be live
    conn.pragma_update(None, "foreign_keys", true)
        .context("Failed to enable foreign keys")?;
    Ok(())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    head_branch TEXT,
    head_sha TEXT,
    path TEXT,
    display_title TEXT,
    run_number INTEGER,
    event TEXT,
    status TEXT,
    conclusion TEXT,
    workflow_id INTEGER,
    check_suite_id INTEGER,
    url TEXT,
    created_at TEXT,
    updated_at TEXT,
    run_attempt INTEGER,
    run_started_at TEXT,
    workflow_url TEXT,
    actor_id INTEGER,
    commit_id TEXT,
    referenced_workflow_sha TEXT,
    repository_id INTEGER
);

CREATE TABLE IF NOT EXISTS actors (
    id INTEGER PRIMARY KEY,
    login TEXT NOT NULL,
    url TEXT,
    type TEXT,
    site_admin BOOL
);

CREATE TABLE IF NOT EXISTS commits (
    id TEXT PRIMARY KEY,
    tree_id TEXT,
    message TEXT,
    timestamp TEXT,
    author_name TEXT,
    author_email TEXT,
    committer_name TEXT,
    committer_email TEXT
);

CREATE TABLE IF NOT EXISTS repositories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    full_name TEXT,
    private BOOL,
    owner_login TEXT,
    owner_id INTEGER,
    url TEXT,
    site_admin BOOL,
    html_url TEXT,
    description TEXT,
    fork BOOL
);

CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY,
    run_id INTEGER NOT NULL,
    workflow_name TEXT,
    head_branch TEXT,
    run_url TEXT NOT NULL,
    run_attempt INTEGER NOT NULL,
    head_sha TEXT NOT NULL,
    url TEXT NOT NULL,
    html_url TEXT NOT NULL,
    status TEXT NOT NULL,
    conclusion TEXT,
    created_at TEXT NOT NULL,
    started_at TEXT NOT NULL,
    completed_at TEXT,
    name TEXT NOT NULL,
    check_run_url TEXT NOT NULL,
    labels TEXT NOT NULL,
    FOREIGN KEY (run_id) REFERENCES runs (id)
);

CREATE TABLE IF NOT EXISTS steps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    job_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    status TEXT NOT NULL,
    conclusion TEXT,
    number INTEGER NOT NULL,
    started_at TEXT,
    completed_at TEXT,
    FOREIGN KEY (job_id) REFERENCES jobs (id)
);

CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER,
    log_identifier TEXT,
    log_content TEXT,
    FOREIGN KEY (run_id) REFERENCES runs (id) ON DELETE CASCADE
);
"#;

fn insert_actor(conn: &Connection, actor: &Actor) -> Result<usize> {
    let count = conn.execute(
        "INSERT INTO actors (id, login, url, type, site_admin)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO NOTHING",
        params![actor.id, actor.login, actor.url, actor.kind, actor.site_admin],
    )?;
    Ok(count)
}

fn insert_commit(conn: &Connection, commit: &HeadCommit) -> Result<usize> {
    let count = conn.execute(
        "INSERT INTO commits (id, tree_id, message, timestamp, author_name, author_email,
                              committer_name, committer_email)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO NOTHING",
        params![
            commit.id,
            commit.tree_id,
            commit.message,
            commit.timestamp,
            commit.author.name,
            commit.author.email,
            commit.committer.name,
            commit.committer.email,
        ],
    )?;
    Ok(count)
}

fn insert_repository(conn: &Connection, repository: &Repository) -> Result<usize> {
    let count = conn.execute(
        "INSERT INTO repositories (id, name, full_name, private, owner_login, owner_id,
                                   url, site_admin, html_url, description, fork)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(id) DO NOTHING",
        params![
            repository.id,
            repository.name,
            repository.full_name,
            repository.private,
            repository.owner.login,
            repository.owner.id,
            repository.url,
            repository.owner.site_admin,
            repository.html_url,
            repository.description,
            repository.fork,
        ],
    )?;
    Ok(count)
}

fn insert_run(conn: &Connection, run: &WorkflowRun) -> Result<usize> {
    let count = conn.execute(
        "INSERT INTO runs (id, name, head_branch, head_sha, path, display_title,
                           run_number, event, status, conclusion, workflow_id,
                           check_suite_id, url, created_at, updated_at, run_attempt,
                           run_started_at, workflow_url, actor_id, commit_id,
                           referenced_workflow_sha, repository_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                 ?16, ?17, ?18, ?19, ?20, ?21, ?22)
         ON CONFLICT(id) DO NOTHING",
        params![
            run.id,
            run.name,
            run.head_branch,
            run.head_sha,
            run.path,
            run.display_title,
            run.run_number,
            run.event,
            run.status,
            run.conclusion,
            run.workflow_id,
            run.check_suite_id,
            run.url,
            run.created_at,
            run.updated_at,
            run.run_attempt,
            run.run_started_at,
            run.workflow_url,
            run.actor.id,
            run.head_commit.id,
            run.referenced_workflow_sha(),
            run.repository.id,
        ],
    )?;
    Ok(count)
}

fn insert_job(conn: &Connection, job: &Job) -> Result<usize> {
    let count = conn.execute(
        "INSERT INTO jobs (id, run_id, workflow_name, head_branch, run_url,
                           run_attempt, head_sha, url, html_url, status,
                           conclusion, created_at, started_at, completed_at,
                           name, check_run_url, labels)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
         ON CONFLICT(id) DO NOTHING",
        params![
            job.id,
            job.run_id,
            job.workflow_name,
            job.head_branch,
            job.run_url,
            job.run_attempt,
            job.head_sha,
            job.url,
            job.html_url,
            job.status,
            job.conclusion,
            job.created_at,
            job.started_at,
            job.completed_at,
            job.name,
            job.check_run_url,
            job.labels.join(","),
        ],
    )?;
    Ok(count)
}

fn insert_step(conn: &Connection, step: &Step, job_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO steps (job_id, name, status, conclusion, number, started_at, completed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            job_id,
            step.name,
            step.status,
            step.conclusion,
            step.number,
            step.started_at,
            step.completed_at,
        ],
    )?;
    Ok(())
}

fn insert_log(conn: &Connection, run_id: i64, identifier: &str, content: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO logs (run_id, log_identifier, log_content)
         VALUES (?1, ?2, ?3)",
        params![run_id, identifier, content],
    )?;
    Ok(())
}
