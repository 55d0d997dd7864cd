//! Incremental sync engine.
//!
//! Walks a repository's completed-run history page by page, newest first,
//! and stores every run it has not seen before. Seen runs are skipped
//! before any fan-out fetch - the jobs and logs requests are the expensive
//! part, and an already-stored run never pays for them again.
//!
//! Purely sequential: one blocking GET at a time, fixed sleeps in between.
//! No retries here; a failed repository is retried by re-invocation.

use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;

use crate::github::{ActionsApi, ProtocolViolation, PER_PAGE};
use crate::sanitize::Sanitize;
use crate::store::RunStore;

/// Hard cap on pages fetched per repository per sync.
pub const MAX_PAGES: u32 = 15;

/// Stop paginating after this many consecutive pages yield no new run.
///
/// Runs come back newest-first, so an unbroken stretch of already-known
/// runs means everything older is known too.
pub const MAX_EMPTY_PAGES: u32 = 3;

/// Delay between API requests.
///
/// GitHub allows 5,000/hour. At 750ms we do 4,800/hour max.
/// Conservative. Never hits limits. Works forever.
const DELAY_BETWEEN_REQUESTS: Duration = Duration::from_millis(750);

/// What one repository sync did.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepoStats {
    pub pages: u32,
    pub stored: usize,
    pub skipped: usize,
    pub log_files: usize,
}

/// Drives the page loop and per-run fan-out for one repository at a time.
pub struct SyncDriver<'a> {
    api: &'a dyn ActionsApi,
    delay: Duration,
}

impl<'a> SyncDriver<'a> {
    pub fn new(api: &'a dyn ActionsApi) -> Self {
        Self {
            api,
            delay: DELAY_BETWEEN_REQUESTS,
        }
    }

    /// Driver with custom pacing. Tests run at zero delay.
    pub fn with_delay(api: &'a dyn ActionsApi, delay: Duration) -> Self {
        Self { api, delay }
    }

    /// Sync one repository's completed runs into the store.
    ///
    /// Pages are processed in increasing order, runs in response order.
    /// Transport errors propagate and abort this repository's sync.
    pub fn sync_repository(&self, repo: &str, store: &mut RunStore) -> Result<RepoStats> {
        println!("Started scanning {}.", repo);

        let mut stats = RepoStats::default();
        let mut empty_pages = 0u32;

        for page in 1..=MAX_PAGES {
            sleep(self.delay);
            let runs = self.api.list_runs(repo, page)?;
            println!("  page {}", page);
            stats.pages += 1;

            let last_page = runs.len() < PER_PAGE;
            let mut new_on_page = 0usize;

            for run in runs {
                if store.run_exists(run.id)? {
                    stats.skipped += 1;
                    continue;
                }

                let mut run = run;
                let mut logs = match &run.logs_url {
                    Some(url) => self.api.fetch_logs(url)?,
                    None => Vec::new(),
                };
                let mut jobs = match &run.jobs_url {
                    Some(url) => {
                        sleep(self.delay);
                        self.api.list_jobs(url)?
                    }
                    None => Vec::new(),
                };

                run.sanitize();
                logs.sanitize();
                jobs.sanitize();

                if store.store_run(&run, &logs, &jobs)? {
                    new_on_page += 1;
                    stats.stored += 1;
                    stats.log_files += logs.len();
                    println!("  Stored run {} ({} log files).", run.run_number, logs.len());
                }
            }

            if new_on_page == 0 {
                empty_pages += 1;
                if empty_pages >= MAX_EMPTY_PAGES {
                    break;
                }
            } else {
                empty_pages = 0;
            }

            // A short page is the last page; nothing older is left to poll
            if last_page {
                break;
            }
        }

        println!(
            "Finished scanning {}: {} new, {} known.",
            repo, stats.stored, stats.skipped
        );
        Ok(stats)
    }
}

/// Sync every configured repository sequentially on the one connection.
///
/// A transport failure aborts only that repository; the loop moves on and
/// the repo is retried on the next invocation. Protocol violations abort
/// the whole process - the API contract assumption was broken.
pub fn sync_all(api: &dyn ActionsApi, store: &mut RunStore, repos: &[String]) -> Result<RepoStats> {
    let driver = SyncDriver::new(api);
    sync_all_with(&driver, store, repos)
}

pub(crate) fn sync_all_with(
    driver: &SyncDriver,
    store: &mut RunStore,
    repos: &[String],
) -> Result<RepoStats> {
    let mut total = RepoStats::default();

    for repo in repos {
        match driver.sync_repository(repo, store) {
            Ok(stats) => {
                total.pages += stats.pages;
                total.stored += stats.stored;
                total.skipped += stats.skipped;
                total.log_files += stats.log_files;
            }
            Err(e) => {
                if e.downcast_ref::<ProtocolViolation>().is_some() {
                    return Err(e);
                }
                eprintln!("  Sync of {} aborted: {:#}", repo, e);
            }
        }
    }

    Ok(total)
}
