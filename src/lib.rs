pub mod config;
pub mod github;
pub mod sanitize;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::Config;
pub use github::{ActionsApi, GitHubClient};
pub use store::RunStore;
pub use sync::SyncDriver;
