//! Repository hosting platform integration

mod api;
mod client;
mod mock;

pub use api::{EntryKind, HostError, RemoteFile, RepoHost, RootEntry};
pub use client::GitHubClient;
pub use mock::MockRepoHost;
