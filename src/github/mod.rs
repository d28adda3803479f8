//! GitHub REST v3 surface: typed client plus wire types.

pub mod client;
pub mod models;

pub use client::{GITHUB_API_URL, GitHubClient};
pub use models::{RepoSummary, TreeEntry, UserInfo, looks_like_github_token};
