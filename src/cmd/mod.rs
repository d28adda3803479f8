//! CLI command implementations.
//!
//! | Module  | Commands handled |
//! |---------|------------------|
//! | `repos` | `Repos`          |
//! | `run`   | `Run`            |

pub mod repos;
pub mod run;

pub use repos::cmd_repos;
pub use run::cmd_run;

use anyhow::Result;
use crudify::github::{GITHUB_API_URL, GitHubClient, looks_like_github_token};

use super::Cli;

/// Resolve the bearer credential from `--token` or `GITHUB_TOKEN` and build
/// a client. Unknown token formats get a warning, not a hard failure.
pub(crate) fn build_client(cli: &Cli) -> Result<GitHubClient> {
    let token = match &cli.token {
        Some(token) => token.clone(),
        None => std::env::var("GITHUB_TOKEN").unwrap_or_default(),
    };
    if !token.trim().is_empty() && !looks_like_github_token(&token) {
        eprintln!(
            "{}",
            console::style("Warning: token does not look like a known GitHub token format")
                .yellow()
        );
    }
    let base_url = cli.api_url.as_deref().unwrap_or(GITHUB_API_URL);
    Ok(GitHubClient::with_base_url(token, base_url)?)
}
