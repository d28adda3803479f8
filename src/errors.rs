//! Typed error hierarchy for the crudify pipeline.
//!
//! One enum covers the whole run: every stage fails fast and propagates its
//! variant upward unmodified, so the CLI can show exactly which remote call
//! or local stage gave up. Nothing here is retried.

use thiserror::Error;

/// The remote read call that a lookup failure came from.
///
/// The caller's error message must name the specific lookup that failed,
/// so each resolution step is tagged separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupCall {
    /// `GET /repos/{owner}/{repo}` — repository metadata / default branch.
    RepoInfo,
    /// `GET /repos/{owner}/{repo}/branches/{branch}` — branch head + tree SHA.
    BranchInfo,
    /// `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1` — full listing.
    TreeListing,
    /// `GET /repos/{owner}/{repo}/git/refs/heads/{branch}` — ref object.
    HeadRef,
    /// `GET /repos/{owner}/{repo}/git/commits/{sha}` — commit's tree SHA.
    CommitInfo,
    /// `GET /user/repos` — repository listing for the picker.
    RepoList,
    /// `GET /user` — authenticated user.
    User,
}

impl std::fmt::Display for LookupCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LookupCall::RepoInfo => "repository metadata",
            LookupCall::BranchInfo => "branch info",
            LookupCall::TreeListing => "tree listing",
            LookupCall::HeadRef => "head ref",
            LookupCall::CommitInfo => "commit info",
            LookupCall::RepoList => "repository listing",
            LookupCall::User => "user info",
        };
        f.write_str(name)
    }
}

/// The write-phase step that a publication failure came from.
///
/// `CreateBranch` failures are reported via [`PipelineError::BranchCreateFailed`]
/// instead, since a branch-name collision is the common real-world failure and
/// its response body is surfaced verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStep {
    CreateBlob,
    CreateTree,
    CreateCommit,
    UpdateRef,
    CreatePullRequest,
}

impl std::fmt::Display for WriteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WriteStep::CreateBlob => "blob creation",
            WriteStep::CreateTree => "tree creation",
            WriteStep::CreateCommit => "commit creation",
            WriteStep::UpdateRef => "ref update",
            WriteStep::CreatePullRequest => "pull request creation",
        };
        f.write_str(name)
    }
}

/// Errors from the crudify pipeline, one variant per failure kind.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No GitHub access token. Pass --token or set GITHUB_TOKEN")]
    NoCredential,

    #[error("GitHub lookup failed ({call}): {message}")]
    RemoteLookup { call: LookupCall, message: String },

    #[error("No models.py found in the repository")]
    NoModelSourceFound,

    #[error("Failed to fetch file content: {path}: {message}")]
    ContentFetch { path: String, message: String },

    #[error("No Django models found in models.py")]
    NoModelsFound,

    /// New-ref creation was rejected. The remote response body is kept
    /// verbatim: a stale `crudify` branch from an earlier run is the usual
    /// cause and GitHub's message names it.
    #[error("Failed to create branch: {body}")]
    BranchCreateFailed { body: String },

    #[error("GitHub write failed ({step}): {message}")]
    RemoteWrite { step: WriteStep, message: String },

    #[error("Unsupported framework: {0}. Currently, only Django is supported")]
    UnsupportedFramework(String),
}
