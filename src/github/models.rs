//! Wire types for the GitHub REST v3 calls the pipeline makes.
//!
//! Each struct deserializes the subset of fields we actually use; GitHub's
//! responses carry far more and serde ignores the rest.

use serde::{Deserialize, Serialize};

/// `GET /repos/{owner}/{repo}` — repository metadata.
#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    pub default_branch: String,
}

/// A repository as listed by `GET /user/repos` (subset of fields we care about).
#[derive(Debug, Serialize, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub name: String,
    pub private: bool,
    pub html_url: String,
    pub description: Option<String>,
    pub default_branch: String,
}

/// `GET /user` — the authenticated user.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub login: String,
    pub name: Option<String>,
}

/// `GET /repos/{owner}/{repo}/branches/{branch}` — branch head.
///
/// The tree SHA is nested two levels down: `commit.commit.tree.sha`.
#[derive(Debug, Deserialize)]
pub struct BranchInfo {
    pub commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub tree: TreeRef,
}

#[derive(Debug, Deserialize)]
pub struct TreeRef {
    pub sha: String,
}

/// One entry of a recursive tree listing. `kind` is GitHub's `type` field:
/// `"blob"` for file-like entries, `"tree"` for directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// `GET /repos/{owner}/{repo}/git/trees/{sha}?recursive=1`.
#[derive(Debug, Deserialize)]
pub struct TreeListing {
    pub tree: Vec<TreeEntry>,
}

/// `GET /repos/{owner}/{repo}/git/refs/heads/{branch}` — a ref object.
#[derive(Debug, Deserialize)]
pub struct RefObject {
    pub object: RefTarget,
}

#[derive(Debug, Deserialize)]
pub struct RefTarget {
    pub sha: String,
}

/// `GET /repos/{owner}/{repo}/git/commits/{sha}` — a git commit object.
#[derive(Debug, Deserialize)]
pub struct CommitObject {
    pub tree: TreeRef,
}

/// Any `POST /git/{blobs,trees,commits}` response — the allocated SHA.
#[derive(Debug, Deserialize)]
pub struct CreatedObject {
    pub sha: String,
}

/// `POST /repos/{owner}/{repo}/pulls` — the opened pull request.
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub html_url: String,
}

/// Known GitHub token prefixes.
/// See: https://github.blog/2021-04-05-behind-githubs-new-authentication-token-formats/
const GITHUB_TOKEN_PREFIXES: &[&str] = &[
    "ghp_",        // Personal access tokens (classic)
    "github_pat_", // Fine-grained personal access tokens
    "gho_",        // OAuth access tokens
    "ghu_",        // GitHub App user-to-server tokens
    "ghs_",        // GitHub App server-to-server tokens
    "ghr_",        // GitHub App refresh tokens
];

/// Format check only — does not verify the token is active or has repo scope.
/// Used for a fast client-side warning before any network call.
pub fn looks_like_github_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    GITHUB_TOKEN_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
}
