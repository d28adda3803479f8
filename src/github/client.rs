//! Async GitHub REST v3 client for the pipeline's read and write calls.
//!
//! Every call is a blocking round trip from the caller's point of view and
//! carries the bearer credential explicitly — there is no ambient session.
//! Failures map straight onto the [`PipelineError`] taxonomy: reads tag the
//! lookup that failed, writes tag the step, and nothing is retried.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{LookupCall, PipelineError, WriteStep};

use super::models::{
    BranchInfo, CommitObject, CreatedObject, PullRequest, RefObject, RepoInfo, RepoSummary,
    TreeEntry, TreeListing, UserInfo,
};

pub const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "crudify";

/// Git file mode for a regular (non-executable) blob in a tree entry.
const BLOB_FILE_MODE: &str = "100644";

/// Typed client over the GitHub REST endpoints the pipeline needs.
///
/// The base URL is injectable so tests can point it at a local mock server;
/// production callers use [`GitHubClient::new`].
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client against api.github.com.
    ///
    /// Fails with [`PipelineError::NoCredential`] when the token is empty —
    /// every call this client makes requires repo read/write scope.
    pub fn new(token: impl Into<String>) -> Result<Self, PipelineError> {
        Self::with_base_url(token, GITHUB_API_URL)
    }

    /// Create a client against an arbitrary base URL (used by tests).
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(PipelineError::NoCredential);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
    }

    /// GET `path` and deserialize the JSON body, mapping any transport or
    /// non-success failure to `RemoteLookup` tagged with `call`.
    async fn lookup<T: DeserializeOwned>(
        &self,
        path: &str,
        call: LookupCall,
    ) -> Result<T, PipelineError> {
        debug!(%call, path, "github lookup");
        let resp = self
            .get(path)
            .send()
            .await
            .map_err(|e| lookup_err(call, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(lookup_err(call, format!("{} {}", status, body)));
        }
        resp.json::<T>()
            .await
            .map_err(|e| lookup_err(call, e.to_string()))
    }

    /// Send a write request and deserialize the JSON body, mapping failures
    /// to `RemoteWrite` tagged with `step`.
    async fn write<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        step: WriteStep,
    ) -> Result<T, PipelineError> {
        let resp = req
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| write_err(step, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(write_err(step, format!("{} {}", status, body)));
        }
        resp.json::<T>()
            .await
            .map_err(|e| write_err(step, e.to_string()))
    }

    // ── Read calls ───────────────────────────────────────────────────

    /// Repository metadata; the pipeline only uses `default_branch`.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<RepoInfo, PipelineError> {
        self.lookup(&format!("/repos/{}/{}", owner, repo), LookupCall::RepoInfo)
            .await
    }

    /// Branch head commit SHA and its nested tree SHA.
    pub async fn get_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchInfo, PipelineError> {
        self.lookup(
            &format!("/repos/{}/{}/branches/{}", owner, repo, branch),
            LookupCall::BranchInfo,
        )
        .await
    }

    /// Full recursive listing of the tree at `sha`, in GitHub's listing order.
    pub async fn get_tree_recursive(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<Vec<TreeEntry>, PipelineError> {
        let listing: TreeListing = self
            .lookup(
                &format!("/repos/{}/{}/git/trees/{}?recursive=1", owner, repo, sha),
                LookupCall::TreeListing,
            )
            .await?;
        Ok(listing.tree)
    }

    /// Raw text of one file at the repository's current default state.
    ///
    /// Any non-success response — not-found and rate-limit included — is
    /// fatal for this run and wraps the path.
    pub async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<String, PipelineError> {
        let content_err = |message: String| PipelineError::ContentFetch {
            path: path.to_string(),
            message,
        };
        let resp = self
            .get(&format!("/repos/{}/{}/contents/{}", owner, repo, path))
            .header("Accept", "application/vnd.github.v3.raw")
            .send()
            .await
            .map_err(|e| content_err(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(content_err(status.to_string()));
        }
        resp.text().await.map_err(|e| content_err(e.to_string()))
    }

    /// Current commit SHA of `refs/heads/{branch}`.
    pub async fn get_head_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<String, PipelineError> {
        let obj: RefObject = self
            .lookup(
                &format!("/repos/{}/{}/git/refs/heads/{}", owner, repo, branch),
                LookupCall::HeadRef,
            )
            .await?;
        Ok(obj.object.sha)
    }

    /// Tree SHA of the commit object at `sha`.
    pub async fn get_commit_tree(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<String, PipelineError> {
        let commit: CommitObject = self
            .lookup(
                &format!("/repos/{}/{}/git/commits/{}", owner, repo, sha),
                LookupCall::CommitInfo,
            )
            .await?;
        Ok(commit.tree.sha)
    }

    /// Repos accessible to the authenticated user, most recently updated first.
    pub async fn list_repos(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepoSummary>, PipelineError> {
        self.lookup(
            &format!("/user/repos?sort=updated&per_page={}&page={}", per_page, page),
            LookupCall::RepoList,
        )
        .await
    }

    /// The authenticated user behind the token.
    pub async fn get_user(&self) -> Result<UserInfo, PipelineError> {
        self.lookup("/user", LookupCall::User).await
    }

    // ── Write calls ──────────────────────────────────────────────────

    /// Create `refs/heads/{branch}` pointing at `sha`.
    ///
    /// The failure response body is surfaced verbatim: a name collision with
    /// a stale branch from an earlier run is the most common failure here.
    pub async fn create_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<(), PipelineError> {
        let resp = self
            .http
            .post(self.url(&format!("/repos/{}/{}/git/refs", owner, repo)))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .json(&serde_json::json!({
                "ref": format!("refs/heads/{}", branch),
                "sha": sha,
            }))
            .send()
            .await
            .map_err(|e| PipelineError::BranchCreateFailed { body: e.to_string() })?;
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PipelineError::BranchCreateFailed { body });
        }
        Ok(())
    }

    /// Create a content-addressed blob; returns its SHA.
    pub async fn create_blob(
        &self,
        owner: &str,
        repo: &str,
        content: &str,
    ) -> Result<String, PipelineError> {
        let created: CreatedObject = self
            .write(
                self.http
                    .post(self.url(&format!("/repos/{}/{}/git/blobs", owner, repo)))
                    .json(&serde_json::json!({
                        "content": content,
                        "encoding": "utf-8",
                    })),
                WriteStep::CreateBlob,
            )
            .await?;
        Ok(created.sha)
    }

    /// Create a tree layered on `base_tree`, adding/replacing one blob per
    /// `(path, blob_sha)` pair; returns the new tree SHA.
    pub async fn create_tree(
        &self,
        owner: &str,
        repo: &str,
        base_tree: &str,
        entries: &[(String, String)],
    ) -> Result<String, PipelineError> {
        let tree: Vec<serde_json::Value> = entries
            .iter()
            .map(|(path, sha)| {
                serde_json::json!({
                    "path": path,
                    "mode": BLOB_FILE_MODE,
                    "type": "blob",
                    "sha": sha,
                })
            })
            .collect();
        let created: CreatedObject = self
            .write(
                self.http
                    .post(self.url(&format!("/repos/{}/{}/git/trees", owner, repo)))
                    .json(&serde_json::json!({
                        "base_tree": base_tree,
                        "tree": tree,
                    })),
                WriteStep::CreateTree,
            )
            .await?;
        Ok(created.sha)
    }

    /// Create a commit whose tree is `tree` and whose sole parent is
    /// `parent`; returns the new commit SHA.
    pub async fn create_commit(
        &self,
        owner: &str,
        repo: &str,
        message: &str,
        tree: &str,
        parent: &str,
    ) -> Result<String, PipelineError> {
        let created: CreatedObject = self
            .write(
                self.http
                    .post(self.url(&format!("/repos/{}/{}/git/commits", owner, repo)))
                    .json(&serde_json::json!({
                        "message": message,
                        "tree": tree,
                        "parents": [parent],
                    })),
                WriteStep::CreateCommit,
            )
            .await?;
        Ok(created.sha)
    }

    /// Point `refs/heads/{branch}` at `sha`.
    pub async fn update_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<(), PipelineError> {
        let _: serde_json::Value = self
            .write(
                self.http
                    .patch(self.url(&format!(
                        "/repos/{}/{}/git/refs/heads/{}",
                        owner, repo, branch
                    )))
                    .json(&serde_json::json!({ "sha": sha })),
                WriteStep::UpdateRef,
            )
            .await?;
        Ok(())
    }

    /// Open a pull request from `head` into `base`; returns its web URL.
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<String, PipelineError> {
        let pr: PullRequest = self
            .write(
                self.http
                    .post(self.url(&format!("/repos/{}/{}/pulls", owner, repo)))
                    .json(&serde_json::json!({
                        "title": title,
                        "head": head,
                        "base": base,
                        "body": body,
                    })),
                WriteStep::CreatePullRequest,
            )
            .await?;
        Ok(pr.html_url)
    }
}

fn lookup_err(call: LookupCall, message: String) -> PipelineError {
    PipelineError::RemoteLookup { call, message }
}

fn write_err(step: WriteStep, message: String) -> PipelineError {
    PipelineError::RemoteWrite { step, message }
}

impl std::fmt::Debug for GitHubClient {
    // Never print the token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        let err = GitHubClient::new("").unwrap_err();
        assert!(matches!(err, PipelineError::NoCredential));
    }

    #[test]
    fn whitespace_token_is_rejected() {
        let err = GitHubClient::new("   ").unwrap_err();
        assert!(matches!(err, PipelineError::NoCredential));
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let client = GitHubClient::with_base_url("ghp_x", "http://localhost:9999/").unwrap();
        assert_eq!(client.url("/user"), "http://localhost:9999/user");
    }

    #[test]
    fn debug_does_not_leak_token() {
        let client = GitHubClient::new("ghp_supersecret").unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("supersecret"));
    }
}
