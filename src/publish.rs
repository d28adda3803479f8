//! Publication of a generated artifact set as a branch, commit, and PR.
//!
//! A strictly ordered, non-transactional sequence of remote object
//! creations: base resolution → branch ref → blobs → tree → commit → ref
//! update → pull request. Each step consumes an identifier minted by the
//! previous one, so only the three blob creations run concurrently. There
//! is no compensating rollback: a failure after the branch ref exists
//! leaves the branch (and any blobs/tree/commit) orphaned in the remote
//! store, and the next run will fail at CreateBranch with a name collision
//! until the stale branch is deleted out of band.
//!
//! The base commit SHA is observed once at session start and never
//! re-validated; a default-branch move between ResolveRef and UpdateRef is
//! possible and unhandled.

use tracing::info;

use crate::errors::PipelineError;
use crate::generate::GeneratedArtifactSet;
use crate::github::GitHubClient;

/// Fixed name of the branch the generated files are published on.
pub const GENERATED_BRANCH: &str = "crudify";

/// Fixed commit message for the generated-files commit.
pub const COMMIT_MESSAGE: &str = "Add generated CRUD files (serializers, views, urls)";

/// Fixed pull request title.
pub const PR_TITLE: &str = "Add auto-generated CRUD code";

/// Fixed pull request body.
pub const PR_BODY: &str = "serializers.py, views.py and urls.py generated by CRUDIFY \
from the models declared in models.py.";

/// The orchestration's step index, in execution order. Logged before each
/// step so partial-failure state is inspectable even without rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    ResolveBase,
    ResolveRef,
    ResolveTree,
    CreateBranch,
    CreateBlobs,
    CreateTree,
    CreateCommit,
    UpdateRef,
    CreatePullRequest,
}

/// Remote state observed/minted during one publication, scoped to one
/// [`publish`] call and never persisted.
#[derive(Debug)]
struct WriteSession {
    default_branch: String,
    base_commit_sha: String,
    base_tree_sha: String,
}

fn target_path(dir: &str, filename: &str) -> String {
    if dir.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", dir, filename)
    }
}

/// Publish `artifacts` to `owner/repo` under `dir`, returning the pull
/// request's web URL.
///
/// `dir` is the directory the source `models.py` was found in; the three
/// generated files land alongside it.
pub async fn publish(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    dir: &str,
    artifacts: &GeneratedArtifactSet,
) -> Result<String, PipelineError> {
    info!(step = ?PublishStep::ResolveBase, owner, repo);
    let default_branch = client.get_repo(owner, repo).await?.default_branch;

    info!(step = ?PublishStep::ResolveRef, branch = %default_branch);
    let base_commit_sha = client.get_head_ref(owner, repo, &default_branch).await?;

    info!(step = ?PublishStep::ResolveTree, commit = %base_commit_sha);
    let base_tree_sha = client.get_commit_tree(owner, repo, &base_commit_sha).await?;

    let session = WriteSession {
        default_branch,
        base_commit_sha,
        base_tree_sha,
    };

    // The new ref must point at exactly the base commit observed above.
    info!(step = ?PublishStep::CreateBranch, branch = GENERATED_BRANCH);
    client
        .create_branch_ref(owner, repo, GENERATED_BRANCH, &session.base_commit_sha)
        .await?;

    // The three blob creations are mutually independent; all must succeed
    // before the tree is created.
    info!(step = ?PublishStep::CreateBlobs);
    let (serializers_sha, views_sha, urls_sha) = tokio::try_join!(
        client.create_blob(owner, repo, &artifacts.serializers),
        client.create_blob(owner, repo, &artifacts.views),
        client.create_blob(owner, repo, &artifacts.urls),
    )?;

    let entries = vec![
        (target_path(dir, "serializers.py"), serializers_sha),
        (target_path(dir, "views.py"), views_sha),
        (target_path(dir, "urls.py"), urls_sha),
    ];

    info!(step = ?PublishStep::CreateTree, base_tree = %session.base_tree_sha);
    let tree_sha = client
        .create_tree(owner, repo, &session.base_tree_sha, &entries)
        .await?;

    info!(step = ?PublishStep::CreateCommit, tree = %tree_sha);
    let commit_sha = client
        .create_commit(
            owner,
            repo,
            COMMIT_MESSAGE,
            &tree_sha,
            &session.base_commit_sha,
        )
        .await?;

    info!(step = ?PublishStep::UpdateRef, commit = %commit_sha);
    client
        .update_branch_ref(owner, repo, GENERATED_BRANCH, &commit_sha)
        .await?;

    info!(step = ?PublishStep::CreatePullRequest);
    let pr_url = client
        .create_pull_request(
            owner,
            repo,
            PR_TITLE,
            GENERATED_BRANCH,
            &session.default_branch,
            PR_BODY,
        )
        .await?;

    info!(%pr_url, "publication complete");
    Ok(pr_url)
}
