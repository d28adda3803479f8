//! Finds the model-definition file inside a remote repository tree.
//!
//! Resolution order: repository metadata (default branch) → branch head
//! (base commit + base tree SHA) → recursive tree listing → filter for
//! `models.py` blobs. Only the first match is used; its containing directory
//! becomes the target directory for the generated files, so they land next
//! to the source they were derived from.

use tracing::{debug, info};

use crate::errors::PipelineError;
use crate::github::{GitHubClient, TreeEntry};

/// Filename suffix identifying a Django model-definition file.
pub const MODEL_FILE_SUFFIX: &str = "models.py";

/// The located model source plus the branch/commit state it was observed at.
#[derive(Debug, Clone)]
pub struct ModelSource {
    /// Repository path of the chosen `models.py`.
    pub path: String,
    /// Its containing directory (`""` when at repository root). Generated
    /// files are written under this directory.
    pub dir: String,
    /// Default branch name the tree was resolved from.
    pub default_branch: String,
}

/// Filter a recursive tree listing for candidate model files, in listing
/// order. Directories and files that merely contain the suffix mid-path
/// (e.g. `models.py.bak`) do not match.
pub fn find_model_paths(entries: &[TreeEntry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.kind == "blob" && e.path.ends_with(MODEL_FILE_SUFFIX))
        .map(|e| e.path.clone())
        .collect()
}

/// Strip the final path segment: `"app/models.py"` → `"app"`,
/// `"models.py"` → `""`.
pub fn containing_dir(path: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    }
}

/// Resolve the repository's default branch to a tree listing and pick the
/// first `models.py` candidate.
///
/// Zero candidates is a normal user-facing outcome
/// ([`PipelineError::NoModelSourceFound`]), not a defect.
pub async fn locate_model_source(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
) -> Result<ModelSource, PipelineError> {
    let default_branch = client.get_repo(owner, repo).await?.default_branch;
    debug!(%default_branch, "resolved default branch");

    let branch = client.get_branch(owner, repo, &default_branch).await?;
    let tree_sha = branch.commit.commit.tree.sha;

    let entries = client.get_tree_recursive(owner, repo, &tree_sha).await?;
    debug!(entries = entries.len(), "fetched recursive tree listing");

    let candidates = find_model_paths(&entries);
    let path = candidates
        .into_iter()
        .next()
        .ok_or(PipelineError::NoModelSourceFound)?;
    let dir = containing_dir(&path);
    info!(%path, %dir, "located model source");

    Ok(ModelSource {
        path,
        dir,
        default_branch,
    })
}
