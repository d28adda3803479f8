//! End-to-end pipeline: locate → fetch → parse → generate → publish.
//!
//! One logical workflow per invocation, no background state. Every stage's
//! output is the next stage's required input and any failure aborts the run;
//! recovery is caller-initiated re-invocation (after deleting the stale
//! `crudify` branch if publication got past CreateBranch).

use tracing::info;

use crate::errors::PipelineError;
use crate::generate::GeneratedArtifactSet;
use crate::github::GitHubClient;
use crate::locate::{ModelSource, locate_model_source};
use crate::parse::parse_django_models;
use crate::publish::publish;

/// Target framework for code generation. Only Django REST Framework has a
/// template set today; anything else is rejected before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    Django,
}

impl Framework {
    pub fn from_str(name: &str) -> Result<Self, PipelineError> {
        match name.to_lowercase().as_str() {
            "django" => Ok(Framework::Django),
            other => Err(PipelineError::UnsupportedFramework(other.to_string())),
        }
    }
}

/// The generation half of a run: everything up to (but excluding)
/// publication. This is what `--dry-run` stops at.
#[derive(Debug, Clone)]
pub struct GeneratedPreview {
    pub source: ModelSource,
    pub models: Vec<String>,
    pub artifacts: GeneratedArtifactSet,
}

/// A completed run: the preview plus the opened pull request's URL.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub preview: GeneratedPreview,
    pub pull_request_url: String,
}

/// Locate the first `models.py`, fetch it, extract model names, and generate
/// the three artifacts. Performs no writes.
pub async fn generate_preview(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    framework: Framework,
) -> Result<GeneratedPreview, PipelineError> {
    // Only one template set exists; the match keeps the seam explicit for
    // the day a second framework lands.
    let Framework::Django = framework;

    let source = locate_model_source(client, owner, repo).await?;

    let text = client.fetch_file_content(owner, repo, &source.path).await?;

    let models = parse_django_models(&text);
    if models.is_empty() {
        return Err(PipelineError::NoModelsFound);
    }
    info!(count = models.len(), ?models, "extracted model names");

    let artifacts = GeneratedArtifactSet::from_models(&models);
    Ok(GeneratedPreview {
        source,
        models,
        artifacts,
    })
}

/// Run the whole pipeline and open a pull request. Returns the run summary
/// including the PR's web URL.
pub async fn run_pipeline(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
    framework: Framework,
) -> Result<PipelineRun, PipelineError> {
    let preview = generate_preview(client, owner, repo, framework).await?;
    let pull_request_url = publish(
        client,
        owner,
        repo,
        &preview.source.dir,
        &preview.artifacts,
    )
    .await?;
    Ok(PipelineRun {
        preview,
        pull_request_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn django_is_the_only_supported_framework() {
        assert_eq!(Framework::from_str("django").unwrap(), Framework::Django);
        assert_eq!(Framework::from_str("Django").unwrap(), Framework::Django);
    }

    #[test]
    fn other_frameworks_are_rejected_by_name() {
        let err = Framework::from_str("rails").unwrap_err();
        match err {
            PipelineError::UnsupportedFramework(name) => assert_eq!(name, "rails"),
            other => panic!("expected UnsupportedFramework, got {:?}", other),
        }
    }
}
