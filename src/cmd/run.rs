//! `crudify run` — the generate-and-publish flow.

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crudify::generate::GeneratedArtifactSet;
use crudify::github::GitHubClient;
use crudify::pipeline::{Framework, generate_preview};
use crudify::publish::publish;

use super::{Cli, build_client};

pub async fn cmd_run(
    cli: &Cli,
    repo: Option<&str>,
    framework: &str,
    dry_run: bool,
    show: bool,
    open: bool,
) -> Result<()> {
    let framework = Framework::from_str(framework)?;
    let client = build_client(cli)?;

    let slug = match repo {
        Some(slug) => slug.to_string(),
        None => pick_repository(&client).await?,
    };
    let (owner, name) = split_slug(&slug)?;

    let spinner = stage_spinner();

    if dry_run {
        spinner.set_message(format!("Generating CRUD code for {}...", slug));
        let preview = generate_preview(&client, owner, name, framework).await?;
        spinner.finish_and_clear();
        print_summary(&preview.source.path, &preview.models);
        print_artifacts(&preview.artifacts);
        println!("{}", style("Dry run: nothing was published.").yellow());
        return Ok(());
    }

    spinner.set_message(format!("Generating CRUD code for {}...", slug));
    let preview = generate_preview(&client, owner, name, framework).await?;
    spinner.set_message("Publishing branch, commit and pull request...");
    let pr_url = publish(&client, owner, name, &preview.source.dir, &preview.artifacts).await?;
    spinner.finish_and_clear();

    print_summary(&preview.source.path, &preview.models);
    if show {
        print_artifacts(&preview.artifacts);
    }
    println!(
        "{} Pull request created: {}",
        style("✓").green().bold(),
        style(&pr_url).cyan().underlined()
    );

    if open {
        open::that(&pr_url).with_context(|| format!("Failed to open {} in a browser", pr_url))?;
    }

    Ok(())
}

/// Interactive repository picker over the token's accessible repos.
async fn pick_repository(client: &GitHubClient) -> Result<String> {
    let repos = client.list_repos(1, 100).await?;
    if repos.is_empty() {
        bail!("No repositories accessible to this token");
    }
    let labels: Vec<String> = repos
        .iter()
        .map(|r| {
            if r.private {
                format!("{} (private)", r.full_name)
            } else {
                r.full_name.clone()
            }
        })
        .collect();
    let choice = Select::new()
        .with_prompt("Select a repository")
        .items(&labels)
        .default(0)
        .interact()
        .context("Repository selection cancelled")?;
    Ok(repos[choice].full_name.clone())
}

fn split_slug(slug: &str) -> Result<(&str, &str)> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => bail!("Invalid repository '{}': expected owner/repo", slug),
    }
}

fn stage_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string"),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_summary(path: &str, models: &[String]) {
    println!(
        "Found {} in {} with {} model(s): {}",
        style("models.py").bold(),
        style(path).cyan(),
        models.len(),
        models.join(", ")
    );
}

fn print_artifacts(artifacts: &GeneratedArtifactSet) {
    for (filename, content) in artifacts.files() {
        println!("\n{}", style(format!("── {} ", filename)).bold().cyan());
        println!("{}", content);
    }
}
