//! `crudify repos` — list repositories accessible to the token.

use anyhow::Result;
use console::style;

use super::{Cli, build_client};

pub async fn cmd_repos(cli: &Cli, page: u32, per_page: u32) -> Result<()> {
    let client = build_client(cli)?;

    if let Ok(user) = client.get_user().await {
        let label = user.name.unwrap_or_else(|| user.login.clone());
        println!("Logged in as {} (@{})\n", style(label).bold(), user.login);
    }

    let repos = client.list_repos(page, per_page).await?;
    if repos.is_empty() {
        println!("No repositories found on page {}.", page);
        return Ok(());
    }

    for repo in &repos {
        let visibility = if repo.private {
            style("private").yellow()
        } else {
            style("public").green()
        };
        print!("{} [{}]", style(&repo.full_name).bold(), visibility);
        if let Some(desc) = &repo.description {
            print!(" - {}", style(desc).dim());
        }
        println!();
    }
    println!("\n{} repositories (page {})", repos.len(), page);

    Ok(())
}
