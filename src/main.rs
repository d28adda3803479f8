use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "crudify")]
#[command(version, about = "Generate Django REST Framework CRUD code for a GitHub repo and open a PR")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// GitHub access token with repo scope. Falls back to the GITHUB_TOKEN
    /// environment variable (a .env file is honored).
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// GitHub API base URL. Only useful for testing against a mock server.
    #[arg(long, global = true, hide = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List repositories accessible to the token
    Repos {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "30")]
        per_page: u32,
    },
    /// Generate CRUD code for a repository and publish it as a pull request
    Run {
        /// Target repository as owner/repo. Prompts interactively when omitted.
        repo: Option<String>,

        /// Target framework (only "django" is supported)
        #[arg(long, default_value = "django")]
        framework: String,

        /// Generate and print the files without publishing anything
        #[arg(long)]
        dry_run: bool,

        /// Print the generated files after publishing
        #[arg(long)]
        show: bool,

        /// Open the created pull request in the browser
        #[arg(long)]
        open: bool,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default_level = if verbose { "crudify=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Repos { page, per_page } => {
            cmd::cmd_repos(&cli, *page, *per_page).await?;
        }
        Commands::Run {
            repo,
            framework,
            dry_run,
            show,
            open,
        } => {
            cmd::cmd_run(&cli, repo.as_deref(), framework, *dry_run, *show, *open).await?;
        }
    }

    Ok(())
}
