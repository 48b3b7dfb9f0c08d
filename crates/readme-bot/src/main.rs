use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use readme_bot::cmd::issue::IssueResult;
use readme_bot::{cmd, BotConfig, GitHubConfig};

#[derive(Parser)]
#[command(name = "readme-bot")]
#[command(about = "Plays README chess and feeds the cyber pet", version)]
struct Cli {
    /// Configuration file; relative paths inside it resolve against its directory
    #[arg(short, long, global = true, default_value_os_t = BotConfig::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one community move, e.g. `e2e4`
    Play {
        #[arg(value_name = "MOVE")]
        mv: String,
    },
    /// Handle a move request from an issue title
    Issue {
        /// Issue title, e.g. "Chess Move: e2e4"
        #[arg(long, env = "ISSUE_TITLE")]
        title: String,
        /// Issue number to reply to
        #[arg(long, env = "ISSUE_NUMBER")]
        issue: Option<u64>,
        #[command(flatten)]
        github: GitHubArgs,
    },
    /// Regenerate the board image and stats block from the stored game
    Render,
    /// Update the cyber pet from recent pushes
    Pet {
        #[command(flatten)]
        github: GitHubArgs,
    },
}

#[derive(Args)]
struct GitHubArgs {
    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,
}

impl GitHubArgs {
    fn into_config(self, config: &BotConfig, issue: Option<u64>) -> GitHubConfig {
        GitHubConfig {
            api_url: config.github.api_url.clone(),
            repository: self.repository.or_else(|| config.github.repository.clone()),
            token: self.token,
            issue,
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<BotConfig> {
    let config = BotConfig::load(path)?;
    Ok(match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(base) => config.rooted_at(base),
        None => config,
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Play { mv } => {
            let outcome = cmd::play::run(&config, &mv)?;
            println!("{}", outcome.summary());
        }
        Commands::Issue {
            title,
            issue,
            github,
        } => {
            let github = github.into_config(&config, issue);
            match cmd::issue::run(&config, &github, &title)? {
                IssueResult::Ignored => println!("Not a move request: {}", title),
                IssueResult::Rejected(reply) => println!("{}", reply),
                IssueResult::Played(outcome) => println!("{}", outcome.summary()),
            }
        }
        Commands::Render => cmd::render::run(&config)?,
        Commands::Pet { github } => {
            let github = github.into_config(&config, None);
            let status = cmd::pet::run(&config, &github, Utc::now().date_naive())?;
            println!("{} is {}", config.pet.name, status.mood);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
