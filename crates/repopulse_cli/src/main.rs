//! Repopulse CLI - sync GitHub repository activity into JSON or a database.

mod commands;
mod config;
mod progress;
mod shutdown;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "repopulse")]
#[command(version)]
#[command(about = "Incremental GitHub activity sync")]
#[command(
    long_about = "Repopulse pages issues, pull requests, releases and traffic metrics out of \
the GitHub API. It prints them as JSON or upserts them into SQLite or PostgreSQL, \
resuming from a per-repository watermark on the next run."
)]
#[command(after_long_help = r#"EXAMPLES
    Print all issues of a repository as JSON:
        $ repopulse issues rust-lang rust

    Sync pull requests into SQLite, resuming from the last run:
        $ repopulse pullrequests rust-lang rust -f sql -o sqlite:///var/lib/repopulse/activity.db?mode=rwc

    Releases created since the start of the year, at most 10:
        $ repopulse releases rust-lang rust -s 2025-01-01T00:00:00Z -l 10

    Generate shell completions:
        $ repopulse completions bash > ~/.local/share/bash-completion/completions/repopulse

CONFIGURATION
    Repopulse reads configuration from:
      1. ~/.config/repopulse/config.toml (or $XDG_CONFIG_HOME/repopulse/config.toml)
      2. ./repopulse.toml
      3. Environment variables (REPOPULSE_* prefix, e.g., REPOPULSE_GITHUB_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    REPOPULSE_GITHUB_TOKEN              GitHub token (falls back to GITHUB_TOKEN)
    REPOPULSE_GITHUB_ENDPOINT           API root (default: https://api.github.com)
    REPOPULSE_DATABASE_URL              Default connection string for --format sql
    REPOPULSE_DATABASE_MAXOPENCONNS     Pool size (default: 15)
    REPOPULSE_DATABASE_CONNMAXLIFETIME  Connection lifetime in seconds (default: 900)
"#)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for collected activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Upsert into a database
    Sql,
}

/// Flags shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GlobalOptions {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,

    /// JSON file path, or database connection string with --format sql
    #[arg(short, long, global = true)]
    pub(crate) output: Option<String>,

    /// Only collect activity at or after this RFC3339 timestamp
    #[arg(short, long, global = true, value_parser = parse_since)]
    pub(crate) since: Option<DateTime<Utc>>,

    /// Maximum number of entities to collect (0 = unlimited)
    #[arg(short, long, global = true, default_value_t = 0)]
    pub(crate) limit: usize,
}

/// Target repository.
#[derive(Debug, Clone, clap::Args)]
struct RepoArgs {
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync issues with their comments and reactions
    #[cfg(feature = "github")]
    Issues(RepoArgs),
    /// Sync pull requests with comments, reviews and changed files
    #[cfg(feature = "github")]
    Pullrequests(RepoArgs),
    /// Sync releases and their assets
    #[cfg(feature = "github")]
    Releases(RepoArgs),
    /// Snapshot traffic, stars, watchers and forks
    #[cfg(feature = "github")]
    Metrics(RepoArgs),
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC3339 timestamp like 2025-01-31T00:00:00Z: {e}"))
}

fn init_tracing() {
    // Progress bars own the terminal; keep log lines to warnings there.
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if Term::stderr().is_term() => EnvFilter::new("repopulse=warn,repopulse_cli=warn"),
        Err(_) => EnvFilter::new("repopulse=info,repopulse_cli=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    let cli = Cli::parse();

    let outcome = shutdown::until_interrupted(run(cli, &config)).await;
    match outcome {
        Some(result) => result,
        None => std::process::exit(shutdown::INTERRUPTED_EXIT_CODE),
    }
}

async fn run(cli: Cli, config: &config::Config) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "github")]
    use commands::sync::{SyncTarget, handle_sync};
    #[cfg(feature = "github")]
    use repopulse::{activity::RepoRef, sync::EntityKind};

    #[cfg(feature = "github")]
    let repo = |args: RepoArgs| RepoRef::new(args.owner, args.repo);

    match cli.command {
        #[cfg(feature = "github")]
        Commands::Issues(args) => {
            let target = SyncTarget::Entities(EntityKind::Issues);
            handle_sync(target, repo(args), &cli.global, config).await?;
        }
        #[cfg(feature = "github")]
        Commands::Pullrequests(args) => {
            let target = SyncTarget::Entities(EntityKind::PullRequests);
            handle_sync(target, repo(args), &cli.global, config).await?;
        }
        #[cfg(feature = "github")]
        Commands::Releases(args) => {
            let target = SyncTarget::Entities(EntityKind::Releases);
            handle_sync(target, repo(args), &cli.global, config).await?;
        }
        #[cfg(feature = "github")]
        Commands::Metrics(args) => {
            handle_sync(SyncTarget::Metrics, repo(args), &cli.global, config).await?;
        }
        Commands::Migrate { action } => {
            let database_url =
                commands::database::resolve_database_url(cli.global.output.as_deref(), config)?;
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["repopulse", "issues", "acme", "widgets"]).unwrap();
        assert_eq!(cli.global.format, OutputFormat::Json);
        assert_eq!(cli.global.output, None);
        assert_eq!(cli.global.since, None);
        assert_eq!(cli.global.limit, 0);
        match cli.command {
            Commands::Issues(args) => {
                assert_eq!(args.owner, "acme");
                assert_eq!(args.repo, "widgets");
            }
            _ => panic!("expected issues command"),
        }
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "repopulse",
            "pullrequests",
            "acme",
            "widgets",
            "-f",
            "sql",
            "-o",
            "sqlite::memory:",
            "-s",
            "2025-01-31T10:00:00+02:00",
            "-l",
            "25",
        ])
        .unwrap();
        assert_eq!(cli.global.format, OutputFormat::Sql);
        assert_eq!(cli.global.output.as_deref(), Some("sqlite::memory:"));
        assert_eq!(
            cli.global.since.map(|s| s.to_rfc3339()),
            Some("2025-01-31T08:00:00+00:00".to_string())
        );
        assert_eq!(cli.global.limit, 25);
        assert!(matches!(cli.command, Commands::Pullrequests(_)));
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["repopulse", "releases", "a", "b", "--format", "csv"]);
        assert!(result.is_err());
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_rejects_negative_limit() {
        let result = Cli::try_parse_from(["repopulse", "issues", "a", "b", "--limit", "-1"]);
        assert!(result.is_err());
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_rejects_malformed_since() {
        let result = Cli::try_parse_from(["repopulse", "metrics", "a", "b", "--since", "yesterday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_since_accepts_utc_suffix() {
        let since = parse_since("2025-03-01T00:00:00Z").unwrap();
        assert_eq!(since.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_migrate_takes_output_flag() {
        let cli =
            Cli::try_parse_from(["repopulse", "migrate", "status", "-o", "sqlite::memory:"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Migrate {
                action: MigrateAction::Status
            }
        ));
        assert_eq!(cli.global.output.as_deref(), Some("sqlite::memory:"));
    }
}
