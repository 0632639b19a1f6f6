//! remote-git CLI - list repositories and read raw files on git hosting services.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::find::FindArgs;
use crate::commands::raw::RawArgs;

#[derive(Parser)]
#[command(name = "remote-git")]
#[command(version)]
#[command(about = "List repositories on GitLab, GitHub, Gogs/Gitea or local folders")]
#[command(
    long_about = "remote-git lists the repositories of users and organizations on a git \
hosting service through one interface, filters them by name or by the files they \
contain, and reads raw files from them."
)]
#[command(after_long_help = r#"EXAMPLES
    List the projects of a GitLab group:
        $ remote-git find --url https://gitlab.com --org gitlab-org --limit 20

    Keep PHP libraries only:
        $ remote-git find --url https://github.com --user _me_ --composer-type library

    Scan a folder of clones:
        $ remote-git find --url ~/src --format names

    Read a file:
        $ remote-git raw --url https://github.com --user mborne --project mborne/remote-git --path README.md

CONFIGURATION
    remote-git reads configuration from:
      1. ~/.config/remote-git/config.toml (or $XDG_CONFIG_HOME/remote-git/config.toml)
      2. ./remote-git.toml
      3. Environment variables (REMOTE_GIT_ prefix, sections separated by __)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    REMOTE_GIT_CLIENT__URL        Hosting service URL or local folder
    REMOTE_GIT_CLIENT__TYPE       Backend type (gitlab-v4, github, gogs-v1, local)
    REMOTE_GIT_TOKEN              Access token (same as --token)
    REMOTE_GIT_FIND__ORGANIZATIONS  Comma-separated organizations
    RUST_LOG                      Log filter (default: remote_git=info,remote_git_cli=info)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects matching the selection and filters
    Find(FindArgs),
    /// Print a file from a project
    Raw(RawArgs),
    /// List the registered backend types
    Types,
    /// Show the backend type detected for a URL
    Detect {
        /// Hosting service URL or local folder
        url: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pipeable
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("remote_git=info,remote_git_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(Term::stderr().is_term())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => commands::meta::handle_completions(shell)?,
        Commands::Man { output } => commands::meta::handle_man(output)?,
        Commands::Types => commands::meta::handle_types()?,
        Commands::Detect { url } => commands::meta::handle_detect(&url)?,
        Commands::Find(args) => {
            let config = config::Config::load();
            commands::find::handle_find(args, &config).await?;
        }
        Commands::Raw(args) => {
            let config = config::Config::load();
            commands::raw::handle_raw(args, &config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::commands::find::OutputFormat;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_find_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "remote-git",
            "find",
            "--url",
            "https://gitlab.example.org",
            "--org",
            "acme",
            "--org",
            "acme/tools",
            "--require-file",
            "README.md",
            "--require-file",
            "composer.json",
            "--limit",
            "5",
            "--format",
            "json",
        ])
        .expect("valid command line");

        let Commands::Find(args) = cli.command else {
            panic!("expected find");
        };
        assert_eq!(args.connection.url.as_deref(), Some("https://gitlab.example.org"));
        assert_eq!(args.selection.organizations, vec!["acme", "acme/tools"]);
        assert_eq!(args.filters.require_file, vec!["README.md", "composer.json"]);
        assert_eq!(args.limit, Some(5));
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn parses_raw_with_ref() {
        let cli = Cli::try_parse_from([
            "remote-git",
            "raw",
            "--type",
            "gogs-v1",
            "--url",
            "https://gogs.example.org",
            "--project",
            "acme/a",
            "--path",
            "README.md",
            "--ref",
            "develop",
        ])
        .expect("valid command line");

        let Commands::Raw(args) = cli.command else {
            panic!("expected raw");
        };
        assert_eq!(args.connection.client_type.as_deref(), Some("gogs-v1"));
        assert_eq!(args.project, "acme/a");
        assert_eq!(args.git_ref.as_deref(), Some("develop"));
    }

    #[test]
    fn raw_requires_project_and_path() {
        assert!(Cli::try_parse_from(["remote-git", "raw", "--project", "acme/a"]).is_err());
    }
}
