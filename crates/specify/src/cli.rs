//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Specify - Bootstrap Spec-Driven Development projects
#[derive(Parser, Debug)]
#[command(name = "specify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Specify project from the latest template
    Init(InitArgs),

    /// Show version information
    Version(VersionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Name for your new project directory
    pub project_name: Option<String>,

    /// Initialize the project in the current directory
    #[arg(long)]
    pub here: bool,

    /// Copy templates from a local spec-kit checkout instead of downloading
    #[arg(long, value_name = "PATH")]
    pub local: Option<PathBuf>,

    /// Skip the check for the AI agent CLI
    #[arg(long)]
    pub ignore_agent_tools: bool,

    /// Skip git repository initialization
    #[arg(long)]
    pub no_git: bool,

    /// Merge into a non-empty current directory without asking
    #[arg(long)]
    pub force: bool,

    /// Skip SSL/TLS verification (not recommended)
    #[arg(long)]
    pub skip_tls: bool,

    /// Show verbose diagnostic output for network failures
    #[arg(long)]
    pub debug: bool,

    /// GitHub token for API requests (falls back to GH_TOKEN / GITHUB_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub github_token: Option<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_with_local_source() {
        let cli = Cli::parse_from([
            "specify", "init", "my-app", "--local", "../spec-kit", "--no-git",
        ]);
        match cli.command {
            Commands::Init(args) => {
                assert_eq!(args.project_name.as_deref(), Some("my-app"));
                assert_eq!(args.local, Some(PathBuf::from("../spec-kit")));
                assert!(args.no_git);
                assert!(!args.here);
            }
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_ignore_agent_tools_with_local() {
        let cli = Cli::parse_from([
            "specify",
            "init",
            "demo",
            "--local",
            "/opt/spec-kit",
            "--ignore-agent-tools",
        ]);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.ignore_agent_tools);
                assert_eq!(args.local, Some(PathBuf::from("/opt/spec-kit")));
            }
            other => panic!("expected init, got {:?}", other),
        }

        let cli = Cli::parse_from(["specify", "init", "demo"]);
        match cli.command {
            Commands::Init(args) => assert!(!args.ignore_agent_tools),
            other => panic!("expected init, got {:?}", other),
        }
    }

    #[test]
    fn test_quiet_help_describes_log_filter() {
        let cmd = Cli::command();
        let quiet = cmd
            .get_arguments()
            .find(|a| a.get_id() == "quiet")
            .unwrap();
        assert_eq!(quiet.get_help().unwrap().to_string(), "Only log errors");
    }

    #[test]
    fn test_parse_init_here_with_network_flags() {
        let cli = Cli::parse_from([
            "specify",
            "-vv",
            "init",
            "--here",
            "--force",
            "--skip-tls",
            "--debug",
            "--github-token",
            "abc",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Init(args) => {
                assert!(args.project_name.is_none());
                assert!(args.here && args.force && args.skip_tls && args.debug);
                assert_eq!(args.github_token.as_deref(), Some("abc"));
            }
            other => panic!("expected init, got {:?}", other),
        }
    }
}
