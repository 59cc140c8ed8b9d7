//! Command-line interface for brigadelog.
//!
//! This module provides the CLI structure and command handlers for the
//! `briglog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BrigadesCommand, ConfigCommand, DraftCommand, LoginCommand, ReportCommand, SectionArg,
    SectionsCommand, SubmitCommand, ValidateCommand,
};

/// briglog - Collect and submit brigade supply needs
///
/// A command-line wizard that walks a volunteer fire brigade's logistics
/// sections, validates the entries, submits them to the logistics service
/// and renders a printable summary.
#[derive(Debug, Parser)]
#[command(name = "briglog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to the logistics service and store the session
    Login(LoginCommand),

    /// Clear the stored session
    Logout,

    /// List the wizard sections and their catalogs
    Sections(SectionsCommand),

    /// Work with draft files
    #[command(subcommand)]
    Draft(DraftCommand),

    /// Validate a draft without contacting the service
    Validate(ValidateCommand),

    /// Submit a draft section by section
    Submit(SubmitCommand),

    /// Render the printable summary of a draft
    Report(ReportCommand),

    /// Inspect brigades already on the service
    #[command(subcommand)]
    Brigades(BrigadesCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "briglog");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Sections(SectionsCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: false,
            command: Command::Sections(SectionsCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose_and_trace() {
        let mut cli = Cli {
            config: None,
            verbose: 1,
            quiet: false,
            command: Command::Logout,
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Verbose);
        cli.verbose = 3;
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Trace);
    }

    #[test]
    fn test_parse_login() {
        let args = vec!["briglog", "login", "operator", "--password", "secret"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Login(login) = cli.command else {
            panic!("expected login command");
        };
        assert_eq!(login.username, "operator");
        assert_eq!(login.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_submit() {
        let args = vec!["briglog", "submit", "draft.json", "--report"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Submit(submit) = cli.command else {
            panic!("expected submit command");
        };
        assert_eq!(submit.draft, PathBuf::from("draft.json"));
        assert!(submit.report);
        assert!(submit.output.is_none());
    }

    #[test]
    fn test_parse_validate_with_section() {
        let args = vec!["briglog", "validate", "draft.json", "--section", "info"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Validate(validate) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(validate.section, Some(SectionArg::Info));
    }

    #[test]
    fn test_parse_draft_template() {
        let args = vec!["briglog", "draft", "template", "-o", "empty.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Draft(DraftCommand::Template { output: Some(_) })
        ));
    }

    #[test]
    fn test_parse_brigades_list() {
        let args = vec!["briglog", "brigades", "list", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Brigades(BrigadesCommand::List { json: true })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["briglog", "-c", "/custom/config.toml", "logout"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_report() {
        let args = vec!["briglog", "report", "draft.json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Report(_)));
    }
}
