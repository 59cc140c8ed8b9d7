//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::catalog::SectionId;

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Username for the logistics service
    pub username: String,

    /// Password; prompted for on stdin when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Sections command arguments.
#[derive(Debug, Args)]
pub struct SectionsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Draft file commands.
#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Write an empty draft template seeded with every catalog item
    Template {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Validate command arguments.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Path to the draft file
    pub draft: PathBuf,

    /// Validate a single section instead of all of them
    #[arg(short, long, value_enum)]
    pub section: Option<SectionArg>,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Path to the draft file
    pub draft: PathBuf,

    /// Also render the printable summary after a successful submission
    #[arg(long)]
    pub report: bool,

    /// Where to write the summary (with --report)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Path to the draft file
    pub draft: PathBuf,

    /// Output file; derived from the brigade name when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Remote brigade commands.
#[derive(Debug, Subcommand)]
pub enum BrigadesCommand {
    /// List brigades known to the service
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Download the server-rendered summary of one brigade
    Download {
        /// Brigade id
        id: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Section argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    /// Brigade information
    Info,
    /// Protective clothing
    Clothing,
    /// Fire boots
    Boots,
    /// Protective gloves
    Gloves,
    /// Other protective gear
    OtherGear,
    /// Tools
    Tools,
    /// Vehicle parts and logistics
    Parts,
    /// Food and water
    Food,
    /// Field gear
    FieldGear,
    /// Personal hygiene
    PersonalHygiene,
    /// General hygiene
    GeneralHygiene,
    /// Medicine
    Medicine,
    /// Animal rescue
    AnimalRescue,
}

impl From<SectionArg> for SectionId {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Info => Self::Info,
            SectionArg::Clothing => Self::Clothing,
            SectionArg::Boots => Self::Boots,
            SectionArg::Gloves => Self::Gloves,
            SectionArg::OtherGear => Self::OtherGear,
            SectionArg::Tools => Self::Tools,
            SectionArg::Parts => Self::Parts,
            SectionArg::Food => Self::Food,
            SectionArg::FieldGear => Self::FieldGear,
            SectionArg::PersonalHygiene => Self::PersonalHygiene,
            SectionArg::GeneralHygiene => Self::GeneralHygiene,
            SectionArg::Medicine => Self::Medicine,
            SectionArg::AnimalRescue => Self::AnimalRescue,
        }
    }
}
