use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use rxscan::models::PrescriptionStatus;

#[derive(Parser)]
#[command(name = "rxscan", version, about = "Read prescriptions from OCR text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override today's date (YYYY-MM-DD), used when a prescription has no date
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init,

    /// Extract a prescription from recognized text
    Scan {
        /// File with OCR output ("-" or omitted reads stdin)
        file: Option<PathBuf>,

        /// Inline text instead of a file
        #[arg(long, conflicts_with_all = ["file", "simulate"])]
        text: Option<String>,

        /// Use the built-in sample text matching this image file name
        #[arg(long, value_name = "IMAGE", conflicts_with = "file")]
        simulate: Option<String>,

        /// Save the extracted prescription to the list
        #[arg(long)]
        save: bool,
    },

    /// List saved prescriptions
    List {
        /// Only show prescriptions with this status
        #[arg(long)]
        status: Option<PrescriptionStatus>,
    },

    /// Show one saved prescription
    Show {
        /// Prescription id
        id: String,
    },

    /// Correct fields of a saved prescription
    Edit {
        /// Prescription id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        dosage: Option<String>,

        #[arg(long)]
        frequency: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        doctor: Option<String>,

        /// Prescription date as written on the prescription
        #[arg(long = "rx-date")]
        rx_date: Option<String>,
    },

    /// Change the status of a saved prescription
    Status {
        /// Prescription id
        id: String,

        /// active, expired or upcoming
        status: PrescriptionStatus,
    },

    /// Delete a saved prescription
    Remove {
        /// Prescription id
        id: String,

        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Inspect or extend the medication dictionary
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

impl Commands {
    /// Command name used in the JSON envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Scan { .. } => "scan",
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Edit { .. } => "edit",
            Self::Status { .. } => "status",
            Self::Remove { .. } => "remove",
            Self::Dict { .. } => "dict",
            Self::Config { .. } => "config",
            Self::Completions { .. } => "completions",
        }
    }
}

#[derive(Subcommand)]
pub enum DictAction {
    /// List every recognised medication name
    List,
    /// Add a medication name
    Add {
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
}
