use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Typed content loading for a CMS-backed portfolio")]
pub struct Cli {
    /// Config file to use
    #[arg(long, global = true, default_value = crate::config::CONFIG_FILE)]
    pub config: PathBuf,

    /// When to use colored output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Print debug-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate document payloads from JSON files ("-" reads stdin)
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Fetch content from the repository, validate it, and print it
    Pull {
        /// What to pull
        #[arg(value_enum)]
        kind: Kind,

        /// Document uid, for single-document kinds
        uid: Option<String>,

        /// Print full documents instead of listing previews
        #[arg(long)]
        raw: bool,
    },
}

/// Pullable content kinds, mirroring the loader operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Projects,
    Project,
    CaseStudies,
    CaseStudy,
    Posts,
    Post,
    Tags,
    Skills,
    Settings,
    Navigation,
}

impl Kind {
    /// Kinds that address one document by uid.
    pub fn wants_uid(self) -> bool {
        matches!(self, Self::Project | Self::CaseStudy | Self::Post)
    }
}
