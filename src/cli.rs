use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::transform::Locale;

#[derive(Parser, Debug)]
#[command(name = "ark-lore-to-sqlite")]
#[command(version, about = "Build an Arknights operator lore database from game data JSON")]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ARK_LORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download (if needed) and convert to SQLite
    Sync {
        /// Output SQLite database path
        output_db: PathBuf,

        /// Game data locale
        #[arg(short, long, env = "ARK_LORE_LOCALE")]
        locale: Option<Locale>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,

        /// Custom cache directory
        #[arg(short, long, env = "ARK_LORE_CACHE_DIR")]
        cache_dir: Option<PathBuf>,

        /// Delete an existing database before converting
        #[arg(long)]
        fresh: bool,

        /// Show the full-screen progress display
        #[arg(long)]
        tui: bool,
    },

    /// Download the source tables into the cache
    Download {
        /// Game data locale
        #[arg(short, long, env = "ARK_LORE_LOCALE")]
        locale: Option<Locale>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force re-download even if cached
        #[arg(short, long)]
        force: bool,
    },

    /// Convert local game data JSON to a SQLite database
    Convert {
        /// Directory containing the excel tables (or a data repository checkout)
        data_dir: PathBuf,

        /// Output SQLite database path
        output_db: PathBuf,

        /// Game data locale
        #[arg(short, long, env = "ARK_LORE_LOCALE")]
        locale: Option<Locale>,

        /// Delete an existing database before converting
        #[arg(long)]
        fresh: bool,

        /// Show the full-screen progress display
        #[arg(long)]
        tui: bool,
    },

    /// Search operators by name (case-insensitive substring)
    Search {
        /// Lore database
        db: PathBuf,

        query: String,

        /// Card wording locale
        #[arg(short, long, env = "ARK_LORE_LOCALE")]
        locale: Option<Locale>,
    },

    /// Look up an organization by id or name
    Org {
        /// Lore database
        db: PathBuf,

        query: String,
    },

    /// List all table names
    ListTables,
}

impl Commands {
    pub fn uses_tui(&self) -> bool {
        matches!(
            self,
            Commands::Sync { tui: true, .. } | Commands::Convert { tui: true, .. }
        )
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
