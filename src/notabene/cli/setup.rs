use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("NOTABENE_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notabene", bin_name = "notabene", version = get_version())]
#[command(about = "Notes with version history, restore and diff", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Act as this user id
    #[arg(short, long, global = true, env = "NOTABENE_USER", help_heading = "Options")]
    pub user: Option<u64>,

    /// Directory holding notabene.json and notabene.toml
    #[arg(
        long,
        global = true,
        env = "NOTABENE_HOME",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "n", display_order = 1)]
    New {
        title: String,
        content: String,
    },

    /// List notes you can read
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Show a note
    #[command(alias = "v", display_order = 3)]
    Show {
        /// Note id or unique prefix
        note: String,
    },

    /// Edit a note, keeping its previous state in history
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Note id or unique prefix
        note: String,

        /// New title (unchanged if omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// New content (unchanged if omitted)
        #[arg(short, long)]
        content: Option<String>,

        /// Fail if the note is no longer at this revision
        #[arg(long)]
        revision: Option<u64>,
    },

    /// Delete a note and its history
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Note id or unique prefix
        note: String,
    },

    /// Give another user access to a note
    #[command(display_order = 10)]
    Share {
        /// Note id or unique prefix
        note: String,

        /// User to share with
        with: u64,

        /// Grant write access (implies read)
        #[arg(long)]
        write: bool,
    },

    /// Take access away from a user
    #[command(display_order = 11)]
    Unshare {
        /// Note id or unique prefix
        note: String,

        /// User to revoke
        from: u64,

        /// Only revoke write access, keep read
        #[arg(long)]
        write: bool,
    },

    /// List a note's versions, newest first
    #[command(alias = "h", display_order = 20)]
    History {
        /// Note id or unique prefix
        note: String,
    },

    /// Show one version of a note
    #[command(display_order = 21)]
    Version {
        /// Note id or unique prefix
        note: String,

        number: u32,
    },

    /// Restore a note to a stored version
    #[command(display_order = 22)]
    Restore {
        /// Note id or unique prefix
        note: String,

        number: u32,
    },

    /// Diff two versions of a note
    #[command(alias = "diff", display_order = 23)]
    Compare {
        /// Note id or unique prefix
        note: String,

        /// Older version
        left: u32,

        /// Newer version (defaults to the current state)
        right: Option<u32>,
    },

    /// Show effective configuration
    #[command(display_order = 30)]
    Config,
}
