use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "voicevault", about = "Voice and style exemplar store with lane-mixed retrieval")]
pub struct Cli {
    /// Snapshot database path
    #[arg(long, global = true, env = "VOICEVAULT_DB", default_value = "./voicevault.db")]
    pub db: String,

    /// Config file (toml, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty category
    Create {
        /// Category kind (voice, style)
        kind: String,
        name: String,
    },
    /// Add a sample to a category lane
    Add {
        kind: String,
        category: String,
        /// Lane (dialogue, narration, interiority, action)
        lane: String,
        text: String,
    },
    /// List samples in one lane, oldest first
    Samples {
        kind: String,
        category: String,
        lane: String,
    },
    /// Retrieve exemplars for a query
    Retrieve {
        kind: String,
        category: String,
        /// Target lane
        lane: String,
        query: String,
        #[arg(long, default_value = "10")]
        k: usize,
        /// Only search the target lane
        #[arg(long)]
        lane_only: bool,
    },
    /// List category names
    Categories { kind: String },
    /// Per-lane sample counts for a category
    Stats { kind: String, category: String },
    /// Delete a category and all its samples
    Delete { kind: String, category: String },
    /// Rename a category
    Rename {
        kind: String,
        from: String,
        to: String,
    },
    /// Delete one sample from a lane
    Pop {
        kind: String,
        category: String,
        lane: String,
        /// Position counted from the newest sample (0 = newest)
        #[arg(long, default_value = "0")]
        index: usize,
    },
}

impl Commands {
    /// Whether the command changes the store and needs a snapshot save.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Commands::Create { .. }
                | Commands::Add { .. }
                | Commands::Delete { .. }
                | Commands::Rename { .. }
                | Commands::Pop { .. }
        )
    }
}
