use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "journal", version, about = "Journal entries on Solana")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Cluster moniker (devnet, testnet, mainnet-beta, localnet) or RPC URL.
    #[arg(long, short = 'u', global = true, default_value = "devnet")]
    pub cluster: String,

    /// Wallet keypair file (default: ~/.config/solana/id.json).
    #[arg(long, short = 'k', global = true)]
    pub keypair: Option<PathBuf>,

    /// Override the journal program id.
    #[arg(long, global = true)]
    pub program_id: Option<String>,

    /// Commitment level: processed|confirmed|finalized
    #[arg(long, global = true, default_value = "confirmed")]
    pub commitment: String,

    /// Log debug events to stderr (RUST_LOG takes precedence).
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show whether the program is deployed on the selected cluster.
    Status,

    /// List all journal entries.
    List,

    /// Fetch one entry by account address or by title.
    Fetch {
        #[arg(long, conflicts_with = "title", required_unless_present = "title")]
        address: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Owner used to derive the address from a title (default: the wallet).
        #[arg(long, requires = "title")]
        owner: Option<String>,
    },

    /// Create an entry.
    Create { title: String, message: String },

    /// Replace the message of an existing entry.
    Update { title: String, message: String },

    /// Delete an entry.
    Delete {
        title: String,

        /// Skip the confirmation prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Run environment checks.
    Doctor,
}
