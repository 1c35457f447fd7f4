//! Constants shared between on-chain program and clients.
//!
//! Keep these stable because they affect instruction encoding and account
//! decoding.

use journal_core::cluster::ClusterNetwork;
use solana_program::pubkey::Pubkey;

/// Default program id, used on localnet, mainnet and custom endpoints.
pub const DEFAULT_PROGRAM_ID: &str = "Count3AcZucFDPSFBAeHkQ6AvttieKUkyJ8HiQGhQwe";

/// Program id of the shared devnet/testnet deployment.
pub const DEVNET_PROGRAM_ID: &str = "CounNZdmsQmWh7uVngV9FXW2dZ6zAgbJyYsvBpqbykg";

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

/// Program id for a cluster.
pub fn program_id_for(network: ClusterNetwork) -> Pubkey {
    match network {
        ClusterNetwork::Devnet | ClusterNetwork::Testnet => {
            DEVNET_PROGRAM_ID.parse().unwrap_or_else(|_| default_program_id())
        }
        ClusterNetwork::MainnetBeta | ClusterNetwork::Localnet | ClusterNetwork::Custom => {
            default_program_id()
        }
    }
}

/// Instruction names, hashed into the 8-byte instruction discriminator.
pub const IX_CREATE: &str = "create_journal_entry";
pub const IX_UPDATE: &str = "update_journal_entry";
pub const IX_DELETE: &str = "delete_journal_entry";

/// Discriminator namespaces.
pub const IX_NAMESPACE: &str = "global";
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Length of instruction and account discriminators.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Default keypair location used by the Solana CLI.
pub const DEFAULT_KEYPAIR_PATH: &str = ".config/solana/id.json";
