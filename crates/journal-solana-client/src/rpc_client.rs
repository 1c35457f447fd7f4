//! RPC program client for the journal program.
//!
//! This client can:
//! - derive entry PDAs
//! - read the program account and entry accounts
//! - build, sign and submit create/update/delete transactions
//!
//! It is bound to one cluster endpoint and, optionally, one signer. Without a
//! signer it is read-only and every write reports `NotConnected`.

use std::sync::Arc;

use async_trait::async_trait;
use journal_core::client::ProgramClient;
use journal_core::config::Commitment;
use journal_core::model::{Address, EntryAccount, JournalEntry, ProgramMetadata, ProgramStatus, TxSignature};
use journal_core::{JournalError, JournalResult};
use solana_account_decoder::UiAccountEncoding;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::Transaction;

use crate::account::{account_discriminator, JournalEntryState};
use crate::{instruction, pda, to_address, to_pubkey};

pub struct RpcProgramClient {
    pub program_id: Pubkey,
    rpc: RpcClient,
    payer: Option<Arc<Keypair>>,
    commitment: CommitmentConfig,
}

impl RpcProgramClient {
    pub fn new(program_id: Pubkey, rpc_url: &str, commitment: Commitment) -> Self {
        let commitment = commitment_config(commitment);
        Self {
            program_id,
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            payer: None,
            commitment,
        }
    }

    /// Attach the wallet that signs and pays for writes.
    pub fn with_payer(mut self, payer: Arc<Keypair>) -> Self {
        self.payer = Some(payer);
        self
    }

    pub fn payer(&self) -> Option<Pubkey> {
        self.payer.as_ref().map(|p| p.pubkey())
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Cluster version string; used as a reachability check.
    pub async fn node_version(&self) -> JournalResult<String> {
        let v = self.rpc.get_version().await.map_err(network_error)?;
        Ok(v.solana_core)
    }

    fn signer_for(&self, owner: &Address) -> JournalResult<&Keypair> {
        let payer = self.payer.as_deref().ok_or(JournalError::NotConnected)?;
        if payer.pubkey() != to_pubkey(owner) {
            return Err(JournalError::validation(format!(
                "owner {owner} is not the configured signer {}",
                payer.pubkey()
            )));
        }
        Ok(payer)
    }

    /// Submit a transaction and wait for confirmation at the client's commitment.
    async fn send(&self, payer: &Keypair, ix: Instruction) -> JournalResult<TxSignature> {
        let bh = self.rpc.get_latest_blockhash().await.map_err(network_error)?;
        let tx = Transaction::new_signed_with_payer(&[ix], Some(&payer.pubkey()), &[payer], bh);
        let sig = self
            .rpc
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(network_error)?;
        tracing::debug!(signature = %sig, "transaction confirmed");
        Ok(TxSignature::new(sig.to_string()))
    }
}

#[async_trait]
impl ProgramClient for RpcProgramClient {
    fn program_id(&self) -> Address {
        to_address(&self.program_id)
    }

    fn entry_address(&self, owner: &Address, title: &str) -> JournalResult<Address> {
        let pda = pda::derive_entry(&self.program_id, &to_pubkey(owner), title)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        Ok(to_address(&pda.address))
    }

    async fn program_status(&self) -> JournalResult<ProgramStatus> {
        let account = self
            .rpc
            .get_account_with_commitment(&self.program_id, self.commitment)
            .await
            .map_err(network_error)?
            .value;

        let program_id = to_address(&self.program_id);
        Ok(match account {
            None => ProgramStatus::missing(program_id),
            Some(acc) => ProgramStatus {
                program_id,
                deployed: acc.executable,
                metadata: Some(ProgramMetadata {
                    owner: to_address(&acc.owner),
                    executable: acc.executable,
                    lamports: acc.lamports,
                    data_len: acc.data.len(),
                }),
            },
        })
    }

    async fn all_entries(&self) -> JournalResult<Vec<EntryAccount>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                &account_discriminator(),
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await
            .map_err(network_error)?;

        let mut out = Vec::with_capacity(accounts.len());
        for (pubkey, account) in accounts {
            match JournalEntryState::decode(&account.data) {
                Ok(state) => out.push(EntryAccount { address: to_address(&pubkey), entry: state.into() }),
                Err(e) => tracing::warn!(%pubkey, error = %e, "skipping undecodable entry account"),
            }
        }
        Ok(out)
    }

    async fn fetch_entry(&self, address: &Address) -> JournalResult<Option<JournalEntry>> {
        let pubkey = to_pubkey(address);
        let account = self
            .rpc
            .get_account_with_commitment(&pubkey, self.commitment)
            .await
            .map_err(network_error)?
            .value;

        let Some(account) = account else {
            return Ok(None);
        };
        if account.owner != self.program_id {
            return Err(JournalError::decode(format!(
                "account {pubkey} is owned by {}, not the journal program",
                account.owner
            )));
        }
        Ok(Some(JournalEntryState::decode(&account.data)?.into()))
    }

    async fn create_journal_entry(&self, owner: &Address, title: &str, message: &str) -> JournalResult<TxSignature> {
        let payer = self.signer_for(owner)?;
        let ix = instruction::ix_create_entry(&self.program_id, &payer.pubkey(), title, message)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        self.send(payer, ix).await
    }

    async fn update_journal_entry(&self, owner: &Address, title: &str, message: &str) -> JournalResult<TxSignature> {
        let payer = self.signer_for(owner)?;
        let ix = instruction::ix_update_entry(&self.program_id, &payer.pubkey(), title, message)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        self.send(payer, ix).await
    }

    async fn delete_journal_entry(&self, owner: &Address, title: &str) -> JournalResult<TxSignature> {
        let payer = self.signer_for(owner)?;
        let ix = instruction::ix_delete_entry(&self.program_id, &payer.pubkey(), title)
            .map_err(|e| JournalError::validation(e.to_string()))?;
        self.send(payer, ix).await
    }
}

pub fn commitment_config(c: Commitment) -> CommitmentConfig {
    match c {
        Commitment::Processed => CommitmentConfig::processed(),
        Commitment::Confirmed => CommitmentConfig::confirmed(),
        Commitment::Finalized => CommitmentConfig::finalized(),
    }
}

/// Keep the transport's message as-is: it carries program errors such as
/// `custom program error: 0x1` that the user needs to see.
fn network_error(e: ClientError) -> JournalError {
    JournalError::network(e.to_string())
}
