//! Builds the cluster/wallet context and the repository for one invocation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use journal_core::cluster::Cluster;
use journal_core::config::{validate_config, ClientConfig, Commitment};
use journal_core::model::{Address, TxSignature};
use journal_core::notify::Notifier;
use journal_core::repository::EntryRepository;
use journal_core::session::Session;
use journal_solana_client::{program_id_for, to_address, to_pubkey, RpcProgramClient, DEFAULT_KEYPAIR_PATH};
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use termcolor::Color;

use crate::args::Cli;
use crate::output;

pub type Repo = EntryRepository<RpcProgramClient, CliNotifier>;

/// Prints transaction links and write errors to stderr.
pub struct CliNotifier;

impl Notifier for CliNotifier {
    fn transaction_sent(&self, cluster: &Cluster, signature: &TxSignature) {
        output::notice(Color::Green, "Transaction sent:", &cluster.explorer_tx_url(signature.as_str()));
    }

    fn error(&self, message: &str) {
        output::notice(Color::Red, "error:", message);
    }
}

pub struct AppContext {
    pub config: ClientConfig,
    pub session: Session,
    pub keypair_path: PathBuf,
    pub repo: Repo,
}

impl AppContext {
    pub fn build(cli: &Cli) -> Result<Self> {
        let config = client_config(cli)?;
        let keypair_path = resolve_keypair_path(cli.keypair.as_deref());
        let wallet = load_wallet(&keypair_path)?;

        let program_id = config
            .program_id
            .map(|a| to_pubkey(&a))
            .unwrap_or_else(|| program_id_for(config.cluster.network));

        let mut client = RpcProgramClient::new(program_id, config.cluster.endpoint(), config.commitment);
        let identity = wallet.as_ref().map(|k| to_address(&k.pubkey()));
        if let Some(k) = wallet {
            client = client.with_payer(k);
        }

        tracing::debug!(cluster = %config.cluster, %program_id, wallet = ?identity, "context ready");

        let session = Session::new(config.cluster.clone(), identity);
        let repo = EntryRepository::with_config(client, CliNotifier, &config);
        Ok(Self { config, session, keypair_path, repo })
    }
}

pub fn client_config(cli: &Cli) -> Result<ClientConfig> {
    let cluster: Cluster = cli.cluster.parse()?;
    let commitment = Commitment::parse(&cli.commitment)?;
    let program_id = cli
        .program_id
        .as_deref()
        .map(str::parse::<Address>)
        .transpose()?;

    let config = ClientConfig { cluster, program_id, commitment, ..ClientConfig::default() };
    validate_config(&config)?;
    Ok(config)
}

pub fn resolve_keypair_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(DEFAULT_KEYPAIR_PATH),
        None => PathBuf::from(DEFAULT_KEYPAIR_PATH),
    }
}

/// A missing keypair file means "no wallet connected", not an error.
pub fn load_wallet(path: &Path) -> Result<Option<Arc<Keypair>>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no keypair file; running disconnected");
        return Ok(None);
    }
    let kp = read_keypair_file(path)
        .map_err(|e| anyhow!("failed to read keypair {}: {e}", path.display()))?;
    Ok(Some(Arc::new(kp)))
}
