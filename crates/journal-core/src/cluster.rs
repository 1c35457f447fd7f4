//! Cluster selection.
//!
//! A `Cluster` names the network a session talks to and the RPC endpoint used
//! to reach it. Its cache key is one dimension of every query cache key, so
//! switching clusters never serves entries fetched from another network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{JournalError, JournalResult};

pub const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";
pub const TESTNET_URL: &str = "https://api.testnet.solana.com";
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
pub const LOCALNET_URL: &str = "http://localhost:8899";

const EXPLORER_BASE: &str = "https://explorer.solana.com";

/// Known network kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterNetwork {
    MainnetBeta,
    Testnet,
    Devnet,
    Localnet,
    Custom,
}

impl ClusterNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
            Self::Localnet => "localnet",
            Self::Custom => "custom",
        }
    }
}

/// A network plus the endpoint used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub network: ClusterNetwork,
    endpoint: String,
}

impl Cluster {
    pub fn devnet() -> Self {
        Self::known(ClusterNetwork::Devnet, DEVNET_URL)
    }

    pub fn testnet() -> Self {
        Self::known(ClusterNetwork::Testnet, TESTNET_URL)
    }

    pub fn mainnet() -> Self {
        Self::known(ClusterNetwork::MainnetBeta, MAINNET_URL)
    }

    pub fn localnet() -> Self {
        Self::known(ClusterNetwork::Localnet, LOCALNET_URL)
    }

    /// A custom endpoint. Localhost URLs are classified as localnet.
    pub fn custom(endpoint: &str) -> JournalResult<Self> {
        let url = Url::parse(endpoint)
            .map_err(|e| JournalError::config(format!("invalid cluster url `{endpoint}`: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(JournalError::config(format!(
                "cluster url must be http or https: {endpoint}"
            )));
        }
        let network = match url.host_str() {
            Some("localhost") | Some("127.0.0.1") => ClusterNetwork::Localnet,
            _ => ClusterNetwork::Custom,
        };
        Ok(Self { network, endpoint: endpoint.trim_end_matches('/').to_string() })
    }

    fn known(network: ClusterNetwork, url: &str) -> Self {
        Self { network, endpoint: url.to_string() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Cache-key dimension. Custom endpoints are keyed by URL.
    pub fn cache_key(&self) -> String {
        match self.network {
            ClusterNetwork::Custom => format!("custom:{}", self.endpoint),
            n => n.as_str().to_string(),
        }
    }

    /// Explorer link for a transaction signature on this cluster.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        let suffix = match self.network {
            ClusterNetwork::MainnetBeta => String::new(),
            ClusterNetwork::Testnet => "?cluster=testnet".to_string(),
            ClusterNetwork::Devnet => "?cluster=devnet".to_string(),
            ClusterNetwork::Localnet | ClusterNetwork::Custom => {
                format!("?cluster=custom&customUrl={}", self.endpoint)
            }
        };
        format!("{EXPLORER_BASE}/tx/{signature}{suffix}")
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self::devnet()
    }
}

impl FromStr for Cluster {
    type Err = JournalError;

    /// Accepts a moniker (`devnet`, `testnet`, `mainnet-beta`, `localnet`,
    /// and the short forms `d`, `t`, `m`, `l`) or an http(s) URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" | "d" => Ok(Self::devnet()),
            "testnet" | "t" => Ok(Self::testnet()),
            "mainnet-beta" | "mainnet" | "m" => Ok(Self::mainnet()),
            "localnet" | "localhost" | "l" => Ok(Self::localnet()),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Self::custom(s.trim())
            }
            other => Err(JournalError::config(format!("unknown cluster: {other}"))),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.network {
            ClusterNetwork::Custom => write!(f, "{}", self.endpoint),
            n => f.write_str(n.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_monikers() {
        assert_eq!("devnet".parse::<Cluster>().unwrap().network, ClusterNetwork::Devnet);
        assert_eq!("m".parse::<Cluster>().unwrap().network, ClusterNetwork::MainnetBeta);
        assert_eq!("localhost".parse::<Cluster>().unwrap().endpoint(), "http://localhost:8899");
        assert!("moonnet".parse::<Cluster>().is_err());
    }

    #[test]
    fn parse_custom_url() {
        let c: Cluster = "https://rpc.example.org".parse().unwrap();
        assert_eq!(c.network, ClusterNetwork::Custom);
        assert_eq!(c.cache_key(), "custom:https://rpc.example.org");

        let l: Cluster = "http://127.0.0.1:8899".parse().unwrap();
        assert_eq!(l.network, ClusterNetwork::Localnet);
    }

    #[test]
    fn explorer_links() {
        assert_eq!(
            Cluster::devnet().explorer_tx_url("abc"),
            "https://explorer.solana.com/tx/abc?cluster=devnet"
        );
        assert_eq!(Cluster::mainnet().explorer_tx_url("abc"), "https://explorer.solana.com/tx/abc");
        assert!(Cluster::localnet()
            .explorer_tx_url("abc")
            .ends_with("customUrl=http://localhost:8899"));
    }

    #[test]
    fn cache_keys_differ_per_network() {
        assert_ne!(Cluster::devnet().cache_key(), Cluster::testnet().cache_key());
    }
}
