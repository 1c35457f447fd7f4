//! User notifications.
//!
//! Writes report their outcome through a `Notifier` rather than by failing
//! the caller: a success carries the explorer link for the signature, a
//! failure carries a human-readable message.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cluster::Cluster;
use crate::model::TxSignature;

pub trait Notifier: Send + Sync {
    fn transaction_sent(&self, cluster: &Cluster, signature: &TxSignature);

    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn transaction_sent(&self, cluster: &Cluster, signature: &TxSignature) {
        (**self).transaction_sent(cluster, signature)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Transaction { signature: TxSignature, explorer_url: String },
    Error(String),
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    items: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.items.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.items
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Error(m) => Some(m.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn transaction_sent(&self, cluster: &Cluster, signature: &TxSignature) {
        self.items.lock().push(Notification::Transaction {
            signature: signature.clone(),
            explorer_url: cluster.explorer_tx_url(signature.as_str()),
        });
    }

    fn error(&self, message: &str) {
        self.items.lock().push(Notification::Error(message.to_string()));
    }
}
