use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

use shared::protocol::LinkRecord;
use tokio::sync::broadcast;
use tracing::{error, info};

use crate::{
    api::LinkApi,
    notification::{Notification, NotificationChannel},
    ClientEvent,
};

pub const LOAD_FAILED_TEXT: &str = "Failed to load links";

/// The server's link set in server order. Never reordered or patched locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    records: Vec<LinkRecord>,
}

impl DirectorySnapshot {
    pub fn new(records: Vec<LinkRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, code: &str) -> Option<&LinkRecord> {
        self.records.iter().find(|record| record.code == code)
    }
}

/// Mirror of the remote directory. Every refresh swaps the whole snapshot;
/// when two refreshes race, whichever resolves last is what stays visible.
pub struct DirectoryStore {
    snapshot: RwLock<Arc<DirectorySnapshot>>,
    refreshes: AtomicU64,
    events: broadcast::Sender<ClientEvent>,
}

impl DirectoryStore {
    pub(crate) fn new(events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(DirectorySnapshot::default())),
            refreshes: AtomicU64::new(0),
            events,
        }
    }

    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        let current = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Number of refreshes started since construction.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Fetches the full directory and replaces the held snapshot. On failure
    /// the previous snapshot stays and an error notification is raised.
    pub(crate) async fn refresh(
        &self,
        api: &dyn LinkApi,
        notifications: &NotificationChannel,
    ) -> bool {
        self.refreshes.fetch_add(1, Ordering::SeqCst);

        match api.list_links().await {
            Ok(records) => {
                let next = Arc::new(DirectorySnapshot::new(records));
                {
                    let mut current = self
                        .snapshot
                        .write()
                        .unwrap_or_else(PoisonError::into_inner);
                    *current = Arc::clone(&next);
                }
                info!(links = next.len(), "links: directory refreshed");
                let _ = self.events.send(ClientEvent::DirectoryRefreshed(next));
                true
            }
            Err(err) => {
                error!("links: failed to load directory: {err}");
                notifications.set(Notification::error(LOAD_FAILED_TEXT));
                false
            }
        }
    }
}
