//! The sidebar adapter: keeps a row list in sync with the store.
//!
//! Rows carry the same accessibility hint and label the rendered list
//! exposes, so callers can inspect the sidebar the way a screen reader
//! would.

use crate::config::SidebarConfig;
use crate::hydrate;
use crate::keys;
use crate::store::{KeyValueStore, ObserverId, StoreChange, StoreObserver};
use lhncore::types::ConversationId;
use log::{debug, info};
use std::sync::{Arc, OnceLock, RwLock};
use tokio::sync::broadcast;

pub const ROW_A11Y_HINT: &str = "Navigates to a chat";
pub const DISPLAY_NAMES_A11Y_LABEL: &str = "Chat user display names";

// The size of the broadcast channel buffer.
const CHANNEL_CAPACITY: usize = 16;

pub type Rows = Arc<Vec<SidebarRow>>;

/// One listed conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub conversation_id: ConversationId,
    pub display_names: String,
    pub is_pinned: bool,
    pub is_unread: bool,
    pub has_draft: bool,
    pub a11y_hint: &'static str,
    pub a11y_label: &'static str,
}

pub struct Sidebar {
    config: SidebarConfig,
    rows: RwLock<Rows>,
    updates: broadcast::Sender<Rows>,
    subscription: OnceLock<ObserverId>,
}

impl Sidebar {
    /// Build the sidebar from the current store contents and keep it updated.
    pub fn attach(store: &KeyValueStore, config: SidebarConfig) -> Arc<Self> {
        let sidebar = Arc::new(Self {
            config,
            rows: RwLock::new(Arc::new(Vec::new())),
            updates: broadcast::channel(CHANNEL_CAPACITY).0,
            subscription: OnceLock::new(),
        });
        sidebar.recompute(store);
        let id = store.subscribe(sidebar.clone());
        // Freshly built, so the cell is empty.
        let _ = sidebar.subscription.set(id);
        info!("Sidebar attached with {} row(s)", sidebar.rows().len());
        sidebar
    }

    /// Stop following `store`. The rows keep their last value.
    pub fn detach(&self, store: &KeyValueStore) -> bool {
        match self.subscription.get() {
            Some(id) => {
                let detached = store.unsubscribe(*id);
                if detached {
                    info!("Sidebar detached");
                }
                detached
            }
            None => false,
        }
    }

    pub fn rows(&self) -> Rows {
        self.rows
            .read()
            .expect("RwLock should not be poisoned")
            .clone()
    }

    /// Receive the full row list after every recomputation.
    pub fn subscribe(&self) -> broadcast::Receiver<Rows> {
        self.updates.subscribe()
    }

    pub fn query_all_by_a11y_hint(&self, hint: &str) -> Vec<SidebarRow> {
        self.query(|row| row.a11y_hint == hint)
    }

    pub fn query_all_by_a11y_label(&self, label: &str) -> Vec<SidebarRow> {
        self.query(|row| row.a11y_label == label)
    }

    /// Rows whose display names contain `text`.
    pub fn query_all_by_text(&self, text: &str) -> Vec<SidebarRow> {
        self.query(|row| row.display_names.contains(text))
    }

    fn query(&self, predicate: impl Fn(&SidebarRow) -> bool) -> Vec<SidebarRow> {
        self.rows()
            .iter()
            .filter(|row| predicate(*row))
            .cloned()
            .collect()
    }

    fn recompute(&self, store: &KeyValueStore) {
        let hydration = hydrate::hydrate(store, &self.config);
        let snapshot = &hydration.snapshot;

        let limit = match self.config.max_rows {
            0 => usize::MAX,
            n => n,
        };
        let rows: Vec<SidebarRow> = snapshot
            .visible()
            .into_iter()
            .take(limit)
            .map(|conversation| SidebarRow {
                conversation_id: conversation.id.clone(),
                display_names: snapshot.display_names(conversation),
                is_pinned: conversation.is_pinned,
                is_unread: conversation.is_unread(),
                has_draft: conversation.has_unsaved_draft,
                a11y_hint: ROW_A11Y_HINT,
                a11y_label: DISPLAY_NAMES_A11Y_LABEL,
            })
            .collect();

        debug!(
            "Sidebar recomputed: {} row(s), {} skipped record(s)",
            rows.len(),
            hydration.errors.len()
        );

        let rows = Arc::new(rows);
        *self.rows.write().expect("RwLock should not be poisoned") = rows.clone();
        // No receivers is fine; the latest rows are always readable via `rows()`.
        let _ = self.updates.send(rows);
    }
}

impl StoreObserver for Sidebar {
    fn on_change(&self, store: &KeyValueStore, change: &StoreChange) {
        if change.touches(keys::affects_sidebar) {
            self.recompute(store);
        }
    }
}
