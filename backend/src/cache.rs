//! In-memory cache of the forms served by the remote API.
//!
//! The cache holds one snapshot at a time. Filters and aggregates run against
//! that snapshot; nothing here re-fetches implicitly. Network calls happen
//! without holding the state lock and each mutation applies under a single
//! short write lock.

use crate::error::FormsError;
use crate::remote::FormsApi;
use crate::session::TokenSupplier;
use common::model::form::{FormPatch, FormRecord};
use common::model::sort::SortOrder;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Result of a `load` that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The snapshot was replaced; carries the new record count.
    Applied(usize),
    /// A newer load was applied first, this response was discarded.
    Superseded,
}

struct CacheState {
    snapshot: Arc<Vec<FormRecord>>,
    /// Ticket of the last load whose response was applied.
    applied_ticket: u64,
}

pub struct FormsCache {
    api: Arc<dyn FormsApi>,
    tokens: Arc<dyn TokenSupplier>,
    next_ticket: AtomicU64,
    state: RwLock<CacheState>,
}

impl FormsCache {
    pub fn new(api: Arc<dyn FormsApi>, tokens: Arc<dyn TokenSupplier>) -> Self {
        Self {
            api,
            tokens,
            next_ticket: AtomicU64::new(0),
            state: RwLock::new(CacheState {
                snapshot: Arc::new(Vec::new()),
                applied_ticket: 0,
            }),
        }
    }

    fn token(&self) -> Result<String, FormsError> {
        self.tokens.bearer_token().ok_or(FormsError::AuthExpired)
    }

    /// Fetches the full set in `order` and replaces the snapshot.
    ///
    /// A 401 leaves the snapshot as it was; any other failure clears it.
    /// Responses that arrive after a newer load was applied are dropped.
    pub async fn load(&self, order: SortOrder) -> Result<LoadOutcome, FormsError> {
        let token = self.token()?;
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.api.list(&token, order).await;

        let mut state = self.state.write().await;
        if ticket < state.applied_ticket {
            log::debug!(
                "discarding load #{} ({}), #{} already applied",
                ticket,
                order.as_query(),
                state.applied_ticket
            );
            return Ok(LoadOutcome::Superseded);
        }
        state.applied_ticket = ticket;

        match result {
            Ok(records) => {
                let records = dedup_by_id(records);
                let count = records.len();
                state.snapshot = Arc::new(records);
                log::info!("loaded {} forms ({})", count, order.as_query());
                Ok(LoadOutcome::Applied(count))
            }
            Err(FormsError::AuthExpired) => {
                log::warn!("forms load rejected: session expired");
                Err(FormsError::AuthExpired)
            }
            Err(e) => {
                log::error!("forms load failed, clearing snapshot: {}", e);
                state.snapshot = Arc::new(Vec::new());
                Err(e)
            }
        }
    }

    pub async fn get_all(&self) -> Arc<Vec<FormRecord>> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<FormRecord, FormsError> {
        self.state
            .read()
            .await
            .snapshot
            .iter()
            .find(|form| form.id == id)
            .cloned()
            .ok_or_else(|| FormsError::NotFound(id.to_string()))
    }

    /// Fetches one record straight from the API. The snapshot is not touched.
    pub async fn fetch(&self, id: &str) -> Result<FormRecord, FormsError> {
        let token = self.token()?;
        self.api.fetch(&token, id).await
    }

    /// Sends `patch` for a cached record and stores the server's version.
    pub async fn update(&self, id: &str, patch: FormPatch) -> Result<FormRecord, FormsError> {
        self.get_by_id(id).await?;
        let patch = patch.normalized().map_err(FormsError::Invalid)?;
        let token = self.token()?;

        let updated = self.api.update(&token, id, &patch).await?;

        let mut state = self.state.write().await;
        let snapshot = Arc::make_mut(&mut state.snapshot);
        match snapshot.iter_mut().find(|form| form.id == id) {
            Some(slot) => *slot = updated.clone(),
            None => log::warn!("form {} left the snapshot during its update", id),
        }
        log::info!("updated form {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), FormsError> {
        let token = self.token()?;
        self.api.delete(&token, id).await?;

        let mut state = self.state.write().await;
        Arc::make_mut(&mut state.snapshot).retain(|form| form.id != id);
        log::info!("deleted form {}", id);
        Ok(())
    }
}

/// Keeps the first position of each id with the value of its last duplicate.
fn dedup_by_id(records: Vec<FormRecord>) -> Vec<FormRecord> {
    let mut positions: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<FormRecord> = Vec::with_capacity(records.len());
    for record in records {
        match positions.get(&record.id) {
            Some(&index) => unique[index] = record,
            None => {
                positions.insert(record.id.clone(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
