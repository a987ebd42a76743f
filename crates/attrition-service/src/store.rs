//! Match persistence.
//!
//! One match per deployment: the store holds a single match state plus a
//! single slot for the opponent bid pre-computed for the next round.
//!
//! - [`MemoryStore`]: process-local, lost on restart
//! - [`JsonFileStore`]: one JSON document on disk, replaced atomically

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use attrition_types::{AttritionError, BidSuggestion, MatchConfig, MatchState, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Persistence contract for the single hosted match.
pub trait MatchStore: Send + Sync {
    /// The current match; a fresh one is created and saved when empty.
    fn load(&self) -> impl Future<Output = Result<MatchState>> + Send;

    fn save(&self, state: &MatchState) -> impl Future<Output = Result<()>> + Send;

    /// The opponent bid pre-computed for the next round, if any.
    fn pending(&self) -> impl Future<Output = Result<Option<BidSuggestion>>> + Send;

    fn set_pending(
        &self,
        pending: Option<BidSuggestion>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Persist `state` together with the opponent bid pre-computed for its
    /// next round, as a single write. Either both land or neither does.
    fn commit(
        &self,
        state: &MatchState,
        pending: Option<BidSuggestion>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Replace the match with a fresh one and clear the pending bid.
    fn reset(&self) -> impl Future<Output = Result<MatchState>> + Send;
}

/// Everything a store persists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Slots {
    state: Option<MatchState>,
    pending: Option<BidSuggestion>,
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store.
pub struct MemoryStore {
    config: MatchConfig,
    slots: Mutex<Slots>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            slots: Mutex::new(Slots::default()),
        }
    }
}

impl MatchStore for MemoryStore {
    async fn load(&self) -> Result<MatchState> {
        let mut slots = self.slots.lock().await;
        Ok(slots
            .state
            .get_or_insert_with(|| MatchState::new(&self.config))
            .clone())
    }

    async fn save(&self, state: &MatchState) -> Result<()> {
        self.slots.lock().await.state = Some(state.clone());
        Ok(())
    }

    async fn pending(&self) -> Result<Option<BidSuggestion>> {
        Ok(self.slots.lock().await.pending.clone())
    }

    async fn set_pending(&self, pending: Option<BidSuggestion>) -> Result<()> {
        self.slots.lock().await.pending = pending;
        Ok(())
    }

    async fn commit(&self, state: &MatchState, pending: Option<BidSuggestion>) -> Result<()> {
        *self.slots.lock().await = Slots {
            state: Some(state.clone()),
            pending,
        };
        Ok(())
    }

    async fn reset(&self) -> Result<MatchState> {
        let fresh = MatchState::new(&self.config);
        let mut slots = self.slots.lock().await;
        slots.state = Some(fresh.clone());
        slots.pending = None;
        Ok(fresh)
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Store backed by a single JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target,
/// so a crash mid-write leaves the previous document intact.
pub struct JsonFileStore {
    config: MatchConfig,
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(config: MatchConfig, path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Slots> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| AttritionError::Storage {
                reason: format!("corrupt store {}: {err}", self.path.display()),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Slots::default()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, slots: &Slots) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(slots)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

impl MatchStore for JsonFileStore {
    async fn load(&self) -> Result<MatchState> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read().await?;
        if let Some(state) = slots.state {
            return Ok(state);
        }
        let fresh = MatchState::new(&self.config);
        slots.state = Some(fresh.clone());
        self.write(&slots).await?;
        tracing::info!(path = %self.path.display(), "Created new match");
        Ok(fresh)
    }

    async fn save(&self, state: &MatchState) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read().await?;
        slots.state = Some(state.clone());
        self.write(&slots).await
    }

    async fn pending(&self) -> Result<Option<BidSuggestion>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.pending)
    }

    async fn set_pending(&self, pending: Option<BidSuggestion>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read().await?;
        slots.pending = pending;
        self.write(&slots).await
    }

    async fn commit(&self, state: &MatchState, pending: Option<BidSuggestion>) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write(&Slots {
            state: Some(state.clone()),
            pending,
        })
        .await
    }

    async fn reset(&self) -> Result<MatchState> {
        let _guard = self.lock.lock().await;
        let fresh = MatchState::new(&self.config);
        self.write(&Slots {
            state: Some(fresh.clone()),
            pending: None,
        })
        .await?;
        Ok(fresh)
    }
}
