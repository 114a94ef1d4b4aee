//! Session store trait.
//!
//! Defines the interface for session persistence operations.

use super::state::SessionState;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract store for the single working session.
///
/// This trait decouples the engine from the storage mechanism (a local file,
/// browser storage, a remote document store). Implementations must
/// round-trip the session exactly — topic, title and all four collections'
/// ids, texts and order — though they may attach their own timestamp.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists the session, replacing whatever was stored before.
    async fn save(&self, state: &SessionState) -> Result<()>;

    /// Loads the stored session.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<SessionState>>;

    /// Removes the stored session. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}
