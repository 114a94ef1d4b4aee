//! TOML-based SessionStore implementation

use crate::dto::StoredSessionV1;
use async_trait::async_trait;
use kfdb_core::error::{KfdbError, Result};
use kfdb_core::session::{SessionState, SessionStore};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.toml";

/// A store implementation that keeps the working session in a single TOML
/// file.
///
/// - Uses the `StoredSessionV1` DTO for persistence
/// - Converts between DTO and domain model on every read/write
/// - Creates the base directory on construction
pub struct TomlSessionStore {
    base_dir: PathBuf,
}

impl TomlSessionStore {
    /// Creates a new `TomlSessionStore` rooted at the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .map_err(|e| KfdbError::io(format!("failed to create session directory: {}", e)))?;
        Ok(Self { base_dir })
    }

    /// Creates a `TomlSessionStore` at the default location (`~/.kfdb`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or the
    /// directory cannot be created.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| KfdbError::io("failed to get home directory"))?;
        Self::new(home_dir.join(".kfdb"))
    }

    fn session_file_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn save(&self, state: &SessionState) -> Result<()> {
        let dto = StoredSessionV1::from(state);
        let toml_content = toml::to_string_pretty(&dto)?;

        let file_path = self.session_file_path();
        fs::write(&file_path, toml_content)
            .map_err(|e| KfdbError::io(format!("failed to write {:?}: {}", file_path, e)))?;

        Ok(())
    }

    async fn load(&self) -> Result<Option<SessionState>> {
        let file_path = self.session_file_path();
        if !file_path.exists() {
            return Ok(None);
        }

        let toml_content = fs::read_to_string(&file_path)
            .map_err(|e| KfdbError::io(format!("failed to read {:?}: {}", file_path, e)))?;

        let dto: StoredSessionV1 = toml::from_str(&toml_content)?;
        Ok(Some(dto.into_domain()))
    }

    async fn clear(&self) -> Result<()> {
        let file_path = self.session_file_path();
        if file_path.exists() {
            fs::remove_file(&file_path)
                .map_err(|e| KfdbError::io(format!("failed to delete {:?}: {}", file_path, e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfdb_core::category::Category;
    use tempfile::TempDir;

    fn sample_state() -> SessionState {
        SessionState::new()
            .set_topic("Q3 Leadership Summit")
            .set_title("Leadership Reset")
            .add_item(Category::Know, "Budgeting basics")
            .add_item(Category::Feel, "confident")
            .add_item(Category::Do, "Run a retro")
            .add_item(Category::Do, "Pair on reviews")
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path()).unwrap();

        let state = sample_state();
        store.save(&state).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_load_without_save_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path()).unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path()).unwrap();

        store.save(&sample_state()).await.unwrap();

        let replacement = SessionState::new().set_topic("New hire onboarding");
        store.save(&replacement).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, replacement);
    }

    #[tokio::test]
    async fn test_clear_removes_stored_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path()).unwrap();

        store.save(&sample_state()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlSessionStore::new(temp_dir.path()).unwrap();

        store.clear().await.unwrap();
    }
}
