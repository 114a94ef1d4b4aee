//! Application layer: use-cases composing the domain model with the AI
//! collaborator and the session store.
//!
//! Wire-up for a real deployment:
//!
//! ```no_run
//! use kfdb_application::SessionEngine;
//! use kfdb_infrastructure::TomlSessionStore;
//! use kfdb_interaction::GeminiSuggestionService;
//! use std::sync::Arc;
//!
//! # async fn wire_up() -> anyhow::Result<()> {
//! let service = Arc::new(GeminiSuggestionService::try_from_env()?);
//! let store = Arc::new(TomlSessionStore::default_location()?);
//! let mut engine = SessionEngine::new(service, store);
//! engine.restore().await;
//! # Ok(())
//! # }
//! ```

pub mod session_engine;

pub use session_engine::{AiActivity, SessionEngine};
