//! Session domain module.
//!
//! This module contains the session-state model, the assistant transcript
//! with its suggestion queue, and the persistence trait seam.
//!
//! # Module Structure
//!
//! - `item`: the single list entry (`ListItem`)
//! - `collection`: ordered per-category item sequence (`CategoryCollection`)
//! - `state`: the aggregate session value (`SessionState`, `CategorySet`)
//! - `message`: conversation types (`MessageRole`, `AssistantMessage`,
//!   `Suggestion`)
//! - `transcript`: the append-only message log (`Transcript`)
//! - `store`: persistence trait (`SessionStore`)

mod collection;
mod item;
mod message;
mod state;
mod store;
mod transcript;

// Re-export public API
pub use collection::CategoryCollection;
pub use item::ListItem;
pub use message::{AssistantMessage, MessageRole, Suggestion, LOADING_MESSAGE_ID};
pub use state::{CategorySet, SessionState};
pub use store::SessionStore;
pub use transcript::{Transcript, WELCOME_MESSAGE};
