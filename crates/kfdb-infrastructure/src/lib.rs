//! Persistence implementations for KFDB.

pub mod dto;
pub mod toml_session_store;

pub use toml_session_store::TomlSessionStore;
