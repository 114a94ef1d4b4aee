//! List item type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user-visible entry inside a category collection.
///
/// Identity is the `id`; the text is freely editable. Items are created on
/// add with a freshly generated id and are never shared across categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Unique item identifier (UUID format)
    pub id: String,
    /// The item text
    pub text: String,
}

impl ListItem {
    /// Creates a new item with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
        }
    }
}
