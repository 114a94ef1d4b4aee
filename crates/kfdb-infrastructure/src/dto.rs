//! Persistence DTOs.
//!
//! The stored format is decoupled from the domain model so the file layout
//! can evolve independently. V1 is the only version so far; it attaches a
//! save timestamp the domain model does not carry.

use chrono::Utc;
use kfdb_core::session::{CategoryCollection, CategorySet, ListItem, SessionState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredItemV1 {
    pub id: String,
    pub text: String,
}

/// Stored session file format, version 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSessionV1 {
    pub topic: String,
    pub session_title: String,
    #[serde(default)]
    pub know: Vec<StoredItemV1>,
    #[serde(default)]
    pub feel: Vec<StoredItemV1>,
    #[serde(default, rename = "do")]
    pub do_: Vec<StoredItemV1>,
    #[serde(default)]
    pub be: Vec<StoredItemV1>,
    /// When the session was last saved (RFC 3339)
    pub saved_at: String,
}

fn to_stored(collection: &CategoryCollection) -> Vec<StoredItemV1> {
    collection
        .items()
        .iter()
        .map(|item| StoredItemV1 {
            id: item.id.clone(),
            text: item.text.clone(),
        })
        .collect()
}

fn to_collection(items: Vec<StoredItemV1>) -> Arc<CategoryCollection> {
    Arc::new(CategoryCollection::from_items(
        items
            .into_iter()
            .map(|item| ListItem {
                id: item.id,
                text: item.text,
            })
            .collect(),
    ))
}

impl From<&SessionState> for StoredSessionV1 {
    fn from(state: &SessionState) -> Self {
        Self {
            topic: state.topic.clone(),
            session_title: state.title.clone(),
            know: to_stored(&state.categories.know),
            feel: to_stored(&state.categories.feel),
            do_: to_stored(&state.categories.do_),
            be: to_stored(&state.categories.be),
            saved_at: Utc::now().to_rfc3339(),
        }
    }
}

impl StoredSessionV1 {
    /// Converts the DTO back into the domain model, preserving ids and order.
    pub fn into_domain(self) -> SessionState {
        SessionState {
            topic: self.topic,
            title: self.session_title,
            categories: CategorySet {
                know: to_collection(self.know),
                feel: to_collection(self.feel),
                do_: to_collection(self.do_),
                be: to_collection(self.be),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kfdb_core::category::Category;

    #[test]
    fn test_round_trip_preserves_ids_and_order() {
        let state = SessionState::new()
            .set_topic("Q3 Leadership Summit")
            .set_title("Leadership Reset")
            .add_item(Category::Know, "Budgeting basics")
            .add_item(Category::Know, "Hiring pipeline")
            .add_item(Category::Do, "Run a retro");

        let dto = StoredSessionV1::from(&state);
        let restored = dto.into_domain();

        assert_eq!(restored, state);
    }
}
