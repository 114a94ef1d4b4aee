//! Ordered item collection for a single category.
//!
//! All operations are pure: collection in, collection out. Invalid input
//! (missing id, empty edit text, out-of-range move index) returns the input
//! collection unchanged rather than panicking or erroring — reorder gestures
//! and edits must never crash or visibly fail.

use super::item::ListItem;
use serde::{Deserialize, Serialize};

/// An ordered sequence of items belonging to one category.
///
/// Order is meaningful and is the only ranking signal: insertion order
/// defines display and export order. Ids are unique within a collection
/// (items are only ever created with fresh UUIDs).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCollection {
    items: Vec<ListItem>,
}

impl CategoryCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from existing items, preserving their order.
    pub fn from_items(items: Vec<ListItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns a new collection with `item` appended at the end.
    pub fn append(&self, item: ListItem) -> Self {
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Returns a new collection without the item matching `id`.
    /// No-op if the id is absent.
    pub fn remove(&self, id: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Removes the element at `from` and reinserts it at `to`.
    ///
    /// If either index is outside `[0, len)` the move is rejected and the
    /// collection is returned unchanged. This guards against off-by-one
    /// drift from drag gestures and up/down presses at the first or last
    /// position.
    pub fn move_item(&self, from: usize, to: usize) -> Self {
        if from >= self.items.len() || to >= self.items.len() {
            return self.clone();
        }
        let mut items = self.items.clone();
        let item = items.remove(from);
        items.insert(to, item);
        Self { items }
    }

    /// Returns a new collection with the matching item's text replaced.
    ///
    /// No-op if the id is absent or `new_text` is empty after trimming:
    /// empty edits are silently discarded, preserving the previous text.
    pub fn edit(&self, id: &str, new_text: &str) -> Self {
        if new_text.trim().is_empty() {
            return self.clone();
        }
        Self {
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == id {
                        ListItem {
                            id: item.id.clone(),
                            text: new_text.to_string(),
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }
}
