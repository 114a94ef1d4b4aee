//! Session state: the single source of truth for one working session.
//!
//! `SessionState` is an immutable value: every mutation takes the current
//! state and returns a new one. The four collections are held behind `Arc`
//! so collections untouched by a mutation are reused by reference, which
//! makes "has anything changed" checks cheap (`Arc::ptr_eq`) and guarantees
//! a concurrent reader never observes a partially updated collection.

use super::collection::CategoryCollection;
use super::item::ListItem;
use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Exactly one collection per category — never absent, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet {
    pub know: Arc<CategoryCollection>,
    pub feel: Arc<CategoryCollection>,
    #[serde(rename = "do")]
    pub do_: Arc<CategoryCollection>,
    pub be: Arc<CategoryCollection>,
}

impl CategorySet {
    pub fn get(&self, category: Category) -> &Arc<CategoryCollection> {
        match category {
            Category::Know => &self.know,
            Category::Feel => &self.feel,
            Category::Do => &self.do_,
            Category::Be => &self.be,
        }
    }

    /// Returns a new set with one collection replaced; the other three are
    /// shared with `self`.
    fn with_replaced(&self, category: Category, collection: CategoryCollection) -> Self {
        let mut next = self.clone();
        let slot = match category {
            Category::Know => &mut next.know,
            Category::Feel => &mut next.feel,
            Category::Do => &mut next.do_,
            Category::Be => &mut next.be,
        };
        *slot = Arc::new(collection);
        next
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// The complete serializable snapshot of one working session.
///
/// `topic` is user-supplied and drives every AI request; `title` is
/// AI-derived or user-edited.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub topic: String,
    pub title: String,
    pub categories: CategorySet,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self, category: Category) -> &CategoryCollection {
        self.categories.get(category)
    }

    /// True when the session carries nothing worth persisting.
    pub fn is_blank(&self) -> bool {
        self.topic.trim().is_empty() && self.title.trim().is_empty() && self.categories.is_empty()
    }

    /// Appends a new item with a freshly generated id.
    ///
    /// Rejected (state returned unchanged) if `text` trims empty.
    pub fn add_item(&self, category: Category, text: &str) -> Self {
        if text.trim().is_empty() {
            return self.clone();
        }
        let next = self.collection(category).append(ListItem::new(text));
        self.with_collection(category, next)
    }

    /// Removes the item with the matching id; no-op if absent.
    pub fn delete_item(&self, category: Category, id: &str) -> Self {
        let next = self.collection(category).remove(id);
        self.with_collection(category, next)
    }

    /// Replaces the matching item's text; empty edits are discarded.
    pub fn edit_item(&self, category: Category, id: &str, new_text: &str) -> Self {
        let next = self.collection(category).edit(id, new_text);
        self.with_collection(category, next)
    }

    /// Reorders one collection. Bounds violations are swallowed, not
    /// surfaced: reorder gestures must never crash or visibly error.
    pub fn move_item(&self, category: Category, from: usize, to: usize) -> Self {
        let next = self.collection(category).move_item(from, to);
        self.with_collection(category, next)
    }

    pub fn set_topic(&self, topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            title: self.title.clone(),
            categories: self.categories.clone(),
        }
    }

    pub fn set_title(&self, title: impl Into<String>) -> Self {
        Self {
            topic: self.topic.clone(),
            title: title.into(),
            categories: self.categories.clone(),
        }
    }

    /// Atomically replaces all four collections and the title together, so a
    /// consumer never observes new items paired with a stale title. Used
    /// exactly once per successful AI bulk generation.
    pub fn replace_all(&self, title: impl Into<String>, categories: CategorySet) -> Self {
        Self {
            topic: self.topic.clone(),
            title: title.into(),
            categories,
        }
    }

    fn with_collection(&self, category: Category, collection: CategoryCollection) -> Self {
        Self {
            topic: self.topic.clone(),
            title: self.title.clone(),
            categories: self.categories.with_replaced(category, collection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_appends_with_fresh_id() {
        let state = SessionState::new().add_item(Category::Know, "Budgeting basics");
        let items = state.collection(Category::Know).items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Budgeting basics");
        assert!(!items[0].id.is_empty());
    }

    #[test]
    fn test_add_item_whitespace_only_is_rejected() {
        let state = SessionState::new();
        let after = state.add_item(Category::Do, "   ");
        assert_eq!(after.collection(Category::Do).len(), 0);
        assert_eq!(after, state);
    }

    #[test]
    fn test_untouched_collections_are_shared() {
        let state = SessionState::new()
            .add_item(Category::Know, "A")
            .add_item(Category::Do, "B");
        let after = state.add_item(Category::Know, "C");

        assert!(!Arc::ptr_eq(&state.categories.know, &after.categories.know));
        assert!(Arc::ptr_eq(&state.categories.do_, &after.categories.do_));
        assert!(Arc::ptr_eq(&state.categories.feel, &after.categories.feel));
        assert!(Arc::ptr_eq(&state.categories.be, &after.categories.be));
    }

    #[test]
    fn test_move_item_out_of_bounds_is_swallowed() {
        let state = SessionState::new()
            .add_item(Category::Be, "A")
            .add_item(Category::Be, "B");
        let after = state.move_item(Category::Be, 0, 5);
        assert_eq!(after, state);
    }

    #[test]
    fn test_replace_all_swaps_collections_and_title_together() {
        let state = SessionState::new()
            .set_topic("Q3 Leadership Summit")
            .add_item(Category::Know, "stale");

        let categories = CategorySet {
            know: Arc::new(CategoryCollection::from_items(vec![ListItem::new(
                "Budgeting basics",
            )])),
            ..CategorySet::default()
        };
        let after = state.replace_all("Leadership Reset", categories);

        assert_eq!(after.title, "Leadership Reset");
        assert_eq!(after.topic, "Q3 Leadership Summit");
        assert_eq!(after.collection(Category::Know).items()[0].text, "Budgeting basics");
        assert!(after.collection(Category::Feel).is_empty());
    }

    #[test]
    fn test_is_blank() {
        assert!(SessionState::new().is_blank());
        assert!(!SessionState::new().set_topic("x").is_blank());
        assert!(!SessionState::new().add_item(Category::Know, "a").is_blank());
    }

    #[test]
    fn test_edit_and_delete_round() {
        let state = SessionState::new().add_item(Category::Feel, "curious");
        let id = state.collection(Category::Feel).items()[0].id.clone();

        let edited = state.edit_item(Category::Feel, &id, "confident");
        assert_eq!(edited.collection(Category::Feel).items()[0].text, "confident");

        let deleted = edited.delete_item(Category::Feel, &id);
        assert!(deleted.collection(Category::Feel).is_empty());
    }
}
