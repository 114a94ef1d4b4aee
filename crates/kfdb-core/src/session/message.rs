//! Assistant conversation message types.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reserved id of the transient "thinking" placeholder message. It is the
/// only message ever removed wholesale from the transcript.
pub const LOADING_MESSAGE_ID: &str = "loading";

/// Represents the role of a message in the assistant conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
    /// System-generated message (welcome text, errors, hints).
    System,
}

/// An AI-proposed candidate item awaiting user acceptance.
///
/// A suggestion lives attached to exactly one assistant message and is
/// consumed exactly once: accepting it removes it from the message's pending
/// set and appends an equivalent item to the matching category collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Unique suggestion identifier (UUID format)
    pub id: String,
    /// The proposed item text
    pub text: String,
    /// The category the resulting item belongs to
    pub category: Category,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            category,
        }
    }
}

/// A single message in the assistant panel conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Pending suggestions carried by this message, if any
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    /// The category all of this message's suggestions were requested for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_category: Option<Category>,
}

impl AssistantMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(MessageRole::System, content)
    }

    /// The transient placeholder shown while an AI call is outstanding.
    pub fn loading() -> Self {
        Self {
            id: LOADING_MESSAGE_ID.to_string(),
            role: MessageRole::System,
            content: "Thinking...".to_string(),
            suggestions: Vec::new(),
            suggestion_category: None,
        }
    }

    /// An assistant message carrying pending suggestions for one category.
    pub fn with_suggestions(
        content: impl Into<String>,
        category: Category,
        suggestions: Vec<Suggestion>,
    ) -> Self {
        Self {
            suggestions,
            suggestion_category: Some(category),
            ..Self::assistant(content)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.id == LOADING_MESSAGE_ID
    }

    fn with_role(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            suggestions: Vec::new(),
            suggestion_category: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_message_has_reserved_id() {
        let msg = AssistantMessage::loading();
        assert!(msg.is_loading());
        assert_eq!(msg.role, MessageRole::System);
    }

    #[test]
    fn test_with_suggestions_tags_category() {
        let suggestions = vec![
            Suggestion::new("Run a retro", Category::Do),
            Suggestion::new("Pair on reviews", Category::Do),
        ];
        let msg =
            AssistantMessage::with_suggestions("Here are more ideas", Category::Do, suggestions);
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.suggestion_category, Some(Category::Do));
        assert_eq!(msg.suggestions.len(), 2);
    }
}
