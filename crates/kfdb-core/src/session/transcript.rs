//! The assistant conversation transcript and its suggestion queue.

use super::message::{AssistantMessage, Suggestion};

/// Welcome text the transcript opens with after startup or a reset.
pub const WELCOME_MESSAGE: &str = "Welcome! Define a topic and I can help generate ideas for \
     what your audience should Know, Feel, Do, and Be.";

/// Append-only log of assistant conversation messages.
///
/// The only structural mutations besides appending are removing the
/// transient loading placeholder (replaced by the real response) and
/// consuming a pending suggestion from one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<AssistantMessage>,
}

impl Transcript {
    /// Creates a transcript seeded with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![AssistantMessage::system(WELCOME_MESSAGE)],
        }
    }

    pub fn messages(&self) -> &[AssistantMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: AssistantMessage) {
        self.messages.push(message);
    }

    /// Drops every loading placeholder from the log.
    pub fn remove_loading(&mut self) {
        self.messages.retain(|m| !m.is_loading());
    }

    /// Removes the loading placeholder and appends `message` in its stead.
    pub fn replace_loading(&mut self, message: AssistantMessage) {
        self.remove_loading();
        self.push(message);
    }

    pub fn has_loading(&self) -> bool {
        self.messages.iter().any(|m| m.is_loading())
    }

    /// Consumes a pending suggestion: locates it within the named message,
    /// removes it from that message's pending sequence and returns it.
    ///
    /// Removal and return happen in one step, which makes acceptance
    /// idempotent — a repeated call finds nothing and returns `None`.
    pub fn accept_suggestion(
        &mut self,
        message_id: &str,
        suggestion_id: &str,
    ) -> Option<Suggestion> {
        let message = self.messages.iter_mut().find(|m| m.id == message_id)?;
        let index = message
            .suggestions
            .iter()
            .position(|s| s.id == suggestion_id)?;
        Some(message.suggestions.remove(index))
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::session::message::MessageRole;

    #[test]
    fn test_new_transcript_opens_with_welcome() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, MessageRole::System);
        assert_eq!(transcript.messages()[0].content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_replace_loading_swaps_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push(AssistantMessage::user("Give me more ideas"));
        transcript.push(AssistantMessage::loading());
        assert!(transcript.has_loading());

        transcript.replace_loading(AssistantMessage::assistant("Here you go"));

        assert!(!transcript.has_loading());
        let last = transcript.messages().last().unwrap();
        assert_eq!(last.content, "Here you go");
        assert_eq!(transcript.messages().len(), 3);
    }

    #[test]
    fn test_accept_suggestion_removes_and_returns() {
        let s1 = Suggestion::new("Run a retro", Category::Do);
        let s2 = Suggestion::new("Shadow a peer", Category::Do);
        let s1_id = s1.id.clone();
        let message = AssistantMessage::with_suggestions("ideas", Category::Do, vec![s1, s2]);
        let message_id = message.id.clone();

        let mut transcript = Transcript::new();
        transcript.push(message);

        let accepted = transcript.accept_suggestion(&message_id, &s1_id).unwrap();
        assert_eq!(accepted.text, "Run a retro");

        let remaining = &transcript
            .messages()
            .iter()
            .find(|m| m.id == message_id)
            .unwrap()
            .suggestions;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "Shadow a peer");
    }

    #[test]
    fn test_accept_suggestion_twice_is_noop() {
        let suggestion = Suggestion::new("Run a retro", Category::Do);
        let suggestion_id = suggestion.id.clone();
        let message =
            AssistantMessage::with_suggestions("ideas", Category::Do, vec![suggestion]);
        let message_id = message.id.clone();

        let mut transcript = Transcript::new();
        transcript.push(message);

        assert!(transcript
            .accept_suggestion(&message_id, &suggestion_id)
            .is_some());
        assert!(transcript
            .accept_suggestion(&message_id, &suggestion_id)
            .is_none());
    }

    #[test]
    fn test_accept_suggestion_unknown_message() {
        let mut transcript = Transcript::new();
        assert!(transcript.accept_suggestion("nope", "also-nope").is_none());
    }
}
