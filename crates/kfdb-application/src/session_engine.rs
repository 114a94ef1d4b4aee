//! Session engine: the use-case layer driving one working session.
//!
//! `SessionEngine` owns the current `SessionState` value and the assistant
//! transcript, and is the only place either is replaced. It reconciles AI
//! bulk-generation results into the session, gates AI operations behind a
//! single global activity slot, guards suspended-operation completions with
//! a session epoch so a response requested before "start over" can never
//! resurrect discarded state, and persists the session after every settled
//! mutation.
//!
//! All mutations go through `&mut self`, so no two of them ever interleave
//! partway; the suspension points are exactly the external AI and storage
//! calls.

use kfdb_core::assist::{GeneratedPlan, SuggestionService};
use kfdb_core::category::Category;
use kfdb_core::error::Result;
use kfdb_core::export::project_markdown;
use kfdb_core::session::{
    AssistantMessage, CategoryCollection, CategorySet, ListItem, SessionState, SessionStore,
    Suggestion, Transcript,
};
use std::sync::Arc;

/// The one AI operation that may be outstanding at a time.
///
/// Requests arriving while this slot is occupied are rejected, not queued;
/// purely local operations (add/delete/edit/reorder) stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiActivity {
    GeneratingInitial,
    FetchingIdeas(Category),
    GeneratingOutline,
}

#[derive(Debug, Clone)]
struct OutlineCache {
    /// The exact markdown snapshot that produced `outline`
    markdown: String,
    outline: String,
}

struct PendingInitial {
    epoch: u64,
    topic: String,
}

struct PendingIdeas {
    epoch: u64,
    topic: String,
    category: Category,
    /// Point-in-time snapshot of the category's item texts at request time;
    /// intentionally not re-read when the call resolves.
    existing: Vec<String>,
}

pub struct SessionEngine {
    state: SessionState,
    transcript: Transcript,
    ai_activity: Option<AiActivity>,
    /// Generation counter: bumped by `start_over`, checked by every
    /// suspended-operation completion.
    epoch: u64,
    outline_cache: Option<OutlineCache>,
    suggestion_service: Arc<dyn SuggestionService>,
    session_store: Arc<dyn SessionStore>,
}

impl SessionEngine {
    pub fn new(
        suggestion_service: Arc<dyn SuggestionService>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            state: SessionState::new(),
            transcript: Transcript::new(),
            ai_activity: None,
            epoch: 0,
            outline_cache: None,
            suggestion_service,
            session_store,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn ai_activity(&self) -> Option<AiActivity> {
        self.ai_activity
    }

    pub fn is_ai_busy(&self) -> bool {
        self.ai_activity.is_some()
    }

    /// Restores the stored session, if any. Load failures are logged and the
    /// engine keeps its in-memory state.
    pub async fn restore(&mut self) -> bool {
        match self.session_store.load().await {
            Ok(Some(stored)) => {
                self.state = stored;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("failed to restore stored session: {}", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Local mutations (available even while the assistant is busy)
    // ------------------------------------------------------------------

    pub async fn set_topic(&mut self, topic: &str) {
        self.state = self.state.set_topic(topic);
        self.persist().await;
    }

    /// Renames the session title. The text is trimmed; empty input is
    /// silently discarded, preserving the previous title.
    pub async fn rename_title(&mut self, title: &str) {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return;
        }
        self.state = self.state.set_title(trimmed);
        self.persist().await;
    }

    pub async fn add_item(&mut self, category: Category, text: &str) {
        self.state = self.state.add_item(category, text);
        self.persist().await;
    }

    pub async fn delete_item(&mut self, category: Category, id: &str) {
        self.state = self.state.delete_item(category, id);
        self.persist().await;
    }

    pub async fn edit_item(&mut self, category: Category, id: &str, new_text: &str) {
        self.state = self.state.edit_item(category, id, new_text);
        self.persist().await;
    }

    pub async fn move_item(&mut self, category: Category, from: usize, to: usize) {
        self.state = self.state.move_item(category, from, to);
        self.persist().await;
    }

    /// Consumes a pending suggestion and appends the equivalent item.
    ///
    /// Both effects happen inside this one call, so two rapid acceptances
    /// can never lose an update; repeating a call for an already-consumed
    /// suggestion id finds nothing and is a no-op.
    pub async fn accept_suggestion(&mut self, message_id: &str, suggestion_id: &str) {
        let Some(suggestion) = self.transcript.accept_suggestion(message_id, suggestion_id) else {
            return;
        };
        self.state = self.state.add_item(suggestion.category, &suggestion.text);
        self.persist().await;
    }

    /// Clears the session: state, transcript and stored copy. Bumps the
    /// epoch so any still-outstanding AI completion is discarded as stale.
    pub async fn start_over(&mut self) {
        self.state = SessionState::new();
        self.transcript = Transcript::new();
        self.ai_activity = None;
        self.outline_cache = None;
        self.epoch += 1;
        if let Err(e) = self.session_store.clear().await {
            tracing::warn!("failed to clear stored session: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // AI operations
    // ------------------------------------------------------------------

    /// Generates a title and starting ideas for every category from the
    /// current topic, replacing the existing lists wholesale.
    pub async fn generate_initial_plan(&mut self) {
        let Some(pending) = self.begin_initial_plan() else {
            return;
        };
        let service = Arc::clone(&self.suggestion_service);
        let result = service.generate_initial(&pending.topic).await;
        self.apply_initial_result(pending, result).await;
    }

    /// Requests 3 more ideas for one category, delivered as pending
    /// suggestions on a new assistant message.
    pub async fn request_category_ideas(&mut self, category: Category) {
        let Some(pending) = self.begin_category_ideas(category) else {
            return;
        };
        let service = Arc::clone(&self.suggestion_service);
        let result = service
            .generate_ideas(&pending.topic, category, &pending.existing)
            .await;
        self.apply_ideas_result(pending, result).await;
    }

    /// Produces the session outline, regenerating only when the projected
    /// markdown differs from the snapshot that produced the cached outline.
    ///
    /// Returns `Ok(None)` when there is nothing to outline or another AI
    /// operation is outstanding; transport/format failures are returned to
    /// the caller.
    pub async fn create_outline(&mut self) -> Result<Option<String>> {
        let markdown = self.export_markdown();
        if markdown.is_empty() {
            return Ok(None);
        }
        if let Some(cache) = &self.outline_cache {
            if cache.markdown == markdown {
                return Ok(Some(cache.outline.clone()));
            }
        }
        if self.ai_activity.is_some() {
            return Ok(None);
        }

        self.ai_activity = Some(AiActivity::GeneratingOutline);
        let epoch = self.epoch;
        let title = self.outline_title();
        let service = Arc::clone(&self.suggestion_service);
        let result = service.generate_outline(&title, &markdown).await;

        if epoch != self.epoch {
            // Session was cleared while the call was outstanding.
            return Ok(None);
        }
        self.ai_activity = None;

        let outline = result?;
        self.outline_cache = Some(OutlineCache {
            markdown,
            outline: outline.clone(),
        });
        Ok(Some(outline))
    }

    /// Projects the session into its exportable markdown document.
    pub fn export_markdown(&self) -> String {
        project_markdown(&self.state)
    }

    // ------------------------------------------------------------------
    // Request/completion halves of the AI operations. Split so the stale
    // completion guard can be exercised directly in tests.
    // ------------------------------------------------------------------

    fn begin_initial_plan(&mut self) -> Option<PendingInitial> {
        let topic = self.state.topic.trim().to_string();
        if topic.is_empty() || self.ai_activity.is_some() {
            return None;
        }

        self.ai_activity = Some(AiActivity::GeneratingInitial);
        // The previous lists and title are replaced wholesale on success;
        // clear them up front so the user sees a fresh slate immediately.
        self.state = self.state.replace_all("", CategorySet::default());

        self.transcript = Transcript::new();
        self.transcript.push(AssistantMessage::user(format!(
            "Generate ideas for the topic: \"{}\"",
            topic
        )));
        self.transcript.push(AssistantMessage::loading());

        Some(PendingInitial {
            epoch: self.epoch,
            topic,
        })
    }

    async fn apply_initial_result(
        &mut self,
        pending: PendingInitial,
        result: Result<GeneratedPlan>,
    ) {
        if pending.epoch != self.epoch {
            // Stale: the session was cleared after this request started.
            return;
        }
        self.ai_activity = None;

        match result {
            Ok(plan) => {
                let categories = categories_from_plan(&plan);
                self.state = self.state.replace_all(plan.title, categories);
                self.transcript.replace_loading(AssistantMessage::assistant(
                    "I've populated your lists with some starting ideas. Feel free to refine them!",
                ));
                self.persist().await;
            }
            Err(e) => {
                self.transcript
                    .replace_loading(AssistantMessage::system(format!("Sorry, I hit a snag: {}", e)));
                // The lists were already cleared at request time; that is
                // the settled state now and the store must agree with it.
                self.persist().await;
            }
        }
    }

    fn begin_category_ideas(&mut self, category: Category) -> Option<PendingIdeas> {
        let topic = self.state.topic.trim().to_string();
        if topic.is_empty() {
            self.transcript.push(AssistantMessage::system(
                "Please set a topic first before asking for ideas.",
            ));
            return None;
        }
        if self.ai_activity.is_some() {
            return None;
        }

        self.ai_activity = Some(AiActivity::FetchingIdeas(category));
        self.transcript.push(AssistantMessage::user(format!(
            "Give me more ideas for \"{}\"",
            category
        )));
        self.transcript.push(AssistantMessage::loading());

        let existing = self
            .state
            .collection(category)
            .items()
            .iter()
            .map(|item| item.text.clone())
            .collect();

        Some(PendingIdeas {
            epoch: self.epoch,
            topic,
            category,
            existing,
        })
    }

    async fn apply_ideas_result(&mut self, pending: PendingIdeas, result: Result<Vec<String>>) {
        if pending.epoch != self.epoch {
            return;
        }
        self.ai_activity = None;

        match result {
            Ok(ideas) => {
                let suggestions: Vec<Suggestion> = ideas
                    .into_iter()
                    .map(|text| Suggestion::new(text, pending.category))
                    .collect();
                self.transcript
                    .replace_loading(AssistantMessage::with_suggestions(
                        format!(
                            "Here are a few more ideas for {}. Click to add them:",
                            pending.category
                        ),
                        pending.category,
                        suggestions,
                    ));
            }
            Err(e) => {
                self.transcript
                    .replace_loading(AssistantMessage::system(format!("Sorry, I hit a snag: {}", e)));
            }
        }
    }

    fn outline_title(&self) -> String {
        if !self.state.title.trim().is_empty() {
            self.state.title.clone()
        } else if !self.state.topic.trim().is_empty() {
            self.state.topic.clone()
        } else {
            "Untitled".to_string()
        }
    }

    /// Persists the session after a settled mutation. Failures are logged,
    /// never surfaced: the app keeps operating purely in memory. Saves are
    /// awaited in-line, so an older write can never land after a newer one.
    async fn persist(&self) {
        if self.state.is_blank() {
            return;
        }
        if let Err(e) = self.session_store.save(&self.state).await {
            tracing::warn!("failed to persist session: {}", e);
        }
    }
}

fn categories_from_plan(plan: &GeneratedPlan) -> CategorySet {
    let collect = |texts: &[String]| {
        Arc::new(CategoryCollection::from_items(
            texts.iter().map(ListItem::new).collect(),
        ))
    };
    CategorySet {
        know: collect(&plan.know),
        feel: collect(&plan.feel),
        do_: collect(&plan.do_),
        be: collect(&plan.be),
    }
}
