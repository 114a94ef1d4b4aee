//! AI suggestion service trait.
//!
//! The engine treats the AI collaborator as a narrow seam: three operations,
//! typed results, `KfdbError::Transport` / `KfdbError::Format` on failure.
//! `kfdb-interaction` provides the Gemini-backed implementation.

use crate::category::Category;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A complete bulk-generation result for one topic: a session title plus
/// idea texts for each of the four categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub title: String,
    pub know: Vec<String>,
    pub feel: Vec<String>,
    #[serde(rename = "do")]
    pub do_: Vec<String>,
    pub be: Vec<String>,
}

impl GeneratedPlan {
    pub fn ideas_for(&self, category: Category) -> &[String] {
        match category {
            Category::Know => &self.know,
            Category::Feel => &self.feel,
            Category::Do => &self.do_,
            Category::Be => &self.be,
        }
    }
}

/// The outbound AI collaborator contract.
///
/// No retry or backoff happens behind this trait; a retry is always a fresh
/// user-initiated request.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Generates a session title and starting ideas for every category.
    async fn generate_initial(&self, topic: &str) -> Result<GeneratedPlan>;

    /// Generates exactly 3 new ideas for one category, avoiding
    /// `existing_items`. The existing-items list is a point-in-time snapshot
    /// captured by the caller at request time.
    async fn generate_ideas(
        &self,
        topic: &str,
        category: Category,
        existing_items: &[String],
    ) -> Result<Vec<String>>;

    /// Expands the exported markdown into a session outline document.
    async fn generate_outline(&self, title: &str, markdown: &str) -> Result<String>;
}
