//! Markdown projection of a session.

use crate::category::Category;
use crate::session::SessionState;

/// Projects the session into a plain-text markdown document.
///
/// Pure function: the header line is the session title when non-empty, else
/// `Topic: {topic}` when the topic is non-empty, else no header. Each
/// non-empty category, in fixed Know/Feel/Do/Be order, contributes a heading
/// and one list line per item in collection order; empty categories emit
/// nothing. The result is trimmed.
pub fn project_markdown(state: &SessionState) -> String {
    let mut markdown = String::new();

    if !state.title.is_empty() {
        markdown.push_str(&format!("# {}\n\n", state.title));
    } else if !state.topic.is_empty() {
        markdown.push_str(&format!("# Topic: {}\n\n", state.topic));
    }

    for category in Category::ALL {
        let collection = state.collection(category);
        if collection.is_empty() {
            continue;
        }
        markdown.push_str(&format!("## {}\n", category.label()));
        for item in collection.items() {
            markdown.push_str(&format!("- {}\n", item.text));
        }
        markdown.push('\n');
    }

    markdown.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_projects_empty_string() {
        assert_eq!(project_markdown(&SessionState::new()), "");
    }

    #[test]
    fn test_title_wins_over_topic_header() {
        let state = SessionState::new()
            .set_topic("Q3 Leadership Summit")
            .set_title("Leadership Reset");
        assert_eq!(project_markdown(&state), "# Leadership Reset");
    }

    #[test]
    fn test_topic_header_fallback() {
        let state = SessionState::new().set_topic("Q3 Leadership Summit");
        assert_eq!(project_markdown(&state), "# Topic: Q3 Leadership Summit");
    }

    #[test]
    fn test_empty_categories_emit_no_heading() {
        let state = SessionState::new()
            .set_title("Leadership Reset")
            .add_item(Category::Know, "Budgeting basics")
            .add_item(Category::Do, "Run a retro");

        let expected = "# Leadership Reset\n\n## Know\n- Budgeting basics\n\n## Do\n- Run a retro";
        assert_eq!(project_markdown(&state), expected);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let state = SessionState::new()
            .set_title("T")
            .add_item(Category::Feel, "confident")
            .add_item(Category::Feel, "curious");
        assert_eq!(project_markdown(&state), project_markdown(&state));
    }

    #[test]
    fn test_items_appear_in_collection_order() {
        let state = SessionState::new()
            .add_item(Category::Be, "a mentor")
            .add_item(Category::Be, "a listener");
        assert_eq!(
            project_markdown(&state),
            "## Be\n- a mentor\n- a listener"
        );
    }
}
