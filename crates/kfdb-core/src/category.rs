//! The four fixed learning-objective categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed buckets of the Know/Feel/Do/Be framework.
///
/// The set is closed: it is never extended at runtime, and every session
/// carries exactly one collection per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// What the audience should know
    Know,
    /// How the audience should feel
    Feel,
    /// What the audience should be able to do
    Do,
    /// Who the audience should become
    Be,
}

impl Category {
    /// All categories in their fixed display and export order.
    pub const ALL: [Category; 4] = [Category::Know, Category::Feel, Category::Do, Category::Be];

    pub fn label(self) -> &'static str {
        match self {
            Self::Know => "Know",
            Self::Feel => "Feel",
            Self::Do => "Do",
            Self::Be => "Be",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Know", "Feel", "Do", "Be"]);
    }

    #[test]
    fn test_display_matches_label() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.label());
        }
    }
}
