//! Listing query types

use serde::{Deserialize, Serialize};

/// Category name meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Query parameters for listing commands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search (case-insensitive substring)
    #[serde(default)]
    pub q: Option<String>,

    /// Category filter; absent, empty or "All" means every category
    #[serde(default)]
    pub category: Option<String>,
}

impl ListQuery {
    /// Create a query with a search term and category
    pub fn new(q: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            category: Some(category.into()),
        }
    }

    /// Lowercased search term, or `None` when there is nothing to match
    pub fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Category to filter on, or `None` for all categories
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }
}
