use serde::{Deserialize, Serialize};

/// A catalog entry as returned by the books proxy
///
/// Cached verbatim (camelCase JSON) in the store after a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub published_date: String,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Book {
    /// Authors joined for display ("A, B")
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// True if any author contains `needle`, ignoring case
    pub fn has_author_matching(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.authors
            .iter()
            .any(|author| author.to_lowercase().contains(&needle))
    }
}

/// Search response body: `{ totalItems, items }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Vec<Book>,
}
