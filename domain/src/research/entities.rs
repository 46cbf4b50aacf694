//! Knowledge-base entities exchanged between handlers and backend ports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bibliographic type of a library item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    JournalArticle,
    Book,
    BookSection,
    ConferencePaper,
    Thesis,
    Report,
    Preprint,
    Webpage,
}

impl ItemType {
    pub const ALL: [ItemType; 8] = [
        ItemType::JournalArticle,
        ItemType::Book,
        ItemType::BookSection,
        ItemType::ConferencePaper,
        ItemType::Thesis,
        ItemType::Report,
        ItemType::Preprint,
        ItemType::Webpage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::JournalArticle => "journal_article",
            ItemType::Book => "book",
            ItemType::BookSection => "book_section",
            ItemType::ConferencePaper => "conference_paper",
            ItemType::Thesis => "thesis",
            ItemType::Report => "report",
            ItemType::Preprint => "preprint",
            ItemType::Webpage => "webpage",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.as_str()).collect()
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reference stored in a library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: String,
    pub library_id: String,
    pub title: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_note: Option<String>,
    /// Whether a PDF attachment is available for OCR
    #[serde(default)]
    pub has_pdf: bool,
}

impl LibraryItem {
    /// Case-insensitive match against title, authors, abstract and tags.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.authors.iter().any(|a| a.to_lowercase().contains(&needle))
            || self
                .abstract_note
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&needle))
            || self.tags.iter().any(|t| t.to_lowercase() == needle)
    }

    pub fn citation_label(&self) -> String {
        let author = self
            .authors
            .first()
            .map(|a| a.split_whitespace().last().unwrap_or(a).to_string())
            .unwrap_or_else(|| "Anon.".to_string());
        match self.year {
            Some(year) => format!("{} ({}) {}", author, year, self.title),
            None => format!("{} {}", author, self.title),
        }
    }
}

/// A named set of item ids inside one library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub library_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Membership set; duplicates are impossible by construction
    #[serde(default)]
    pub item_ids: BTreeSet<String>,
}

/// Outcome of adding one item to a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Added,
    AlreadyPresent,
}

/// A free-text note attached to an item or collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Input for creating a note
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteDraft {
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub parent_item_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// How new content combines with an existing note
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteEditMode {
    #[default]
    Replace,
    Append,
    Prepend,
}

impl NoteEditMode {
    pub const NAMES: [&'static str; 3] = ["replace", "append", "prepend"];

    pub fn apply(&self, existing: &str, new: &str) -> String {
        match self {
            NoteEditMode::Replace => new.to_string(),
            NoteEditMode::Append if existing.is_empty() => new.to_string(),
            NoteEditMode::Append => format!("{}\n\n{}", existing, new),
            NoteEditMode::Prepend if existing.is_empty() => new.to_string(),
            NoteEditMode::Prepend => format!("{}\n\n{}", new, existing),
        }
    }
}

/// A web search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// Extracted text of a fetched web page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
}

/// An academic paper from the scholarly index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub paper_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
}

/// Direction of a citation-graph lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationDirection {
    /// Papers that cite the given paper
    #[default]
    Citing,
    /// Papers the given paper cites
    References,
}

impl CitationDirection {
    pub const NAMES: [&'static str; 2] = ["citing", "references"];

    pub fn as_str(&self) -> &'static str {
        match self {
            CitationDirection::Citing => "citing",
            CitationDirection::References => "references",
        }
    }
}

/// Inclusive page range for OCR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

/// State of an asynchronous OCR conversion job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OcrStatus {
    Pending,
    Completed { text: String, page_count: u32 },
    Failed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> LibraryItem {
        LibraryItem {
            id: "I1".to_string(),
            library_id: "L1".to_string(),
            title: "Attention Is All You Need".to_string(),
            item_type: ItemType::ConferencePaper,
            authors: vec!["Ashish Vaswani".to_string()],
            year: Some(2017),
            tags: vec!["transformers".to_string()],
            abstract_note: None,
            has_pdf: true,
        }
    }

    #[test]
    fn test_item_matches() {
        let item = item();
        assert!(item.matches("attention"));
        assert!(item.matches("vaswani"));
        assert!(item.matches("Transformers"));
        assert!(!item.matches("convolution"));
    }

    #[test]
    fn test_citation_label() {
        assert_eq!(item().citation_label(), "Vaswani (2017) Attention Is All You Need");
    }

    #[test]
    fn test_note_edit_modes() {
        assert_eq!(NoteEditMode::Replace.apply("old", "new"), "new");
        assert_eq!(NoteEditMode::Append.apply("old", "new"), "old\n\nnew");
        assert_eq!(NoteEditMode::Prepend.apply("old", "new"), "new\n\nold");
        assert_eq!(NoteEditMode::Append.apply("", "new"), "new");
    }

    #[test]
    fn test_item_type_names_roundtrip_serde() {
        for name in ItemType::names() {
            let parsed: ItemType = serde_json::from_value(serde_json::json!(name)).unwrap();
            assert_eq!(parsed.as_str(), name);
        }
    }
}
