use std::fmt;

use serde::{Deserialize, Serialize};

// @module: Chapter data model shared across the pipeline

/// Title used when no usable title could be recovered for a chapter
pub const UNTITLED_CHAPTER_TITLE: &str = "Untitled Chapter";

/// Title of the sentinel chapter emitted for blank input
pub const EMPTY_CONTENT_TITLE: &str = "Empty Chapter";

/// Body of the sentinel chapter emitted for blank input
pub const EMPTY_CONTENT_BODY: &str = "The submitted content was empty.";

/// Body substituted for every chapter when only a table of contents was
/// recovered. Callers should treat it as a signal to retry acquisition.
pub const MISSING_CONTENT_NOTICE: &str = "\
[NOTICE: this chapter's content could not be retrieved]

Possible causes:
1. The source site requires a login or uses anti-scraping measures
2. The site structure changed or the content is protected
3. A network problem interrupted the download

What you can try:
- Upload the book as a local file
- Use a different source URL
- Add the content manually";

/// Summary attached to chapters carrying the missing-content notice
pub const MISSING_CONTENT_SUMMARY: &str = "Chapter content could not be retrieved";

/// Sequential fallback title for chapter `number`
pub fn default_title(number: usize) -> String {
    format!("Chapter {}", number)
}

/// A raw input document: an in-memory text blob plus an opaque identifier.
///
/// Owned by the caller; the pipeline only borrows it. The identifier is used
/// purely for log correlation and is passed explicitly rather than through
/// any ambient context.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Opaque document identifier
    pub id: String,

    /// Raw text content
    pub text: String,
}

impl RawDocument {
    /// Create a new raw document
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        RawDocument {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A fully assembled chapter as emitted by the pipeline.
///
/// Immutable once emitted: chapter numbers are contiguous starting at 1 in
/// emission order, the title is at most 255 chars, and the body is never
/// empty-by-accident (a diagnostic placeholder at worst).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRecord {
    // @field: 1-based position in document order
    pub number: u32,

    // @field: Sanitized chapter title
    pub title: String,

    // @field: Chapter body text
    pub body: String,

    // @field: Body length in chars
    pub word_count: usize,

    // @field: Summary from the enrichment collaborator (or fixed fallback)
    pub summary: String,

    // @field: Keywords in relevance order (empty on enrichment failure)
    pub keywords: Vec<String>,
}

impl fmt::Display for ChapterRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "#{} {}", self.number, self.title)?;
        writeln!(f, "({} chars) {}", self.word_count, self.summary)?;
        if !self.keywords.is_empty() {
            writeln!(f, "keywords: {}", self.keywords.join(", "))?;
        }
        Ok(())
    }
}

/// An intermediate (title, body) pair produced by a ladder strategy, before
/// title sanitation and enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDraft {
    /// Candidate title as matched in the text
    pub title: String,

    /// Body text, already trimmed
    pub body: String,
}

impl ChapterDraft {
    /// Create a new draft, trimming both parts
    pub fn new(title: &str, body: &str) -> Self {
        ChapterDraft {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        }
    }
}

/// An ephemeral title hit inside a scanned text: byte offsets plus the
/// matched text. Produced and consumed within a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    /// Byte offset of the match start
    pub start: usize,

    /// Byte offset one past the match end
    pub end: usize,

    /// Matched text, untrimmed
    pub text: String,
}
