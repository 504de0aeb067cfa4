/*!
 * Enrichment collaborator interfaces.
 *
 * The pipeline treats summarization, keyword extraction and (optionally)
 * chapter-break detection as external, fallible and possibly slow services.
 * They are injected as trait objects so the core stays fully testable
 * without a real NLP backend; `NoopEnrichment` is the always-available
 * fallback implementation.
 *
 * Failure tolerance: the orchestrator catches every error from these
 * traits, substitutes the fixed fallbacks below and keeps going. Nothing an
 * enrichment backend does can make `segment` fail.
 */

use std::fmt::Debug;

use crate::errors::EnrichmentError;

/// Summary substituted when the summarizer fails
pub const SUMMARY_FALLBACK: &str = "(summary unavailable)";

/// Produces a short summary for a chapter body
pub trait Summarizer: Send + Sync + Debug {
    /// Summarize `text` in at most `max_len` chars
    fn generate_summary(&self, text: &str, max_len: usize) -> Result<String, EnrichmentError>;
}

/// Extracts weighted keywords from a chapter body
pub trait KeywordExtractor: Send + Sync + Debug {
    /// Extract up to `max_count` keywords, ordered by descending relevance
    fn extract_keywords(
        &self,
        text: &str,
        max_count: usize,
    ) -> Result<Vec<(String, f64)>, EnrichmentError>;
}

/// Optional chapter-break detector, usable as an extra ladder rung when
/// pattern-based detection found nothing
pub trait ChapterBreakDetector: Send + Sync + Debug {
    /// Detect chapter starts as char offsets into `text`, ascending
    fn detect_breaks(&self, text: &str) -> Result<Vec<usize>, EnrichmentError>;
}

/// Built-in enrichment that needs no backend: the summary is a prefix of the
/// first paragraph and the keyword list is empty.
#[derive(Debug, Clone, Default)]
pub struct NoopEnrichment;

impl Summarizer for NoopEnrichment {
    fn generate_summary(&self, text: &str, max_len: usize) -> Result<String, EnrichmentError> {
        let first_paragraph = text
            .split("\n\n")
            .map(str::trim)
            .find(|p| !p.is_empty())
            .unwrap_or("");

        let mut summary: String = first_paragraph.chars().take(max_len).collect();
        if first_paragraph.chars().count() > max_len {
            // Reuse the last 3 chars of the budget for the ellipsis
            summary = summary.chars().take(max_len.saturating_sub(3)).collect();
            summary.push_str("...");
        }
        Ok(summary)
    }
}

impl KeywordExtractor for NoopEnrichment {
    fn extract_keywords(
        &self,
        _text: &str,
        _max_count: usize,
    ) -> Result<Vec<(String, f64)>, EnrichmentError> {
        Ok(Vec::new())
    }
}

pub mod mock;
