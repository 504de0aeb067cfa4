/*!
 * Mock enrichment implementations for testing.
 *
 * This module provides mocks that simulate different collaborator
 * behaviors:
 * - `MockEnrichment::working()` - Always succeeds with derived values
 * - `MockEnrichment::failing()` - Always fails with an error
 * - `MockEnrichment::empty()` - Succeeds but returns empty values
 * - `MockEnrichment::intermittent(n)` - Fails every nth request
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::enrichment::{ChapterBreakDetector, KeywordExtractor, Summarizer};
use crate::errors::EnrichmentError;

/// Behavior mode for the mock enrichment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a value derived from the input
    Working,
    /// Always fails with a backend error
    Failing,
    /// Succeeds but returns empty values
    Empty,
    /// Fails intermittently (every nth request)
    Intermittent { fail_every: usize },
}

/// Mock summarizer and keyword extractor for testing orchestrator behavior
#[derive(Debug)]
pub struct MockEnrichment {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
}

impl MockEnrichment {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that succeeds with empty values
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that fails every `fail_every`th request
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Number of requests this mock has received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn should_fail(&self) -> bool {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;
        match self.behavior {
            MockBehavior::Working | MockBehavior::Empty => false,
            MockBehavior::Failing => true,
            MockBehavior::Intermittent { fail_every } => {
                fail_every > 0 && count % fail_every == 0
            }
        }
    }
}

impl Summarizer for MockEnrichment {
    fn generate_summary(&self, text: &str, max_len: usize) -> Result<String, EnrichmentError> {
        if self.should_fail() {
            return Err(EnrichmentError::Backend(
                "mock summarizer told to fail".to_string(),
            ));
        }
        if self.behavior == MockBehavior::Empty {
            return Ok(String::new());
        }
        Ok(format!(
            "summary[{}]",
            text.chars().take(max_len.min(16)).collect::<String>()
        ))
    }
}

impl KeywordExtractor for MockEnrichment {
    fn extract_keywords(
        &self,
        text: &str,
        max_count: usize,
    ) -> Result<Vec<(String, f64)>, EnrichmentError> {
        if self.should_fail() {
            return Err(EnrichmentError::Backend(
                "mock keyword extractor told to fail".to_string(),
            ));
        }
        if self.behavior == MockBehavior::Empty {
            return Ok(Vec::new());
        }

        // Longest-first whitespace tokens stand in for real keywords
        let mut tokens: Vec<&str> = text.split_whitespace().collect();
        tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
        tokens.dedup();
        Ok(tokens
            .into_iter()
            .take(max_count)
            .enumerate()
            .map(|(i, t)| (t.to_string(), 1.0 / (i as f64 + 1.0)))
            .collect())
    }
}

/// Mock break detector returning a fixed list of char offsets
#[derive(Debug)]
pub struct MockBreakDetector {
    /// Offsets handed back on every call
    pub offsets: Vec<usize>,
    /// Whether calls should fail instead
    pub fail: bool,
}

impl MockBreakDetector {
    /// Detector that reports the given char offsets
    pub fn with_offsets(offsets: Vec<usize>) -> Self {
        Self {
            offsets,
            fail: false,
        }
    }

    /// Detector whose calls always fail
    pub fn failing() -> Self {
        Self {
            offsets: Vec::new(),
            fail: true,
        }
    }
}

impl ChapterBreakDetector for MockBreakDetector {
    fn detect_breaks(&self, _text: &str) -> Result<Vec<usize>, EnrichmentError> {
        if self.fail {
            return Err(EnrichmentError::Unavailable(
                "mock break detector told to fail".to_string(),
            ));
        }
        Ok(self.offsets.clone())
    }
}
