/*!
 * Pipeline orchestrator.
 *
 * `Segmenter::segment` is the single entry point of the crate: it takes raw
 * text and always produces at least one chapter, no matter how degenerate
 * the input. Internally it sequences normalization, title-list
 * classification, the segmentation ladder and per-chapter enrichment; every
 * internal failure degrades to a later ladder rung or a fallback value
 * instead of propagating.
 *
 * The whole computation is pure, synchronous, CPU-bound string work over
 * one document; a `Segmenter` holds no mutable state and can be shared
 * freely across threads for independent documents.
 */

use std::sync::Arc;

use log::{debug, info, warn};

use crate::app_config::SegmentationConfig;
use crate::chapter::{
    ChapterDraft, ChapterRecord, EMPTY_CONTENT_BODY, EMPTY_CONTENT_TITLE, MISSING_CONTENT_NOTICE,
    MISSING_CONTENT_SUMMARY, RawDocument,
};
use crate::classifier;
use crate::enrichment::{
    ChapterBreakDetector, KeywordExtractor, NoopEnrichment, SUMMARY_FALLBACK, Summarizer,
};
use crate::ladder;
use crate::normalizer;
use crate::titles;

/// Splits one document into enriched, ordered chapter records
#[derive(Debug)]
pub struct Segmenter {
    config: SegmentationConfig,
    summarizer: Arc<dyn Summarizer>,
    keyword_extractor: Arc<dyn KeywordExtractor>,
    break_detector: Option<Arc<dyn ChapterBreakDetector>>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmentationConfig::default())
    }
}

impl Segmenter {
    /// Create a segmenter with the built-in no-op enrichment
    pub fn new(config: SegmentationConfig) -> Self {
        let noop = Arc::new(NoopEnrichment);
        Segmenter {
            config,
            summarizer: noop.clone(),
            keyword_extractor: noop,
            break_detector: None,
        }
    }

    /// Create a segmenter with injected enrichment collaborators
    pub fn with_enrichment(
        config: SegmentationConfig,
        summarizer: Arc<dyn Summarizer>,
        keyword_extractor: Arc<dyn KeywordExtractor>,
    ) -> Self {
        Segmenter {
            config,
            summarizer,
            keyword_extractor,
            break_detector: None,
        }
    }

    /// Install an optional chapter-break detector, tried after the
    /// title-based ladder rungs when they all came up short
    pub fn set_break_detector(&mut self, detector: Arc<dyn ChapterBreakDetector>) {
        self.break_detector = Some(detector);
    }

    /// The active configuration
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment raw text into ordered chapter records.
    ///
    /// Total over all string inputs: empty, pure-ASCII, pure-CJK or mixed
    /// content all yield at least one chapter, numbered contiguously from 1.
    pub fn segment(&self, raw: &str) -> Vec<ChapterRecord> {
        self.run(raw, None)
    }

    /// Segment a caller-owned document; the document id only feeds log
    /// correlation and is passed explicitly rather than through any
    /// ambient context.
    pub fn segment_document(&self, doc: &RawDocument) -> Vec<ChapterRecord> {
        self.run(&doc.text, Some(&doc.id))
    }

    fn run(&self, raw: &str, doc_id: Option<&str>) -> Vec<ChapterRecord> {
        let label = doc_id.unwrap_or("-");
        info!(
            "[{}] Segmenting content, {} chars",
            label,
            raw.chars().count()
        );

        if raw.trim().is_empty() {
            warn!("[{}] Input content is empty, emitting sentinel chapter", label);
            return vec![ChapterRecord {
                number: 1,
                title: EMPTY_CONTENT_TITLE.to_string(),
                body: EMPTY_CONTENT_BODY.to_string(),
                word_count: EMPTY_CONTENT_BODY.chars().count(),
                summary: EMPTY_CONTENT_BODY.to_string(),
                keywords: Vec::new(),
            }];
        }

        let mut text = normalizer::normalize(raw, &self.config);
        if text.trim().is_empty() {
            warn!("[{}] Normalization collapsed content, reverting to raw text", label);
            text = raw.to_string();
        }

        if classifier::is_title_only(&text, &self.config) {
            let chapter_titles = classifier::extract_chapter_titles(&text, &self.config);
            if !chapter_titles.is_empty() {
                warn!(
                    "[{}] Content is a bare chapter list, emitting {} placeholder chapters",
                    label,
                    chapter_titles.len()
                );
                return chapter_titles
                    .into_iter()
                    .enumerate()
                    .map(|(i, title)| ChapterRecord {
                        number: (i + 1) as u32,
                        title,
                        body: MISSING_CONTENT_NOTICE.to_string(),
                        word_count: MISSING_CONTENT_NOTICE.chars().count(),
                        summary: MISSING_CONTENT_SUMMARY.to_string(),
                        keywords: Vec::new(),
                    })
                    .collect();
            }
            // A suspected title list we could not pull a single title out of
            // keeps going through the ladder
        }

        let drafts = self.run_ladder(&text, label);
        self.enrich(drafts, label)
    }

    // Walk the ladder top to bottom, first success wins. The break detector
    // slots in after the title-based rungs, before the structure-free ones.
    fn run_ladder(&self, text: &str, label: &str) -> Vec<ChapterDraft> {
        for (name, rung) in ladder::TITLE_RUNGS {
            if let Some(drafts) = rung(text, &self.config) {
                info!(
                    "[{}] Ladder rung '{}' produced {} chapters",
                    label,
                    name,
                    drafts.len()
                );
                return drafts;
            }
        }

        if let Some(detector) = &self.break_detector {
            match detector.detect_breaks(text) {
                Ok(offsets) if !offsets.is_empty() => {
                    let drafts = ladder::split_at_offsets(text, &offsets);
                    if drafts.len() >= 2 {
                        info!(
                            "[{}] Break detector produced {} chapters",
                            label,
                            drafts.len()
                        );
                        return drafts;
                    }
                    debug!(
                        "[{}] Break detector produced only {} chapter(s), continuing",
                        label,
                        drafts.len()
                    );
                }
                Ok(_) => debug!("[{}] Break detector found no breaks", label),
                Err(e) => warn!("[{}] Break detector failed: {}", label, e),
            }
        }

        for (name, rung) in ladder::FALLBACK_RUNGS {
            if let Some(drafts) = rung(text, &self.config) {
                info!(
                    "[{}] Ladder rung '{}' produced {} chapters",
                    label,
                    name,
                    drafts.len()
                );
                return drafts;
            }
        }

        info!(
            "[{}] No strategy found chapter boundaries, emitting a single chapter",
            label
        );
        ladder::single_chapter(text)
    }

    // Sanitize titles, attach enrichment, renumber 1..N in document order.
    // Enrichment failures are logged and replaced with fixed fallbacks; the
    // chapter is emitted regardless.
    fn enrich(&self, drafts: Vec<ChapterDraft>, label: &str) -> Vec<ChapterRecord> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| {
                let number = (i + 1) as u32;
                let title = titles::sanitize_title(&draft.title, self.config.max_title_length);

                let summary = match self
                    .summarizer
                    .generate_summary(&draft.body, self.config.summary_max_length)
                {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!("[{}] Summarizer failed for chapter {}: {}", label, number, e);
                        SUMMARY_FALLBACK.to_string()
                    }
                };

                let keywords = match self
                    .keyword_extractor
                    .extract_keywords(&draft.body, self.config.keyword_max_count)
                {
                    Ok(weighted) => weighted.into_iter().map(|(word, _)| word).collect(),
                    Err(e) => {
                        warn!(
                            "[{}] Keyword extraction failed for chapter {}: {}",
                            label, number, e
                        );
                        Vec::new()
                    }
                };

                ChapterRecord {
                    number,
                    title,
                    word_count: draft.body.chars().count(),
                    body: draft.body,
                    summary,
                    keywords,
                }
            })
            .collect()
    }
}
