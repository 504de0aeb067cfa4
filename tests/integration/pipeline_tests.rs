/*!
 * End-to-end tests for the segmentation pipeline
 */

use std::sync::Arc;

use chapterize::app_config::SegmentationConfig;
use chapterize::chapter::{
    EMPTY_CONTENT_BODY, EMPTY_CONTENT_TITLE, MISSING_CONTENT_NOTICE, MISSING_CONTENT_SUMMARY,
    RawDocument,
};
use chapterize::enrichment::SUMMARY_FALLBACK;
use chapterize::enrichment::mock::{MockBreakDetector, MockEnrichment};
use chapterize::segmenter::Segmenter;

use crate::common;

fn segmenter() -> Segmenter {
    Segmenter::new(SegmentationConfig::default())
}

/// Test empty input yields exactly one sentinel chapter
#[test]
fn test_segment_withEmptyInput_shouldEmitSentinelChapter() {
    let chapters = segmenter().segment("");

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].number, 1);
    assert_eq!(chapters[0].title, EMPTY_CONTENT_TITLE);
    assert_eq!(chapters[0].body, EMPTY_CONTENT_BODY);
}

/// Test whitespace-only input counts as empty
#[test]
fn test_segment_withWhitespaceInput_shouldEmitSentinelChapter() {
    let chapters = segmenter().segment("  \n\t \n  ");

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].title, EMPTY_CONTENT_TITLE);
}

/// Test well-formed English chapters come out with trimmed titles and bodies
#[test]
fn test_segment_withEnglishChapterHeadings_shouldSplitOnThem() {
    let text = "Chapter 1 Beginning\nbody one\n\nChapter 2 Development\nbody two";
    let chapters = segmenter().segment(text);

    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].title, "Chapter 1 Beginning");
    assert_eq!(chapters[0].body, "body one");
    assert_eq!(chapters[1].title, "Chapter 2 Development");
    assert_eq!(chapters[1].body, "body two");
}

/// Test a well-formed CJK novel splits on its title lines
#[test]
fn test_segment_withCjkChapterHeadings_shouldSplitOnThem() {
    let chapters = segmenter().segment(&common::cjk_chaptered_doc(5));

    assert_eq!(chapters.len(), 5);
    for (i, chapter) in chapters.iter().enumerate() {
        assert_eq!(chapter.number, (i + 1) as u32);
        assert_eq!(chapter.title, format!("第{}章 风起云涌", i + 1));
        assert!(!chapter.body.is_empty());
    }
}

/// Test headingless paragraphs fall back to the blank-line rung, one
/// chapter per paragraph with sequential titles
#[test]
fn test_segment_withHeadinglessParagraphs_shouldSplitOnBlankLines() {
    let chapters = segmenter().segment(&common::paragraph_doc(10));

    assert_eq!(chapters.len(), 10);
    for (i, chapter) in chapters.iter().enumerate() {
        assert_eq!(chapter.title, format!("Chapter {}", i + 1));
        assert!(chapter.body.starts_with("Paragraph body number"));
    }
}

/// Test a long unstructured block is force-split into fixed windows cut at
/// sentence boundaries
#[test]
fn test_segment_withLongUnstructuredProse_shouldForceSplit() {
    let config = SegmentationConfig::default();
    let text = common::long_prose_block(3 * config.window_length);
    let chapters = Segmenter::new(config.clone()).segment(&text);

    assert_eq!(chapters.len(), 3);
    for chapter in &chapters {
        assert!(chapter.body.chars().count() <= config.window_length);
    }
    assert!(chapters[0].body.ends_with('.'));
    assert!(chapters[1].body.ends_with('.'));
}

/// Test a bare chapter list yields placeholder chapters instead of
/// fabricated bodies
#[test]
fn test_segment_withTableOfContents_shouldEmitPlaceholders() {
    let chapters = segmenter().segment(&common::toc_doc(6));

    assert_eq!(chapters.len(), 6);
    for (i, chapter) in chapters.iter().enumerate() {
        assert_eq!(chapter.number, (i + 1) as u32);
        assert_eq!(chapter.title, format!("第{}章 风起云涌", i + 1));
        assert_eq!(chapter.body, MISSING_CONTENT_NOTICE);
        assert_eq!(chapter.summary, MISSING_CONTENT_SUMMARY);
        assert!(chapter.keywords.is_empty());
    }
}

/// Test overlong titles are capped end to end
#[test]
fn test_segment_withOverlongTitle_shouldCapTitleLength() {
    let text = format!(
        "第一章 {}\n正文甲\n第二章 收尾\n正文乙",
        "废".repeat(300)
    );
    let chapters = segmenter().segment(&text);

    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].title.chars().count(), 255);
    assert!(chapters[0].title.starts_with("第一章"));
    assert!(chapters[0].title.ends_with("..."));
    assert_eq!(chapters[1].title, "第二章 收尾");
}

/// Test chapter numbers are contiguous from 1 across input shapes
#[test]
fn test_segment_withVariousInputs_shouldNumberContiguously() {
    let inputs = [
        common::cjk_chaptered_doc(4),
        common::english_chaptered_doc(4),
        common::paragraph_doc(6),
        common::long_prose_block(7000),
        "just a single short line".to_string(),
    ];

    for input in &inputs {
        let chapters = segmenter().segment(input);
        assert!(!chapters.is_empty());
        for (i, chapter) in chapters.iter().enumerate() {
            assert_eq!(chapter.number, (i + 1) as u32);
            assert!(!chapter.title.is_empty());
            assert!(chapter.title.chars().count() <= 255);
            assert_eq!(chapter.word_count, chapter.body.chars().count());
        }
    }
}

/// Test re-segmenting a produced chapter body yields that body back as a
/// single chapter
#[test]
fn test_segment_withOwnChapterBody_shouldBeIdempotent() {
    let s = segmenter();
    let first_pass = s.segment(&common::paragraph_doc(10));
    let body = &first_pass[0].body;

    let second_pass = s.segment(body);
    assert_eq!(second_pass.len(), 1);
    assert_eq!(&second_pass[0].body, body);
}

/// Test failing enrichment degrades to fallbacks without losing chapters
#[test]
fn test_segment_withFailingEnrichment_shouldKeepChapters() {
    let s = Segmenter::with_enrichment(
        SegmentationConfig::default(),
        Arc::new(MockEnrichment::failing()),
        Arc::new(MockEnrichment::failing()),
    );
    let chapters = s.segment(&common::english_chaptered_doc(3));

    assert_eq!(chapters.len(), 3);
    for chapter in &chapters {
        assert_eq!(chapter.summary, SUMMARY_FALLBACK);
        assert!(chapter.keywords.is_empty());
        assert!(!chapter.body.is_empty());
    }
}

/// Test working enrichment attaches summaries and keywords per chapter
#[test]
fn test_segment_withWorkingEnrichment_shouldAttachSummariesAndKeywords() {
    let s = Segmenter::with_enrichment(
        SegmentationConfig::default(),
        Arc::new(MockEnrichment::working()),
        Arc::new(MockEnrichment::working()),
    );
    let chapters = s.segment(&common::english_chaptered_doc(3));

    assert_eq!(chapters.len(), 3);
    for chapter in &chapters {
        assert!(chapter.summary.starts_with("summary["));
        assert!(!chapter.keywords.is_empty());
        assert!(chapter.keywords.len() <= s.config().keyword_max_count);
    }
}

/// Test the built-in no-op enrichment summarizes from the body itself
#[test]
fn test_segment_withNoopEnrichment_shouldPrefixSummaries() {
    let chapters = segmenter().segment(&common::english_chaptered_doc(2));

    assert_eq!(chapters.len(), 2);
    for chapter in &chapters {
        assert_eq!(chapter.summary, chapter.body);
        assert!(chapter.keywords.is_empty());
    }
}

/// Test an installed break detector outranks the structure-free rungs
#[test]
fn test_segment_withBreakDetector_shouldUseDetectedOffsets() {
    let text = common::paragraph_doc(4);
    let half = text.chars().count() / 2;

    let mut s = segmenter();
    s.set_break_detector(Arc::new(MockBreakDetector::with_offsets(vec![0, half])));
    let chapters = s.segment(&text);

    assert_eq!(chapters.len(), 2);
}

/// Test a failing break detector degrades to the structure-free rungs
#[test]
fn test_segment_withFailingBreakDetector_shouldFallThrough() {
    let mut s = segmenter();
    s.set_break_detector(Arc::new(MockBreakDetector::failing()));
    let chapters = s.segment(&common::paragraph_doc(4));

    assert_eq!(chapters.len(), 4);
}

/// Test document segmentation matches plain segmentation of the same text
#[test]
fn test_segmentDocument_withDocId_shouldMatchPlainSegmentation() {
    let doc = RawDocument {
        id: "doc-42".to_string(),
        text: common::cjk_chaptered_doc(3),
    };

    let s = segmenter();
    let via_doc = s.segment_document(&doc);
    let via_text = s.segment(&doc.text);

    assert_eq!(via_doc.len(), via_text.len());
    for (a, b) in via_doc.iter().zip(via_text.iter()) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.body, b.body);
    }
}
