/*!
 * Tests for content normalization
 */

use chapterize::app_config::SegmentationConfig;
use chapterize::normalizer::{UPSTREAM_FAILURE_SENTINELS, contains_failure_sentinel, normalize};
use chapterize::titles::{Strictness, find_titles};

fn cfg() -> SegmentationConfig {
    SegmentationConfig::default()
}

/// Test sentinel detection over the known notices
#[test]
fn test_contains_failure_sentinel_withKnownNotices_shouldDetect() {
    for sentinel in UPSTREAM_FAILURE_SENTINELS {
        let text = format!("前文\n{}\n后文", sentinel);
        assert!(contains_failure_sentinel(&text), "missed {:?}", sentinel);
    }
    assert!(!contains_failure_sentinel("perfectly ordinary text"));
}

/// Test a scrape-failure notice forces conservative cleaning that keeps
/// blank lines and prose untouched
#[test]
fn test_normalize_withFailureSentinel_shouldCleanConservatively() {
    let raw = "【系统提示：抓取失败】\n\n第一章 起点\n正文在这里。\n\n第二章 落幕\n更多正文。";
    let cleaned = normalize(raw, &cfg());

    // Prose and blank lines survive untouched
    assert!(cleaned.contains("第一章 起点"));
    assert!(cleaned.contains("正文在这里。"));
    assert!(cleaned.contains("\n\n"));
}

/// Test the standard reader-page shape triggers conservative cleaning and
/// the boilerplate scrub
#[test]
fn test_normalize_withReaderPageShape_shouldDropNavigationAndUrls() {
    let raw = "第一章 起点 目录 上一章 下一章\n\
               正文第一段写了一些事情。\n\
               https://www.example.com/novel/1.html\n\
               上一章 目录 下一章\n\
               正文第二段写了别的事情。";
    let cleaned = normalize(raw, &cfg());

    assert!(cleaned.contains("正文第一段写了一些事情。"));
    assert!(cleaned.contains("正文第二段写了别的事情。"));
    assert!(!cleaned.contains("https://"));
    assert!(!cleaned.contains("上一章 目录 下一章"));
}

/// Test many chapter titles switch cleaning to conservative so line
/// structure is preserved verbatim
#[test]
fn test_normalize_withManyTitles_shouldPreserveLineStructure() {
    let raw = (1..=5)
        .map(|i| format!("第{}章 标题\n这一段正文保持原样。", i))
        .collect::<Vec<_>>()
        .join("\n");
    let cleaned = normalize(raw.as_str(), &cfg());

    for i in 1..=5 {
        assert!(cleaned.contains(&format!("第{}章 标题", i)));
    }
    assert!(cleaned.contains("这一段正文保持原样。"));
}

/// Test aggressive cleaning strips markup, control chars and the BOM
#[test]
fn test_normalize_withMarkupSoup_shouldStripTagsAndControls() {
    let raw = "\u{FEFF}<div class=\"page\">some prose\u{0007} here</div><br/>and more";
    let cleaned = normalize(raw, &cfg());

    assert!(!cleaned.contains('<'));
    assert!(!cleaned.contains('\u{FEFF}'));
    assert!(!cleaned.contains('\u{0007}'));
    assert!(cleaned.contains("some prose here"));
    assert!(cleaned.contains("and more"));
}

/// Test paragraph breaks are reinserted after CJK sentence terminators
#[test]
fn test_normalize_withFlattenedCjkProse_shouldRestoreParagraphBreaks() {
    let raw = "<p>第一句讲了开头。 第二句讲了后续。 第三句收尾。</p>";
    let cleaned = normalize(raw, &cfg());

    assert!(cleaned.contains("第一句讲了开头。\n"));
    assert!(cleaned.contains("第二句讲了后续。\n"));
}

/// Test existing line structure around titles survives aggressive cleaning
#[test]
fn test_normalize_withStructuredEnglishChapters_shouldKeepBoundaries() {
    let raw = "Chapter 1 Beginning\nbody one\n\nChapter 2 Development\nbody two";
    let cleaned = normalize(raw, &cfg());

    assert!(cleaned.contains("body one"));
    assert!(cleaned.contains("body two"));
    let titles = find_titles(&cleaned, Strictness::Anchored);
    assert_eq!(titles.len(), 2);
}

/// Test runs of blank lines collapse to a single blank line, which the
/// blank-line ladder rung depends on
#[test]
fn test_normalize_withBlankRuns_shouldKeepOneBlankLine() {
    let raw = "first paragraph of text\n\n\n\n\nsecond paragraph of text";
    let cleaned = normalize(raw, &cfg());

    assert!(cleaned.contains("first paragraph of text\n\nsecond paragraph of text"));
}

/// Test the safety valve reverts to raw text when cleaning destroyed
/// nearly everything
#[test]
fn test_normalize_withMostlyMarkup_shouldRevertToRaw() {
    let mut raw = "<div><span></span></div>".repeat(50);
    raw.push_str("tiny");
    let cleaned = normalize(&raw, &cfg());

    assert_eq!(cleaned, raw);
}

/// Test normalization is total for empty input
#[test]
fn test_normalize_withEmptyInput_shouldReturnEmpty() {
    let cleaned = normalize("", &cfg());
    assert!(cleaned.is_empty());
}
