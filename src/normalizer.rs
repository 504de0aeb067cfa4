use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::SegmentationConfig;
use crate::titles::{self, CJK_NUMERAL, Strictness};

// @module: Raw content cleaning without destroying prose

/// Notices an upstream scraper leaves behind when a fetch failed. Their
/// presence means the text must be cleaned conservatively, never rewritten.
pub const UPSTREAM_FAILURE_SENTINELS: [&str; 4] = [
    "【系统提示：抓取内容失败】",
    "【系统提示：抓取失败】",
    "【系统提示：处理章节列表时出错】",
    "[SCRAPE FAILED]",
];

// Navigation vocabulary of a standard chaptered reader page. ASCII entries
// are matched case-insensitively.
const NAVIGATION_WORDS: [&str; 6] = [
    "目录",
    "上一章",
    "下一章",
    "table of contents",
    "previous chapter",
    "next chapter",
];

// Lines dropped outright during conservative cleaning (exact matches after
// trimming). URL-only lines are handled separately.
const BOILERPLATE_LINES: [&str; 7] = [
    "上一章 目录 下一章",
    "笔趣阁",
    "笔趣阁手机版",
    "访问：",
    "Previous Chapter",
    "Next Chapter",
    "Table of Contents",
];

// Site widgets whose presence warrants the deeper boilerplate scrub
const SITE_WIDGET_MARKERS: [&str; 4] = ["请收藏本站", "笔趣阁", "加入书签", "点此报错"];

const HTML_ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

static TAG_TO_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("<[^>]+>").unwrap());
static TAG_TO_EMPTY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("<[^>]*>").unwrap());
static HORIZONTAL_WS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[ \t\r\u{0B}\u{0C}]+").unwrap());
static BLANK_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("\n[ \t]*\n(?:[ \t]*\n)+").unwrap());
static NUMBERED_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]+\\.").unwrap());

// Title forms that get their own line reinserted during aggressive cleaning.
// Trailing text runs until sentence punctuation.
static CJK_TITLE_INLINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(第{num}+[章节][^，。！？；,.!?;\n]*)",
        num = CJK_NUMERAL
    ))
    .unwrap()
});
static EN_TITLE_INLINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("(Chapter[ \t]*[0-9]+[^，。！？；,.!?;\n]*)").unwrap());

// Scraper leftovers removed during the deep scrub of standard reader pages
static BOILERPLATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "请收藏本站：.*",
        "笔趣阁.*https?://\\S+",
        "『.*?加入书签.*?』",
        "『.*?点此报错.*?』",
        "上一章.*?目录.*?下一章",
        ".*?手机版：.*?https?://\\S+",
        "https?://\\S+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Whether the text carries a known upstream-failure sentinel
pub fn contains_failure_sentinel(text: &str) -> bool {
    UPSTREAM_FAILURE_SENTINELS.iter().any(|s| text.contains(s))
}

/// Clean raw scraped or uploaded text without destroying prose.
///
/// Total: never fails and never returns an empty string for non-empty input.
/// Mode selection happens first (conservative for content that already looks
/// chaptered, aggressive otherwise); a safety valve reverts to the raw text
/// whenever cleaning removed too much of it.
pub fn normalize(raw: &str, cfg: &SegmentationConfig) -> String {
    let raw_chars = raw.chars().count();
    debug!("Normalizing content, {} chars", raw_chars);

    let cleaned = clean(raw, cfg);

    let cleaned_chars = cleaned.chars().count();
    if cleaned.trim().is_empty()
        || (cleaned_chars as f64) < raw_chars as f64 * cfg.cleaning_floor_ratio
    {
        warn!(
            "Cleaning reduced content from {} to {} chars, reverting to raw text",
            raw_chars, cleaned_chars
        );
        return raw.to_string();
    }

    debug!("Normalization done, {} chars", cleaned_chars);
    cleaned
}

fn clean(raw: &str, cfg: &SegmentationConfig) -> String {
    if contains_failure_sentinel(raw) {
        warn!("Content carries a scrape-failure notice, using conservative cleaning");
        return conservative_clean(raw);
    }

    // Shape check on the head of the document: a title pattern next to
    // navigation vocabulary marks a standard chaptered reader page
    let preview: String = raw.chars().take(cfg.preview_length).collect();
    let has_title_shape = titles::contains_title(&preview)
        || preview.contains("Chapter")
        || NUMBERED_LINE_REGEX.is_match(&preview);
    let preview_lower = preview.to_lowercase();
    let has_navigation = NAVIGATION_WORDS.iter().any(|w| preview_lower.contains(w));

    if has_title_shape && has_navigation {
        info!("Standard chaptered page shape detected, using conservative cleaning");
        return scrub_boilerplate(&conservative_clean(raw));
    }

    let title_count = titles::find_titles(raw, Strictness::Loose).len();
    if title_count > cfg.conservative_title_threshold {
        info!(
            "Found {} probable chapter titles, using conservative cleaning",
            title_count
        );
        let cleaned = conservative_clean(raw);
        if SITE_WIDGET_MARKERS.iter().any(|m| cleaned.contains(m)) {
            debug!("Site widgets detected, scrubbing boilerplate");
            return scrub_boilerplate(&cleaned);
        }
        return cleaned;
    }

    aggressive_clean(raw)
}

/// Strip markup and boilerplate lines, leave everything else untouched,
/// blank lines included.
fn conservative_clean(content: &str) -> String {
    let mut text = TAG_TO_EMPTY_REGEX.replace_all(content, "").into_owned();
    for (entity, replacement) in HTML_ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    let mut cleaned = String::with_capacity(text.len());
    let mut dropped = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            cleaned.push('\n');
            continue;
        }
        if is_boilerplate_line(trimmed) {
            dropped += 1;
            continue;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }

    debug!("Conservative cleaning dropped {} boilerplate lines", dropped);
    cleaned
}

fn is_boilerplate_line(trimmed: &str) -> bool {
    BOILERPLATE_LINES.contains(&trimmed)
        || trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
}

fn scrub_boilerplate(content: &str) -> String {
    let mut text = content.to_string();
    for pattern in BOILERPLATE_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text
}

/// Rebuild readable structure out of markup soup: strip tags and control
/// chars, restore paragraph breaks and title lines, squeeze blank runs.
/// Newlines already present are kept so line-structured input survives.
fn aggressive_clean(content: &str) -> String {
    let mut text = TAG_TO_SPACE_REGEX.replace_all(content, " ").into_owned();

    text = HORIZONTAL_WS_REGEX.replace_all(&text, " ").into_owned();

    text = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();

    if let Some(stripped) = text.strip_prefix('\u{FEFF}') {
        text = stripped.to_string();
    }

    // Paragraph breaks after sentence-terminal punctuation
    for terminator in ['。', '！', '？'] {
        let from = format!("{} ", terminator);
        let to = format!("{}\n", terminator);
        if text.contains(&from) {
            text = text.replace(&from, &to);
        }
    }

    // Titles back onto their own lines
    text = CJK_TITLE_INLINE_REGEX
        .replace_all(&text, "\n$1\n")
        .into_owned();
    text = EN_TITLE_INLINE_REGEX
        .replace_all(&text, "\n$1\n")
        .into_owned();

    // Blank-line runs down to a single blank line; single blank lines stay,
    // the blank-line ladder rung depends on them
    text = BLANK_RUN_REGEX.replace_all(&text, "\n\n").into_owned();

    text
}
