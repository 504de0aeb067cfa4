use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::chapter::{TitleMatch, UNTITLED_CHAPTER_TITLE};

// @module: Shared chapter-title pattern table, matcher and title sanitizer

/// Numeral class accepted inside `第N章` style markers: Arabic digits plus
/// the common CJK numerals
pub const CJK_NUMERAL: &str = "[0-9零一二三四五六七八九十百千万]";

/// Chars that terminate the numbered part of a CJK chapter marker
pub const CHAPTER_MARKERS: [char; 3] = ['章', '回', '节'];

// @const: Strict title alternation, shared by every anchored pattern below.
// Order matters: the CJK form, the English form, the bare "N." prefix, then
// the loose "第...章" form. Leftmost alternative wins at each position.
static STRICT_TITLE_ALTERNATION: Lazy<String> = Lazy::new(|| {
    format!(
        "第{num}+[章回节][^\n]*|Chapter[ \t]*[0-9]+[^\n]*|[0-9]+\\.[^\n]*|第[^\n]{{1,10}}章[^\n]*",
        num = CJK_NUMERAL
    )
});

// @const: Strict titles anchored at line starts
static ANCHORED_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("(?m)^[ \t]*({})$", &*STRICT_TITLE_ALTERNATION)).unwrap()
});

// @const: Broad titles anchored at line starts (adds bare "N " prefixes)
static BROAD_ANCHORED_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?m)^[ \t]*({}|[0-9]+[ \t]+[^\n]*)$",
        &*STRICT_TITLE_ALTERNATION
    ))
    .unwrap()
});

// @const: Unanchored title heads for loose block matching
static LOOSE_TITLE_HEAD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "第{num}+[章回节]|Chapter[ \t]*[0-9]+",
        num = CJK_NUMERAL
    ))
    .unwrap()
});

// @const: Strict title test for a single trimmed line
static STRICT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:第{num}+[章回节]|Chapter[ \t]*[0-9]+|[0-9]+\\.|第.{{1,10}}章)",
        num = CJK_NUMERAL
    ))
    .unwrap()
});

// @const: Broad title test for a single trimmed line
static BROAD_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:第{num}+[章回节]|Chapter[ \t]*[0-9]+|[0-9]+\\.|[0-9]+[ \t]+|第.{{1,10}}章)",
        num = CJK_NUMERAL
    ))
    .unwrap()
});

// @const: Title occurring anywhere inside a line (used by the classifier)
static INTERIOR_TITLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("第{num}+[章节]", num = CJK_NUMERAL)).unwrap()
});

/// How strictly titles are matched by [`find_titles`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Strict patterns anchored at line starts
    Anchored,
    /// Unanchored title heads, matched anywhere
    Loose,
    /// Anchored patterns including bare "N " prefixed lines
    Broad,
}

/// Find all title occurrences in `text` at the given strictness.
///
/// Matches are non-overlapping, scanned left to right, leftmost match
/// winning at each position. Offsets are byte offsets into `text`.
pub fn find_titles(text: &str, strictness: Strictness) -> Vec<TitleMatch> {
    let regex: &Regex = match strictness {
        Strictness::Anchored => &ANCHORED_TITLE_REGEX,
        Strictness::Loose => &LOOSE_TITLE_HEAD_REGEX,
        Strictness::Broad => &BROAD_ANCHORED_TITLE_REGEX,
    };

    regex
        .find_iter(text)
        .map(|m| TitleMatch {
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Whether a trimmed line starts like a chapter title (strict set)
pub fn is_title_line(line: &str) -> bool {
    STRICT_LINE_REGEX.is_match(line.trim())
}

/// Whether a trimmed line starts like a chapter title, including bare
/// numeric prefixes (broad set)
pub fn is_broad_title_line(line: &str) -> bool {
    BROAD_LINE_REGEX.is_match(line.trim())
}

/// Whether a chapter marker occurs anywhere inside the line
pub fn contains_title(line: &str) -> bool {
    INTERIOR_TITLE_REGEX.is_match(line) || is_title_line(line)
}

/// Enforce the title length bound while preserving numbering semantics.
///
/// Lengths are counted in chars, never bytes, so the cap holds for CJK
/// titles. When the title carries a chapter marker and the marker leaves
/// room, the prefix through the marker plus as much trailing text as fits is
/// kept and a 3-char ellipsis appended; otherwise the title is hard-cut to
/// `max_len - 3` chars plus the ellipsis. Empty input maps to a fixed
/// untitled-chapter string.
pub fn sanitize_title(title: &str, max_len: usize) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return UNTITLED_CHAPTER_TITLE.to_string();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= max_len {
        return trimmed.to_string();
    }

    warn!(
        "Chapter title too long ({} chars), truncating to {}",
        chars.len(),
        max_len
    );

    // Prefer cutting after the chapter marker so the numbering survives.
    // Markers are probed in fixed order, the numbered form first.
    let marker_idx = CHAPTER_MARKERS
        .iter()
        .find_map(|marker| chars.iter().position(|c| c == marker));

    if let Some(idx) = marker_idx {
        // Saturating guard: tiny budgets skip straight to the hard cut
        if idx < max_len.saturating_sub(10) {
            let keep_through = idx + 1;
            let remaining = max_len - keep_through - 3;
            if remaining > 0 && keep_through + remaining < chars.len() {
                let head: String = chars[..keep_through + remaining].iter().collect();
                return format!("{}...", head);
            }
        }
    }

    let head: String = chars[..max_len - 3].iter().collect();
    format!("{}...", head)
}
