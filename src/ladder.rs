use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::SegmentationConfig;
use crate::chapter::{ChapterDraft, TitleMatch, default_title};
use crate::titles::{self, CJK_NUMERAL, Strictness};

// @module: Ordered fallback strategies producing chapter boundaries
//
// Every strategy is a pure function of the normalized text. A strategy
// succeeds only when it yields at least two chapters; a lone inferred
// chapter is not a structural success and the ladder continues. The two
// fallback rungs at the bottom always terminate the ladder together with
// the orchestrator's single-chapter case.

/// A ladder rung: pure, deterministic, no side effects beyond the result
pub type Strategy = fn(&str, &SegmentationConfig) -> Option<Vec<ChapterDraft>>;

/// Title-based rungs, in fixed execution order
pub const TITLE_RUNGS: [(&str, Strategy); 6] = [
    ("anchored title split", split_by_anchored_titles),
    ("loose block split", split_by_loose_blocks),
    ("common-pattern split", split_by_common_patterns),
    ("title-line split", split_by_title_lines),
    ("title-block split", split_by_title_blocks),
    ("strict title-line split", split_by_strict_title_lines),
];

/// Structure-free rungs tried after every title-based rung failed
pub const FALLBACK_RUNGS: [(&str, Strategy); 2] = [
    ("blank-line split", split_by_blank_lines),
    ("fixed-length split", split_by_fixed_length),
];

const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

// Alternative title heads tried in fixed order by the common-pattern rung
static COMMON_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        "第[^\n]*?章".to_string(),
        "Chapter[ \t]*[0-9]+".to_string(),
        "[0-9]+\\.".to_string(),
        format!("第[ \t]*{num}+[ \t]*[章节]", num = CJK_NUMERAL),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static MULTI_BLANK_SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("\n[ \t]*\n[ \t]*\n+").unwrap());
static SINGLE_BLANK_SPLIT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("\n[ \t]*\n+").unwrap());

/// Rung 1: anchored title matches, document sliced between consecutive
/// match offsets. Title is the matched line, body the slice with the title
/// line removed. Drafts with empty bodies are dropped; a table of contents
/// must not succeed here.
pub fn split_by_anchored_titles(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    let matches = titles::find_titles(text, Strictness::Anchored);
    debug!("Anchored split found {} title lines", matches.len());
    if matches.len() < 2 {
        return None;
    }
    accept(slice_blocks(text, &matches))
}

/// Rung 2: unanchored title heads, each block running from one occurrence
/// to just before the next.
pub fn split_by_loose_blocks(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    let matches = titles::find_titles(text, Strictness::Loose);
    debug!("Loose split found {} title heads", matches.len());
    if matches.len() < 2 {
        return None;
    }
    accept(slice_blocks(text, &matches))
}

/// Rung 3: alternative title patterns tried in fixed order; the first one
/// producing at least two greedy blocks wins.
pub fn split_by_common_patterns(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    for pattern in COMMON_PATTERNS.iter() {
        let matches: Vec<TitleMatch> = pattern
            .find_iter(text)
            .map(|m| TitleMatch {
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect();

        debug!(
            "Common pattern '{}' found {} occurrences",
            pattern.as_str(),
            matches.len()
        );

        if matches.len() >= 2 {
            if let Some(drafts) = accept(slice_blocks(text, &matches)) {
                return Some(drafts);
            }
        }
    }
    None
}

/// Rung 4: line scan with the broad title predicate (bare "N " lines
/// included); chapter bodies are the lines strictly between title lines.
pub fn split_by_title_lines(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    split_by_line_predicate(text, titles::is_broad_title_line, true)
}

/// Rung 5: anchored broad title lines, each block running from the title
/// line up to (not including) the next title line or end of text.
pub fn split_by_title_blocks(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    let matches = titles::find_titles(text, Strictness::Broad);
    debug!("Block split found {} title lines", matches.len());
    if matches.len() < 2 {
        return None;
    }
    accept(slice_blocks(text, &matches))
}

/// Rung 6: mechanics of rung 4 with the strict pattern set, the last
/// title-based resort. Bodies may come out empty here.
pub fn split_by_strict_title_lines(
    text: &str,
    _cfg: &SegmentationConfig,
) -> Option<Vec<ChapterDraft>> {
    split_by_line_predicate(text, titles::is_title_line, false)
}

/// Rung 7: split on runs of two or more blank lines, falling back to
/// single-blank-line splitting. The first line of a block becomes its title
/// when it is title-shaped; otherwise the block keeps its text and gets a
/// sequential title.
pub fn split_by_blank_lines(text: &str, _cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    let mut blocks: Vec<&str> = MULTI_BLANK_SPLIT_REGEX
        .split(text)
        .filter(|b| !b.trim().is_empty())
        .collect();
    debug!("Blank-line split found {} multi-blank blocks", blocks.len());

    if blocks.len() < 2 {
        blocks = SINGLE_BLANK_SPLIT_REGEX
            .split(text)
            .filter(|b| !b.trim().is_empty())
            .collect();
        debug!("Blank-line split found {} single-blank blocks", blocks.len());
    }

    if blocks.len() < 2 {
        return None;
    }

    let mut drafts = Vec::with_capacity(blocks.len());
    for block in blocks {
        let block = block.trim();
        let (first_line, remainder) = match block.split_once('\n') {
            Some((first, rest)) => (first.trim(), rest),
            None => (block, ""),
        };

        if titles::is_title_line(first_line) || titles::contains_title(first_line) {
            drafts.push(ChapterDraft::new(first_line, remainder));
        } else {
            drafts.push(ChapterDraft::new(&default_title(drafts.len() + 1), block));
        }
    }

    accept(drafts)
}

/// Rung 8: fixed-length windows over the text. When a window's natural end
/// falls inside its final stretch past `sentence_trim_ratio`, the window is
/// cut at the nearest preceding sentence terminator instead. Fails when the
/// document fits in a single window.
pub fn split_by_fixed_length(text: &str, cfg: &SegmentationConfig) -> Option<Vec<ChapterDraft>> {
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();
    if total == 0 {
        return None;
    }

    let window = cfg.window_length;
    let count = total.div_ceil(window);
    debug!(
        "Fixed-length split over {} chars, {} windows of {}",
        total, count, window
    );
    if count < 2 {
        return None;
    }

    let mut drafts = Vec::with_capacity(count);
    for i in 0..count {
        let start = i * window;
        let end = (start + window).min(total);
        let mut slice = &chars[start..end];

        // Prefer a sentence boundary near the window end over a mid-sentence
        // cut. Windows stay at fixed offsets; trimmed tails are dropped.
        if end < total {
            if let Some(pos) = slice
                .iter()
                .rposition(|c| SENTENCE_TERMINATORS.contains(c))
            {
                if pos as f64 > slice.len() as f64 * cfg.sentence_trim_ratio {
                    slice = &slice[..=pos];
                }
            }
        }

        let body: String = slice.iter().collect();
        drafts.push(ChapterDraft::new(&default_title(i + 1), &body));
    }

    accept(drafts)
}

/// Rung 9: the entire text as a single chapter. Never fails; the
/// orchestrator falls through to this when everything else came up short.
pub fn single_chapter(text: &str) -> Vec<ChapterDraft> {
    vec![ChapterDraft::new(&default_title(1), text)]
}

/// Turn chapter-break char offsets from an external detector into drafts.
/// The first line of each slice becomes the title when it is title-shaped.
pub fn split_at_offsets(text: &str, offsets: &[usize]) -> Vec<ChapterDraft> {
    let chars: Vec<char> = text.chars().collect();
    let mut bounds: Vec<usize> = offsets
        .iter()
        .copied()
        .filter(|&o| o < chars.len())
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut drafts = Vec::with_capacity(bounds.len());
    for (i, &start) in bounds.iter().enumerate() {
        let end = bounds.get(i + 1).copied().unwrap_or(chars.len());
        let block: String = chars[start..end].iter().collect();
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let (first_line, remainder) = match block.split_once('\n') {
            Some((first, rest)) => (first.trim(), rest),
            None => (block, ""),
        };

        if titles::is_title_line(first_line) || titles::contains_title(first_line) {
            drafts.push(ChapterDraft::new(first_line, remainder));
        } else {
            drafts.push(ChapterDraft::new(&default_title(drafts.len() + 1), block));
        }
    }
    drafts
}

// Slice the text between consecutive match offsets. The first line of every
// slice is the title, the rest the body.
fn slice_blocks(text: &str, matches: &[TitleMatch]) -> Vec<ChapterDraft> {
    let mut drafts = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let end = matches.get(i + 1).map_or(text.len(), |next| next.start);
        let block = text[m.start..end].trim();

        let (title, body) = match block.split_once('\n') {
            Some((first, rest)) => (first.trim(), rest.trim()),
            None => (block, ""),
        };

        if body.is_empty() {
            continue;
        }
        drafts.push(ChapterDraft::new(title, body));
    }

    drafts
}

// Line-index split: bodies are the lines strictly between title lines
fn split_by_line_predicate(
    text: &str,
    predicate: fn(&str) -> bool,
    drop_empty: bool,
) -> Option<Vec<ChapterDraft>> {
    let lines: Vec<&str> = text.lines().collect();

    let title_indices: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && predicate(line))
        .map(|(i, _)| i)
        .collect();

    debug!("Line scan found {} title lines", title_indices.len());
    if title_indices.len() < 2 {
        return None;
    }

    let mut drafts = Vec::with_capacity(title_indices.len());
    for (i, &title_idx) in title_indices.iter().enumerate() {
        let end = title_indices.get(i + 1).copied().unwrap_or(lines.len());
        let body = lines[title_idx + 1..end].join("\n");
        let body = body.trim();

        if drop_empty && body.is_empty() {
            continue;
        }
        drafts.push(ChapterDraft::new(lines[title_idx].trim(), body));
    }

    accept(drafts)
}

// A rung succeeds only with two or more chapters
fn accept(drafts: Vec<ChapterDraft>) -> Option<Vec<ChapterDraft>> {
    if drafts.len() >= 2 { Some(drafts) } else { None }
}
