use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::SegmentationConfig;
use crate::titles::{self, CJK_NUMERAL};

// @module: Title-list detection, is this a table of contents without bodies?

/// Markers left in place of content when an upstream fetch failed
pub const SCRAPE_FAILURE_MARKERS: [&str; 3] = ["抓取失败", "无法访问", "Error:"];

// Extraction accepts the volume/collection markers too, which the strict
// ladder patterns deliberately do not
static EXTRACT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^(?:第{num}+[章节卷回集]|[0-9]+\\.|[0-9]+[ \t])",
        num = CJK_NUMERAL
    ))
    .unwrap()
});

// Scraper status lines look like "12. Some Title ✓"
static STATUS_MARK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("\\s*[✓✗]\\s*$").unwrap());
static LEADING_INDEX_DOT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]+\\.\\s+").unwrap());
static LEADING_INDEX_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]+\\s+").unwrap());

fn is_title_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    EXTRACT_LINE_REGEX.is_match(trimmed)
        || titles::is_broad_title_line(trimmed)
        || titles::contains_title(trimmed)
}

/// Decide whether `text` is a bare chapter list with no real bodies.
///
/// The point is to stop downstream strategies from fabricating chapters out
/// of a table of contents when the real bodies failed to download. The
/// thresholds are empirically tuned and surfaced via config.
pub fn is_title_only(text: &str, cfg: &SegmentationConfig) -> bool {
    if text.trim().is_empty() {
        return true;
    }

    if SCRAPE_FAILURE_MARKERS.iter().any(|m| text.contains(m)) {
        warn!("Content carries a scrape-failure marker, treating as title-only");
        return true;
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return true;
    }

    let title_count = extract_chapter_titles(text, cfg).len();

    // Long content with few titles cannot be a bare list
    let content_chars = text.chars().count();
    if content_chars > cfg.long_content_length && title_count < cfg.long_content_min_titles {
        debug!(
            "Content is {} chars with only {} titles, judged to contain real bodies",
            content_chars, title_count
        );
        return false;
    }

    // Title lists have short lines on average
    let total_line_chars: usize = lines.iter().map(|l| l.chars().count()).sum();
    let avg_line_length = total_line_chars as f64 / lines.len() as f64;
    if avg_line_length > cfg.avg_line_length_limit {
        debug!(
            "Average line length {:.1} chars, judged to contain real bodies",
            avg_line_length
        );
        return false;
    }

    // A run of consecutive long non-title lines is paragraph structure
    let mut run = 0usize;
    let mut max_run = 0usize;
    for line in &lines {
        if line.chars().count() > cfg.prose_line_length && !is_title_candidate(line) {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 0;
        }
    }
    if max_run > cfg.prose_run_limit {
        debug!(
            "Found a run of {} long non-title lines, judged to contain real bodies",
            max_run
        );
        return false;
    }

    let ratio = title_count as f64 / lines.len() as f64;
    info!(
        "Content analysis: {} non-empty lines, {} titles, ratio {:.2}",
        lines.len(),
        title_count,
        ratio
    );

    let verdict = title_count > 0 && ratio > cfg.title_ratio_threshold;
    if verdict {
        warn!("Content looks like a bare chapter list without bodies");
    }
    verdict
}

/// Pull candidate chapter titles out of a (suspected) chapter list.
///
/// Scraper status marks and their leading indices are stripped; titles are
/// sanitized to the configured length bound. When nothing matches the
/// pattern table, a loose pass accepts any short line carrying a chapter
/// marker.
pub fn extract_chapter_titles(text: &str, cfg: &SegmentationConfig) -> Vec<String> {
    let mut out = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !is_title_candidate(trimmed) {
            continue;
        }

        let mut title = trimmed.to_string();
        if title.contains('✓') || title.contains('✗') {
            title = STATUS_MARK_REGEX.replace(&title, "").into_owned();
            if LEADING_INDEX_DOT_REGEX.is_match(&title) {
                title = LEADING_INDEX_DOT_REGEX.replace(&title, "").into_owned();
            } else if LEADING_INDEX_REGEX.is_match(&title) {
                title = LEADING_INDEX_REGEX.replace(&title, "").into_owned();
            }
        }

        out.push(titles::sanitize_title(&title, cfg.max_title_length));
    }

    if out.is_empty() && text.contains('章') {
        debug!("No pattern-table titles found, trying the loose marker scan");
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.chars().count() > cfg.loose_scan_line_limit {
                continue;
            }
            if trimmed.contains('章')
                && !trimmed.contains("系统提示")
                && !trimmed.contains("NOTICE")
            {
                out.push(titles::sanitize_title(trimmed, cfg.max_title_length));
            }
        }
    }

    debug!("Extracted {} candidate titles", out.len());
    out
}
