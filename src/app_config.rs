use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Segmentation pipeline tuning
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Tuning knobs for the segmentation pipeline.
///
/// The defaults are empirically tuned for scraped web-novel content and
/// should not be changed casually. They live here rather than as literals so
/// callers with different formatting conventions can adjust them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Chars of raw text inspected when guessing the page shape
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// More probable titles than this anywhere in the text switches the
    /// normalizer to conservative cleaning
    #[serde(default = "default_conservative_title_threshold")]
    pub conservative_title_threshold: usize,

    /// Cleaned text shorter than this fraction of the raw text is discarded
    /// in favor of the raw text
    #[serde(default = "default_cleaning_floor_ratio")]
    pub cleaning_floor_ratio: f64,

    /// Content longer than this cannot be a bare title list unless it also
    /// carries at least `long_content_min_titles` titles
    #[serde(default = "default_long_content_length")]
    pub long_content_length: usize,

    /// See `long_content_length`
    #[serde(default = "default_long_content_min_titles")]
    pub long_content_min_titles: usize,

    /// Average non-empty line length above which content is judged to be
    /// prose rather than a title list
    #[serde(default = "default_avg_line_length_limit")]
    pub avg_line_length_limit: f64,

    /// A non-title line longer than this counts toward a prose run
    #[serde(default = "default_prose_line_length")]
    pub prose_line_length: usize,

    /// A prose run longer than this many consecutive lines vetoes the
    /// title-list verdict
    #[serde(default = "default_prose_run_limit")]
    pub prose_run_limit: usize,

    /// Title lines / non-empty lines ratio above which content is judged to
    /// be a bare title list
    #[serde(default = "default_title_ratio_threshold")]
    pub title_ratio_threshold: f64,

    /// Window size in chars for the fixed-length split
    #[serde(default = "default_window_length")]
    pub window_length: usize,

    /// Fraction of a window past which a sentence terminator is accepted as
    /// an early cut point
    #[serde(default = "default_sentence_trim_ratio")]
    pub sentence_trim_ratio: f64,

    /// Maximum chapter title length in chars
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,

    /// Maximum summary length requested from the summarizer
    #[serde(default = "default_summary_max_length")]
    pub summary_max_length: usize,

    /// Maximum keyword count requested from the keyword extractor
    #[serde(default = "default_keyword_max_count")]
    pub keyword_max_count: usize,

    /// Lines longer than this are skipped by the loose chapter-marker scan
    #[serde(default = "default_loose_scan_line_limit")]
    pub loose_scan_line_limit: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            preview_length: default_preview_length(),
            conservative_title_threshold: default_conservative_title_threshold(),
            cleaning_floor_ratio: default_cleaning_floor_ratio(),
            long_content_length: default_long_content_length(),
            long_content_min_titles: default_long_content_min_titles(),
            avg_line_length_limit: default_avg_line_length_limit(),
            prose_line_length: default_prose_line_length(),
            prose_run_limit: default_prose_run_limit(),
            title_ratio_threshold: default_title_ratio_threshold(),
            window_length: default_window_length(),
            sentence_trim_ratio: default_sentence_trim_ratio(),
            max_title_length: default_max_title_length(),
            summary_max_length: default_summary_max_length(),
            keyword_max_count: default_keyword_max_count(),
            loose_scan_line_limit: default_loose_scan_line_limit(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_preview_length() -> usize {
    300
}

fn default_conservative_title_threshold() -> usize {
    3
}

fn default_cleaning_floor_ratio() -> f64 {
    0.1
}

fn default_long_content_length() -> usize {
    1000
}

fn default_long_content_min_titles() -> usize {
    20
}

fn default_avg_line_length_limit() -> f64 {
    50.0
}

fn default_prose_line_length() -> usize {
    30
}

fn default_prose_run_limit() -> usize {
    3
}

fn default_title_ratio_threshold() -> f64 {
    0.7
}

fn default_window_length() -> usize {
    3000
}

fn default_sentence_trim_ratio() -> f64 {
    0.8
}

fn default_max_title_length() -> usize {
    255
}

fn default_summary_max_length() -> usize {
    200
}

fn default_keyword_max_count() -> usize {
    10
}

fn default_loose_scan_line_limit() -> usize {
    50
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;

        if seg.title_ratio_threshold <= 0.0 || seg.title_ratio_threshold >= 1.0 {
            return Err(anyhow!(
                "title_ratio_threshold must be within (0, 1), got {}",
                seg.title_ratio_threshold
            ));
        }

        if seg.sentence_trim_ratio <= 0.0 || seg.sentence_trim_ratio >= 1.0 {
            return Err(anyhow!(
                "sentence_trim_ratio must be within (0, 1), got {}",
                seg.sentence_trim_ratio
            ));
        }

        if seg.cleaning_floor_ratio < 0.0 || seg.cleaning_floor_ratio >= 1.0 {
            return Err(anyhow!(
                "cleaning_floor_ratio must be within [0, 1), got {}",
                seg.cleaning_floor_ratio
            ));
        }

        if seg.window_length == 0 {
            return Err(anyhow!("window_length must be greater than zero"));
        }

        // Need room for a chapter marker plus the 3-char ellipsis
        if seg.max_title_length < 8 {
            return Err(anyhow!(
                "max_title_length must be at least 8, got {}",
                seg.max_title_length
            ));
        }

        if seg.avg_line_length_limit <= 0.0 {
            return Err(anyhow!("avg_line_length_limit must be positive"));
        }

        Ok(())
    }

    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from a file if it exists, otherwise defaults
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Save the configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path.display(), e))?;

        Ok(())
    }
}
