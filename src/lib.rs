/*!
 * # chapterize
 *
 * A Rust library for turning raw, frequently malformed text (scraped from
 * arbitrary web sources or uploaded as flat files) into an ordered
 * sequence of chapter records.
 *
 * ## Features
 *
 * - Mode-switching content normalization that never destroys prose
 * - A shared chapter-title pattern table (CJK and English conventions)
 * - Title-list detection to avoid fabricating chapters out of a bare
 *   table of contents
 * - A nine-rung segmentation ladder with a hard guarantee of producing
 *   at least one chapter from any input
 * - Injected, failure-tolerant enrichment collaborators (summary,
 *   keywords, optional break detection)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management, including every tuned threshold
 * - `chapter`: The chapter data model and synthesized-content constants
 * - `normalizer`: Conservative/aggressive content cleaning
 * - `titles`: Title pattern table, matcher and title sanitizer
 * - `classifier`: Bare-chapter-list detection
 * - `ladder`: The ordered fallback segmentation strategies
 * - `segmenter`: The pipeline orchestrator and crate entry point
 * - `enrichment`: Collaborator traits, no-op fallback and test mocks
 * - `errors`: Custom error types
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod chapter;
pub mod classifier;
pub mod enrichment;
pub mod errors;
pub mod ladder;
pub mod normalizer;
pub mod segmenter;
pub mod titles;

// Re-export main types for easier usage
pub use app_config::{Config, SegmentationConfig};
pub use chapter::{ChapterRecord, RawDocument};
pub use errors::{AppError, EnrichmentError};
pub use segmenter::Segmenter;
pub use titles::Strictness;
