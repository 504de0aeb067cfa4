/*!
 * Error types for the chapterize library.
 *
 * This module contains custom error types for different parts of the crate,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Note that `Segmenter::segment` itself is total: every internal failure
 * degrades to a later ladder rung or a fallback value instead of surfacing.
 * The types here cover the fallible edges: enrichment collaborators and
 * configuration handling.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling an enrichment collaborator
/// (summarizer, keyword extractor, chapter-break detector)
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// The backing NLP service failed while handling the request
    #[error("Enrichment backend failed: {0}")]
    Backend(String),

    /// The backing NLP service could not be reached at all
    #[error("Enrichment backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered, but with something unusable
    #[error("Invalid enrichment response: {0}")]
    InvalidResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error loading or validating configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from an enrichment collaborator
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
