//! Error types for PDF intake and extraction

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised before a document reaches content generation
///
/// The `Display` text is shown to the user next to the intake prompt.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The chosen file is not declared as a PDF
    #[error("Please choose a PDF file ({mime} is not supported).")]
    NotPdf {
        /// Declared MIME type of the rejected file
        mime: &'static str,
    },

    /// The file could not be read from disk
    #[error("Could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes could not be parsed as a PDF document
    #[error("Could not open the PDF: {0}")]
    Unreadable(String),

    /// Too little embedded text, usually a scanned or image-only document
    #[error(
        "The file does not contain enough text to analyse ({found} characters). \
         Make sure it is a text PDF and not just scanned images."
    )]
    InsufficientText {
        /// Trimmed character count actually extracted
        found: usize,
    },

    /// The extraction engine is not ready for use
    #[error("The PDF engine is not available yet. Please restart and try again.")]
    EngineUnavailable,
}

impl PdfError {
    /// Whether the user can fix this by picking another file
    pub fn is_input_error(&self) -> bool {
        !matches!(self, PdfError::EngineUnavailable)
    }
}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError::Unreadable(err.to_string())
    }
}
