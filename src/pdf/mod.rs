//! PDF intake and text extraction
//!
//! Intake validates and reads a user-chosen file; extraction turns the raw
//! bytes into one text string through an injected [`TextExtractor`].

pub mod error;
pub mod extract;
pub mod intake;

pub use error::PdfError;
pub use extract::{LopdfExtractor, TextExtractor, extract_text};
pub use intake::{declared_mime, read_pdf};

/// Minimum trimmed characters a document must yield to be worth studying
pub const DEFAULT_MIN_TEXT_CHARS: usize = 50;
