//! File intake: type check and read

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use super::error::PdfError;

/// MIME type accepted by intake
pub const PDF_MIME: &str = "application/pdf";

/// Declared MIME type of a file, judged by its extension
pub fn declared_mime(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => PDF_MIME,
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("epub") => "application/epub+zip",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// Turn user input into a path, expanding a leading `~/`
pub fn resolve_path(input: &str) -> PathBuf {
    let input = input.trim().trim_matches(|c| c == '"' || c == '\'');
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(input)
}

/// Validate that `path` is a PDF and read its full contents
pub fn read_pdf(path: &Path) -> Result<Vec<u8>, PdfError> {
    let mime = declared_mime(path);
    if mime != PDF_MIME {
        tracing::info!("Rejected {:?}: declared type {}", path, mime);
        return Err(PdfError::NotPdf { mime });
    }

    let bytes = std::fs::read(path)
        .map_err(|source| PdfError::Read { path: path.to_path_buf(), source })?;
    tracing::info!("Read {} bytes from {:?}", bytes.len(), path);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert_eq!(declared_mime(Path::new("notes.PDF")), PDF_MIME);
        assert_eq!(declared_mime(Path::new("dir/book.pdf")), PDF_MIME);
    }

    #[test]
    fn other_extensions_are_not_pdf() {
        assert_eq!(declared_mime(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(declared_mime(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn non_pdf_is_rejected_without_reading() {
        let err = read_pdf(Path::new("/definitely/missing/file.txt")).unwrap_err();
        assert!(matches!(err, PdfError::NotPdf { mime: "text/plain" }));
        assert!(err.to_string().starts_with("Please choose a PDF file"));
    }

    #[test]
    fn missing_pdf_is_read_error() {
        let err = read_pdf(Path::new("/definitely/missing/file.pdf")).unwrap_err();
        assert!(matches!(err, PdfError::Read { .. }));
    }

    #[test]
    fn reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.5 fake").unwrap();

        assert_eq!(read_pdf(&path).unwrap(), b"%PDF-1.5 fake".to_vec());
    }

    #[test]
    fn resolve_strips_quotes() {
        assert_eq!(resolve_path(" \"/tmp/a b.pdf\" "), PathBuf::from("/tmp/a b.pdf"));
    }
}
