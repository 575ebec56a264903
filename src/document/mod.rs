//! Document-to-text adapter.
//!
//! Converts uploaded SoF bytes (TXT, DOCX, PDF, or a base64 `data:` URI)
//! into plain text for the extraction gateway. Parse failures are ordinary
//! error values surfaced as user-visible request errors.

use std::io::Read;

use base64::Engine;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors produced while turning a document into text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Failed to parse document: {0}")]
    Parse(String),
}

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Txt,
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Detect the format from a file name extension.
    pub fn from_name(name: &str) -> Result<Self, DocumentError> {
        let ext = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Ok(DocumentKind::Txt),
            "docx" => Ok(DocumentKind::Docx),
            "pdf" => Ok(DocumentKind::Pdf),
            _ => Err(DocumentError::UnsupportedType(name.to_string())),
        }
    }

    /// Detect the format from a MIME type.
    pub fn from_mime(mime: &str) -> Result<Self, DocumentError> {
        match mime {
            "text/plain" => Ok(DocumentKind::Txt),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(DocumentKind::Docx)
            }
            "application/pdf" => Ok(DocumentKind::Pdf),
            other => Err(DocumentError::UnsupportedType(other.to_string())),
        }
    }
}

/// Extract plain text from document bytes.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DocumentKind::Docx => extract_docx_text(bytes),
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Parse(format!("PDF: {}", e))),
    }
}

/// Decode a `data:<mime>;base64,<bytes>` URI into (mime, bytes).
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), DocumentError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| DocumentError::InvalidDataUri("missing data: prefix".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DocumentError::InvalidDataUri("missing comma separator".to_string()))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| DocumentError::InvalidDataUri("only base64 payloads are supported".to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DocumentError::InvalidDataUri(format!("bad base64: {}", e)))?;

    Ok((mime.to_string(), bytes))
}

/// Extract text from a `data:` URI, dispatching on its MIME type.
pub fn extract_text_from_data_uri(uri: &str) -> Result<String, DocumentError> {
    let (mime, bytes) = decode_data_uri(uri)?;
    let kind = DocumentKind::from_mime(&mime)?;
    extract_text(&bytes, kind)
}

/// DOCX is zipped OOXML: pull `word/document.xml` out of the archive and
/// strip the markup, emitting one line per paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| DocumentError::Parse(format!("DOCX: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Parse(format!("DOCX: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Parse(format!("DOCX: {}", e)))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let chunk = t
                    .unescape()
                    .map_err(|e| DocumentError::Parse(format!("DOCX: {}", e)))?;
                text.push_str(&chunk);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DocumentError::Parse(format!("DOCX: {}", e))),
        }
    }

    Ok(text)
}
