//! Uploaded document handling: reading the multipart `file` field and
//! pulling plain text out of PDF, DOCX and TXT files.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use axum::extract::Multipart;
use bytes::Bytes;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::errors::AppError;

const UPLOAD_FIELD: &str = "file";
const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format. Please upload a PDF, DOCX, or TXT file.")]
    Unsupported(String),

    #[error("Extracted text is empty.")]
    Empty,

    #[error("Could not read document: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Resolves the kind from a filename's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" => Ok(DocumentKind::Text),
            _ => Err(ExtractError::Unsupported(filename.to_string())),
        }
    }
}

/// A file received through a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Reads the `file` field from a multipart body. Other fields are ignored.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;

        return Ok(Upload { filename, bytes });
    }

    Err(AppError::Validation(
        "Missing 'file' field in multipart body".to_string(),
    ))
}

/// Extracts plain text from an uploaded document.
///
/// The kind is chosen by extension before the bytes are looked at, so an
/// unsupported upload is rejected without parsing anything.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let content = match DocumentKind::from_filename(filename)? {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx => extract_docx(bytes)?,
        DocumentKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    if content.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    Ok(content)
}

/// Runs `extract_text` for an upload on the blocking pool. A panic inside a
/// parser is reported as a malformed document.
pub async fn extract_upload(upload: Upload) -> Result<String, AppError> {
    let Upload { filename, bytes } = upload;
    let text = tokio::task::spawn_blocking(move || extract_text(&filename, &bytes))
        .await
        .map_err(|e| AppError::from(ExtractError::Malformed(format!("parser aborted: {e}"))))??;
    Ok(text)
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Malformed(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ExtractError::Malformed(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    Ok(docx_paragraphs(&xml).join("\n"))
}

/// Collects the text runs of each `<w:p>` paragraph in a WordprocessingML body.
fn docx_paragraphs(xml: &str) -> Vec<String> {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static RUN: OnceLock<Regex> = OnceLock::new();

    let paragraph = PARAGRAPH.get_or_init(|| {
        Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("paragraph pattern is valid")
    });
    let run = RUN.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?: [^>]*)?>(.*?)</w:t>").expect("run pattern is valid")
    });

    paragraph
        .find_iter(xml)
        .map(|p| {
            run.captures_iter(p.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| decode_xml_entities(m.as_str()))
                .collect::<String>()
        })
        .collect()
}

/// Decodes the predefined XML entities and numeric character references in a
/// single pass. Unknown or invalid references are kept as written.
fn decode_xml_entities(text: &str) -> String {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    let entity = ENTITY.get_or_init(|| {
        Regex::new(r"&(#x[0-9A-Fa-f]+|#[0-9]+|lt|gt|amp|quot|apos);")
            .expect("entity pattern is valid")
    });

    entity
        .replace_all(text, |caps: &Captures<'_>| {
            let decoded = match &caps[1] {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                reference => {
                    let code = match reference.strip_prefix("#x") {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => reference[1..].parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
