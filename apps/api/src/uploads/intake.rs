//! File intake: decides which uploaded files are accepted and what content
//! summary each one gets.
//!
//! Rejected files are dropped silently; accepted files keep their relative order.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, warn};

/// Declared media types accepted by `/upload`. Matched exactly, case-sensitive.
pub const ALLOWED_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
    "text/markdown",
];

/// Largest accepted file, inclusive: 10 MiB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Content substituted for text files that are not valid UTF-8.
pub const UNDECODABLE_TEXT_MARKER: &str = "[Unable to decode text content]";

/// One uploaded file as read off the wire.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub name: String,
    /// Declared media type; `None` when the part carried no Content-Type.
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// An accepted file with its extracted content, as returned by `/upload`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub size: u64,
    pub content: String,
}

pub fn is_allowed_type(content_type: &str) -> bool {
    ALLOWED_TYPES.contains(&content_type)
}

/// Applies the acceptance rules to a single file.
/// Returns `None` for a disallowed type or a file over `MAX_FILE_SIZE`.
pub fn accept_file(file: FilePayload) -> Option<UploadedFile> {
    let media_type = match file.content_type {
        Some(ct) if is_allowed_type(&ct) => ct,
        other => {
            debug!(
                "Dropping upload '{}': type {:?} not accepted",
                file.name, other
            );
            return None;
        }
    };

    if file.data.len() > MAX_FILE_SIZE {
        debug!(
            "Dropping upload '{}': {} bytes exceeds limit",
            file.name,
            file.data.len()
        );
        return None;
    }

    let content = extract_content(&file.name, &media_type, &file.data);

    Some(UploadedFile {
        name: file.name,
        media_type,
        size: file.data.len() as u64,
        content,
    })
}

/// Runs every file through `accept_file`, keeping input order.
pub fn accept_files(files: impl IntoIterator<Item = FilePayload>) -> Vec<UploadedFile> {
    files.into_iter().filter_map(accept_file).collect()
}

/// Content summary for an accepted file. Only text is carried through;
/// images and PDFs are described, not embedded.
fn extract_content(name: &str, media_type: &str, data: &[u8]) -> String {
    if media_type.starts_with("text/") {
        match std::str::from_utf8(data) {
            Ok(text) => text.to_string(),
            Err(e) => {
                warn!("Upload '{name}' is not valid UTF-8: {e}");
                UNDECODABLE_TEXT_MARKER.to_string()
            }
        }
    } else if media_type.starts_with("image/") {
        format!("[Image: {name}, {} bytes]", data.len())
    } else {
        // application/pdf is the only remaining allowed type.
        format!("[PDF: {name}, {} bytes]", data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, content_type: &str, data: impl Into<Bytes>) -> FilePayload {
        FilePayload {
            name: name.into(),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }

    #[test]
    fn test_zip_is_always_dropped() {
        assert!(accept_file(payload("a.zip", "application/zip", Bytes::new())).is_none());
        assert!(accept_file(payload("a.zip", "application/zip", vec![0u8; 10])).is_none());
    }

    #[test]
    fn test_missing_content_type_is_dropped() {
        let file = FilePayload {
            name: "mystery".into(),
            content_type: None,
            data: Bytes::from_static(b"hello"),
        };
        assert!(accept_file(file).is_none());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit = accept_file(payload("big.txt", "text/plain", vec![b'a'; MAX_FILE_SIZE]));
        assert_eq!(at_limit.map(|f| f.size), Some(MAX_FILE_SIZE as u64));

        let over = accept_file(payload("big.txt", "text/plain", vec![b'a'; MAX_FILE_SIZE + 1]));
        assert!(over.is_none());
    }

    #[test]
    fn test_text_is_decoded() {
        let file = accept_file(payload("hello.txt", "text/plain", "hello")).unwrap();
        assert_eq!(
            file,
            UploadedFile {
                name: "hello.txt".into(),
                media_type: "text/plain".into(),
                size: 5,
                content: "hello".into(),
            }
        );
    }

    #[test]
    fn test_invalid_utf8_gets_marker_and_is_kept() {
        let file = accept_file(payload("bad.md", "text/markdown", vec![0xff, 0xfe, 0x41])).unwrap();
        assert_eq!(file.content, UNDECODABLE_TEXT_MARKER);
        assert_eq!(file.size, 3);
    }

    #[test]
    fn test_image_and_pdf_markers() {
        let image = accept_file(payload("logo.png", "image/png", vec![0u8; 16])).unwrap();
        assert_eq!(image.content, "[Image: logo.png, 16 bytes]");

        let pdf = accept_file(payload("whitepaper.pdf", "application/pdf", vec![0u8; 1234])).unwrap();
        assert_eq!(pdf.content, "[PDF: whitepaper.pdf, 1234 bytes]");
    }

    #[test]
    fn test_batch_preserves_order_of_accepted_files() {
        let accepted = accept_files(vec![
            payload("1.txt", "text/plain", "one"),
            payload("x.zip", "application/zip", "zip"),
            payload("2.gif", "image/gif", "gif"),
            payload("3.md", "text/markdown", "three"),
        ]);
        let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["1.txt", "2.gif", "3.md"]);
    }

    #[test]
    fn test_type_match_is_exact() {
        assert!(is_allowed_type("text/plain"));
        assert!(!is_allowed_type("text/plain; charset=utf-8"));
        assert!(!is_allowed_type("TEXT/PLAIN"));
        assert!(!is_allowed_type("text/html"));
    }
}
