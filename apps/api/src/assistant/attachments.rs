use std::fmt::Write;

use crate::assistant::models::AttachmentRef;

const CONTEXT_HEADER: &str = "\n\nAttached files context:\n";

/// Renders attachment metadata as a block appended to the user prompt.
/// Empty input yields an empty string; order is preserved.
pub fn attachment_context(attachments: &[AttachmentRef]) -> String {
    if attachments.is_empty() {
        return String::new();
    }

    let mut block = String::from(CONTEXT_HEADER);
    for attachment in attachments {
        // Writing to a String cannot fail.
        let _ = writeln!(
            block,
            "- {} ({}, {} bytes)",
            attachment.name, attachment.media_type, attachment.size
        );
    }
    block
}
