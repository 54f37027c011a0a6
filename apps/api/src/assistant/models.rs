use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Which prompt template a chat request uses.
///
/// Only the exact strings `"chat"` and `"agent"` are recognised. Every other
/// value, including typos and the empty string, deserializes to `Migrate`.
/// Callers rely on this fallthrough, so unknown modes are never rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Chat,
    Agent,
    Migrate,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Agent => "agent",
            Mode::Migrate => "migrate",
        }
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        match value {
            "chat" => Mode::Chat,
            "agent" => Mode::Agent,
            _ => Mode::Migrate,
        }
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Mode::from(raw.as_str()))
    }
}

/// Metadata for a file the client attached to a chat message.
/// Only name, type and size travel with the chat request; content goes through `/upload`.
///
/// The fields are display text for the prompt, so any JSON scalar is accepted:
/// numbers and booleans are rendered as written, `null` or a missing key gets a placeholder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttachmentRef {
    #[serde(default = "default_attachment_name", deserialize_with = "name_text")]
    pub name: String,
    #[serde(
        rename = "type",
        default = "default_attachment_type",
        deserialize_with = "type_text"
    )]
    pub media_type: String,
    #[serde(default = "default_attachment_size", deserialize_with = "size_text")]
    pub size: String,
}

fn default_attachment_name() -> String {
    "Unknown file".to_string()
}

fn default_attachment_type() -> String {
    "unknown type".to_string()
}

fn default_attachment_size() -> String {
    "0".to_string()
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn name_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_else(default_attachment_name))
}

fn type_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_else(default_attachment_type))
}

fn size_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_else(default_attachment_size))
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub mode: Mode,
    /// Current editor contents (agent mode).
    #[serde(default)]
    pub code: String,
    /// Name of the file being edited (agent mode).
    #[serde(default)]
    pub file: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attachments: Vec<AttachmentRef>,
}

fn default_source_language() -> String {
    "rust".to_string()
}

fn default_target_language() -> String {
    "solidity".to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body returned by `POST /chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_request_gets_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(req.mode, Mode::Chat);
        assert_eq!(req.code, "");
        assert_eq!(req.file, "");
        assert_eq!(req.source_language, "rust");
        assert_eq!(req.target_language, "solidity");
        assert!(req.attachments.is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "m", "mode": "migrate", "sourceLanguage": "cpp", "targetLanguage": "rust"}"#,
        )
        .unwrap();
        assert_eq!(req.mode, Mode::Migrate);
        assert_eq!(req.source_language, "cpp");
        assert_eq!(req.target_language, "rust");
    }

    #[test]
    fn test_unknown_mode_falls_through_to_migrate() {
        for raw in ["banana", "", "Chat", "AGENT", " chat"] {
            let json = format!(r#"{{"message": "m", "mode": "{raw}"}}"#);
            let req: ChatRequest = serde_json::from_str(&json).unwrap();
            assert_eq!(req.mode, Mode::Migrate, "mode {raw:?}");
        }
    }

    #[test]
    fn test_null_attachments_is_empty() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "m", "attachments": null}"#).unwrap();
        assert!(req.attachments.is_empty());
    }

    #[test]
    fn test_attachment_missing_fields_use_placeholders() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "m", "attachments": [{}]}"#).unwrap();
        assert_eq!(
            req.attachments[0],
            AttachmentRef {
                name: "Unknown file".into(),
                media_type: "unknown type".into(),
                size: "0".into(),
            }
        );
    }

    #[test]
    fn test_attachment_odd_scalars_are_rendered_not_rejected() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"message": "m", "attachments": [
                {"name": null, "type": "text/plain", "size": -1},
                {"name": "half.bin", "type": null, "size": 1.5},
                {"name": "n.txt", "size": null}
            ]}"#,
        )
        .unwrap();
        let rendered: Vec<_> = req
            .attachments
            .iter()
            .map(|a| (a.name.as_str(), a.media_type.as_str(), a.size.as_str()))
            .collect();
        assert_eq!(
            rendered,
            [
                ("Unknown file", "text/plain", "-1"),
                ("half.bin", "unknown type", "1.5"),
                ("n.txt", "unknown type", "0"),
            ]
        );
    }

    #[test]
    fn test_missing_message_is_rejected() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"mode": "chat"}"#).is_err());
    }
}
