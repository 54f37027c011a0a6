//! Mode routing: turns a `ChatRequest` into the prompt pair and temperature
//! handed to the completion backend.
//!
//! | mode    | system prompt                 | temperature |
//! |---------|-------------------------------|-------------|
//! | chat    | assistant persona             | 0.7         |
//! | agent   | edit `file`, fenced by ext    | 0.3         |
//! | migrate | source → target conversion    | 0.7         |

use crate::assistant::attachments::attachment_context;
use crate::assistant::models::{ChatRequest, Mode};
use crate::assistant::prompts::{agent_system, agent_user, migrate_system, CHAT_SYSTEM};
use crate::llm_client::CompletionRequest;

pub const AGENT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Fence token used when a language is not in the extension table.
const FALLBACK_EXTENSION: &str = "txt";

/// Maps a language name to the file extension used as its fence token.
pub fn extension_for_language(language: &str) -> &'static str {
    match language {
        "rust" => "rs",
        "solidity" => "sol",
        "cpp" => "cpp",
        _ => FALLBACK_EXTENSION,
    }
}

/// Fence token for a file name: everything after the last `.`.
/// A name without a dot is used whole; an empty name gives an empty token.
pub fn fence_token_for_file(file: &str) -> &str {
    file.rsplit('.').next().unwrap_or(file)
}

/// Builds the completion request for a chat request. Pure; never fails.
pub fn route(request: &ChatRequest) -> CompletionRequest {
    let context = attachment_context(&request.attachments);

    match request.mode {
        Mode::Chat => CompletionRequest {
            system: CHAT_SYSTEM.to_string(),
            user: format!("{}{}", request.message, context),
            temperature: DEFAULT_TEMPERATURE,
        },
        Mode::Agent => CompletionRequest {
            system: agent_system(&request.file, fence_token_for_file(&request.file)),
            user: agent_user(&request.code, &request.message, &context),
            temperature: AGENT_TEMPERATURE,
        },
        Mode::Migrate => CompletionRequest {
            system: migrate_system(
                &request.source_language,
                &request.target_language,
                extension_for_language(&request.target_language),
            ),
            user: format!("{}{}", request.message, context),
            temperature: DEFAULT_TEMPERATURE,
        },
    }
}
