// AriAI assistant: chat, agent-edit and migration prompting.
// All completion calls go through llm_client; this module only builds prompts.

pub mod attachments;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod router;
