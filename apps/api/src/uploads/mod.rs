// File uploads: per-file type/size acceptance and content extraction.
// Nothing is persisted; extracted content goes straight back to the caller.

pub mod handlers;
pub mod intake;
