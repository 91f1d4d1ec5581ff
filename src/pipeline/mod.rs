pub mod chat;
pub mod client;
pub mod sanitize;
pub mod triage;
