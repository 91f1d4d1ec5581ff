//! Follow-up chat: history window, per-turn context block and the fixed
//! assistant texts.

pub mod context;
pub mod prompt;

pub use context::*;
pub use prompt::*;
