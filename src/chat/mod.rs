/// Chat surface module
///
/// Keyword intent routing and response rendering. This is the only
/// boundary the shell talks to: text in, text out.

pub mod dispatcher;
pub mod format;

pub use dispatcher::{ChatBot, Intent};
