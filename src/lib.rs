/// homescout library
///
/// Core functionality for the conversational listings explorer:
/// free-text command dispatch over an in-memory property dataset.

pub mod chat;
pub mod error;
pub mod matcher;
pub mod query;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use chat::ChatBot;
pub use error::{Result, ScoutError};
pub use store::Store;
