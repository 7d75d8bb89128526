/// Listing store module
///
/// Holds the immutable in-memory dataset: the Property model, the
/// arena-style Store, and the CSV loader that fills it at startup.

pub mod loader;
pub mod models;

pub use loader::{load_csv, parse_csv};
pub use models::{Property, PropertyId, Store};
