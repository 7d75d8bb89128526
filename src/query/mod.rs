/// Query engine module
///
/// Turns free-text filter and sort directives into structured operations
/// on the store: regex predicate extraction and stable result ordering.

pub mod filter;
pub mod sorter;

pub use filter::{FilterCriteria, FilterParser, NumericRange};
pub use sorter::{parse_sort, sort_results, SortDirection, SortField};
