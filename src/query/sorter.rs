/// Result set sorting
///
/// Reorders the current result set in place. The sort is stable, so
/// listings with equal keys keep their relative order.

use crate::store::{PropertyId, Store};

/// Sortable listing fields. Price is the default when no field keyword
/// is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Area,
    Bedrooms,
    Bathrooms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Extract field and direction from a sort message.
pub fn parse_sort(text: &str) -> (SortField, SortDirection) {
    let msg = text.to_lowercase();

    let field = if msg.contains("area") {
        SortField::Area
    } else if msg.contains("bedrooms") {
        SortField::Bedrooms
    } else if msg.contains("bathrooms") {
        SortField::Bathrooms
    } else {
        SortField::Price
    };

    // "descending" contains "desc", so one check covers both
    let direction = if msg.contains("desc") {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };

    (field, direction)
}

/// Stable in-place reorder of `results` by the chosen field.
pub fn sort_results(
    store: &Store,
    results: &mut [PropertyId],
    field: SortField,
    direction: SortDirection,
) {
    let key = |id: PropertyId| -> f64 {
        let p = match store.get(id) {
            Some(p) => p,
            None => return 0.0,
        };
        match field {
            SortField::Price => p.price,
            SortField::Area => p.area,
            SortField::Bedrooms => p.bedrooms as f64,
            SortField::Bathrooms => p.bathrooms as f64,
        }
    };

    results.sort_by(|&a, &b| {
        let ordering = key(a).total_cmp(&key(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
