/// Response rendering
///
/// Every command answer is one plain text block built here. Currency is
/// rendered with thousands separators and no decimals, areas as whole
/// square meters.

use crate::store::{Property, PropertyId, Store};

/// Thousands-separated integer rendering of a price.
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.abs().to_string();
    let mut reversed = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(c);
    }
    let grouped: String = reversed.chars().rev().collect();
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// One result row. `position` is 1-based within the full result set.
pub fn summary_line(position: usize, p: &Property) -> String {
    format!(
        "{}. {} | {} | {} | {} EGP | {}BR/{}BA | {:.0}m²",
        position,
        p.compound,
        p.property_type,
        p.city,
        format_price(p.price),
        p.bedrooms,
        p.bathrooms,
        p.area
    )
}

/// Render a run of result rows starting at 1-based position `start + 1`.
pub fn render_rows(store: &Store, ids: &[PropertyId], start: usize) -> String {
    ids.iter()
        .enumerate()
        .filter_map(|(i, &id)| store.get(id).map(|p| summary_line(start + i + 1, p)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full field dump for one listing.
pub fn render_details(p: &Property) -> String {
    format!(
        "Details for {}:\n\
         Type: {}\n\
         Price: {} EGP\n\
         Bedrooms: {}\n\
         Bathrooms: {}\n\
         Area: {:.0} m²\n\
         Furnished: {}\n\
         Level: {}\n\
         Compound: {}\n\
         Payment Option: {}\n\
         Delivery Date: {}\n\
         Delivery Term: {}\n\
         City: {}",
        p.compound,
        p.property_type,
        format_price(p.price),
        p.bedrooms,
        p.bathrooms,
        p.area,
        p.furnished,
        p.level,
        p.compound,
        p.payment_option,
        p.delivery_date,
        p.delivery_term,
        p.city
    )
}

fn comparison_side(p: &Property) -> String {
    format!(
        "{} | {} | {}\n\
         \u{20} Price: {} EGP\n\
         \u{20} Bedrooms: {}, Bathrooms: {}, Area: {:.0} m²\n\
         \u{20} Furnished: {}, Level: {}, Delivery: {} ({})\n\
         \u{20} Payment: {}",
        p.compound,
        p.property_type,
        p.city,
        format_price(p.price),
        p.bedrooms,
        p.bathrooms,
        p.area,
        p.furnished,
        p.level,
        p.delivery_date,
        p.delivery_term,
        p.payment_option
    )
}

/// Side-by-side field dump of two listings.
pub fn render_comparison(a: &Property, b: &Property) -> String {
    format!(
        "Comparison:\n{}\n---\n{}",
        comparison_side(a),
        comparison_side(b)
    )
}

/// Podium rendering of a quiz result.
pub fn render_top_matches(store: &Store, ranked: &[(u32, PropertyId)]) -> String {
    let mut out = String::from("🏅 Top property matches for you:\n");
    for (i, &(_, id)) in ranked.iter().enumerate() {
        if let Some(p) = store.get(id) {
            out.push_str(&format!(
                "\n{}. {} | {} | {}\n\
                 \u{20}  Price: {} EGP | Bedrooms: {} | Area: {:.0}m²\n\
                 \u{20}  Delivery: {} | Level: {}\n",
                i + 1,
                p.compound,
                p.property_type,
                p.city,
                format_price(p.price),
                p.bedrooms,
                p.area,
                p.delivery_date,
                p.level
            ));
        }
    }
    out.push_str("\nYou can retake the quiz anytime by typing 'quiz'.");
    out
}

pub fn help_text() -> &'static str {
    "I can help you with:\n\
     - Listing all properties\n\
     - Filtering by price, area, bedrooms, bathrooms, or location\n\
     - Combined filters (e.g. 'filter zayed apartment area under 150 price under 2000000')\n\
     - Range filters (e.g. 'area between 100 and 200')\n\
     - Sorting results (e.g. 'sort by price ascending')\n\
     - Pagination (type 'next' or 'previous')\n\
     - Comparing properties (e.g. 'compare 1 and 2')\n\
     - Showing property details (e.g. 'details 3')\n\
     - Managing your favorites (add, remove, show, save, load, export)\n\
     - User profiles (e.g. 'user alice')\n\
     - Exporting results\n\
     - Finding your top matches (type 'quiz')\n\
     Type 'exit' to quit."
}
