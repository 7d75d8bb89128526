/// Additive match scoring
///
/// Every listing is scored against the quiz answers with up to 8
/// independent criteria, each contributing 0 or 1. No weighting, no
/// partial credit. Ties rank by price, cheapest first.
///
/// Criteria 5 (except "area size"), 7 and 8 always score when answered:
/// the dataset carries no amenity or usage fields to evaluate them
/// against, so those answers are taken at face value.

use crate::matcher::questions::QuizAnswers;
use crate::store::{Property, PropertyId, Store};

/// Highest score a listing can reach.
pub const MAX_SCORE: u32 = 8;

/// How many listings a quiz run reports.
const TOP_MATCH_COUNT: usize = 3;

/// Score one listing against the answers.
pub fn score(property: &Property, answers: &QuizAnswers) -> u32 {
    let mut score = 0;
    let city = property.city.to_lowercase();
    let compound = property.compound.to_lowercase();
    let delivery = property.delivery_date.to_lowercase();

    // 1. Budget, only when it parses as a whole number
    if let Ok(budget) = answers.budget.parse::<i64>() {
        if property.price <= budget as f64 {
            score += 1;
        }
    }

    // 2. Bedrooms: "3+" means three or more, anything else is exact
    let bedrooms = answers.bedrooms.as_str();
    if bedrooms == "3+" {
        if property.bedrooms >= 3 {
            score += 1;
        }
    } else if let Ok(wanted) = bedrooms.parse::<u32>() {
        if property.bedrooms == wanted {
            score += 1;
        }
    }

    // 3. Any preferred area appears in the city or compound name
    if !answers.areas.trim().is_empty() {
        let hit = answers
            .areas
            .split(',')
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .any(|a| city.contains(&a) || compound.contains(&a));
        if hit {
            score += 1;
        }
    }

    // 4. New units are ready-or-dated this decade; resale must be ready
    match answers.new_or_resale.to_lowercase().as_str() {
        "new" => {
            if delivery.contains("ready") || property.delivery_date.contains("202") {
                score += 1;
            }
        }
        "resale" => {
            if delivery.contains("ready") {
                score += 1;
            }
        }
        // Accept straight and curly apostrophes
        "doesn't matter" | "doesn\u{2019}t matter" => score += 1,
        _ => {}
    }

    // 5. Key priority; only "area size" has data behind it
    match answers.priority.to_lowercase().as_str() {
        "area size" => {
            if property.area >= 150.0 {
                score += 1;
            }
        }
        "price" | "location" | "amenities" => score += 1,
        _ => {}
    }

    // 6. Preferred type as a substring of the listing type
    let wanted_type = answers.property_type.trim().to_lowercase();
    if !wanted_type.is_empty() && property.property_type.to_lowercase().contains(&wanted_type) {
        score += 1;
    }

    // 7 & 8. Answered at all: no fields in the data to check against
    if !answers.amenities.trim().is_empty() {
        score += 1;
    }
    if !answers.intended_use.trim().is_empty() {
        score += 1;
    }

    score
}

/// Rank the whole store and keep the best three. Returns an empty list
/// when nothing scored a single point, so "no matches" is reported
/// instead of a meaningless zero-score podium.
pub fn top_matches(store: &Store, answers: &QuizAnswers) -> Vec<(u32, PropertyId)> {
    let mut ranked: Vec<(u32, PropertyId)> = store
        .iter()
        .map(|(id, p)| (score(p, answers), id))
        .collect();

    // Stable: full ties keep store order, so identical input gives
    // identical output
    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0).then_with(|| {
            let price_a = store.get(a.1).map(|p| p.price).unwrap_or(0.0);
            let price_b = store.get(b.1).map(|p| p.price).unwrap_or(0.0);
            price_a.total_cmp(&price_b)
        })
    });

    match ranked.first() {
        Some(&(best, _)) if best > 0 => {
            ranked.truncate(TOP_MATCH_COUNT);
            ranked
        }
        _ => Vec::new(),
    }
}
