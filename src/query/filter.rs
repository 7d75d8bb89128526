/// Free-text filter extraction
///
/// Pulls structured predicates out of a chat message with regex and
/// keyword matching, then applies them to the store with AND semantics.
/// All patterns are compiled once when the parser is built.

use crate::store::{Property, PropertyId, Store};
use regex::Regex;

/// Named areas recognized in filter text. Each one requires a
/// case-insensitive substring match against the city field.
const AREA_KEYWORDS: &[&str] = &["new cairo", "zayed", "madinaty"];

/// Property type keywords, matched as substrings of the type field.
const TYPE_KEYWORDS: &[&str] = &["apartment", "villa"];

/// Numeric bound on one field.
///
/// `between`/`at_least` bounds are inclusive; `below` is strict. The
/// strict upper bound is what makes "under 2000000" exclude an exactly
/// 2,000,000 listing, consistent with "bedrooms under 3" meaning at
/// most 2.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    max_exclusive: bool,
}

impl NumericRange {
    pub fn between(lo: f64, hi: f64) -> Self {
        Self {
            min: Some(lo),
            max: Some(hi),
            max_exclusive: false,
        }
    }

    pub fn with_min(mut self, lo: f64) -> Self {
        self.min = Some(lo);
        self
    }

    /// Strict upper bound: values equal to `hi` do not match.
    pub fn with_below(mut self, hi: f64) -> Self {
        self.max = Some(hi);
        self.max_exclusive = true;
        self
    }

    /// Inclusive upper bound.
    pub fn with_at_most(mut self, hi: f64) -> Self {
        self.max = Some(hi);
        self.max_exclusive = false;
        self
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if self.max_exclusive {
                if value >= max {
                    return false;
                }
            } else if value > max {
                return false;
            }
        }
        true
    }
}

/// Predicates extracted from one filter message. All of them must hold
/// for a listing to be included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub price: NumericRange,
    pub area: NumericRange,
    pub bedrooms: NumericRange,
    pub bathrooms: NumericRange,
    pub cities: Vec<String>,
    pub types: Vec<String>,
}

impl FilterCriteria {
    /// True when the message contained no recognizable predicate. An
    /// empty criteria set matches the whole store, which is different
    /// from predicates that matched nothing.
    pub fn is_empty(&self) -> bool {
        self.price.is_unconstrained()
            && self.area.is_unconstrained()
            && self.bedrooms.is_unconstrained()
            && self.bathrooms.is_unconstrained()
            && self.cities.is_empty()
            && self.types.is_empty()
    }

    pub fn matches(&self, property: &Property) -> bool {
        let city = property.city.to_lowercase();
        let property_type = property.property_type.to_lowercase();

        self.price.contains(property.price)
            && self.area.contains(property.area)
            && self.bedrooms.contains(property.bedrooms as f64)
            && self.bathrooms.contains(property.bathrooms as f64)
            && self.cities.iter().all(|c| city.contains(c))
            && self.types.iter().all(|t| property_type.contains(t))
    }

    /// Matching ids in store iteration order.
    pub fn apply(&self, store: &Store) -> Vec<PropertyId> {
        store
            .iter()
            .filter(|(_, p)| self.matches(p))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Extracts FilterCriteria from free text. Build once, reuse per message.
pub struct FilterParser {
    price_between: Regex,
    price_over: Regex,
    price_under: Regex,
    area_between: Regex,
    area_over: Regex,
    area_under: Regex,
    bedrooms_min: Regex,
    bedrooms_max: Regex,
    bathrooms_min: Regex,
    bathrooms_max: Regex,
}

impl FilterParser {
    pub fn new() -> Self {
        Self {
            price_between: between_pattern("price"),
            price_over: over_pattern("price"),
            price_under: under_pattern("price"),
            area_between: between_pattern("area"),
            area_over: over_pattern("area"),
            area_under: under_pattern("area"),
            bedrooms_min: min_pattern("bedrooms?"),
            bedrooms_max: under_pattern("bedrooms?"),
            bathrooms_min: min_pattern("bathrooms?"),
            bathrooms_max: under_pattern("bathrooms?"),
        }
    }

    pub fn parse(&self, text: &str) -> FilterCriteria {
        let msg = text.to_lowercase();

        let price = range_from(&msg, &self.price_between, &self.price_over, &self.price_under);
        let area = range_from(&msg, &self.area_between, &self.area_over, &self.area_under);
        let bedrooms = room_range_from(&msg, &self.bedrooms_min, &self.bedrooms_max);
        let bathrooms = room_range_from(&msg, &self.bathrooms_min, &self.bathrooms_max);

        let mut cities: Vec<String> = AREA_KEYWORDS
            .iter()
            .filter(|kw| msg.contains(*kw))
            .map(|kw| kw.to_string())
            .collect();
        // The generic city name only applies when no more specific area
        // keyword spelled with it is present.
        if msg.contains("cairo") && !msg.contains("new cairo") {
            cities.push("cairo".to_string());
        }

        let types = TYPE_KEYWORDS
            .iter()
            .filter(|kw| msg.contains(*kw))
            .map(|kw| kw.to_string())
            .collect();

        FilterCriteria {
            price,
            area,
            bedrooms,
            bathrooms,
            cities,
            types,
        }
    }
}

impl Default for FilterParser {
    fn default() -> Self {
        Self::new()
    }
}

fn between_pattern(field: &str) -> Regex {
    compile(format!(r"{field} (?:between|from) (\d+)[^\d]+(\d+)"))
}

fn over_pattern(field: &str) -> Regex {
    compile(format!(r"{field} (?:over|greater than|above) (\d+)"))
}

fn under_pattern(field: &str) -> Regex {
    compile(format!(r"{field} (?:under|less than|below) (\d+)"))
}

fn min_pattern(field: &str) -> Regex {
    compile(format!(r"{field} (?:at least|>=|more than|over) (\d+)"))
}

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("hard-coded filter pattern is valid")
}

fn range_from(msg: &str, between: &Regex, over: &Regex, under: &Regex) -> NumericRange {
    if let Some(caps) = between.captures(msg) {
        return NumericRange::between(number(&caps, 1), number(&caps, 2));
    }
    let mut range = NumericRange::default();
    if let Some(caps) = over.captures(msg) {
        range = range.with_min(number(&caps, 1));
    }
    if let Some(caps) = under.captures(msg) {
        range = range.with_below(number(&caps, 1));
    }
    range
}

/// Room counts: "at least N" keeps N, "under N" becomes an inclusive
/// maximum of N-1.
fn room_range_from(msg: &str, min: &Regex, under: &Regex) -> NumericRange {
    let mut range = NumericRange::default();
    if let Some(caps) = min.captures(msg) {
        range = range.with_min(number(&caps, 1));
    }
    if let Some(caps) = under.captures(msg) {
        range = range.with_at_most(number(&caps, 1) - 1.0);
    }
    range
}

fn number(caps: &regex::Captures<'_>, group: usize) -> f64 {
    // The capture group only admits digits, so this cannot fail.
    caps[group].parse().unwrap_or(0.0)
}
