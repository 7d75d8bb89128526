/// Data models for the listing store
///
/// A Store is an array-backed arena built once at startup and never
/// mutated afterwards. Listings are addressed by opaque PropertyId;
/// the synthesized string key only exists for the favorites file.

use serde::{Deserialize, Serialize};

/// One real-estate listing
///
/// Field order matches the column order of the listings file, so
/// serializing a Property reproduces an input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub property_type: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: f64,
    pub furnished: String,
    pub level: String,
    pub compound: String,
    pub payment_option: String,
    pub delivery_date: String,
    pub delivery_term: String,
    pub city: String,
}

/// Opaque handle into the Store. Stable for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub(crate) usize);

impl PropertyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Immutable collection of loaded listings
#[derive(Debug, Default)]
pub struct Store {
    properties: Vec<Property>,
    keys: Vec<String>,
}

impl Store {
    /// Build a store from listings in load order.
    ///
    /// Each entry gets a key of the form `{compound}_{index}` (lowercased,
    /// spaces replaced with underscores). The index suffix keeps keys unique
    /// when compound names repeat.
    pub fn from_properties(properties: Vec<Property>) -> Self {
        let keys = properties
            .iter()
            .enumerate()
            .map(|(idx, p)| format!("{}_{}", p.compound.to_lowercase().replace(' ', "_"), idx))
            .collect();

        Self { properties, keys }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(id.0)
    }

    /// Persistence key for an entry. Panics on a foreign id, which cannot
    /// be constructed outside the crate.
    pub fn key(&self, id: PropertyId) -> &str {
        &self.keys[id.0]
    }

    /// Resolve a persisted key back to an id, if the entry still exists.
    pub fn resolve(&self, key: &str) -> Option<PropertyId> {
        self.keys.iter().position(|k| k == key).map(PropertyId)
    }

    /// All ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = PropertyId> + '_ {
        (0..self.properties.len()).map(PropertyId)
    }

    /// (id, listing) pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &Property)> {
        self.properties
            .iter()
            .enumerate()
            .map(|(i, p)| (PropertyId(i), p))
    }
}

#[cfg(test)]
pub(crate) fn sample_property(compound: &str, price: f64) -> Property {
    Property {
        property_type: "Apartment".to_string(),
        price,
        bedrooms: 2,
        bathrooms: 1,
        area: 120.0,
        furnished: "No".to_string(),
        level: "3".to_string(),
        compound: compound.to_string(),
        payment_option: "Cash".to_string(),
        delivery_date: "Ready".to_string(),
        delivery_term: "Finished".to_string(),
        city: "New Cairo".to_string(),
    }
}
