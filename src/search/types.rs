use serde::{Deserialize, Serialize};

/// Raw search response from the places provider.
#[derive(Debug, Deserialize)]
pub struct PlacesResponse {
    pub results: Vec<RawPlace>,
}

/// Raw place record, restricted to the projected fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlace {
    pub name: String,
    pub location: RawLocation,
    pub categories: Vec<RawCategory>,
    pub rating: f64,
    pub price: u8,
    pub hours: RawHours,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub formatted_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub short_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHours {
    pub display: String,
}

/// Normalized restaurant returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub name: String,
    pub address: String,
    pub cuisine: Vec<String>,
    pub rating: f64,
    pub price_level: u8,
    pub hours: String,
}

impl From<RawPlace> for Restaurant {
    fn from(place: RawPlace) -> Self {
        Self {
            name: place.name,
            address: place.location.formatted_address,
            cuisine: place
                .categories
                .into_iter()
                .map(|category| category.short_name)
                .collect(),
            rating: place.rating,
            price_level: place.price,
            hours: place.hours.display,
        }
    }
}
