use serde::Serialize;

use super::fields::Entry;
use crate::error::Result;

/// A feature near a point, from `findNearbyPlaceName` or `findNearby`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlace {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    /// Distance from the query point in km.
    pub distance: f64,
    /// Human readable feature code, e.g. "populated place".
    pub feature_type: String,
}

impl NearbyPlace {
    pub fn from_entry(entry: &Entry<'_>) -> Result<Self> {
        Ok(Self {
            lat: entry.f64("lat")?,
            lng: entry.f64("lng")?,
            name: entry.string("name")?,
            distance: entry.f64("distance")?,
            feature_type: entry.string("fcodeName")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_entry_with_string_coordinates() {
        // findNearbyPlaceName sends coordinates and distance as strings
        let value = json!({
            "lat": "51.50853",
            "lng": "-0.12574",
            "name": "London",
            "distance": "0.39213",
            "fcodeName": "capital of a political entity",
            "geonameId": 2643743
        });
        let place = NearbyPlace::from_entry(&Entry::new("findNearbyPlaceName", &value)).unwrap();

        assert_eq!(place.name, "London");
        assert_eq!(place.lat, 51.50853);
        assert_eq!(place.lng, -0.12574);
        assert_eq!(place.distance, 0.39213);
        assert_eq!(place.feature_type, "capital of a political entity");
    }

    #[test]
    fn test_missing_feature_name() {
        let value = json!({"lat": "1", "lng": "2", "name": "X", "distance": "0"});
        let err = NearbyPlace::from_entry(&Entry::new("findNearby", &value)).unwrap_err();
        assert!(err.to_string().contains("fcodeName"));
    }
}
