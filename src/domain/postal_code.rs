use serde::Serialize;

use super::fields::Entry;
use crate::error::Result;

/// A postal code match from `postalCodeSearch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostalCode {
    pub lat: f64,
    pub lng: f64,
    /// Place name the code belongs to.
    pub name: String,
    pub code: String,
}

impl PostalCode {
    pub fn from_entry(entry: &Entry<'_>) -> Result<Self> {
        Ok(Self {
            lat: entry.f64("lat")?,
            lng: entry.f64("lng")?,
            name: entry.string("placeName")?,
            code: entry.string("postalCode")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_entry() {
        let value = json!({
            "adminCode2": "GLA",
            "lat": 51.5,
            "lng": -0.1,
            "placeName": "Example",
            "postalCode": "AB1 2CD",
            "countryCode": "GB"
        });
        let postal = PostalCode::from_entry(&Entry::new("postalCodeSearch", &value)).unwrap();

        assert_eq!(
            postal,
            PostalCode {
                lat: 51.5,
                lng: -0.1,
                name: "Example".to_string(),
                code: "AB1 2CD".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_postal_code() {
        let value = json!({"lat": 51.5, "lng": -0.1, "placeName": "Example"});
        assert!(PostalCode::from_entry(&Entry::new("postalCodeSearch", &value)).is_err());
    }
}
