use std::fmt;

pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const DEFAULT_POSTAL_CODE_LIMIT: u32 = 1;
pub const DEFAULT_POSTAL_CODE_COUNTRY: &str = "GB";

/// Ordered query parameters.
///
/// Setting a key that already exists replaces its value in place, so merging
/// caller parameters over defaults keeps the defaults' order while the
/// caller's values win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `defaults` with every parameter of `self` applied on top.
    pub fn merged_over(&self, defaults: &QueryParams) -> QueryParams {
        let mut merged = defaults.clone();
        for (key, value) in &self.0 {
            merged.set(key.as_str(), value);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Arguments for a postal code lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PostalCodeQuery {
    pub postal_code: String,
    pub limit: u32,
    /// ISO 3166 country code.
    pub country: String,
}

impl PostalCodeQuery {
    pub fn new(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: postal_code.into(),
            limit: DEFAULT_POSTAL_CODE_LIMIT,
            country: DEFAULT_POSTAL_CODE_COUNTRY.to_string(),
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("postalcode", &self.postal_code)
            .with("maxRows", self.limit)
            .with("country", &self.country)
            .with("isReduced", false)
    }
}

/// Arguments for the point-and-radius lookups.
///
/// `limit` left as `None` takes the default of whichever operation the query
/// is passed to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in km.
    pub radius: f64,
    pub limit: Option<u32>,
}

impl NearbyQuery {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: DEFAULT_RADIUS_KM,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn params(&self, default_limit: u32) -> QueryParams {
        QueryParams::new()
            .with("lat", self.lat)
            .with("lng", self.lng)
            .with("radius", self.radius)
            .with("maxRows", self.limit.unwrap_or(default_limit))
    }
}
