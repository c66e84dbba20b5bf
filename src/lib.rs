//! geonames - Blocking client for the GeoNames geocoding web services

pub mod api;
pub mod config;
pub mod domain;
pub mod error;

pub use api::{GeoNames, HttpTransport, NearbyQuery, PostalCodeQuery, QueryParams, Transport};
pub use config::{Config, FileConfig, Style, TimezonePolicy};
pub use domain::{NearbyPlace, PostalCode, WeatherObservation, WikipediaEntry};
pub use error::{GeoNamesError, Result};
