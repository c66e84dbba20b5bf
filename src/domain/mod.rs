pub mod fields;
pub mod place;
pub mod postal_code;
pub mod weather;
pub mod wikipedia;

pub use place::NearbyPlace;
pub use postal_code::PostalCode;
pub use weather::WeatherObservation;
pub use wikipedia::WikipediaEntry;
