pub mod client;
pub mod nearby;
pub mod postal_code;
pub mod query;
pub mod transport;
pub mod weather;

pub use client::GeoNames;
pub use query::{NearbyQuery, PostalCodeQuery, QueryParams};
pub use transport::{HttpTransport, Transport};
