use super::client::GeoNames;
use super::query::QueryParams;
use super::transport::Transport;
use crate::domain::WeatherObservation;
use crate::error::Result;

const SERVICE: &str = "findNearByWeather";

impl<T: Transport> GeoNames<T> {
    /// Latest observation from the weather station closest to a point.
    ///
    /// The observation time is read in the configured
    /// [`TimezonePolicy`](crate::config::TimezonePolicy).
    pub fn find_nearby_weather(&self, lat: f64, lng: f64) -> Result<WeatherObservation> {
        let params = QueryParams::new()
            .with("lat", lat)
            .with("lng", lng)
            .with("maxRows", 1);
        let response = self.fetch(SERVICE, &params)?;
        let timezone = self.config().timezone;

        self.project_one(SERVICE, &response, "weatherObservation", &params, |entry| {
            WeatherObservation::from_entry(entry, timezone)
        })
    }
}
