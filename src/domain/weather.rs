use chrono::{Local, NaiveDateTime, TimeZone};
use serde::Serialize;

use super::fields::Entry;
use crate::config::TimezonePolicy;
use crate::error::Result;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Latest observation from the weather station nearest a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub station_name: String,
    pub clouds: String,
    pub weather_condition: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Knots.
    pub wind_speed: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    pub lat: f64,
    pub lng: f64,
    /// Observation time as Unix epoch seconds.
    pub observed_at: i64,
}

impl WeatherObservation {
    pub fn from_entry(entry: &Entry<'_>, timezone: TimezonePolicy) -> Result<Self> {
        let station_name = entry.string("stationName")?;
        let clouds = entry.string("clouds")?;
        let weather_condition = entry.string("weatherCondition")?;
        let temperature = entry.f64("temperature")?;
        let wind_speed = entry.f64("windSpeed")?;
        let humidity = entry.f64("humidity")?;
        let lat = entry.f64("lat")?;
        let lng = entry.f64("lng")?;

        let datetime = entry.string("datetime")?;
        let observed_at = parse_observation_time(&datetime, timezone)
            .ok_or_else(|| entry.malformed("datetime"))?;

        Ok(Self {
            station_name,
            clouds,
            weather_condition,
            temperature,
            wind_speed,
            humidity,
            lat,
            lng,
            observed_at,
        })
    }
}

/// Parse a station timestamp (`YYYY-MM-DD HH:MM[:SS]`, no offset) into epoch
/// seconds, reading the wall-clock time in the given timezone.
///
/// Returns `None` for unparseable strings and for wall-clock times skipped by
/// a DST transition. Times repeated by a transition resolve to the earlier
/// instant.
pub fn parse_observation_time(datetime: &str, timezone: TimezonePolicy) -> Option<i64> {
    let datetime = datetime.trim();
    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(datetime, format).ok())?;

    match timezone {
        TimezonePolicy::Local => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp()),
        TimezonePolicy::Fixed(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp()),
    }
}
