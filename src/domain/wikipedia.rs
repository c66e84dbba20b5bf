use serde::Serialize;

use super::fields::Entry;
use crate::error::Result;

/// A georeferenced Wikipedia article from `findNearbyWikipedia`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikipediaEntry {
    pub title: String,
    pub summary: String,
    pub distance: f64,
    pub lat: f64,
    pub lng: f64,
    /// Article category, e.g. "city" or "landmark".
    pub feature: String,
    pub rank: i64,
    pub url: String,
    pub thumbnail: Option<String>,
}

impl WikipediaEntry {
    pub fn from_entry(entry: &Entry<'_>) -> Result<Self> {
        Ok(Self {
            title: entry.string("title")?,
            summary: entry.string("summary")?,
            distance: entry.f64("distance")?,
            lat: entry.f64("lat")?,
            lng: entry.f64("lng")?,
            feature: entry.string("feature")?,
            rank: entry.i64("rank")?,
            url: entry.string("wikipediaUrl")?,
            thumbnail: entry.nullable_string("thumbnailImg")?,
        })
    }
}
