use super::client::GeoNames;
use super::query::NearbyQuery;
use super::transport::Transport;
use crate::domain::{NearbyPlace, WikipediaEntry};
use crate::error::Result;

const PLACE_NAME_SERVICE: &str = "findNearbyPlaceName";
const NEARBY_SERVICE: &str = "findNearby";
const WIKIPEDIA_SERVICE: &str = "findNearbyWikipedia";

pub const DEFAULT_PLACE_NAME_LIMIT: u32 = 5;
pub const DEFAULT_NEARBY_LIMIT: u32 = 25;
pub const DEFAULT_WIKIPEDIA_LIMIT: u32 = 10;

impl<T: Transport> GeoNames<T> {
    /// Closest populated places to a point.
    pub fn find_nearby_place_name(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        self.nearby_places(PLACE_NAME_SERVICE, query, DEFAULT_PLACE_NAME_LIMIT)
    }

    /// Closest toponyms of any feature class to a point.
    pub fn find_nearby(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        self.nearby_places(NEARBY_SERVICE, query, DEFAULT_NEARBY_LIMIT)
    }

    /// Wikipedia articles georeferenced near a point.
    pub fn find_nearby_wikipedia(&self, query: &NearbyQuery) -> Result<Vec<WikipediaEntry>> {
        let params = query.params(DEFAULT_WIKIPEDIA_LIMIT);
        let response = self.fetch(WIKIPEDIA_SERVICE, &params)?;
        self.project_list(
            WIKIPEDIA_SERVICE,
            &response,
            "geonames",
            &params,
            WikipediaEntry::from_entry,
        )
    }

    fn nearby_places(
        &self,
        service: &'static str,
        query: &NearbyQuery,
        default_limit: u32,
    ) -> Result<Vec<NearbyPlace>> {
        let params = query.params(default_limit);
        let response = self.fetch(service, &params)?;
        self.project_list(
            service,
            &response,
            "geonames",
            &params,
            NearbyPlace::from_entry,
        )
    }
}
