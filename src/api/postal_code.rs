use super::client::GeoNames;
use super::query::PostalCodeQuery;
use super::transport::Transport;
use crate::domain::PostalCode;
use crate::error::Result;

const SERVICE: &str = "postalCodeSearch";

impl<T: Transport> GeoNames<T> {
    /// Look up places matching a postal code.
    ///
    /// Returns matches in service order; an empty `postalCodes` list is a
    /// [`NotFound`](crate::GeoNamesError::NotFound) error.
    pub fn postal_code_search(&self, query: &PostalCodeQuery) -> Result<Vec<PostalCode>> {
        let params = query.params();
        let response = self.fetch(SERVICE, &params)?;
        self.project_list(
            SERVICE,
            &response,
            "postalCodes",
            &params,
            PostalCode::from_entry,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::api::client::tests::client;
    use crate::api::PostalCodeQuery;
    use crate::domain::PostalCode;
    use crate::error::GeoNamesError;

    #[test]
    fn test_postal_code_search() {
        let geonames = client(
            r#"{"postalCodes":[{"lat":51.5,"lng":-0.1,"placeName":"Example","postalCode":"AB1 2CD","countryCode":"GB"}]}"#,
        );
        let results = geonames
            .postal_code_search(&PostalCodeQuery::new("AB1 2CD"))
            .unwrap();

        assert_eq!(
            results,
            vec![PostalCode {
                lat: 51.5,
                lng: -0.1,
                name: "Example".to_string(),
                code: "AB1 2CD".to_string(),
            }]
        );

        let requested = geonames.transport().requested.borrow();
        assert_eq!(
            requested[0],
            "http://api.geonames.org/postalCodeSearchJSON?username=demo&style=FULL&postalcode=AB1+2CD&maxRows=1&country=GB&isReduced=false"
        );
    }

    #[test]
    fn test_postal_code_search_keeps_service_order() {
        let geonames = client(
            r#"{"postalCodes":[
                {"lat":48.85,"lng":2.35,"placeName":"Paris 01","postalCode":"75001"},
                {"lat":48.86,"lng":2.34,"placeName":"Paris 02","postalCode":"75002"}
            ]}"#,
        );
        let query = PostalCodeQuery::new("7500").with_limit(2).with_country("FR");
        let names: Vec<_> = geonames
            .postal_code_search(&query)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Paris 01", "Paris 02"]);
    }

    #[test]
    fn test_postal_code_search_empty_is_not_found() {
        let geonames = client(r#"{"postalCodes":[]}"#);
        let err = geonames
            .postal_code_search(&PostalCodeQuery::new("ZZ9 9ZZ"))
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("postalcode=ZZ9 9ZZ"));
    }

    #[test]
    fn test_postal_code_search_missing_field_is_malformed() {
        let geonames = client(r#"{"postalCodes":[{"lat":51.5,"lng":-0.1,"placeName":"Example"}]}"#);
        let err = geonames
            .postal_code_search(&PostalCodeQuery::new("AB1 2CD"))
            .unwrap_err();

        assert!(matches!(
            err,
            GeoNamesError::MalformedResponse {
                field: "postalCode",
                ..
            }
        ));
    }
}
