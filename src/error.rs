use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoNamesError>;

/// Errors returned by the GeoNames client.
///
/// Each failure mode gets its own variant so callers can tell "the service
/// had nothing" apart from "the request never completed".
#[derive(Debug, Error)]
pub enum GeoNamesError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("failed to load data from url {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} returned no results for {query}{}", detail_suffix(.detail))]
    NotFound {
        operation: &'static str,
        query: String,
        /// Status message reported by the service, if any.
        detail: Option<String>,
    },

    #[error("{operation} response entry is missing or has an invalid `{field}` field")]
    MalformedResponse {
        operation: &'static str,
        field: &'static str,
    },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(message) => format!(" (service said: {message})"),
        None => String::new(),
    }
}

impl GeoNamesError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
