use serde_json::Value;
use url::{Url, form_urlencoded};

use super::query::QueryParams;
use super::transport::{HttpTransport, Transport};
use crate::config::Config;
use crate::domain::fields::Entry;
use crate::error::{GeoNamesError, Result};

/// Client for the GeoNames web services.
///
/// Every operation follows the same path: merge the caller's parameters
/// over the configured `username` and `style`, GET
/// `{base_url}{service}JSON?{query}`, parse the JSON, check the operation's
/// result field and project each entry onto a record.
#[derive(Debug)]
pub struct GeoNames<T = HttpTransport> {
    config: Config,
    transport: T,
}

impl GeoNames<HttpTransport> {
    /// Create a client that talks to the service over HTTP.
    ///
    /// Fails with [`GeoNamesError::Configuration`] if no username is set.
    pub fn new(config: Config) -> Result<Self> {
        config.require_username()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GeoNames<T> {
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        config.require_username()?;
        Url::parse(&config.base_url).map_err(|e| {
            GeoNamesError::Configuration(format!("invalid base url {}: {e}", config.base_url))
        })?;

        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn default_params(&self) -> QueryParams {
        QueryParams::new()
            .with("username", self.config.username.as_deref().unwrap_or_default())
            .with("style", self.config.style)
    }

    /// Build the request URL for `service`. Caller parameters override the
    /// `username`/`style` defaults when they share a name.
    ///
    /// The configured base is used verbatim; only the query is encoded.
    pub fn build_url(&self, service: &str, params: &QueryParams) -> String {
        let merged = params.merged_over(&self.default_params());
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(merged.iter())
            .finish();

        format!("{}{}JSON?{}", self.config.base_url, service, query)
    }

    /// GET a service endpoint and parse the body as JSON.
    pub(crate) fn fetch(&self, service: &str, params: &QueryParams) -> Result<Value> {
        let url = self.build_url(service, params);
        tracing::debug!(%url, "GeoNames request");

        let body = self.transport.get(&url)?;
        serde_json::from_str(&body).map_err(|source| GeoNamesError::Parse { url, source })
    }

    /// Project every entry of the `key` array, failing if it is absent, null
    /// or empty.
    pub(crate) fn project_list<R>(
        &self,
        service: &'static str,
        response: &Value,
        key: &'static str,
        params: &QueryParams,
        project: impl Fn(&Entry<'_>) -> Result<R>,
    ) -> Result<Vec<R>> {
        match response.get(key) {
            None => Err(not_found(service, response, params)),
            Some(value) if is_empty(value) => Err(not_found(service, response, params)),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| project(&Entry::new(service, item)))
                .collect(),
            Some(_) => Err(GeoNamesError::MalformedResponse {
                operation: service,
                field: key,
            }),
        }
    }

    /// Project the single `key` object, failing if it is absent, null or
    /// empty.
    pub(crate) fn project_one<R>(
        &self,
        service: &'static str,
        response: &Value,
        key: &'static str,
        params: &QueryParams,
        project: impl FnOnce(&Entry<'_>) -> Result<R>,
    ) -> Result<R> {
        match response.get(key) {
            None => Err(not_found(service, response, params)),
            Some(value) if is_empty(value) => Err(not_found(service, response, params)),
            Some(item) if item.is_object() => project(&Entry::new(service, item)),
            Some(_) => Err(GeoNamesError::MalformedResponse {
                operation: service,
                field: key,
            }),
        }
    }
}

/// Result values that mean "nothing found", whatever container type the
/// service chose to send.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// The service reports problems such as an unknown account as
/// `{"status": {"message": .., "value": ..}}` with a 200 response.
fn not_found(service: &'static str, response: &Value, params: &QueryParams) -> GeoNamesError {
    let detail = response
        .pointer("/status/message")
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(message) = &detail {
        tracing::warn!(service, %message, "GeoNames returned a status message");
    }

    GeoNamesError::NotFound {
        operation: service,
        query: params.to_string(),
        detail,
    }
}
