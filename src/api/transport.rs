use reqwest::redirect::Policy;

use crate::config::{Config, MAX_REDIRECTS};
use crate::error::{GeoNamesError, Result};

/// Performs a single GET and hands back the body text.
///
/// The client only needs "fetch this URL"; anything that can do that can
/// stand in for the network, which is how tests feed canned responses.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking reqwest transport.
///
/// Follows up to [`MAX_REDIRECTS`] redirects, fails on any non-2xx status and
/// keeps no idle connections, so every call opens a fresh one.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(MAX_REDIRECTS))
            .pool_max_idle_per_host(0)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GeoNamesError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let transport_err = |source| GeoNamesError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(transport_err)?;

        let status = response.status();
        let body = response.text().map_err(transport_err)?;
        tracing::debug!(%status, bytes = body.len(), "GeoNames response received");

        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves the given raw HTTP responses, one per accepted connection, and
    /// returns the server's base URL (with trailing slash).
    pub fn serve(responses: Vec<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                // Drain the request head; GETs carry no body.
                while reader.read_line(&mut line).unwrap_or(0) > 0 {
                    if line == "\r\n" {
                        break;
                    }
                    line.clear();
                }
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        format!("http://{addr}/")
    }

    pub fn response(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{extra_headers}\r\n{body}",
            body.len()
        )
    }

    pub fn redirect(location: &str) -> String {
        response("302 Found", &format!("Location: {location}\r\n"), "")
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::{redirect, response, serve};
    use super::*;
    use std::time::Duration;

    fn transport() -> HttpTransport {
        HttpTransport::new(&Config::new("demo").with_timeout(Some(Duration::from_secs(5)))).unwrap()
    }

    #[test]
    fn test_get_returns_body() {
        let base = serve(vec![response("200 OK", "", r#"{"ok":true}"#)]);
        let body = transport().get(&format!("{base}searchJSON")).unwrap();
        assert_eq!(body, r#"{"ok":true}"#);
    }

    #[test]
    fn test_non_success_status_is_transport_error() {
        let base = serve(vec![response("500 Internal Server Error", "", "oops")]);
        let url = format!("{base}searchJSON?username=demo");
        match transport().get(&url) {
            Err(GeoNamesError::Transport { url: failed, .. }) => assert_eq!(failed, url),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_follows_redirects() {
        let base = serve(vec![
            redirect("/moved"),
            redirect("/moved-again"),
            response("200 OK", "", "{}"),
        ]);
        let body = transport().get(&format!("{base}searchJSON")).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_follows_up_to_redirect_limit() {
        let mut responses: Vec<String> = (0..MAX_REDIRECTS).map(|_| redirect("/loop")).collect();
        responses.push(response("200 OK", "", "{}"));
        let base = serve(responses);

        let body = transport().get(&format!("{base}loop")).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_redirect_limit_is_transport_error() {
        // One redirect too many, with a success waiting behind it.
        let mut responses: Vec<String> =
            (0..=MAX_REDIRECTS).map(|_| redirect("/loop")).collect();
        responses.push(response("200 OK", "", "{}"));
        let base = serve(responses);

        match transport().get(&format!("{base}loop")) {
            Err(GeoNamesError::Transport { source, .. }) => {
                assert!(source.is_redirect(), "unexpected failure: {source}")
            }
            other => panic!("expected redirect error, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/findNearbyJSON");
        assert!(matches!(
            transport().get(&url),
            Err(GeoNamesError::Transport { .. })
        ));
    }
}
