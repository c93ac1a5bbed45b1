//! HTTP transport implementations.
//!
//! [`LoopbackTransport`] routes requests straight to an in-process service,
//! useful for testing without network overhead. With the `reqwest` feature,
//! [`ReqwestTransport`] talks to a real server over a blocking client.

use crate::transport::{HttpExchange, HttpMethod, HttpRequest, HttpTransport};

/// Trait for services that can handle loopback requests.
pub trait LoopbackService {
    /// Handles a request and returns `(status, body)`.
    fn handle(&self, method: HttpMethod, path: &str, body: Option<&[u8]>) -> (u16, Vec<u8>);
}

/// A transport that hands requests directly to a [`LoopbackService`].
pub struct LoopbackTransport<S: LoopbackService> {
    service: S,
}

impl<S: LoopbackService + Send + Sync> LoopbackTransport<S> {
    /// Creates a new loopback transport connected to the given service.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Returns the service behind this transport.
    pub fn service(&self) -> &S {
        &self.service
    }
}

impl<S: LoopbackService + Send + Sync> HttpTransport for LoopbackTransport<S> {
    fn execute(&self, request: &HttpRequest) -> HttpExchange {
        let (status, body) = self.service.handle(
            request.method,
            url_path(&request.url),
            request.body.as_deref(),
        );
        HttpExchange::response(status, body)
    }
}

/// Extracts the path (and query) from an absolute URL.
fn url_path(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| &url[i + 3..]).unwrap_or(url);
    after_scheme
        .find('/')
        .map(|i| &after_scheme[i..])
        .unwrap_or("/")
}

#[cfg(feature = "reqwest")]
mod client {
    use crate::config::ServiceConfig;
    use crate::transport::{HttpExchange, HttpMethod, HttpRequest, HttpTransport, TransportError};
    use reqwest::blocking::Client;
    use reqwest::Method;

    /// Blocking `reqwest` transport.
    ///
    /// Honours [`ServiceConfig::timeout`] and [`ServiceConfig::user_agent`].
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        /// Builds a transport from the service configuration.
        ///
        /// # Errors
        ///
        /// Returns an error if the TLS backend cannot be initialised.
        pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
            let client = Client::builder()
                .timeout(config.timeout)
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(|e| TransportError::new(e.to_string()))?;
            Ok(Self { client })
        }

        /// Wraps an already configured client.
        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    impl HttpTransport for ReqwestTransport {
        fn execute(&self, request: &HttpRequest) -> HttpExchange {
            let method = match request.method {
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Delete => Method::DELETE,
            };

            let mut builder = self.client.request(method, request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }

            let response = match builder.send() {
                Ok(response) => response,
                Err(e) => return HttpExchange::failed(TransportError::new(e.to_string())),
            };

            let status = response.status().as_u16();
            match response.bytes() {
                Ok(bytes) => HttpExchange::response(status, bytes.to_vec()),
                Err(e) => HttpExchange::response(status, Vec::new())
                    .with_error(TransportError::new(e.to_string())),
            }
        }
    }
}

#[cfg(feature = "reqwest")]
pub use client::ReqwestTransport;

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct EchoService {
        seen: Mutex<Vec<(HttpMethod, String)>>,
    }

    impl LoopbackService for EchoService {
        fn handle(&self, method: HttpMethod, path: &str, body: Option<&[u8]>) -> (u16, Vec<u8>) {
            self.seen.lock().push((method, path.to_string()));
            (200, body.map(<[u8]>::to_vec).unwrap_or_default())
        }
    }

    #[test]
    fn path_extraction() {
        assert_eq!(url_path("https://push.example.com/device/1?x=y"), "/device/1?x=y");
        assert_eq!(url_path("http://localhost:8080"), "/");
        assert_eq!(url_path("/relative/path"), "/relative/path");
    }

    #[test]
    fn loopback_routes_to_service() {
        let transport = LoopbackTransport::new(EchoService::default());
        let request = HttpRequest::new(
            HttpMethod::Put,
            "https://push.example.com/interests",
            Some(b"{\"interests\":[]}".to_vec()),
        );

        let exchange = transport.execute(&request);
        assert_eq!(exchange.status, Some(200));
        assert_eq!(exchange.body, b"{\"interests\":[]}");
        assert_eq!(
            transport.service().seen.lock().as_slice(),
            &[(HttpMethod::Put, "/interests".to_string())]
        );
    }
}
