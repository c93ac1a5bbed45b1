//! Transport layer abstraction for service calls.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// HTTP verbs used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Content type attached to every request with a body.
    pub const JSON_CONTENT_TYPE: &'static str = "application/json";

    /// Creates a request; a JSON `Content-Type` header is added iff `body` is present.
    pub fn new(method: HttpMethod, url: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        let headers = if body.is_some() {
            vec![("Content-Type".to_string(), Self::JSON_CONTENT_TYPE.to_string())]
        } else {
            Vec::new()
        };

        Self {
            method,
            url: url.into(),
            headers,
            body,
        }
    }

    /// Returns the value of a header, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Connectivity-level failure (DNS, TLS, timeout, reset...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Error message.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw result of one HTTP exchange.
///
/// A response status and a transport error can coexist (e.g. a connection
/// dropped while the body was streaming); classification treats any error
/// as a failure regardless of status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpExchange {
    /// HTTP status code, if a response head was received.
    pub status: Option<u16>,
    /// Response body bytes received, possibly empty.
    pub body: Vec<u8>,
    /// Transport-level error, if one occurred.
    pub error: Option<TransportError>,
}

impl HttpExchange {
    /// Creates an exchange that received a full response.
    pub fn response(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            body: body.into(),
            error: None,
        }
    }

    /// Creates an exchange that failed before any response arrived.
    pub fn failed(error: TransportError) -> Self {
        Self {
            status: None,
            body: Vec::new(),
            error: Some(error),
        }
    }

    /// Attaches a transport error to an exchange.
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }
}

/// An HTTP transport performs a single exchange with the service.
///
/// This trait abstracts the network layer, allowing for different
/// implementations (`reqwest`, in-process loopback, mock for testing, etc.).
/// Timeouts, pooling and retries are the transport's business.
pub trait HttpTransport: Send + Sync {
    /// Executes one request and returns whatever came back.
    fn execute(&self, request: &HttpRequest) -> HttpExchange;
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> HttpExchange {
        (**self).execute(request)
    }
}

/// A mock transport for testing.
///
/// Replies are served in the order they were queued; once the queue is
/// empty every request gets the default reply (status 200, empty body).
/// Every request is recorded.
#[derive(Debug)]
pub struct MockTransport {
    replies: Mutex<VecDeque<HttpExchange>>,
    default_reply: Mutex<HttpExchange>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_reply: Mutex::new(HttpExchange::response(200, Vec::new())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a reply for the next unanswered request.
    pub fn push_reply(&self, reply: HttpExchange) {
        self.replies.lock().push_back(reply);
    }

    /// Queues a full response for the next unanswered request.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.push_reply(HttpExchange::response(status, body));
    }

    /// Sets the reply used once the queue is drained.
    pub fn set_default_reply(&self, reply: HttpExchange) {
        *self.default_reply.lock() = reply;
    }

    /// Returns every request executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests executed so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> HttpExchange {
        self.requests.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.default_reply.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_only_with_body() {
        let with_body = HttpRequest::new(HttpMethod::Put, "https://x", Some(b"{}".to_vec()));
        assert_eq!(with_body.header("content-type"), Some("application/json"));

        let without = HttpRequest::new(HttpMethod::Delete, "https://x", None);
        assert!(without.header("Content-Type").is_none());
        assert!(without.headers.is_empty());
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn mock_transport_serves_queue_then_default() {
        let transport = MockTransport::new();
        transport.push_response(500, b"oops".to_vec());

        let request = HttpRequest::new(HttpMethod::Post, "https://x", None);
        assert_eq!(transport.execute(&request).status, Some(500));
        assert_eq!(transport.execute(&request).status, Some(200));
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn mock_transport_default_reply() {
        let transport = MockTransport::new();
        transport.set_default_reply(HttpExchange::failed(TransportError::new("offline")));

        let request = HttpRequest::new(HttpMethod::Delete, "https://x", None);
        let exchange = transport.execute(&request);
        assert!(exchange.status.is_none());
        assert_eq!(exchange.error, Some(TransportError::new("offline")));
        assert_eq!(transport.last_request(), Some(request));
    }
}
