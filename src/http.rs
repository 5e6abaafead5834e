use std::fmt::Write;

use reqwest::Method;
use url::Url;

use crate::{PostNLError, PostNLResult};

/// An outbound HTTP request, as built by the REST and SOAP adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: Method,
    /// The full URL including the query string.
    pub url: Url,
    /// Request headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// The request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        HttpRequest {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header to the request.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the body of the request.
    pub fn body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response received from the HTTP collaborator, or restored from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, in the order they were received.
    pub headers: Vec<(String, String)>,
    /// The decoded response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response without headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header to the response.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Returns the first header with the given name (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses a raw HTTP/1.1 response message as produced by [`ToHttpString`].
    pub fn parse_http_string(raw: &str) -> PostNLResult<HttpResponse> {
        let (head, body) = match raw.split_once("\r\n\r\n") {
            Some(parts) => parts,
            None => raw
                .split_once("\n\n")
                .ok_or_else(|| PostNLError::response("raw message has no header terminator"))?,
        };
        let mut lines = head.lines();
        let status_line = lines
            .next()
            .ok_or_else(|| PostNLError::response("raw message is empty"))?;
        let mut parts = status_line.split_whitespace();
        match parts.next() {
            Some(version) if version.starts_with("HTTP/") => {}
            _ => return Err(PostNLError::response("raw message has no status line")),
        }
        let status = parts
            .next()
            .and_then(|code| code.parse::<u16>().ok())
            .ok_or_else(|| PostNLError::response("raw message has an invalid status code"))?;

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| PostNLError::response(format!("malformed header line `{line}`")))?;
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_string(),
        })
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Trait for rendering a message as raw HTTP/1.1 text.
///
/// Responses are stored in the cache in this format; requests are rendered this way for
/// debug logging.
pub trait ToHttpString {
    /// Converts the message to a HTTP string.
    fn to_http_string(&self) -> String;
}

impl ToHttpString for HttpRequest {
    fn to_http_string(&self) -> String {
        let mut result = String::new();
        let query = self
            .url
            .query()
            .map(|query| format!("?{query}"))
            .unwrap_or_default();
        let _ = write!(
            result,
            "{} {}{} HTTP/1.1\r\n",
            self.method,
            self.url.path(),
            query
        );
        if let Some(host) = self.url.host_str() {
            let _ = match self.url.port() {
                Some(port) => write!(result, "host: {host}:{port}\r\n"),
                None => write!(result, "host: {host}\r\n"),
            };
        }
        for (name, value) in &self.headers {
            let _ = write!(result, "{name}: {value}\r\n");
        }
        result.push_str("\r\n");
        if let Some(body) = &self.body {
            result.push_str(body);
        }
        result
    }
}

impl ToHttpString for HttpResponse {
    fn to_http_string(&self) -> String {
        let mut result = String::new();
        let _ = write!(
            result,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        );
        for (name, value) in &self.headers {
            let _ = write!(result, "{name}: {value}\r\n");
        }
        result.push_str("\r\n");
        result.push_str(&self.body);
        result
    }
}

fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}
