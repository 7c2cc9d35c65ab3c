//! HTTP response type.

use std::collections::HashMap;

const CONTENT_TYPE: &str = "Content-Type";

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// A status response whose body is its reason phrase.
    fn reason(status: u16, phrase: &'static str) -> Self {
        Self::new(status).body(phrase)
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a 200 response carrying a page, such as a rendered form.
    pub fn html(markup: impl Into<String>) -> Self {
        Self::ok()
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(markup.into())
    }

    /// Creates a 200 response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body.into())
    }

    /// Creates a 302 redirect, the usual answer to an accepted submission.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::new(302).header("Location", location)
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::reason(400, "Bad Request")
    }

    /// Creates a 422 response for a submission that failed validation.
    pub fn unprocessable_entity() -> Self {
        Self::reason(422, "Unprocessable Entity")
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        Self::reason(404, "Not Found")
    }

    /// Creates a 405 Method Not Allowed response.
    pub fn method_not_allowed() -> Self {
        Self::reason(405, "Method Not Allowed")
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_server_error() -> Self {
        Self::reason(500, "Internal Server Error")
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}
