use crate::http::headers::Headers;

/// The first line of a request: method, target and protocol version.
///
/// Only produced by the request-line parser, so the method is always
/// non-empty uppercase ASCII, the target contains no whitespace and the
/// version is `"1.1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: String,
    pub target: String,
    pub version: String,
}

/// A fully parsed HTTP/1.1 request.
///
/// Handed to the handler once parsing reaches `Done`; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub(crate) request_line: RequestLine,
    pub(crate) headers: Headers,
    pub(crate) body: Vec<u8>,
}

impl Request {
    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    /// The request method, e.g. `GET`.
    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    /// The request target exactly as sent, e.g. `/search?q=rust`.
    pub fn target(&self) -> &str {
        &self.request_line.target
    }

    /// The protocol version without the `HTTP/` prefix.
    pub fn version(&self) -> &str {
        &self.request_line.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The declared `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")
            .and_then(|v| v.trim().parse().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
