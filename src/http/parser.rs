//! Incremental HTTP/1.1 request parsing.
//!
//! [`RequestParser`] is fed whatever bytes are currently buffered and
//! reports how many of them it consumed, so input may be split at any byte
//! boundary across reads.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::http::headers::{Headers, find_crlf};
use crate::http::request::{Request, RequestLine};

const HTTP_PREFIX: &str = "HTTP/";
const SUPPORTED_VERSION: &str = "1.1";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request line: {0}")]
    MalformedRequestLine(&'static str),
    #[error("invalid method {0:?}: must be uppercase ASCII letters")]
    InvalidMethod(String),
    #[error("unsupported HTTP version {0:?}")]
    UnsupportedVersion(String),
    #[error("request target must be non-empty and contain no whitespace")]
    InvalidTarget,
    #[error("malformed header line: {0}")]
    MalformedHeaderLine(&'static str),
    #[error("invalid content-length {0:?}")]
    InvalidContentLength(String),
    #[error("body length ({received}) is greater than content-length ({declared})")]
    BodyTooLong { declared: usize, received: usize },
    #[error("body length ({received}) is smaller than content-length ({declared})")]
    IncompleteBody { declared: usize, received: usize },
    #[error("request exceeds the {limit}-byte buffer limit")]
    RequestTooLarge { limit: usize },
    #[error("incomplete request, stream ended in state {0}")]
    IncompleteRequest(ParseState),
    #[error("error reading request: {0}")]
    Read(#[source] io::Error),
    #[error("unknown parser state")]
    UnknownParserState,
}

/// Progress of a request through the parser. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ParseState {
    AwaitingRequestLine,
    ParsingHeaders,
    ParsingBody,
    Done,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::AwaitingRequestLine => "awaiting request line",
            ParseState::ParsingHeaders => "parsing headers",
            ParseState::ParsingBody => "parsing body",
            ParseState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Parses the first CRLF-terminated line of `data` as a request line.
///
/// Returns `Ok(None)` when no complete line is buffered yet. On success the
/// consumed byte count includes the CRLF.
///
/// The line must be valid UTF-8; any other bytes, including ones inside the
/// target, fail with `MalformedRequestLine`.
pub fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..idx])
        .map_err(|_| ParseError::MalformedRequestLine("not valid UTF-8"))?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::MalformedRequestLine(
            "expected exactly 3 space-separated parts",
        ));
    };

    if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ParseError::InvalidMethod(method.to_string()));
    }

    let version = version
        .strip_prefix(HTTP_PREFIX)
        .filter(|v| *v == SUPPORTED_VERSION)
        .ok_or_else(|| ParseError::UnsupportedVersion(version.to_string()))?;

    if target.is_empty() || target.chars().any(char::is_whitespace) {
        return Err(ParseError::InvalidTarget);
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: version.to_string(),
    };

    Ok(Some((request_line, idx + 2)))
}

/// Request state machine.
///
/// Accumulates a request across any number of [`parse`](Self::parse) calls.
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::AwaitingRequestLine,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Feeds the currently buffered bytes to the state machine.
    ///
    /// Returns how many bytes of `data` were consumed; the caller discards
    /// those and passes the rest again, followed by newly read bytes, on the
    /// next call. `eof` signals that no more input will ever arrive.
    pub fn parse(&mut self, data: &[u8], eof: bool) -> Result<usize, ParseError> {
        let mut consumed = 0;

        while self.state != ParseState::Done {
            let before = self.state;
            let n = self.parse_single(&data[consumed..], eof)?;
            consumed += n;

            if n == 0 && self.state == before {
                break;
            }
        }

        Ok(consumed)
    }

    fn parse_single(&mut self, data: &[u8], eof: bool) -> Result<usize, ParseError> {
        match self.state {
            ParseState::AwaitingRequestLine => self.parse_request_line(data),
            ParseState::ParsingHeaders => self.parse_headers(data),
            ParseState::ParsingBody => self.parse_body(data, eof),
            ParseState::Done => Ok(0),
        }
    }

    fn parse_request_line(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match parse_request_line(data)? {
            Some((request_line, n)) => {
                self.request_line = Some(request_line);
                self.state = ParseState::ParsingHeaders;
                Ok(n)
            }
            None => Ok(0),
        }
    }

    fn parse_headers(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let mut consumed = 0;

        loop {
            let (n, done) = self.headers.parse(&data[consumed..])?;
            consumed += n;

            if done {
                self.state = ParseState::ParsingBody;
                return Ok(consumed);
            }
            if n == 0 {
                return Ok(consumed);
            }
        }
    }

    fn parse_body(&mut self, data: &[u8], eof: bool) -> Result<usize, ParseError> {
        let Some(raw) = self.headers.get("content-length") else {
            // Without a declared length, whatever is buffered is dropped.
            self.state = ParseState::Done;
            return Ok(data.len());
        };

        let declared: usize = raw
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))?;

        self.body.extend_from_slice(data);
        let received = self.body.len();

        if received > declared {
            return Err(ParseError::BodyTooLong { declared, received });
        }

        if received == declared {
            self.state = ParseState::Done;
        } else if eof {
            return Err(ParseError::IncompleteBody { declared, received });
        }

        Ok(data.len())
    }

    /// Converts a finished parser into the immutable request.
    pub fn finish(self) -> Result<Request, ParseError> {
        if self.state != ParseState::Done {
            return Err(ParseError::IncompleteRequest(self.state));
        }

        let request_line = self.request_line.ok_or(ParseError::UnknownParserState)?;

        Ok(Request {
            request_line,
            headers: self.headers,
            body: self.body,
        })
    }
}
