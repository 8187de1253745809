//! HTTP/1.1 protocol implementation on top of a raw byte stream.
//!
//! # Architecture
//!
//! - **`buffer`**: growable staging buffer holding bytes read but not yet parsed
//! - **`headers`**: case-insensitive header map and the single-line header parser
//! - **`parser`**: request-line parser and the incremental request state machine
//! - **`request`**: the immutable parsed request handed to handlers
//! - **`response`**: status codes and default response headers
//! - **`writer`**: serializes status line, headers and body to an output sink
//! - **`connection`**: reads one request, runs the handler, writes the response
//!
//! # Parser State Machine
//!
//! ```text
//!        ┌─────────────────────┐
//!        │ AwaitingRequestLine │ ← Wait for "METHOD SP TARGET SP HTTP/1.1\r\n"
//!        └──────────┬──────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │   ParsingHeaders    │ ← One header line per step, until "\r\n"
//!        └──────────┬──────────┘
//!                   ▼
//!        ┌─────────────────────┐
//!        │     ParsingBody     │ ← Collect Content-Length bytes
//!        └──────────┬──────────┘   (skipped without Content-Length)
//!                   ▼
//!        ┌─────────────────────┐
//!        │        Done         │
//!        └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use httpfromtcp::http::parser::RequestParser;
//!
//! let mut parser = RequestParser::new();
//! parser.parse(b"GET /path HTTP/1.1\r\nHost: localhost\r\n\r\n", false).unwrap();
//!
//! let request = parser.finish().unwrap();
//! assert_eq!(request.method(), "GET");
//! assert_eq!(request.header("HOST"), Some("localhost"));
//! ```

pub mod buffer;
pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
