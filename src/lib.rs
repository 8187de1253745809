//! httpfromtcp - HTTP/1.1 over raw TCP
//!
//! Incremental request parsing, response serialization and a small
//! connection-per-task server.

pub mod config;
pub mod http;
pub mod server;
