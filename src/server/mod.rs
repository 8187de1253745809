//! Connection-accepting server.
//!
//! - **`listener`**: binds the socket, runs the accept loop and spawns one
//!   task per connection
//! - **`handler`**: the contract between the server and application code
//! - **`routes`**: the demo handler used by the binary

pub mod handler;
pub mod listener;
pub mod routes;

pub use handler::{Handler, HandlerError};
pub use listener::Server;
