use bytes::BytesMut;
use tokio::io::AsyncWrite;

use crate::http::request::Request;
use crate::http::response::{StatusCode, default_headers};
use crate::http::writer::{ResponseWriter, WriteError};

/// An error returned by a handler. Replaces the whole response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Writes this error as a complete response: status line, default
    /// headers and the message as body.
    pub async fn write_to<W>(&self, writer: &mut ResponseWriter<'_, W>) -> Result<(), WriteError>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_status_line(self.status).await?;
        writer
            .write_headers(&default_headers(self.message.len()))
            .await?;
        writer.write_body(self.message.as_bytes()).await
    }
}

/// Application code invoked once per successfully parsed request.
///
/// Whatever the handler writes into `body` is sent with status 200. Returning
/// an error discards that output and sends the error instead.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, body: &mut BytesMut, request: &Request) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&mut BytesMut, &Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn handle(&self, body: &mut BytesMut, request: &Request) -> Result<(), HandlerError> {
        self(body, request)
    }
}
