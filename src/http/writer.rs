use std::io;

use bytes::{BufMut, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::Headers;
use crate::http::response::StatusCode;

const HTTP_VERSION: &str = "HTTP/1.1";

#[derive(Debug, Error)]
#[error("error writing {part}: {source}")]
pub struct WriteError {
    pub part: &'static str,
    #[source]
    pub source: io::Error,
}

/// Serializes a response piece by piece onto an output sink.
pub struct ResponseWriter<'a, W> {
    sink: &'a mut W,
}

impl<'a, W> ResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(sink: &'a mut W) -> Self {
        Self { sink }
    }

    /// Writes `HTTP/1.1 <code> <reason> \r\n`.
    ///
    /// The space before CRLF is always present, even when the reason phrase
    /// is empty.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), WriteError> {
        let line = format!(
            "{} {} {} \r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        );
        self.write_all("status line", line.as_bytes()).await
    }

    /// Writes each header as `name: value\r\n` followed by the blank line.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), WriteError> {
        let mut buf = BytesMut::new();

        for (name, value) in headers.iter() {
            buf.put_slice(name.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"\r\n");

        self.write_all("headers", &buf).await
    }

    pub async fn write_body(&mut self, body: &[u8]) -> Result<(), WriteError> {
        self.write_all("body", body).await?;
        self.sink
            .flush()
            .await
            .map_err(|source| WriteError { part: "body", source })
    }

    async fn write_all(&mut self, part: &'static str, data: &[u8]) -> Result<(), WriteError> {
        self.sink
            .write_all(data)
            .await
            .map_err(|source| WriteError { part, source })
    }
}
