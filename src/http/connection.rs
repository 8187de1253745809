use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::trace;

use crate::http::buffer::{BufferLimits, StagingBuffer};
use crate::http::parser::{ParseError, RequestParser};
use crate::http::request::Request;
use crate::http::response::{StatusCode, default_headers};
use crate::http::writer::{ResponseWriter, WriteError};
use crate::server::handler::{Handler, HandlerError};

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to parse request: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Reads one complete request from `reader`.
///
/// Bytes go through a staging buffer that starts at `limits.initial` and
/// doubles whenever it fills up, never past `limits.max`; parsed bytes are
/// discarded after every read.
pub async fn read_request<R>(reader: &mut R, limits: BufferLimits) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = StagingBuffer::new(limits);
    let mut parser = RequestParser::new();

    while !parser.is_done() {
        trace!(state = %parser.state(), buffered = buffer.len(), "reading request");

        let limit = buffer.max_capacity();
        let spare = buffer
            .spare_mut()
            .ok_or(ParseError::RequestTooLarge { limit })?;
        let n = reader.read(spare).await.map_err(ParseError::Read)?;
        let eof = n == 0;
        buffer.advance(n);

        let consumed = parser.parse(buffer.filled(), eof)?;
        buffer.consume(consumed);

        if eof && !parser.is_done() {
            return Err(ParseError::IncompleteRequest(parser.state()));
        }
    }

    parser.finish()
}

/// What gets written back for a handled request.
pub enum Reply {
    Ok(BytesMut),
    Failed(HandlerError),
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(Reply),
    Closed,
}

/// A single request/response exchange over one stream.
pub struct Connection<S> {
    stream: S,
    limits: BufferLimits,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, limits: BufferLimits) -> Self {
        Self {
            stream,
            limits,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the exchange to completion. A request that fails to parse never
    /// reaches the handler and gets no response.
    pub async fn run(&mut self, handler: &dyn Handler) -> Result<(), ConnectionError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = read_request(&mut self.stream, self.limits).await?;
                    self.state = ConnectionState::Processing(request);
                }

                ConnectionState::Processing(request) => {
                    let mut body = BytesMut::new();
                    let reply = match handler.handle(&mut body, &request) {
                        Ok(()) => Reply::Ok(body),
                        Err(e) => Reply::Failed(e),
                    };
                    self.state = ConnectionState::Writing(reply);
                }

                ConnectionState::Writing(reply) => {
                    let mut writer = ResponseWriter::new(&mut self.stream);
                    match reply {
                        Reply::Ok(body) => {
                            writer.write_status_line(StatusCode::OK).await?;
                            writer.write_headers(&default_headers(body.len())).await?;
                            writer.write_body(&body).await?;
                        }
                        Reply::Failed(e) => e.write_to(&mut writer).await?,
                    }
                    // No keep-alive: one exchange per connection.
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => break,
            }
        }

        Ok(())
    }
}
