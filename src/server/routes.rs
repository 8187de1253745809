//! Demo handler served by the binary.

use bytes::{BufMut, BytesMut};

use crate::http::request::Request;
use crate::http::response::StatusCode;
use crate::server::handler::HandlerError;

pub fn demo(body: &mut BytesMut, request: &Request) -> Result<(), HandlerError> {
    match request.target() {
        "/yourproblem" => Err(HandlerError::new(
            StatusCode::BAD_REQUEST,
            "Your problem is not my problem\n",
        )),
        "/myproblem" => Err(HandlerError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Woopsie, my bad\n",
        )),
        _ => {
            body.put_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}
