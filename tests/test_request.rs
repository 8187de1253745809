use bytes::BytesMut;
use httpfromtcp::http::parser::RequestParser;
use httpfromtcp::http::request::Request;
use httpfromtcp::server::routes;

fn request(raw: &[u8]) -> Request {
    let mut parser = RequestParser::new();
    parser.parse(raw, true).unwrap();
    parser.finish().unwrap()
}

#[test]
fn test_request_header_retrieval() {
    let req = request(b"GET / HTTP/1.1\r\nHost: example.com\r\nContent-Type: application/json\r\n\r\n");

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length() {
    let req = request(b"POST /api HTTP/1.1\r\nContent-Length: 2\r\n\r\nok");
    assert_eq!(req.content_length(), Some(2));

    let req = request(b"GET / HTTP/1.1\r\n\r\n");
    assert_eq!(req.content_length(), None);
}

#[test]
fn test_request_line_accessors() {
    let req = request(b"DELETE /items/7?force=1 HTTP/1.1\r\n\r\n");

    assert_eq!(req.method(), "DELETE");
    assert_eq!(req.target(), "/items/7?force=1");
    assert_eq!(req.version(), "1.1");
    assert_eq!(req.request_line().method, "DELETE");
}

#[test]
fn test_request_clone_is_equal() {
    let req = request(b"PUT /x HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc");
    assert_eq!(req.clone(), req);
}

#[test]
fn test_demo_route_ok() {
    let mut body = BytesMut::new();
    let result = routes::demo(&mut body, &request(b"GET / HTTP/1.1\r\n\r\n"));

    assert!(result.is_ok());
    assert_eq!(&body[..], b"All good, frfr\n");
}

#[test]
fn test_demo_route_your_problem() {
    let mut body = BytesMut::new();
    let err = routes::demo(&mut body, &request(b"GET /yourproblem HTTP/1.1\r\n\r\n")).unwrap_err();

    assert_eq!(err.status.as_u16(), 400);
    assert_eq!(err.message, "Your problem is not my problem\n");
}

#[test]
fn test_demo_route_my_problem() {
    let mut body = BytesMut::new();
    let err = routes::demo(&mut body, &request(b"GET /myproblem HTTP/1.1\r\n\r\n")).unwrap_err();

    assert_eq!(err.status.as_u16(), 500);
    assert_eq!(err.message, "Woopsie, my bad\n");
}
