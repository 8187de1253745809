use httpfromtcp::http::headers::Headers;
use httpfromtcp::http::parser::ParseError;

#[test]
fn test_headers_valid_single_header() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"Host: localhost:42069\r\n\r\n").unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069"));
    assert_eq!(n, 23);
    assert!(!done);
}

#[test]
fn test_headers_surrounding_whitespace_is_trimmed() {
    let mut headers = Headers::new();
    let data = b"       Host: localhost:42069       \r\n\r\n";
    let (n, done) = headers.parse(data).unwrap();

    assert_eq!(headers.get("host"), Some("localhost:42069"));
    assert_eq!(n, data.len() - 2);
    assert!(!done);
}

#[test]
fn test_headers_repeated_field_accumulates() {
    let mut headers = Headers::new();

    let (n, _) = headers.parse(b"Set-Person: lane-loves-go\r\n\r\n").unwrap();
    assert_eq!(n, 27);
    let (n, _) = headers.parse(b"Set-Person: prime-loves-zig\r\n\r\n").unwrap();
    assert_eq!(n, 29);
    let (n, _) = headers.parse(b"Set-Person: tj-loves-ocaml\r\n\r\n").unwrap();
    assert_eq!(n, 28);

    assert_eq!(
        headers.get("set-person"),
        Some("lane-loves-go, prime-loves-zig, tj-loves-ocaml")
    );
}

#[test]
fn test_headers_accumulate_across_blocks() {
    let mut headers = Headers::new();
    headers.parse(b"K: a\r\n\r\n").unwrap();
    headers.parse(b"K: b\r\n\r\n").unwrap();

    assert_eq!(headers.get("k"), Some("a, b"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_headers_field_name_is_case_folded() {
    let mut upper = Headers::new();
    let mut lower = Headers::new();
    upper.parse(b"HOST: x\r\n\r\n").unwrap();
    lower.parse(b"host: x\r\n\r\n").unwrap();

    assert_eq!(upper, lower);
    assert_eq!(upper.iter().next(), Some(("host", "x")));
}

#[test]
fn test_headers_lookup_ignores_case() {
    let mut headers = Headers::new();
    headers.parse(b"Content-Type: text/plain\r\n").unwrap();

    assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
    assert_eq!(headers.get("content-type"), Some("text/plain"));
    assert!(headers.contains("Content-Type"));
}

#[test]
fn test_headers_done_on_blank_line() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"\r\n a bunch of other stuff").unwrap();

    assert_eq!(n, 2);
    assert!(done);
    assert!(headers.is_empty());
}

#[test]
fn test_headers_incomplete_line_consumes_nothing() {
    let mut headers = Headers::new();
    let (n, done) = headers.parse(b"Host: localhost:42").unwrap();

    assert_eq!(n, 0);
    assert!(!done);
}

#[test]
fn test_headers_rejects_space_before_colon() {
    let mut headers = Headers::new();
    let result = headers.parse(b"Host : v\r\n\r\n");

    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
    assert!(headers.is_empty());
}

#[test]
fn test_headers_rejects_padded_name_with_space_before_colon() {
    let mut headers = Headers::new();
    let result = headers.parse(b"       Host : localhost:42069       \r\n\r\n");

    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
}

#[test]
fn test_headers_rejects_missing_colon() {
    let mut headers = Headers::new();
    let result = headers.parse(b"BrokenHeader\r\n\r\n");

    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
}

#[test]
fn test_headers_rejects_leading_colon() {
    let mut headers = Headers::new();
    let result = headers.parse(b": value\r\n\r\n");

    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
}

#[test]
fn test_headers_rejects_invalid_name_character() {
    let mut headers = Headers::new();
    let result = headers.parse("H©st: localhost:42069\r\n\r\n".as_bytes());

    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
    assert!(headers.is_empty());
}

#[test]
fn test_headers_rejects_space_inside_name() {
    let mut headers = Headers::new();
    let result = headers.parse(b"  x: y\r\n");
    assert!(result.is_ok());

    let result = headers.parse(b"a b: y\r\n");
    assert!(matches!(result, Err(ParseError::MalformedHeaderLine(_))));
}

#[test]
fn test_headers_empty_value_is_allowed() {
    let mut headers = Headers::new();
    headers.parse(b"X-Empty:\r\n").unwrap();

    assert_eq!(headers.get("x-empty"), Some(""));
}

#[test]
fn test_headers_set_replaces_value() {
    let mut headers = Headers::new();
    headers.insert("Connection", "keep-alive");
    headers.insert("connection", "upgrade");
    assert_eq!(headers.get("connection"), Some("keep-alive, upgrade"));

    headers.set("CONNECTION", "close");
    assert_eq!(headers.get("connection"), Some("close"));
}
