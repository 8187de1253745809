use std::collections::HashMap;

use crate::http::parser::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Token characters allowed in a field name besides ASCII letters and digits.
const TOKEN_CHARS: &[u8] = b"!#$%&'*+-.^_`|~";

/// A case-insensitive header map.
///
/// Field names are stored lower-cased. Adding a name that is already present
/// appends the new value to the old one, separated by `", "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses at most one CRLF-terminated header line from `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line that
    /// ends the header block was seen. `(0, false)` means the line is not
    /// complete yet and more input is needed.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(idx) = find_crlf(data) else {
            return Ok((0, false));
        };

        if idx == 0 {
            return Ok((CRLF.len(), true));
        }

        let line = &data[..idx];

        let sep = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::MalformedHeaderLine("missing ':' separator"))?;

        if sep == 0 {
            return Err(ParseError::MalformedHeaderLine("line starts with ':'"));
        }

        if line[sep - 1].is_ascii_whitespace() {
            return Err(ParseError::MalformedHeaderLine(
                "whitespace between field name and ':'",
            ));
        }

        let name = line[..sep].trim_ascii();
        if name.is_empty() {
            return Err(ParseError::MalformedHeaderLine("empty field name"));
        }
        if !name.iter().all(|&b| is_field_name_char(b)) {
            return Err(ParseError::MalformedHeaderLine(
                "invalid character in field name",
            ));
        }

        // Validated above: the name is pure ASCII.
        let name = String::from_utf8_lossy(name).to_ascii_lowercase();
        let value = String::from_utf8_lossy(line[sep + 1..].trim_ascii());

        self.insert(name, value);

        Ok((idx + CRLF.len(), false))
    }

    /// Adds a field, appending to any existing value for the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl AsRef<str>) {
        let key = name.as_ref().to_ascii_lowercase();
        let value = value.as_ref();

        self.fields
            .entry(key)
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Sets a field, replacing any existing value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.fields
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Looks up a field by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub(crate) fn find_crlf(data: &[u8]) -> Option<usize> {
    data.windows(CRLF.len()).position(|w| w == CRLF)
}

fn is_field_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_CHARS.contains(&b)
}
