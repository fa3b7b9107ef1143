//! Lenient JSON Body Parsing
//!
//! Clients serializing floats with Python-style encoders emit `NaN`,
//! `Infinity` and `-Infinity` as bare tokens, and numbers beyond the f64
//! range (`1e400`) are legal JSON that `serde_json` refuses. Both are
//! rewritten into JSON strings before parsing so the values reach
//! [`FeatureValidator`](crate::FeatureValidator), which coerces numeric
//! strings and reports them as non-finite.

use serde_json::Value;
use std::borrow::Cow;

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Parse a request body, accepting non-finite float tokens
pub fn parse_lenient(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&quote_non_finite(text))
}

/// Quote non-finite tokens and overflowing number literals found outside
/// string literals. Returns the input untouched when there are none.
fn quote_non_finite(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }

        let rest = &bytes[i..];
        if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|t| rest.starts_with(t.as_bytes()) && !continues_word(bytes, i + t.len()))
        {
            out.push_str(&text[copied..i]);
            out.push('"');
            out.push_str(token);
            out.push('"');
            i += token.len();
            copied = i;
            continue;
        }

        if b == b'-' || b.is_ascii_digit() {
            let end = i + rest.iter().take_while(|&&c| is_number_byte(c)).count();
            let literal = &text[i..end];
            if matches!(literal.parse::<f64>(), Ok(v) if v.is_infinite()) {
                out.push_str(&text[copied..i]);
                out.push('"');
                out.push_str(literal);
                out.push('"');
                copied = end;
            }
            i = end;
            continue;
        }

        i += 1;
    }

    if copied == 0 {
        Cow::Borrowed(text)
    } else {
        out.push_str(&text[copied..]);
        Cow::Owned(out)
    }
}

fn is_number_byte(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.' | b'e' | b'E')
}

fn continues_word(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos).map_or(false, |b| b.is_ascii_alphanumeric() || *b == b'_')
}
