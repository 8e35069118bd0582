//! Payload normalization across heterogeneous tier schemas
//!
//! Each vendor names the same two logical fields differently. Extraction is
//! an ordered list of parser strategies tried until one yields a valid
//! quote:
//!
//! 1. `{"q": .., "a": ..}`, also accepted wrapped in a one-element array,
//!    as the primary vendor returns it
//! 2. `{"content": .., "author": ..}`
//! 3. `{"quote": "<text>"}` with a fixed synthetic author
//!
//! Extracted text is trimmed of whitespace and stray quoting characters; a
//! blank content field fails the parse.

use serde_json::Value;

use crate::models::Quote;

/// Author attributed to the wrapped free-text form when the payload names
/// none itself
pub const WRAPPED_AUTHOR: &str = "Local Wisdom";

/// One "try this shape" strategy
struct ParserStrategy {
    name: &'static str,
    parse: fn(&Value) -> Option<Quote>,
}

const STRATEGIES: &[ParserStrategy] = &[
    ParserStrategy {
        name: "q/a",
        parse: parse_q_a,
    },
    ParserStrategy {
        name: "content/author",
        parse: parse_content_author,
    },
    ParserStrategy {
        name: "wrapped",
        parse: parse_wrapped,
    },
];

/// Extract a canonical quote from a raw tier payload
///
/// Returns the quote and the name of the strategy that recognized it, or
/// `None` when no strategy matched or the content came out blank.
pub fn extract_quote(raw: &str) -> Option<(Quote, &'static str)> {
    let value: Value = serde_json::from_str(raw.trim()).ok()?;

    // The primary vendor wraps its single item in an array
    let value = match value {
        Value::Array(items) => items.into_iter().next()?,
        other => other,
    };

    for strategy in STRATEGIES {
        if let Some(quote) = (strategy.parse)(&value) {
            if quote.is_valid() {
                return Some((quote, strategy.name));
            }
        }
    }
    None
}

fn parse_q_a(value: &Value) -> Option<Quote> {
    let content = field(value, "q")?;
    let author = field(value, "a").unwrap_or_else(|| "Unknown".to_string());
    Some(Quote::new(content, author))
}

fn parse_content_author(value: &Value) -> Option<Quote> {
    let content = field(value, "content")?;
    let author = field(value, "author").unwrap_or_else(|| "Unknown".to_string());
    Some(Quote::new(content, author))
}

fn parse_wrapped(value: &Value) -> Option<Quote> {
    let content = field(value, "quote")?;
    let author = field(value, "author").unwrap_or_else(|| WRAPPED_AUTHOR.to_string());
    Some(Quote::new(content, author))
}

/// Pull a string field and strip whitespace plus stray quoting characters
fn field(value: &Value, key: &str) -> Option<String> {
    let raw = value.get(key)?.as_str()?;
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '\u{201C}' || c == '\u{201D}')
        .trim();
    Some(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_q_a_object() {
        let (quote, schema) =
            extract_quote(r#"{"q": "Stay hungry.", "a": "Jobs", "h": "<b>html</b>"}"#).unwrap();
        assert_eq!(schema, "q/a");
        assert_eq!(quote.content, "Stay hungry.");
        assert_eq!(quote.author, "Jobs");
    }

    #[test]
    fn test_extract_q_a_array_wrapped() {
        let (quote, schema) =
            extract_quote(r#"[{"q": "Stay hungry.", "a": "Jobs"}]"#).unwrap();
        assert_eq!(schema, "q/a");
        assert_eq!(quote.content, "Stay hungry.");
    }

    #[test]
    fn test_extract_content_author() {
        let (quote, schema) =
            extract_quote(r#"{"content": "Know thyself.", "author": "Socrates"}"#).unwrap();
        assert_eq!(schema, "content/author");
        assert_eq!(quote.author, "Socrates");
    }

    #[test]
    fn test_extract_wrapped_uses_fixed_author() {
        let (quote, schema) = extract_quote(r#"{"quote": "Patience is bitter."}"#).unwrap();
        assert_eq!(schema, "wrapped");
        assert_eq!(quote.author, WRAPPED_AUTHOR);
    }

    #[test]
    fn test_identical_content_across_schemas_normalizes_identically() {
        let payloads = [
            r#"[{"q": "The same words.", "a": "Same Author"}]"#,
            r#"{"content": "The same words.", "author": "Same Author"}"#,
            r#"{"quote": "The same words.", "author": "Same Author"}"#,
        ];

        let quotes: Vec<Quote> = payloads
            .iter()
            .map(|p| extract_quote(p).unwrap().0)
            .collect();

        assert_eq!(quotes[0], quotes[1]);
        assert_eq!(quotes[1], quotes[2]);
    }

    #[test]
    fn test_extract_tolerates_quoting_and_whitespace() {
        let (quote, _) = extract_quote(r#"{"quote": "  'Rise early.'  "}"#).unwrap();
        assert_eq!(quote.content, "Rise early.");
    }

    #[test]
    fn test_blank_content_rejected() {
        assert!(extract_quote(r#"{"q": "   ", "a": "Nobody"}"#).is_none());
        assert!(extract_quote(r#"{"quote": "\"\""}"#).is_none());
    }

    #[test]
    fn test_unrecognized_shapes_rejected() {
        assert!(extract_quote("not json at all").is_none());
        assert!(extract_quote(r#"{"body": "wrong field"}"#).is_none());
        assert!(extract_quote("[]").is_none());
        assert!(extract_quote(r#"{"q": 42}"#).is_none());
    }

    #[test]
    fn test_missing_author_defaults() {
        let (quote, _) = extract_quote(r#"{"content": "Anonymous wisdom."}"#).unwrap();
        assert_eq!(quote.author, "Unknown");
    }
}
