//! Offline content tier
//!
//! A local generator over a small fixed set of canned quotes. The payload is
//! wrapped in the same JSON shape a remote tier could return, so the fetch
//! path handles every tier uniformly.

use rand::seq::SliceRandom;

use super::schema::WRAPPED_AUTHOR;

/// Canned quotes served when every remote tier is down
const LOCAL_QUOTES: &[&str] = &[
    "Rise early, for the dawn rewards the diligent.",
    "Patience is bitter, but its fruit is sweet.",
    "Even a small stream can carve through rock with persistence.",
    "When you learn, teach; when you get, give.",
    "Every morning is a fresh page; write wisdom upon it.",
];

/// Produce one random canned quote as a raw JSON payload
pub fn random_payload() -> String {
    let mut rng = rand::thread_rng();
    let quote = LOCAL_QUOTES
        .choose(&mut rng)
        .copied()
        .unwrap_or(LOCAL_QUOTES[0]);

    serde_json::json!({
        "quote": quote,
        "author": WRAPPED_AUTHOR,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::schema::extract_quote;

    #[test]
    fn test_payload_parses_through_the_common_path() {
        let raw = random_payload();
        let (quote, schema) = extract_quote(&raw).expect("offline payload must parse");

        assert_eq!(schema, "wrapped");
        assert_eq!(quote.author, WRAPPED_AUTHOR);
        assert!(LOCAL_QUOTES.contains(&quote.content.as_str()));
    }

    #[test]
    fn test_generator_rotates() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let (quote, _) = extract_quote(&random_payload()).unwrap();
            seen.insert(quote.content);
        }
        // statistically certain to see more than one of five quotes
        assert!(seen.len() > 1, "canned quotes should rotate");
    }
}
