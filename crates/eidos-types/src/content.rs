//! Payload carried by a knowledge unit.
//!
//! Content is either plain text or a structured JSON value. Both have a
//! textual form (via [`Display`](core::fmt::Display)) that the store uses
//! for substring matching and that mutation and recombination build on.

use serde::{Deserialize, Serialize};

/// The payload of a knowledge unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Content {
    /// Free-form text.
    Text(String),
    /// Arbitrary structured data, rendered as compact JSON.
    Structured(serde_json::Value),
}

impl Content {
    /// Lowercased textual form, used for case-insensitive matching.
    pub fn to_lowercase(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Whether the textual form contains `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        self.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl core::fmt::Display for Content {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Self::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renders_verbatim() {
        let content = Content::from("Foundational principles of ethical AI.");
        assert_eq!(content.to_string(), "Foundational principles of ethical AI.");
    }

    #[test]
    fn structured_renders_compact_json() {
        let content = Content::from(serde_json::json!({"goal": "align"}));
        assert_eq!(content.to_string(), r#"{"goal":"align"}"#);
    }

    #[test]
    fn matching_ignores_case() {
        let content = Content::from("Vision for Decentralized AGI governance");
        assert!(content.contains_ignore_case("decentralized"));
        assert!(content.contains_ignore_case("AGI GOV"));
        assert!(!content.contains_ignore_case("ethical"));
    }

    #[test]
    fn structured_content_is_searchable() {
        let content = Content::from(serde_json::json!({"source": "History"}));
        assert!(content.contains_ignore_case("history"));
    }

    #[test]
    fn serde_tags_the_variant() {
        let json = serde_json::to_value(Content::from("x")).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"kind": "text", "value": "x"}));
    }
}
