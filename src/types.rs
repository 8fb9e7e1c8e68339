use crate::config::ScanConfig;
use crate::error::QueryError;
use serde::{Deserialize, Serialize};

pub const MIN_QUERY_CHARS: usize = 3;

/// A paste discovered on the archive page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PasteRef {
    pub id: String,
    pub view_url: String,
    pub raw_url: String,
}

impl PasteRef {
    pub fn new(id: &str, config: &ScanConfig) -> Self {
        Self {
            id: id.to_string(),
            view_url: config.view_url(id),
            raw_url: config.raw_url(id),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub link: String,
    pub snippet: String,
}

/// A validated search phrase, trimmed and at least three characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPhrase(String);

impl SearchPhrase {
    pub fn parse(raw: Option<&str>) -> Result<Self, QueryError> {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Err(QueryError::Missing);
        }
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(QueryError::TooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinksResponse {
    pub total_links: usize,
    pub links: Vec<PasteRef>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_requires_three_chars_after_trim() {
        assert_eq!(SearchPhrase::parse(None), Err(QueryError::Missing));
        assert_eq!(SearchPhrase::parse(Some("")), Err(QueryError::Missing));
        assert_eq!(SearchPhrase::parse(Some("   ")), Err(QueryError::Missing));
        assert_eq!(SearchPhrase::parse(Some("ab")), Err(QueryError::TooShort));
        assert_eq!(SearchPhrase::parse(Some("  ab  ")), Err(QueryError::TooShort));

        let phrase = SearchPhrase::parse(Some("  api key ")).unwrap();
        assert_eq!(phrase.as_str(), "api key");
    }

    #[test]
    fn test_phrase_length_counts_chars_not_bytes() {
        // two chars, four bytes
        assert_eq!(SearchPhrase::parse(Some("éé")), Err(QueryError::TooShort));
        assert!(SearchPhrase::parse(Some("ééé")).is_ok());
    }

    #[test]
    fn test_paste_ref_serializes_expected_fields() {
        let paste = PasteRef::new("abc123", &ScanConfig::default());
        let json = serde_json::to_value(&paste).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc123",
                "view_url": "https://pastebin.com/abc123",
                "raw_url": "https://pastebin.com/raw/abc123"
            })
        );
    }
}
