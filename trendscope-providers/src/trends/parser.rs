//! Google Trends response parsers.
//!
//! Two envelope formats come back from the endpoint:
//!
//! 1. **Trending** (`batchexecute`): an anti-hijacking `)]}'` prefix, then a
//!    JSON array whose `[0][2]` is a *string* holding a second JSON document.
//!    That nested document's `[1]` is the row set; every array in it is one
//!    positional trending row.
//! 2. **Autocomplete**: a fixed four-character prefix, then a JSON object
//!    with `default.topics[].title`.
//!
//! Rows carry no key names. All positions live in the layout tables below
//! so a change in the upstream format is a one-place edit.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use trendscope_core::{Article, DailyTrendingTopics, ImageDescriptor, TrendingStory};

use super::error::DecodeError;

// ============================================================================
// Constants
// ============================================================================

/// Anti-hijacking prefix of the trending envelope.
pub const XSSI_PREFIX: &str = ")]}'";

/// Width of the fixed prefix on autocomplete responses.
pub const AUTOCOMPLETE_PREFIX_LEN: usize = 4;

// ============================================================================
// Layout Tables
// ============================================================================

/// Positions within a trending row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RowLayout {
    pub title: usize,
    pub bundle: usize,
    pub start_time: usize,
    pub end_time: usize,
    pub traffic: usize,
    pub share_url: usize,
}

/// Positions within the image/article bundle at `row[bundle]`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BundleLayout {
    pub articles: usize,
    pub image_min_len: usize,
    pub news_url: usize,
    pub source: usize,
    pub image_url: usize,
}

/// Positions within one article row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArticleLayout {
    pub min_len: usize,
    pub title: usize,
    pub url: usize,
    pub source: usize,
    pub time: usize,
    pub snippet: usize,
}

pub(crate) const ROW_LAYOUT: RowLayout = RowLayout {
    title: 0,
    bundle: 1,
    start_time: 3,
    end_time: 4,
    traffic: 6,
    share_url: 12,
};

pub(crate) const BUNDLE_LAYOUT: BundleLayout = BundleLayout {
    articles: 3,
    image_min_len: 3,
    news_url: 0,
    source: 1,
    image_url: 2,
};

pub(crate) const ARTICLE_LAYOUT: ArticleLayout = ArticleLayout {
    min_len: 5,
    title: 0,
    url: 1,
    source: 2,
    time: 3,
    snippet: 4,
};

/// Default traffic when a row has none.
const DEFAULT_TRAFFIC: &str = "0";

// ============================================================================
// Decode Stages
// ============================================================================

/// Strips a leading `)]}'` (if present) and surrounding whitespace.
pub fn strip_xssi_prefix(raw: &str) -> &str {
    raw.strip_prefix(XSSI_PREFIX).unwrap_or(raw).trim()
}

/// Stage 1: the outer envelope, a non-empty JSON array.
#[derive(Debug)]
struct Envelope(Vec<Value>);

impl Envelope {
    fn parse(raw: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(strip_xssi_prefix(raw)).map_err(DecodeError::json("envelope"))?;
        match value {
            Value::Array(items) if !items.is_empty() => Ok(Self(items)),
            _ => Err(DecodeError::EmptyArray),
        }
    }

    /// Stage 2: the nested JSON document stored as a string at `[0][2]`.
    fn nested_document(&self) -> Result<&str, DecodeError> {
        self.0
            .first()
            .and_then(Value::as_array)
            .and_then(|first| first.get(2))
            .and_then(Value::as_str)
            .ok_or(DecodeError::MissingNestedJson)
    }
}

/// Stage 3: the row set at `[1]` of the nested document.
#[derive(Debug)]
struct RowSet(Vec<Value>);

impl RowSet {
    fn parse(nested: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(nested).map_err(DecodeError::json("nested"))?;
        let Value::Array(mut items) = value else {
            return Err(DecodeError::MissingDataArray);
        };
        if items.len() < 2 {
            return Err(DecodeError::MissingDataArray);
        }
        match items.swap_remove(1) {
            Value::Array(rows) => Ok(Self(rows)),
            _ => Err(DecodeError::MissingDataArray),
        }
    }

    /// Array-typed elements; anything else is skipped.
    fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.0.iter().filter_map(|v| v.as_array().map(|a| Row(a.as_slice())))
    }
}

// ============================================================================
// Positional Rows
// ============================================================================

/// A positional array. Every accessor defaults instead of failing.
#[derive(Debug, Clone, Copy)]
struct Row<'a>(&'a [Value]);

impl<'a> Row<'a> {
    fn string_or(&self, index: usize, default: &str) -> String {
        self.0
            .get(index)
            .and_then(stringify)
            .unwrap_or_else(|| default.to_string())
    }

    fn array(&self, index: usize) -> Option<Row<'a>> {
        self.0.get(index).and_then(Value::as_array).map(|a| Row(a.as_slice()))
    }

    /// Epoch seconds from a `[seconds, ...]` wrapper at `index`.
    fn timestamp(&self, index: usize) -> Option<i64> {
        self.array(index)?.0.first().and_then(as_epoch_seconds)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn to_article(self) -> Option<Article> {
        let l = ARTICLE_LAYOUT;
        if self.len() < l.min_len {
            return None;
        }
        Some(Article {
            title: self.string_or(l.title, ""),
            url: self.string_or(l.url, ""),
            source: self.string_or(l.source, ""),
            time: self.string_or(l.time, ""),
            snippet: self.string_or(l.snippet, ""),
        })
    }

    fn to_image(self) -> Option<ImageDescriptor> {
        let l = BUNDLE_LAYOUT;
        if self.len() < l.image_min_len {
            return None;
        }
        Some(ImageDescriptor {
            news_url: self.string_or(l.news_url, ""),
            source: self.string_or(l.source, ""),
            image_url: self.string_or(l.image_url, ""),
        })
    }

    fn to_story(self) -> TrendingStory {
        let l = ROW_LAYOUT;
        let bundle = self.array(l.bundle);

        let articles = bundle
            .and_then(|b| b.array(BUNDLE_LAYOUT.articles))
            .map(|list| {
                list.0
                    .iter()
                    .filter_map(|v| v.as_array().and_then(|a| Row(a.as_slice()).to_article()))
                    .collect()
            })
            .unwrap_or_default();

        TrendingStory {
            title: self.string_or(l.title, ""),
            traffic: self.string_or(l.traffic, DEFAULT_TRAFFIC),
            articles,
            share_url: self.string_or(l.share_url, ""),
            start_time: self.timestamp(l.start_time).unwrap_or(0),
            end_time: self.timestamp(l.end_time),
            image: bundle.and_then(Row::to_image),
        }
    }
}

/// Renders a scalar the way the upstream page would display it.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_epoch_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses a daily or real-time trending response.
///
/// Structural failures of the three outer stages return a
/// [`DecodeError`]; malformed rows never do.
pub fn parse_trending_response(raw: &str) -> Result<DailyTrendingTopics, DecodeError> {
    debug!(len = raw.len(), "Parsing trending response");

    let envelope = Envelope::parse(raw).inspect_err(|e| warn!(error = %e, "Bad trending envelope"))?;
    let nested = envelope
        .nested_document()
        .inspect_err(|e| warn!(error = %e, "Bad trending envelope"))?;
    let row_set = RowSet::parse(nested).inspect_err(|e| warn!(error = %e, "Bad nested document"))?;

    let topics: DailyTrendingTopics = row_set.rows().map(Row::to_story).collect();

    debug!(rows = topics.len(), "Trending response parsed");
    Ok(topics)
}

#[derive(Debug, Deserialize)]
struct AutocompleteEnvelope {
    default: AutocompleteDefault,
}

#[derive(Debug, Deserialize)]
struct AutocompleteDefault {
    #[serde(default)]
    topics: Vec<AutocompleteTopic>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteTopic {
    #[serde(default)]
    title: Option<String>,
}

/// Parses an autocomplete response into suggestion titles, in order.
///
/// Exactly the first four characters are dropped before parsing.
pub fn parse_autocomplete_response(raw: &str) -> Result<Vec<String>, DecodeError> {
    let body = raw
        .char_indices()
        .nth(AUTOCOMPLETE_PREFIX_LEN)
        .map_or("", |(i, _)| &raw[i..]);

    let envelope: AutocompleteEnvelope =
        serde_json::from_str(body).map_err(DecodeError::json("autocomplete"))?;

    let titles: Vec<String> = envelope
        .default
        .topics
        .into_iter()
        .filter_map(|t| t.title)
        .collect();

    debug!(count = titles.len(), "Autocomplete response parsed");
    Ok(titles)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Wraps a nested document in the batchexecute envelope.
    fn envelope(nested: &Value) -> String {
        let outer = json!([["wrb.fr", "i0OFE", nested.to_string(), null, null, null, "generic"]]);
        format!(")]}}'\n\n{outer}")
    }

    fn rows(rows: Value) -> String {
        envelope(&json!([null, rows]))
    }

    #[test]
    fn test_end_to_end_row() {
        let raw = rows(json!([["X", null, "US", [100], null, null, "500", null, "900", [], [11], [], "X"]]));

        let topics = parse_trending_response(&raw).unwrap();
        assert_eq!(topics.len(), 1);

        let story = &topics.all_trending_stories[0];
        assert_eq!(
            *story,
            TrendingStory {
                title: "X".to_string(),
                traffic: "500".to_string(),
                articles: vec![],
                share_url: "X".to_string(),
                start_time: 100,
                end_time: None,
                image: None,
            }
        );

        let value = serde_json::to_value(&topics.summary[0]).unwrap();
        assert_eq!(
            value,
            json!({"title": "X", "traffic": "500", "articles": [], "startTime": 100})
        );
    }

    #[test]
    fn test_nested_document_too_short() {
        let raw = ")]}'\n[[[\"ignore\",\"[1]\",\"ignore\"]]]";
        // [0] is ["ignore","[1]","ignore"] wrapped once more, so [0][2] is missing
        assert_eq!(parse_trending_response(raw), Err(DecodeError::MissingNestedJson));

        let raw = ")]}'\n[[\"ignore\",\"ignore\",\"[1]\"]]";
        assert_eq!(parse_trending_response(raw), Err(DecodeError::MissingDataArray));
    }

    #[test]
    fn test_prefix_insensitive() {
        let with = rows(json!([["a", null, null, [5]], ["b"]]));
        let without = with.trim_start_matches(XSSI_PREFIX);

        assert_eq!(
            parse_trending_response(&with).unwrap(),
            parse_trending_response(without).unwrap()
        );
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(parse_trending_response(")]}'\n[]"), Err(DecodeError::EmptyArray));
        assert_eq!(parse_trending_response("{}"), Err(DecodeError::EmptyArray));
        assert!(matches!(
            parse_trending_response("<!DOCTYPE html>"),
            Err(DecodeError::InvalidJson { stage: "envelope", .. })
        ));
    }

    #[test]
    fn test_missing_nested_json() {
        assert_eq!(
            parse_trending_response(r#"[["wrb.fr", "i0OFE", null]]"#),
            Err(DecodeError::MissingNestedJson)
        );
        assert_eq!(parse_trending_response("[1]"), Err(DecodeError::MissingNestedJson));
    }

    #[test]
    fn test_nested_not_json() {
        let raw = json!([["wrb.fr", "i0OFE", "not json"]]).to_string();
        assert!(matches!(
            parse_trending_response(&raw),
            Err(DecodeError::InvalidJson { stage: "nested", .. })
        ));
    }

    #[test]
    fn test_row_set_not_array() {
        assert_eq!(
            parse_trending_response(&envelope(&json!([null, {"rows": []}]))),
            Err(DecodeError::MissingDataArray)
        );
    }

    #[test]
    fn test_missing_traffic_defaults_to_zero() {
        let topics = parse_trending_response(&rows(json!([["only title"]]))).unwrap();
        let story = &topics.all_trending_stories[0];
        assert_eq!(story.traffic, "0");
        assert_eq!(story.start_time, 0);
        assert!(story.end_time.is_none());
        assert_eq!(story.share_url, "");
    }

    #[test]
    fn test_end_time_present() {
        let topics =
            parse_trending_response(&rows(json!([["t", null, null, [100, 0], [200, 0]]]))).unwrap();
        assert_eq!(topics.all_trending_stories[0].end_time, Some(200));
        assert_eq!(topics.summary[0].end_time, Some(200));
    }

    #[test]
    fn test_articles_and_image() {
        let bundle = json!([
            "https://news.example/story",
            "Example News",
            "https://img.example/pic.jpg",
            [
                ["Headline", "https://news.example/a", "Example", "2 hours ago", "Snippet"],
                ["too", "short"],
                "not an array",
                [null, 5, "Other", null, "s", "extra"]
            ]
        ]);
        let topics = parse_trending_response(&rows(json!([["t", bundle]]))).unwrap();
        let story = &topics.all_trending_stories[0];

        assert_eq!(story.articles.len(), 2);
        assert_eq!(story.articles[0].title, "Headline");
        assert_eq!(story.articles[0].time, "2 hours ago");
        assert_eq!(
            story.articles[1],
            Article {
                title: String::new(),
                url: "5".to_string(),
                source: "Other".to_string(),
                time: String::new(),
                snippet: "s".to_string(),
            }
        );

        let image = story.image.as_ref().unwrap();
        assert_eq!(image.news_url, "https://news.example/story");
        assert_eq!(image.source, "Example News");
        assert_eq!(image.image_url, "https://img.example/pic.jpg");

        assert_eq!(topics.summary[0].articles, story.articles);
    }

    #[test]
    fn test_short_bundle_has_no_image() {
        let topics = parse_trending_response(&rows(json!([["t", ["a", "b"]]]))).unwrap();
        assert!(topics.all_trending_stories[0].image.is_none());
        assert!(topics.all_trending_stories[0].articles.is_empty());
    }

    #[test]
    fn test_autocomplete() {
        let raw = r#")]}'
{"default":{"topics":[{"mid":"/m/1","title":"Rust","type":"Programming language"},{"mid":"/m/2","title":"Rust game"}]}}"#;
        assert_eq!(
            parse_autocomplete_response(raw).unwrap(),
            vec!["Rust".to_string(), "Rust game".to_string()]
        );
    }

    #[test]
    fn test_autocomplete_invalid() {
        assert!(parse_autocomplete_response("").is_err());
        assert!(parse_autocomplete_response(")]}'").is_err());
        assert!(parse_autocomplete_response(")]}'<html>").is_err());
    }
}
