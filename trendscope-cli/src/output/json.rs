//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use trendscope_core::DailyTrendingTopics;
use trendscope_providers::TrendsSettings;

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

/// Suggestions wrapper so the output is an object, not a bare array.
#[derive(Debug, Serialize)]
struct SuggestionsOutput<'a> {
    suggestions: &'a [String],
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Formats decoded trending topics.
    pub fn format_topics(&self, topics: &DailyTrendingTopics) -> Result<String> {
        self.render(topics)
    }

    /// Formats autocomplete suggestions.
    pub fn format_suggestions(&self, suggestions: &[String]) -> Result<String> {
        self.render(&SuggestionsOutput { suggestions })
    }

    /// Formats settings.
    pub fn format_settings(&self, settings: &TrendsSettings) -> Result<String> {
        self.render(settings)
    }
}
