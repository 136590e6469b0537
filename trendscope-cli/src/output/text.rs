//! Text output formatting with colors.

use chrono::{DateTime, Local, Utc};
use trendscope_core::{DailyTrendingTopics, TrendingStory};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats trending topics, one story per block.
    pub fn format_topics(&self, topics: &DailyTrendingTopics, geo: &str, limit: Option<usize>) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(BOLD, &format!("Trending in {geo}")));
        out.push('\n');

        if topics.is_empty() {
            out.push_str(&self.paint(DIM, "  No trending searches"));
            out.push('\n');
            return out;
        }

        let shown = limit.unwrap_or(usize::MAX);
        for (rank, story) in topics.all_trending_stories.iter().take(shown).enumerate() {
            out.push_str(&self.format_story(rank + 1, story));
        }
        out
    }

    fn format_story(&self, rank: usize, story: &TrendingStory) -> String {
        let mut lines = Vec::new();

        let traffic = self.paint(GREEN, &format!("{}+", story.traffic));
        lines.push(format!("{rank:>3}. {}  {traffic}", self.paint(BOLD, &story.title)));

        let mut meta = Vec::new();
        if let Some(start) = story.start_time_utc() {
            meta.push(format!("since {}", format_time(start)));
        }
        if let Some(end) = story.end_time_utc() {
            meta.push(format!("ended {}", format_time(end)));
        } else if story.start_time != 0 {
            meta.push("active".to_string());
        }
        if !meta.is_empty() {
            lines.push(format!("     {}", self.paint(DIM, &meta.join(", "))));
        }

        for article in story.articles.iter().take(3) {
            let source = if article.source.is_empty() {
                String::new()
            } else {
                format!(" ({})", article.source)
            };
            lines.push(format!("     - {}{}", article.title, self.paint(DIM, &source)));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Formats suggestions, one per line.
    pub fn format_suggestions(&self, suggestions: &[String]) -> String {
        if suggestions.is_empty() {
            return format!("{}\n", self.paint(DIM, "No suggestions"));
        }
        suggestions
            .iter()
            .map(|s| format!("{}\n", self.paint(CYAN, s)))
            .collect()
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
