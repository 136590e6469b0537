//! Trending-search types.
//!
//! These are the only shapes the decoder hands back to callers. Field
//! defaults follow the upstream rows: missing strings become `""`, a missing
//! start time becomes `0`, and a missing end time or image stays absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Article
// ============================================================================

/// A news article attached to a trending story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline.
    pub title: String,
    /// Article URL.
    pub url: String,
    /// Publisher name.
    pub source: String,
    /// Publication time as reported upstream (e.g. "2 hours ago").
    pub time: String,
    /// Short excerpt.
    pub snippet: String,
}

// ============================================================================
// Image
// ============================================================================

/// Image shown next to a trending story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    /// URL of the news page the image belongs to.
    pub news_url: String,
    /// Publisher name.
    pub source: String,
    /// URL of the image itself.
    pub image_url: String,
}

// ============================================================================
// Stories & Topics
// ============================================================================

/// A fully decoded trending story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingStory {
    /// Search term that is trending.
    pub title: String,
    /// Approximate search volume, kept as the upstream string (e.g. "500").
    pub traffic: String,
    /// Related news articles, in upstream order.
    pub articles: Vec<Article>,
    /// Share URL or canonical title.
    pub share_url: String,
    /// Start of the trend, epoch seconds. `0` when unknown.
    #[serde(default)]
    pub start_time: i64,
    /// End of the trend, epoch seconds. Absent while the trend is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Story image, when the upstream row carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDescriptor>,
}

impl TrendingStory {
    /// Returns the start time as a UTC timestamp, or `None` when unknown.
    pub fn start_time_utc(&self) -> Option<DateTime<Utc>> {
        if self.start_time == 0 {
            return None;
        }
        DateTime::from_timestamp(self.start_time, 0)
    }

    /// Returns the end time as a UTC timestamp.
    pub fn end_time_utc(&self) -> Option<DateTime<Utc>> {
        self.end_time.and_then(|t| DateTime::from_timestamp(t, 0))
    }

    /// Returns true if the trend has no end time yet.
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Projects this story onto its summary form.
    pub fn to_topic(&self) -> TrendingTopic {
        TrendingTopic {
            title: self.title.clone(),
            traffic: self.traffic.clone(),
            articles: self.articles.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Validates the story.
    ///
    /// A story must have a title and, when both times are known, must not
    /// end before it starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.is_empty() {
            return Err(CoreError::InvalidData("story has no title".to_string()));
        }
        match self.end_time {
            Some(end) if self.start_time != 0 && end < self.start_time => {
                Err(CoreError::InvalidData(format!(
                    "story '{}' ends ({end}) before it starts ({})",
                    self.title, self.start_time
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Summary form of a trending story: no share URL and no image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    /// Search term that is trending.
    pub title: String,
    /// Approximate search volume.
    pub traffic: String,
    /// Related news articles.
    pub articles: Vec<Article>,
    /// Start of the trend, epoch seconds. `0` when unknown.
    #[serde(default)]
    pub start_time: i64,
    /// End of the trend, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl From<&TrendingStory> for TrendingTopic {
    fn from(story: &TrendingStory) -> Self {
        story.to_topic()
    }
}

// ============================================================================
// Daily Trending Topics
// ============================================================================

/// Result of decoding a daily or real-time trends payload.
///
/// `all_trending_stories` and `summary` are built from the same rows in the
/// same order, so they always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendingTopics {
    /// Full stories, in row order.
    pub all_trending_stories: Vec<TrendingStory>,
    /// Summaries, in row order.
    pub summary: Vec<TrendingTopic>,
}

impl DailyTrendingTopics {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a story and its summary.
    pub fn push(&mut self, story: TrendingStory) {
        self.summary.push(story.to_topic());
        self.all_trending_stories.push(story);
    }

    /// Number of decoded rows.
    pub fn len(&self) -> usize {
        self.all_trending_stories.len()
    }

    /// Returns true if no rows were decoded.
    pub fn is_empty(&self) -> bool {
        self.all_trending_stories.is_empty()
    }

    /// Iterates over story titles in row order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.all_trending_stories.iter().map(|s| s.title.as_str())
    }
}

impl FromIterator<TrendingStory> for DailyTrendingTopics {
    fn from_iter<I: IntoIterator<Item = TrendingStory>>(iter: I) -> Self {
        let mut topics = Self::new();
        for story in iter {
            topics.push(story);
        }
        topics
    }
}
