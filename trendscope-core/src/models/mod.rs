//! Domain models for Trendscope.
//!
//! - [`trends`] - Trending stories, summaries, and articles

pub mod trends;


pub use trends::{Article, DailyTrendingTopics, ImageDescriptor, TrendingStory, TrendingTopic};
