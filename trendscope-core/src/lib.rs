// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Trendscope Core
//!
//! Core types and models for the Trendscope client.
//!
//! This crate holds the stable, strongly-shaped domain model that the
//! positional response decoder produces. Nothing in here performs I/O.
//!
//! ## Key Types
//!
//! - [`TrendingStory`] - Full trending story with share URL and image
//! - [`TrendingTopic`] - Summary projection of a story
//! - [`Article`] - News article attached to a story
//! - [`ImageDescriptor`] - Optional story image
//! - [`DailyTrendingTopics`] - Stories plus their summaries, row-aligned

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{Article, DailyTrendingTopics, ImageDescriptor, TrendingStory, TrendingTopic};
