// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Trendscope Providers
//!
//! Endpoint-specific request builders and response decoders.
//!
//! - [`trends`] - Google Trends: trending searches and autocomplete
//! - [`settings`] - Client settings and persistence
//!
//! ## Usage
//!
//! ```ignore
//! use trendscope_providers::{TrendsClient, TrendsSettings};
//!
//! let settings = TrendsSettings::default().with_geo("GB");
//! let mut client = TrendsClient::with_settings(settings)?;
//! let suggestions = client.autocomplete("rust").await?;
//! ```

pub mod settings;
pub mod trends;


pub use settings::{default_settings_path, SettingsError, TrendsSettings};
pub use trends::{DecodeError, TrendsClient, TrendsError};
