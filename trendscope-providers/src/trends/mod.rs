//! Google Trends provider.
//!
//! ## Endpoints
//!
//! 1. **Trending searches** (daily and real-time): `POST
//!    /_/TrendsUi/data/batchexecute` with RPC id `i0OFE`. The response is a
//!    `)]}'`-prefixed array that embeds a second JSON document of
//!    positional rows.
//!
//! 2. **Autocomplete**: `GET /trends/api/autocomplete/<keyword>`. The
//!    response has a fixed four-character prefix before a JSON object.
//!
//! ## Usage
//!
//! ```ignore
//! use trendscope_providers::trends::TrendsClient;
//!
//! let mut client = TrendsClient::new()?;
//! let topics = client.daily_trends("US").await?;
//! for story in &topics.all_trending_stories {
//!     println!("{} ({})", story.title, story.traffic);
//! }
//! ```

// Modules
mod api;
mod error;
pub(crate) mod parser;

// Re-exports
pub use api::{
    autocomplete_request, trending_payload, trending_request, TrendsClient, DAILY_HOURS,
    TRENDING_RPC_ID,
};
pub use error::{DecodeError, TrendsError};
pub use parser::{
    parse_autocomplete_response, parse_trending_response, strip_xssi_prefix,
    AUTOCOMPLETE_PREFIX_LEN, XSSI_PREFIX,
};
