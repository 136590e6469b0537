// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Trendscope Fetch
//!
//! Resilient HTTP transport for endpoints that rate-limit, redirect, and
//! expect session cookies to be echoed back.
//!
//! The transport knows nothing about payloads. It sends one logical
//! request, retries with exponential backoff while the response looks
//! rate-limited, drops the session cookie on redirects, and hands the
//! final body back to the caller together with the updated [`Session`].
//!
//! ## Building Blocks
//!
//! - [`request::RequestDescriptor`] - Immutable description of one call
//! - [`session::Session`] - Caller-owned session cookie
//! - [`classify`] - Response classification (rate limit / redirect / terminal)
//! - [`retry::RetryPolicy`] - Backoff schedule and retry decision table
//! - [`transport::Transport`] - Trait for executing descriptors
//! - [`transport::HttpTransport`] - `reqwest`-backed transport
//!
//! ## Example
//!
//! ```ignore
//! use trendscope_fetch::{HttpTransport, RequestDescriptor, RetryMode, Session, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let descriptor = RequestDescriptor::get("https://trends.google.com/trends/api/autocomplete/rust");
//! let exchange = transport.execute(&descriptor, Session::new(), RetryMode::Opportunistic).await?;
//! println!("{} after {} attempts", exchange.status, exchange.attempts);
//! ```

pub mod classify;
pub mod error;
pub mod request;
pub mod retry;
pub mod session;
pub mod transport;

// Re-export key types at crate root
pub use classify::{classify, looks_like_error_page, Classification};
pub use error::FetchError;
pub use request::{ContentType, HttpMethod, RequestBody, RequestDescriptor};
pub use retry::{RetryDecision, RetryMode, RetryPolicy};
pub use session::Session;
pub use transport::{Exchange, HttpTransport, Transport};
