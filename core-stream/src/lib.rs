//! # Media Byte-Stream Acquisition
//!
//! Presents a single open/read contract for remote media while internally
//! absorbing the failure classes the upstream hosts are known for: transient
//! resets, malformed range responses from servers with stale `Content-Length`
//! values, and URLs that die mid-session.
//!
//! ## Architecture
//!
//! A raw [`MediaTransport`] (HTTP, see [`http`]) is wrapped in decorator
//! stages, each holding the next transport and calling through:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ LastResortTransport    (separate client)    │
//! │ ┌─────────────────────────────────────────┐ │
//! │ │ RetryTransport       (backoff + cancel) │ │
//! │ │ ┌─────────────────────────────────────┐ │ │
//! │ │ │ RangeRecoveryTransport  (EOF / 416) │ │ │
//! │ │ │ ┌─────────────────────────────────┐ │ │ │
//! │ │ │ │ ResolvingFallbackTransport      │ │ │ │
//! │ │ │ │ ┌─────────────────────────────┐ │ │ │ │
//! │ │ │ │ │ raw transport               │ │ │ │ │
//! │ │ │ │ └─────────────────────────────┘ │ │ │ │
//! │ │ │ └─────────────────────────────────┘ │ │ │
//! │ │ └─────────────────────────────────────┘ │ │
//! │ └─────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! [`chain::production`] assembles this stack. Every stage is independently
//! testable by injecting a transport stub that fails on the Nth call.

pub mod chain;
pub mod config;
pub mod error;
pub mod fallback;
#[cfg(feature = "http-transport")]
pub mod http;
pub mod range;
pub mod retry;
pub mod spec;
pub mod traits;

pub use chain::{production, ChainLayout};
pub use config::{Backoff, RetryConfig};
pub use error::{Result, StreamError};
pub use fallback::{LastResortTransport, ResolvingFallbackTransport, SpecResolver};
#[cfg(feature = "http-transport")]
pub use http::{DirectHttpTransport, HttpMediaTransport};
pub use range::RangeRecoveryTransport;
pub use retry::{RetryPredicate, RetryTransport};
pub use spec::MediaRequestSpec;
pub use traits::{MediaStream, MediaTransport};
