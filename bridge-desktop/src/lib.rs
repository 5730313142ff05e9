//! # Desktop Bridge
//!
//! Native implementations of the `bridge-traits` seams on reqwest/tokio.
//! The signature-decipherment seam has no implementation here; it lives in
//! the host's embedded scripting runtime.

pub mod http;

pub use http::ReqwestHttpClient;
