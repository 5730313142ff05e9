//! # Stream Resolution
//!
//! Negotiates playable stream descriptors against the upstream player
//! endpoint. The official web client gets blocked, rate-limited, or served
//! degraded data with some regularity, so resolution probes a catalog of
//! simulated client identities ("personas") in a fixed priority order and
//! short-circuits on the first one that yields a valid descriptor.
//!
//! ## Flow
//!
//! 1. [`PersonaCatalog`] holds the frozen, ordered persona list, built once
//!    at startup.
//! 2. [`StreamDescriptorFetcher::resolve`] probes personas sequentially with
//!    a fresh correlation nonce per attempt and returns the first valid
//!    [`StreamDescriptor`].
//! 3. The descriptor's candidate formats carry either a direct URL or a
//!    signature cipher; [`StreamDescriptor::playable_url`] turns the best
//!    audio candidate into a URL, deferring cipher blobs to the
//!    [`SignatureDecipherer`](bridge_traits::SignatureDecipherer)
//!    collaborator.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod nonce;
pub mod persona;

pub use config::ResolveConfig;
pub use error::{ResolveError, Result};
pub use fetcher::StreamDescriptorFetcher;
pub use model::{PlayabilityStatus, PlayerResponse, StreamDescriptor, StreamFormat};
pub use persona::{Persona, PersonaCatalog};
