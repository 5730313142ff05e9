//! # Bridge Traits
//!
//! Contracts for the collaborators the streaming core depends on but does not
//! implement itself. Host platforms provide concrete implementations (see
//! `bridge-desktop` for the native ones):
//!
//! - **HTTP** (`http`): structured request execution against the upstream
//!   negotiation endpoint.
//! - **Decipherment** (`decipher`): opaque signature-cipher resolution,
//!   backed by an embedded scripting runtime outside this workspace.
//!
//! Traits are object-safe and `Send + Sync` so they can be shared across the
//! I/O worker pool behind `Arc<dyn ...>`.

pub mod decipher;
pub mod error;
pub mod http;

pub use decipher::SignatureDecipherer;
pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
