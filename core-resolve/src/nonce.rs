//! Per-attempt correlation nonces.
//!
//! The upstream correlates negotiation requests server-side through two
//! nonces: a content nonce (`cpn`) carried in the request body and a short
//! request tag in the query string. Both must be unique per attempt and are
//! never reused across personas.

use uuid::Uuid;

/// Length of the content nonce (`cpn`).
pub const CONTENT_NONCE_LEN: usize = 16;

/// Length of the request-tag nonce (`t` parameter).
pub const REQUEST_TAG_LEN: usize = 12;

/// Generate a fresh alphanumeric nonce of `len` characters.
pub fn generate(len: usize) -> String {
    let mut nonce = String::with_capacity(len);
    while nonce.len() < len {
        nonce.push_str(&Uuid::new_v4().simple().to_string());
    }
    nonce.truncate(len);
    nonce
}
