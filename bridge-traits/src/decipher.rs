//! Signature Decipherment Abstraction
//!
//! Some candidate stream entries returned by negotiation carry an encrypted
//! `signatureCipher` blob instead of a direct URL. Turning that blob into a
//! playable URL requires executing upstream-supplied script code, which lives
//! in an embedded scripting runtime outside this workspace. This seam treats
//! the whole mechanism as a black box.

use async_trait::async_trait;

use crate::error::Result;

/// Resolves an encrypted signature cipher into a playable media URL.
///
/// The persona tag must be the one attached to the descriptor the cipher came
/// from: signature schemes are persona-specific, and deciphering a blob with
/// the wrong client's scheme yields URLs the host rejects.
#[async_trait]
pub trait SignatureDecipherer: Send + Sync {
    /// Decipher `cipher` into a direct URL.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::DecipherFailed`](crate::error::BridgeError) when
    /// the runtime cannot handle this cipher variant. Callers treat that as an
    /// unplayable candidate, not a transport fault.
    async fn decipher(&self, cipher: &str, persona: &str) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;

    struct EchoDecipherer;

    #[async_trait]
    impl SignatureDecipherer for EchoDecipherer {
        async fn decipher(&self, cipher: &str, _persona: &str) -> Result<String> {
            cipher
                .strip_prefix("s=")
                .map(|s| format!("https://media.example/{s}"))
                .ok_or_else(|| BridgeError::DecipherFailed("unrecognized cipher".into()))
        }
    }

    #[tokio::test]
    async fn decipher_round_trip() {
        let d = EchoDecipherer;
        let url = d.decipher("s=abc", "WEB").await.unwrap();
        assert_eq!(url, "https://media.example/abc");

        assert!(d.decipher("garbage", "WEB").await.is_err());
    }
}
