//! Error types for the matching run.

use thiserror::Error;

use sealed_crypto::CryptoError;

/// Errors that abort a matching run.
///
/// Every variant is fatal: the run releases no output after any of these.
/// Bid-level variants carry the offending bidder identifier for
/// diagnostics only, never ciphertext or plaintext.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("auction_id is required")]
    MissingAuctionId,

    #[error("decryption_key is required")]
    MissingDecryptionKey,

    #[error("Failed to decrypt bid from {bidder}")]
    Decryption {
        bidder: String,
        #[source]
        source: CryptoError,
    },

    #[error("Malformed bid from {bidder}")]
    Format {
        bidder: String,
        #[source]
        source: CryptoError,
    },
}
