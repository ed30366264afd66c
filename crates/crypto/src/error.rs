//! Error types for bid sealing and opening.

use thiserror::Error;

/// Errors that can occur while sealing or opening bids.
///
/// Variants never carry key material, ciphertext, or decrypted plaintext;
/// the engine attaches the offending bidder identifier for diagnostics.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid transport encoding: {0}")]
    InvalidTransport(String),

    #[error("Sealed blob too short: {len} bytes")]
    TruncatedCiphertext { len: usize },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid key material")]
    InvalidKey,

    #[error("Plaintext is not a JSON object")]
    MalformedPlaintext,

    #[error("Bid has no price field")]
    MissingPrice,

    #[error("Bid price is not a finite non-negative number")]
    InvalidPrice,

    #[error("Bid amount is not numeric")]
    InvalidAmount,

    #[error("Bid timestamp is not an integer")]
    InvalidTimestamp,

    #[error("Encryption failed: {0}")]
    SealFailed(String),
}
