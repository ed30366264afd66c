//! Authenticated encryption primitives for sealed bids.
//!
//! Bids travel as AES-256-GCM ciphertexts under an auction-wide symmetric
//! key supplied by an external trust-establishment mechanism. This crate
//! provides the stateless seal/open primitives used by the matching engine:
//!
//! 1. **Sealing**: a bidder serializes their terms and encrypts them under
//!    the auction key with a fresh random nonce. The ciphertext carries the
//!    authentication tag appended.
//!
//! 2. **Transport**: `base64(nonce || ciphertext || tag)` travels alongside
//!    the bidder's cleartext identity.
//!
//! 3. **Opening**: the engine verifies the authentication tag before any
//!    plaintext field is interpreted, then validates the plaintext schema
//!    into a [`sealed_types::Bid`]. Neither key nor plaintext is retained
//!    beyond the call.

pub mod error;
pub mod seal;

pub use error::CryptoError;
pub use seal::{
    decode_transport, open_bid, seal_bid, BidKey, BidTerms, KEY_LEN, NONCE_LEN, TAG_LEN,
};
