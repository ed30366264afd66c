//! AES-256-GCM sealing and opening of bid payloads.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::{CryptoRng, RngCore};
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use sealed_types::Bid;

use crate::error::CryptoError;

/// Symmetric key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Auction-wide symmetric key. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct BidKey([u8; KEY_LEN]);

impl BidKey {
    /// Wrap an exact-length key.
    pub fn from_raw(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Normalize externally supplied key material to the AES-256 key
    /// length: material past 32 bytes is truncated, shorter material is
    /// right-padded with ASCII `0`. Loaders transport the key as a string.
    pub fn from_material(material: &[u8]) -> Self {
        let mut key = [b'0'; KEY_LEN];
        let len = material.len().min(KEY_LEN);
        key[..len].copy_from_slice(&material[..len]);
        Self(key)
    }

    fn cipher(&self) -> Result<Aes256Gcm, CryptoError> {
        Aes256Gcm::new_from_slice(&self.0).map_err(|_| CryptoError::InvalidKey)
    }
}

/// Plaintext terms of a bid, as sealed by the bidder.
#[derive(Clone, Debug)]
pub struct BidTerms {
    pub price: f64,
    /// Omitted fields take their documented defaults when opened.
    pub amount: Option<f64>,
    pub timestamp: Option<i64>,
}

/// Seal bid terms under the auction key with a fresh random nonce.
///
/// Returns the nonce and the ciphertext with the authentication tag
/// appended, ready for transport encoding.
pub fn seal_bid<R: RngCore + CryptoRng>(
    terms: &BidTerms,
    key: &BidKey,
    rng: &mut R,
) -> Result<([u8; NONCE_LEN], Vec<u8>), CryptoError> {
    let mut payload = serde_json::Map::new();
    payload.insert("price".to_string(), terms.price.into());
    if let Some(amount) = terms.amount {
        payload.insert("amount".to_string(), amount.into());
    }
    if let Some(timestamp) = terms.timestamp {
        payload.insert("timestamp".to_string(), timestamp.into());
    }
    let mut plaintext = serde_json::to_vec(&Value::Object(payload))
        .map_err(|e| CryptoError::SealFailed(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = key
        .cipher()?
        .encrypt(nonce, plaintext.as_ref())
        .map_err(|e| CryptoError::SealFailed(e.to_string()));
    plaintext.zeroize();

    Ok((nonce_bytes, sealed?))
}

/// Decode a transport envelope into nonce and ciphertext.
///
/// The envelope is standard base64 over `nonce || ciphertext || tag`.
pub fn decode_transport(encrypted_bid: &str) -> Result<([u8; NONCE_LEN], Vec<u8>), CryptoError> {
    let blob = BASE64
        .decode(encrypted_bid)
        .map_err(|e| CryptoError::InvalidTransport(e.to_string()))?;
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CryptoError::TruncatedCiphertext { len: blob.len() });
    }

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&blob[..NONCE_LEN]);
    Ok((nonce, blob[NONCE_LEN..].to_vec()))
}

/// Open a sealed bid and validate its plaintext schema.
///
/// The authentication tag is verified before any plaintext field is
/// interpreted. Neither the key nor the plaintext is retained beyond the
/// call; the plaintext buffer is zeroized once parsed.
pub fn open_bid(
    bidder: &str,
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    key: &BidKey,
) -> Result<Bid, CryptoError> {
    if ciphertext.len() < TAG_LEN {
        return Err(CryptoError::TruncatedCiphertext {
            len: ciphertext.len(),
        });
    }

    let mut plaintext = key
        .cipher()?
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    let parsed = parse_terms(bidder, &plaintext);
    plaintext.zeroize();
    parsed
}

/// Validate the decrypted payload against the bid schema.
///
/// `price` is required; `amount` defaults to 1.0 and `timestamp` to 0 when
/// absent.
fn parse_terms(bidder: &str, plaintext: &[u8]) -> Result<Bid, CryptoError> {
    let value: Value =
        serde_json::from_slice(plaintext).map_err(|_| CryptoError::MalformedPlaintext)?;
    let fields = value.as_object().ok_or(CryptoError::MalformedPlaintext)?;

    let price = match fields.get("price") {
        None => return Err(CryptoError::MissingPrice),
        Some(v) => numeric(v).ok_or(CryptoError::InvalidPrice)?,
    };
    if !price.is_finite() || price < 0.0 {
        return Err(CryptoError::InvalidPrice);
    }

    let amount = match fields.get("amount") {
        None => 1.0,
        Some(v) => numeric(v).ok_or(CryptoError::InvalidAmount)?,
    };

    let timestamp = match fields.get("timestamp") {
        None => 0,
        Some(v) => v.as_i64().ok_or(CryptoError::InvalidTimestamp)?,
    };

    Ok(Bid {
        bidder: bidder.to_string(),
        price,
        amount,
        timestamp,
    })
}

/// Accept JSON numbers and numeric strings; loaders quote prices.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
