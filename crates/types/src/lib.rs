//! Core type definitions for the confidential sealed-bid matching engine.
//!
//! This crate provides the data structures shared across the matching
//! pipeline: auction parameters, bids in transport and plaintext form, the
//! append-only bid pool, the terminal match outcome, and the canonical
//! attestation record bound by the released digest.

use serde::{Deserialize, Serialize};

pub mod wire;

// =========================
// AUCTION PARAMETERS
// =========================

/// Parameters fixed for one auction run, supplied once at start.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuctionParameters {
    /// Auction identifier (non-empty)
    pub auction_id: String,
    /// Minimum acceptable winning price
    pub reserve_price: f64,
}

// =========================
// BIDS
// =========================

/// An encrypted bid in transport form.
///
/// `ciphertext` carries the AES-GCM authentication tag appended to the
/// encrypted payload. Never stored after opening.
#[derive(Clone, Debug)]
pub struct EncryptedBid {
    /// Bidder identity, cleartext and trusted as given by the caller
    pub bidder: String,
    /// GCM nonce
    pub nonce: [u8; 12],
    /// Encrypted payload with the authentication tag appended
    pub ciphertext: Vec<u8>,
}

/// A validated plaintext bid, immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub bidder: String,
    pub price: f64,
    pub amount: f64,
    pub timestamp: i64,
}

/// Append-only collection of opened bids for one auction run.
///
/// Insertion order is input order. The pool is read-only once handed to the
/// matcher and is dropped at run end, so no bid outlives the run in
/// plaintext form.
#[derive(Debug, Default)]
pub struct BidPool {
    bids: Vec<Bid>,
}

impl BidPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { bids: Vec::new() }
    }

    /// Create an empty pool sized for a known bid count.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bids: Vec::with_capacity(capacity),
        }
    }

    /// Append a bid. Bids are never removed or reordered.
    pub fn push(&mut self, bid: Bid) {
        self.bids.push(bid);
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Iterate bids in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bid> {
        self.bids.iter()
    }
}

// =========================
// OUTCOME & ATTESTATION
// =========================

/// Terminal outcome of one matching run. Exactly one per run.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchOutcome {
    /// No bids were submitted.
    NoBids,
    /// Bids exist but none met the reserve price.
    ReserveNotMet { highest_price: f64 },
    /// A winner was selected.
    Matched { bidder: String, price: f64 },
}

/// Canonical record bound by the attestation digest.
///
/// Fields are declared in lexicographic order so the derived serialization
/// is the canonical byte form: identical field values always serialize to
/// identical bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttestationRecord {
    pub auction_id: String,
    pub reserve_price: f64,
    pub total_bids: u64,
    pub winner: String,
    pub winning_price: f64,
}
