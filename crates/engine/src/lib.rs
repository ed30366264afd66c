//! Deterministic matching pipeline for confidential sealed-bid auctions.
//!
//! The engine owns the full flow for a single auction run:
//!
//! 1. **Open**: every transported envelope is authenticated and decoded
//!    into the bid pool. Opening is fail-closed: one bad bid aborts the
//!    run before any outcome is computed, so no partial, winner-biased
//!    result is ever released.
//!
//! 2. **Match**: the pool is ranked by price descending with earlier
//!    timestamps breaking ties, and the first bid at or above the reserve
//!    price wins.
//!
//! 3. **Attest**: a matched outcome is bound to the auction parameters by
//!    a SHA-256 digest over a canonical record.
//!
//! 4. **Assemble**: the released report discloses the winner and price and
//!    nothing about any other bid.

pub mod assemble;
pub mod attest;
pub mod error;
pub mod matcher;
mod run;

pub use assemble::assemble;
pub use attest::{attest_outcome, attestation_digest, attestation_record, Attestation};
pub use error::EngineError;
pub use matcher::select_winner;
pub use run::run;
