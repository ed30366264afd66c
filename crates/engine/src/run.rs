//! Single-run orchestration: open all bids, match, attest, assemble.

use tracing::{debug, info};

use sealed_crypto::{decode_transport, open_bid, BidKey, CryptoError};
use sealed_types::wire::{MatchReport, SealedBidEnvelope, TaskInput};
use sealed_types::{AuctionParameters, BidPool, EncryptedBid, MatchOutcome};

use crate::assemble::assemble;
use crate::attest::attest_outcome;
use crate::error::EngineError;
use crate::matcher::select_winner;

/// Run one complete matching pass over the loader input.
///
/// Fail-closed: the first transport, authentication, or format failure
/// aborts the run before matching, so no partial result is ever produced.
/// The bid pool lives only for the duration of the call.
pub fn run(input: &TaskInput) -> Result<MatchReport, EngineError> {
    let params = validated_params(input)?;
    let key_material = input
        .decryption_key
        .as_deref()
        .ok_or(EngineError::MissingDecryptionKey)?;
    let key = BidKey::from_material(key_material.as_bytes());

    info!(
        auction_id = %params.auction_id,
        sealed_bids = input.encrypted_bids.len(),
        "starting matching run"
    );

    let mut pool = BidPool::with_capacity(input.encrypted_bids.len());
    for envelope in &input.encrypted_bids {
        let sealed = decode_envelope(envelope)?;
        let bid = open_bid(&sealed.bidder, &sealed.nonce, &sealed.ciphertext, &key)
            .map_err(|source| classify(&sealed.bidder, source))?;
        debug!(bidder = %bid.bidder, "opened sealed bid");
        pool.push(bid);
    }

    let outcome = select_winner(&pool, &params);
    let attestation = attest_outcome(&params, &outcome, pool.len() as u64);
    let report = assemble(&outcome, attestation.as_ref(), pool.len() as u64);

    if let MatchOutcome::Matched { bidder, price } = &outcome {
        info!(winner = %bidder, winning_price = *price, "winner selected");
    }
    info!(status = ?report.status, "matching run complete");

    Ok(report)
}

/// Validate the run configuration into auction parameters.
fn validated_params(input: &TaskInput) -> Result<AuctionParameters, EngineError> {
    match input.auction_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(AuctionParameters {
            auction_id: id.to_string(),
            reserve_price: input.reserve_price,
        }),
        _ => Err(EngineError::MissingAuctionId),
    }
}

/// Decode one transport envelope into its encrypted-bid form.
fn decode_envelope(envelope: &SealedBidEnvelope) -> Result<EncryptedBid, EngineError> {
    let (nonce, ciphertext) =
        decode_transport(&envelope.encrypted_bid).map_err(|source| EngineError::Decryption {
            bidder: envelope.bidder.clone(),
            source,
        })?;

    Ok(EncryptedBid {
        bidder: envelope.bidder.clone(),
        nonce,
        ciphertext,
    })
}

/// Split opener failures into the decryption and format error classes.
fn classify(bidder: &str, source: CryptoError) -> EngineError {
    match source {
        CryptoError::MalformedPlaintext
        | CryptoError::MissingPrice
        | CryptoError::InvalidPrice
        | CryptoError::InvalidAmount
        | CryptoError::InvalidTimestamp => EngineError::Format {
            bidder: bidder.to_string(),
            source,
        },
        _ => EngineError::Decryption {
            bidder: bidder.to_string(),
            source,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(auction_id: Option<&str>, key: Option<&str>) -> TaskInput {
        TaskInput {
            auction_id: auction_id.map(str::to_string),
            reserve_price: 100.0,
            decryption_key: key.map(str::to_string),
            encrypted_bids: Vec::new(),
        }
    }

    #[test]
    fn test_missing_auction_id_rejected() {
        let err = run(&input(None, Some("k"))).unwrap_err();
        assert!(matches!(err, EngineError::MissingAuctionId));

        let err = run(&input(Some(""), Some("k"))).unwrap_err();
        assert!(matches!(err, EngineError::MissingAuctionId));
    }

    #[test]
    fn test_missing_decryption_key_rejected() {
        let err = run(&input(Some("A1"), None)).unwrap_err();
        assert!(matches!(err, EngineError::MissingDecryptionKey));
    }

    #[test]
    fn test_empty_bid_set_yields_no_bids() {
        let report = run(&input(Some("A1"), Some("k"))).unwrap();
        assert_eq!(report.winner, None);
        assert_eq!(report.winning_price, 0.0);
    }

    #[test]
    fn test_invalid_transport_classified_as_decryption() {
        let mut task = input(Some("A1"), Some("k"));
        task.encrypted_bids.push(SealedBidEnvelope {
            bidder: "X".to_string(),
            encrypted_bid: "!!!".to_string(),
        });

        match run(&task).unwrap_err() {
            EngineError::Decryption { bidder, .. } => assert_eq!(bidder, "X"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
