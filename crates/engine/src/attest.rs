//! Canonical attestation over the auction outcome.
//!
//! The digest, not the raw record, is the externally verifiable commitment;
//! the record itself may also be disclosed since it reveals nothing about
//! losing bids.

use sha2::{Digest, Sha256};

use sealed_types::{AttestationRecord, AuctionParameters, MatchOutcome};

/// Digest length in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// A computed attestation: the canonical record and its digest.
#[derive(Clone, Debug)]
pub struct Attestation {
    pub record: AttestationRecord,
    pub digest: [u8; DIGEST_LEN],
}

/// Build the canonical record for a matched outcome.
pub fn attestation_record(
    params: &AuctionParameters,
    winner: &str,
    winning_price: f64,
    total_bids: u64,
) -> AttestationRecord {
    AttestationRecord {
        auction_id: params.auction_id.clone(),
        reserve_price: params.reserve_price,
        total_bids,
        winner: winner.to_string(),
        winning_price,
    }
}

/// Compute the SHA-256 digest over the canonical serialization of a record.
///
/// Canonicalization rule: compact UTF-8 JSON with keys in lexicographic
/// order (the record's field declaration order), no insignificant
/// whitespace. Identical field values always yield an identical digest;
/// any change to winner, price, reserve, auction id, or bid count changes
/// it.
pub fn attestation_digest(record: &AttestationRecord) -> [u8; DIGEST_LEN] {
    let canonical =
        serde_json::to_vec(record).expect("canonical serialization should not fail");
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    hasher.finalize().into()
}

/// Attest a terminal outcome.
///
/// Only matched outcomes release a digest: when nothing is awarded there is
/// no commitment to bind. Applied uniformly across all runs.
pub fn attest_outcome(
    params: &AuctionParameters,
    outcome: &MatchOutcome,
    total_bids: u64,
) -> Option<Attestation> {
    match outcome {
        MatchOutcome::Matched { bidder, price } => {
            let record = attestation_record(params, bidder, *price, total_bids);
            let digest = attestation_digest(&record);
            Some(Attestation { record, digest })
        }
        MatchOutcome::NoBids | MatchOutcome::ReserveNotMet { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AuctionParameters {
        AuctionParameters {
            auction_id: "A1".to_string(),
            reserve_price: 100.0,
        }
    }

    #[test]
    fn test_digest_is_deterministic() {
        let record = attestation_record(&params(), "Y", 120.0, 3);

        assert_eq!(attestation_digest(&record), attestation_digest(&record));
        assert_eq!(
            attestation_digest(&record),
            attestation_digest(&attestation_record(&params(), "Y", 120.0, 3))
        );
    }

    #[test]
    fn test_digest_binds_every_field() {
        let base = attestation_record(&params(), "Y", 120.0, 3);
        let base_digest = attestation_digest(&base);

        let variants = [
            AttestationRecord {
                auction_id: "A2".to_string(),
                ..base.clone()
            },
            AttestationRecord {
                reserve_price: 99.0,
                ..base.clone()
            },
            AttestationRecord {
                total_bids: 4,
                ..base.clone()
            },
            AttestationRecord {
                winner: "X".to_string(),
                ..base.clone()
            },
            AttestationRecord {
                winning_price: 120.01,
                ..base.clone()
            },
        ];

        for variant in variants {
            assert_ne!(attestation_digest(&variant), base_digest);
        }
    }

    #[test]
    fn test_only_matched_outcomes_are_attested() {
        let matched = MatchOutcome::Matched {
            bidder: "Y".to_string(),
            price: 120.0,
        };
        assert!(attest_outcome(&params(), &matched, 3).is_some());

        assert!(attest_outcome(&params(), &MatchOutcome::NoBids, 0).is_none());
        let unmet = MatchOutcome::ReserveNotMet {
            highest_price: 90.0,
        };
        assert!(attest_outcome(&params(), &unmet, 2).is_none());
    }

    #[test]
    fn test_attestation_record_reflects_outcome() {
        let attestation = attest_outcome(
            &params(),
            &MatchOutcome::Matched {
                bidder: "Y".to_string(),
                price: 120.0,
            },
            3,
        )
        .unwrap();

        assert_eq!(attestation.record.auction_id, "A1");
        assert_eq!(attestation.record.winner, "Y");
        assert_eq!(attestation.record.winning_price, 120.0);
        assert_eq!(attestation.record.total_bids, 3);
        assert_eq!(attestation.record.reserve_price, 100.0);
        assert_eq!(attestation.digest, attestation_digest(&attestation.record));
    }
}
