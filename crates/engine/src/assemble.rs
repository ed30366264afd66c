//! Assembly of the released result.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use sealed_types::wire::{MatchReport, MatchStatus};
use sealed_types::MatchOutcome;

use crate::attest::Attestation;

/// Package the outcome into the released report.
///
/// Only the winner's identity and price are ever disclosed; losing bids,
/// ciphertexts, nonces, and key material never appear in the report.
/// `highest_bid` is populated only when the reserve was not met, and the
/// attestation fields only when a winner was matched.
pub fn assemble(
    outcome: &MatchOutcome,
    attestation: Option<&Attestation>,
    total_bids: u64,
) -> MatchReport {
    match outcome {
        MatchOutcome::NoBids => MatchReport {
            status: MatchStatus::NoBids,
            winner: None,
            winning_price: 0.0,
            highest_bid: None,
            attestation: None,
            attestation_data: None,
            total_bids: None,
        },
        MatchOutcome::ReserveNotMet { highest_price } => MatchReport {
            status: MatchStatus::ReserveNotMet,
            winner: None,
            winning_price: 0.0,
            highest_bid: Some(*highest_price),
            attestation: None,
            attestation_data: None,
            total_bids: None,
        },
        MatchOutcome::Matched { bidder, price } => MatchReport {
            status: MatchStatus::Matched,
            winner: Some(bidder.clone()),
            winning_price: *price,
            highest_bid: None,
            attestation: attestation.map(|a| BASE64.encode(a.digest)),
            attestation_data: attestation.map(|a| a.record.clone()),
            total_bids: Some(total_bids),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attest::attest_outcome;
    use sealed_types::AuctionParameters;

    fn params() -> AuctionParameters {
        AuctionParameters {
            auction_id: "A1".to_string(),
            reserve_price: 100.0,
        }
    }

    #[test]
    fn test_no_bids_report() {
        let report = assemble(&MatchOutcome::NoBids, None, 0);

        assert_eq!(report.status, MatchStatus::NoBids);
        assert_eq!(report.winner, None);
        assert_eq!(report.winning_price, 0.0);
        assert_eq!(report.highest_bid, None);
        assert_eq!(report.attestation, None);
        assert_eq!(report.total_bids, None);
    }

    #[test]
    fn test_reserve_not_met_report() {
        let outcome = MatchOutcome::ReserveNotMet {
            highest_price: 120.0,
        };
        let report = assemble(&outcome, None, 3);

        assert_eq!(report.status, MatchStatus::ReserveNotMet);
        assert_eq!(report.winner, None);
        assert_eq!(report.winning_price, 0.0);
        assert_eq!(report.highest_bid, Some(120.0));
        assert_eq!(report.attestation, None);
        assert_eq!(report.attestation_data, None);
    }

    #[test]
    fn test_matched_report_carries_attestation() {
        let outcome = MatchOutcome::Matched {
            bidder: "Y".to_string(),
            price: 120.0,
        };
        let attestation = attest_outcome(&params(), &outcome, 3);
        let report = assemble(&outcome, attestation.as_ref(), 3);

        assert_eq!(report.status, MatchStatus::Matched);
        assert_eq!(report.winner.as_deref(), Some("Y"));
        assert_eq!(report.winning_price, 120.0);
        assert_eq!(report.highest_bid, None);
        assert_eq!(report.total_bids, Some(3));

        let digest = BASE64
            .decode(report.attestation.as_deref().unwrap())
            .unwrap();
        assert_eq!(digest.len(), 32);
        assert_eq!(
            report.attestation_data.unwrap(),
            attestation.unwrap().record
        );
    }
}
