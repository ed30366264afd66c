//! Wire shapes consumed from the external loader and produced for the
//! external consumer.
//!
//! The JSON layout is preserved for compatibility with the enclosing
//! runtime: `input.json` in, `output.json` plus a `computed.json`
//! completion marker out.

use serde::{Deserialize, Serialize};

use crate::AttestationRecord;

/// Top-level input document (`input.json`).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TaskInput {
    /// Auction identifier; required and non-empty.
    #[serde(default)]
    pub auction_id: Option<String>,
    /// Reserve price; absent means no reserve.
    #[serde(default)]
    pub reserve_price: f64,
    /// Auction-wide key material, interpreted as raw bytes. Required; there
    /// is no default key.
    #[serde(default)]
    pub decryption_key: Option<String>,
    #[serde(default)]
    pub encrypted_bids: Vec<SealedBidEnvelope>,
}

/// One encrypted bid as transported: standard base64 over
/// `nonce(12) || ciphertext || tag(16)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SealedBidEnvelope {
    pub bidder: String,
    pub encrypted_bid: String,
}

/// Match status released to the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    NoBids,
    ReserveNotMet,
    Matched,
}

/// The released output document (`output.json`).
///
/// The only value crossing the trust boundary outward: it discloses the
/// winner's identity and price for a matched auction and nothing about any
/// other bid, ciphertext, nonce, or key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub status: MatchStatus,
    pub winner: Option<String>,
    pub winning_price: f64,
    /// Present only when the reserve was not met.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_bid: Option<f64>,
    /// Base64 attestation digest, present only when matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<String>,
    /// Canonical attested record, present only when matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation_data: Option<AttestationRecord>,
    /// Total number of opened bids, present only when matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_bids: Option<u64>,
}

/// Marker written next to the output to signal successful termination to
/// the enclosing runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionMarker {
    #[serde(rename = "deterministic-output-path")]
    pub deterministic_output_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_defaults() {
        let input: TaskInput = serde_json::from_str(r#"{"auction_id": "A1"}"#).unwrap();

        assert_eq!(input.auction_id.as_deref(), Some("A1"));
        assert_eq!(input.reserve_price, 0.0);
        assert!(input.decryption_key.is_none());
        assert!(input.encrypted_bids.is_empty());
    }

    #[test]
    fn test_task_input_full_document() {
        let input: TaskInput = serde_json::from_str(
            r#"{
                "auction_id": "A1",
                "reserve_price": 100,
                "decryption_key": "k",
                "encrypted_bids": [{"bidder": "X", "encrypted_bid": "AAAA"}]
            }"#,
        )
        .unwrap();

        assert_eq!(input.reserve_price, 100.0);
        assert_eq!(input.encrypted_bids.len(), 1);
        assert_eq!(input.encrypted_bids[0].bidder, "X");
    }

    #[test]
    fn test_report_omits_absent_fields() {
        let report = MatchReport {
            status: MatchStatus::NoBids,
            winner: None,
            winning_price: 0.0,
            highest_bid: None,
            attestation: None,
            attestation_data: None,
            total_bids: None,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(value["status"], "no_bids");
        // winner is disclosed as an explicit null; conditional fields vanish.
        assert!(keys.contains(&"winner"));
        assert!(value["winner"].is_null());
        assert!(!keys.contains(&"highest_bid"));
        assert!(!keys.contains(&"attestation"));
        assert!(!keys.contains(&"total_bids"));
    }

    #[test]
    fn test_completion_marker_field_name() {
        let marker = CompletionMarker {
            deterministic_output_path: "output.json".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&marker).unwrap(),
            r#"{"deterministic-output-path":"output.json"}"#
        );
    }
}
