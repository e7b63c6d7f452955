//! Document envelopes and the JSON wire codec.
//!
//! Every stored artifact is a JSON object carrying a `type` tag and a
//! `timestamp`, followed by the payload fields for that document kind.
//! Artifacts are written pretty-printed with 2-space indentation so they
//! stay readable when fetched straight from a gateway.

use crate::error::{CodecError, Result};
use crate::types::{EventMetadata, MerchItem, ProofOfFunResults};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TAG_EVENT_METADATA: &str = "event_metadata";
pub const TAG_PROOF_OF_FUN_RESULTS: &str = "proof_of_fun_results";
pub const TAG_MERCH_CATALOG: &str = "merch_catalog";

/// Event metadata envelope: `{type, timestamp, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub timestamp: String,
    pub data: EventMetadata,
}

/// Rating results envelope with on-chain verification context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsEnvelope {
    pub event_id: u64,
    pub timestamp: String,
    pub results: ProofOfFunResults,
    pub blockchain_verified: bool,
    /// Network where the rating contract lives, not where the artifact is stored
    pub network: String,
    pub contract: String,
}

/// Merchandise catalog envelope: `{type, timestamp, total_items, items}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchEnvelope {
    pub timestamp: String,
    pub total_items: u64,
    pub items: Vec<MerchItem>,
}

/// A decoded storage artifact.
///
/// Unrecognized `type` tags decode to [`Document::Unknown`] so that newer
/// document kinds can pass through an older client untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Event(EventEnvelope),
    Results(ResultsEnvelope),
    Merch(MerchEnvelope),
    Unknown { tag: String, raw: Value },
}

/// Wire form of the known document kinds, with the `type` tag injected first
#[derive(Serialize)]
#[serde(tag = "type")]
enum WireDocument<'a> {
    #[serde(rename = "event_metadata")]
    Event(&'a EventEnvelope),
    #[serde(rename = "proof_of_fun_results")]
    Results(&'a ResultsEnvelope),
    #[serde(rename = "merch_catalog")]
    Merch(&'a MerchEnvelope),
}

impl Document {
    /// Wrap event metadata, stamped with the current time
    pub fn event(data: EventMetadata) -> Document {
        Document::Event(EventEnvelope {
            timestamp: now_timestamp(),
            data,
        })
    }

    /// Wrap rating results for an event, stamped with the current time.
    ///
    /// `network` and `contract` record where the ratings were verified.
    pub fn results(
        event_id: u64,
        results: ProofOfFunResults,
        network: &str,
        contract: &str,
    ) -> Document {
        Document::Results(ResultsEnvelope {
            event_id,
            timestamp: now_timestamp(),
            results,
            blockchain_verified: true,
            network: network.to_string(),
            contract: contract.to_string(),
        })
    }

    /// Wrap a merchandise catalog, stamped with the current time
    pub fn merch(items: Vec<MerchItem>) -> Document {
        Document::Merch(MerchEnvelope {
            timestamp: now_timestamp(),
            total_items: items.len() as u64,
            items,
        })
    }

    /// The `type` tag this document carries on the wire
    pub fn type_tag(&self) -> &str {
        match self {
            Document::Event(_) => TAG_EVENT_METADATA,
            Document::Results(_) => TAG_PROOF_OF_FUN_RESULTS,
            Document::Merch(_) => TAG_MERCH_CATALOG,
            Document::Unknown { tag, .. } => tag,
        }
    }

    /// Encode to pretty-printed UTF-8 JSON bytes
    pub fn encode(&self) -> Result<Vec<u8>> {
        let json = match self {
            Document::Event(envelope) => {
                serde_json::to_string_pretty(&WireDocument::Event(envelope))?
            }
            Document::Results(envelope) => {
                serde_json::to_string_pretty(&WireDocument::Results(envelope))?
            }
            Document::Merch(envelope) => {
                serde_json::to_string_pretty(&WireDocument::Merch(envelope))?
            }
            // Pass unknown documents back out exactly as they were decoded
            Document::Unknown { raw, .. } => serde_json::to_string_pretty(raw)?,
        };
        Ok(json.into_bytes())
    }

    /// Decode downloaded bytes into a typed document.
    ///
    /// Extra fields inside a known envelope are ignored; a payload that is
    /// missing required fields fails with [`CodecError::SchemaMismatch`].
    pub fn decode(bytes: &[u8]) -> Result<Document> {
        let value: Value = serde_json::from_slice(bytes)?;

        let Some(object) = value.as_object() else {
            return Err(CodecError::Malformed(
                "root must be a JSON object".to_string(),
            ));
        };

        let Some(tag) = object.get("type").and_then(Value::as_str) else {
            return Err(CodecError::Malformed(
                "missing string field 'type'".to_string(),
            ));
        };
        let tag = tag.to_string();

        match tag.as_str() {
            TAG_EVENT_METADATA => Ok(Document::Event(from_tagged_value(&tag, value)?)),
            TAG_PROOF_OF_FUN_RESULTS => Ok(Document::Results(from_tagged_value(&tag, value)?)),
            TAG_MERCH_CATALOG => Ok(Document::Merch(from_tagged_value(&tag, value)?)),
            _ => Ok(Document::Unknown { tag, raw: value }),
        }
    }
}

fn from_tagged_value<T: serde::de::DeserializeOwned>(tag: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| CodecError::SchemaMismatch {
        tag: tag.to_string(),
        reason: e.to_string(),
    })
}

/// Current time as RFC 3339 with millisecond precision, e.g.
/// `2025-11-20T15:04:05.123Z`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_event() -> EventMetadata {
        EventMetadata {
            id: 1,
            name: "ETH Global Buenos Aires 2025".to_string(),
            description: "International Ethereum hackathon".to_string(),
            location: "Buenos Aires, Argentina".to_string(),
            start_date: "2025-11-20".to_string(),
            end_date: "2025-11-23".to_string(),
            categories: vec!["Ambience".to_string(), "Organization".to_string()],
            contract_address: "0x970fad202ADD7A19a3c377E0eCB4bbbDba9AAE49".to_string(),
        }
    }

    fn sample_results() -> ProofOfFunResults {
        ProofOfFunResults {
            event_name: "ETH Global Buenos Aires 2025".to_string(),
            total_votes: 350,
            total_attendees: 450,
            participation_rate: 77.8,
            category_ratings: BTreeMap::from([(
                "Ambience".to_string(),
                crate::types::CategoryRating {
                    average: 4.5,
                    total_votes: 350,
                    distribution: BTreeMap::from([
                        ("4".to_string(), 120),
                        ("5".to_string(), 170),
                    ]),
                },
            )]),
            overall_rating: 4.5,
            verified_on_chain: true,
        }
    }

    #[test]
    fn test_encode_is_pretty_and_tagged() {
        let document = Document::event(sample_event());
        let bytes = document.encode().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        // 2-space indentation with the type tag leading the object
        assert!(text.starts_with("{\n  \"type\": \"event_metadata\""));
        assert!(text.contains("\"name\": \"ETH Global Buenos Aires 2025\""));
    }

    #[test]
    fn test_event_round_trip() {
        let document = Document::event(sample_event());
        let bytes = document.encode().unwrap();

        let decoded = Document::decode(&bytes).unwrap();
        assert_eq!(decoded, document);
        assert_eq!(decoded.type_tag(), TAG_EVENT_METADATA);
    }

    #[test]
    fn test_results_round_trip() {
        let document = Document::results(
            1,
            sample_results(),
            "Base Sepolia",
            "0x970fad202ADD7A19a3c377E0eCB4bbbDba9AAE49",
        );
        let bytes = document.encode().unwrap();

        let decoded = Document::decode(&bytes).unwrap();
        assert_eq!(decoded, document);

        let Document::Results(envelope) = decoded else {
            panic!("expected results envelope");
        };
        assert_eq!(envelope.event_id, 1);
        assert!(envelope.blockchain_verified);
        assert_eq!(envelope.network, "Base Sepolia");
    }

    #[test]
    fn test_merch_round_trip() {
        let items = vec![crate::types::MerchItem {
            id: 1,
            name: "ETH Global T-Shirt".to_string(),
            description: "Limited edition hackathon t-shirt".to_string(),
            token_price: 150,
            stock: 100,
            sizes: Some(vec!["S".to_string(), "M".to_string(), "L".to_string()]),
            category: "clothing".to_string(),
        }];
        let document = Document::merch(items);

        let Document::Merch(ref envelope) = document else {
            panic!("expected merch envelope");
        };
        assert_eq!(envelope.total_items, 1);

        let decoded = Document::decode(&document.encode().unwrap()).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn test_unknown_tag_passes_through() {
        let raw = r#"{"type": "crowd_photos", "timestamp": "2025-11-20T10:00:00.000Z", "photos": []}"#;

        let decoded = Document::decode(raw.as_bytes()).unwrap();
        let Document::Unknown { ref tag, .. } = decoded else {
            panic!("expected unknown document");
        };
        assert_eq!(tag, "crowd_photos");
        assert_eq!(decoded.type_tag(), "crowd_photos");

        // Re-encoding keeps the original content intact
        let bytes = decoded.encode().unwrap();
        let again = Document::decode(&bytes).unwrap();
        assert_eq!(again, decoded);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        let err = Document::decode(b"not json at all").unwrap_err();
        assert!(matches!(err, CodecError::Parse(_)));
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = Document::decode(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CodecError::Malformed(_)));
    }

    #[test]
    fn test_missing_type_tag_is_malformed() {
        // An object with no string `type` tag is not an envelope at all,
        // so it is malformed rather than a schema mismatch
        let raw = r#"{"timestamp": "2025-11-20T10:00:00.000Z"}"#;

        let err = Document::decode(raw.as_bytes()).unwrap_err();
        let CodecError::Malformed(reason) = err else {
            panic!("expected malformed document");
        };
        assert!(reason.contains("'type'"));
    }

    #[test]
    fn test_decode_rejects_bad_payload_for_known_tag() {
        let raw = r#"{"type": "event_metadata", "timestamp": "2025-11-20T10:00:00.000Z", "data": "nope"}"#;

        let err = Document::decode(raw.as_bytes()).unwrap_err();
        let CodecError::SchemaMismatch { tag, .. } = err else {
            panic!("expected schema mismatch");
        };
        assert_eq!(tag, "event_metadata");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let raw = r#"{
  "type": "merch_catalog",
  "timestamp": "2025-11-20T10:00:00.000Z",
  "total_items": 0,
  "items": [],
  "version": 2
}"#;

        let decoded = Document::decode(raw.as_bytes()).unwrap();
        assert!(matches!(decoded, Document::Merch(_)));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
