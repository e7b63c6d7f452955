use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata describing a live event (hackathon, conference, festival)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub categories: Vec<String>,
    /// On-chain rating contract tied to this event
    pub contract_address: String,
}

/// Aggregate attendee satisfaction ratings collected for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofOfFunResults {
    pub event_name: String,
    pub total_votes: u64,
    pub total_attendees: u64,
    pub participation_rate: f64,
    pub category_ratings: BTreeMap<String, CategoryRating>,
    pub overall_rating: f64,
    pub verified_on_chain: bool,
}

/// Per-category rating with a 1-5 star vote distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRating {
    pub average: f64,
    pub total_votes: u64,
    /// Star value ("1".."5") to vote count
    pub distribution: BTreeMap<String, u64>,
}

/// One merchandise catalog entry, priced in event tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchItem {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub token_price: u64,
    pub stock: u64,
    /// Only for sized goods like clothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    pub category: String,
}
