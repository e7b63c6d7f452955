pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{
    Document,
    EventEnvelope,
    MerchEnvelope,
    ResultsEnvelope,
    TAG_EVENT_METADATA,
    TAG_MERCH_CATALOG,
    TAG_PROOF_OF_FUN_RESULTS,
    now_timestamp,
};

pub use error::{CodecError, Result};

pub use types::{CategoryRating, EventMetadata, MerchItem, ProofOfFunResults};
