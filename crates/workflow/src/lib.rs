pub mod config;
pub mod demo;
pub mod error;
pub mod workflow;

pub use config::WorkflowConfig;
pub use error::{Result, WorkflowError};
pub use workflow::{StorageWorkflow, WalletBalances, WorkflowSummary};
