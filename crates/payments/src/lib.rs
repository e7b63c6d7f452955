pub mod abi;
pub mod collateral;
pub mod config;
pub mod contract;
pub mod error;

pub use collateral::{DepositReceipt, check_collateral};
pub use config::{EPOCHS_PER_DAY, EPOCHS_PER_MONTH, PaymentsConfig};
pub use contract::PaymentsClient;
pub use error::{PaymentsError, Result};
