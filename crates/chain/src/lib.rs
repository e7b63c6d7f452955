pub mod account;
pub mod balance;
pub mod error;
pub mod networks;

pub use account::{Account, parse_address};

pub use balance::{
    AccountInfo,
    Asset,
    NetworkStatus,
    USDFC_DECIMALS,
    atto_to_fil,
    fil_to_atto,
    get_account_info,
    get_balance,
    get_balance_atto,
    get_gas_balance,
    get_gas_balance_atto,
    get_token_balance_atto,
    get_usdfc_balance,
    get_usdfc_balance_atto,
    probe_network,
};

pub use error::{ChainError, Result};

pub use networks::{FilecoinNetwork, NativeCurrency, resolve_rpc_endpoints};
