//! Contract interfaces for the payment flow.
//!
//! Declared inline, only the functions this crate actually calls.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract Erc20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract FilecoinPay {
        function depositWithPermitAndApproveOperator(
            address token,
            uint256 amount,
            address operator,
            uint256 rateAllowance,
            uint256 lockupAllowance,
            uint256 maxLockupPeriod
        ) external;
    }
}
