//! ABI bindings for the token and staking contracts
//!
//! Both contract interfaces are external and fixed; the `sol!` bindings
//! below are the source of truth for selectors and argument encoding.

use alloy_sol_types::sol;

sol! {
    /// Test token surface used by the dashboard. `transfer` exists on the
    /// deployed contract but only the deploy tooling calls it.
    interface TestToken {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function mint(uint256 amount) external;
    }

    /// Staking pool surface
    interface StakingPool {
        function getStakerInfo(address staker) external view returns (uint256 amountStaked, uint256 pendingRewards);
        function totalStaked() external view returns (uint256);
        function rewardRate() external view returns (uint256);
        function stake(uint256 amount) external;
        function unstake(uint256 amount) external;
        function claimRewards() external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use alloy_sol_types::SolCall;

    #[test]
    fn test_known_selectors() {
        // Cross-checked against the public 4-byte directory
        assert_eq!(TestToken::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(TestToken::allowanceCall::SELECTOR, [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(TestToken::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(TestToken::mintCall::SELECTOR, [0xa0, 0x71, 0x2d, 0x68]);
        assert_eq!(StakingPool::stakeCall::SELECTOR, [0xa6, 0x94, 0xfc, 0x3a]);
        assert_eq!(StakingPool::unstakeCall::SELECTOR, [0x2e, 0x17, 0xde, 0x78]);
        assert_eq!(
            StakingPool::claimRewardsCall::SELECTOR,
            [0x37, 0x25, 0x00, 0xab]
        );
        assert_eq!(
            StakingPool::totalStakedCall::SELECTOR,
            [0x81, 0x7b, 0x1c, 0xd2]
        );
        assert_eq!(
            StakingPool::rewardRateCall::SELECTOR,
            [0x7b, 0x0a, 0x47, 0xee]
        );
    }

    #[test]
    fn test_balance_of_roundtrip() {
        let account = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let encoded = TestToken::balanceOfCall { account }.abi_encode();
        assert_eq!(encoded.len(), 4 + 32);

        let decoded = TestToken::balanceOfCall::abi_decode(&encoded, true).unwrap();
        assert_eq!(decoded.account, account);
    }

    #[test]
    fn test_staker_info_returns_decode() {
        // Two uint256 words, as the contract returns them
        let mut raw = [0u8; 64];
        raw[31] = 7; // amountStaked = 7
        raw[63] = 3; // pendingRewards = 3

        let decoded = StakingPool::getStakerInfoCall::abi_decode_returns(&raw, true).unwrap();
        assert_eq!(decoded.amountStaked, U256::from(7));
        assert_eq!(decoded.pendingRewards, U256::from(3));
    }
}
