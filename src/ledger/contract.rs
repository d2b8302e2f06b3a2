//! Typed interface to the crowdfunding contract.
//!
//! The contract owns all campaign data and enforces the fundraising rules;
//! this service only calls it. The bindings below are the full surface the
//! gateway uses: enumeration reads, the five mutating methods, and the
//! creation event carrying the ledger-assigned campaign id.

use alloy::primitives::Address;
use alloy::sol;

/// Sentinel token address the contract interprets as "native currency".
pub const NATIVE_TOKEN: Address = Address::ZERO;

sol! {
    #[sol(rpc)]
    contract Crowdfund {
        /// Emitted once per successful `createCampaign` call.
        #[derive(Debug)]
        event CampaignCreated(uint256 indexed id, address indexed owner, uint256 goalAmount, uint256 deadline);

        function totalCampaigns() external view returns (uint256);

        function campaigns(uint256 id) external view returns (
            address owner,
            uint256 goalAmount,
            uint256 deadline,
            string title,
            string description,
            bool withdrawn
        );

        /// Total contributed to campaign `id` in the given currency.
        /// `token` may be the native sentinel address.
        function getTotalRaised(uint256 id, address token) external view returns (uint256);

        function createCampaign(uint256 goalAmount, uint256 deadline, string title, string description) external returns (uint256);

        function contributeETH(uint256 id) external payable;

        function contributeToken(uint256 id, address token, uint256 amount) external;

        function refund(uint256 id, address token) external;

        function withdraw(uint256 id) external;
    }
}
