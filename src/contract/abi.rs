//! Crowdfunding contract interface.

use alloy::sol;

sol! {
    #[sol(rpc)]
    contract Crowdfunding {
        struct Campaign {
            uint256 id;
            address owner;
            string name;
            string description;
            string imageUrl;
            uint256 targetAmount;
            uint256 amountCollected;
            uint256 deadline;
            bool isActive;
        }

        function createCampaign(
            string _name,
            string _description,
            string _imageUrl,
            uint256 _targetAmount,
            uint256 _deadline
        ) external;

        function donate(uint256 _campaignId) external payable;

        function withdraw(uint256 _campaignId) external;

        function withdrawPlatformFees() external;

        function campaigns(uint256 _campaignId) external view returns (
            uint256 id,
            address owner,
            string name,
            string description,
            string imageUrl,
            uint256 targetAmount,
            uint256 amountCollected,
            uint256 deadline,
            bool isActive
        );

        function getCampaigns() external view returns (Campaign[] memory);

        function campaignCount() external view returns (uint256);

        function platformFees() external view returns (uint256);

        function admin() external view returns (address);
    }
}
