use alloy::sol;

sol! {
    /// ERC20 surface used for decimals, held balances and LP supply
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function totalSupply() external view returns (uint256);
    }

    /// Stable-swap pool getters
    #[sol(rpc)]
    interface IStableSwap {
        function coins(uint256 i) external view returns (address);
        function underlying_coins(uint256 i) external view returns (address);
        function balances(uint256 i) external view returns (uint256);
        function A() external view returns (uint256);
        function future_A() external view returns (uint256);
        function initial_A() external view returns (uint256);
        function initial_A_time() external view returns (uint256);
        function future_A_time() external view returns (uint256);
        function fee() external view returns (uint256);
        function admin_fee() external view returns (uint256);
        function future_fee() external view returns (uint256);
        function future_admin_fee() external view returns (uint256);
        function future_owner() external view returns (address);
        function get_virtual_price() external view returns (uint256);
    }

    /// First-generation pools index coins with `int128`
    #[sol(rpc)]
    interface IStableSwapV1 {
        function coins(int128 i) external view returns (address);
        function underlying_coins(int128 i) external view returns (address);
        function balances(int128 i) external view returns (uint256);
    }
}
