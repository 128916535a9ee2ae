//! Chain network configuration
//!
//! One `Network` value describes everything chain-specific the pipeline needs:
//! chain ID, bech32 address prefix, SLIP-44 coin type, denominations, and the
//! node endpoints. The value is passed explicitly to every component that
//! needs it; there is no process-wide network singleton.

/// Network parameters for a Crypto.org-chain network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    /// Human-readable network name
    pub name: &'static str,
    /// Chain identifier bound into every SignDoc
    pub chain_id: &'static str,
    /// Bech32 address prefix
    pub address_prefix: &'static str,
    /// SLIP-44 coin type used in the default derivation path
    pub coin_type: u32,
    /// Smallest indivisible denomination, used in all on-wire amounts
    pub base_denom: &'static str,
    /// Display denomination (1 display unit = 10^8 base units)
    pub display_denom: &'static str,
    /// Cosmos REST (LCD) endpoint, for account queries
    pub rest_url: &'static str,
    /// Tendermint RPC endpoint, for broadcasting
    pub rpc_url: &'static str,
}

/// Decimal places between the display and base denominations
pub const DISPLAY_DECIMALS: u32 = 8;

impl Network {
    /// BIP-44 derivation path for an address index on this network
    pub fn derivation_path(&self, index: u32) -> String {
        format!("m/44'/{}'/0'/0/{}", self.coin_type, index)
    }
}

/// Crypto.org Chain mainnet
pub const MAINNET: Network = Network {
    name: "Crypto.org Chain Mainnet",
    chain_id: "crypto-org-chain-mainnet-1",
    address_prefix: "cro",
    coin_type: 394,
    base_denom: "basecro",
    display_denom: "cro",
    rest_url: "https://mainnet.crypto.org:1317",
    rpc_url: "https://mainnet.crypto.org:26657",
};

/// Croeseid 4 testnet
pub const TESTNET_CROESEID_4: Network = Network {
    name: "Crypto.org Chain Testnet Croeseid 4",
    chain_id: "testnet-croeseid-4",
    address_prefix: "tcro",
    coin_type: 1,
    base_denom: "basecro",
    display_denom: "tcro",
    rest_url: "https://testnet-croeseid-4.crypto.org:1317",
    rpc_url: "https://testnet-croeseid-4.crypto.org:26657",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_constants() {
        assert_eq!(MAINNET.address_prefix, "cro");
        assert_eq!(MAINNET.coin_type, 394);
        assert_eq!(MAINNET.base_denom, "basecro");

        assert_eq!(TESTNET_CROESEID_4.address_prefix, "tcro");
        assert_eq!(TESTNET_CROESEID_4.chain_id, "testnet-croeseid-4");
        // Testnet uses the testnet coin type in its derivation path
        assert_eq!(TESTNET_CROESEID_4.coin_type, 1);
    }

    #[test]
    fn test_derivation_path() {
        assert_eq!(TESTNET_CROESEID_4.derivation_path(0), "m/44'/1'/0'/0/0");
        assert_eq!(MAINNET.derivation_path(3), "m/44'/394'/0'/0/3");
    }
}
