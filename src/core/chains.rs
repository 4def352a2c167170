//! Static chain metadata.
//!
//! Lookup only; nothing here touches the network.

/// Display metadata for a known chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainData {
    pub name: &'static str,
    pub short_name: &'static str,
    pub chain_id: u64,
    pub network: &'static str,
    pub native_currency: &'static str,
}

const fn chain(
    chain_id: u64,
    name: &'static str,
    short_name: &'static str,
    network: &'static str,
    native_currency: &'static str,
) -> ChainData {
    ChainData {
        name,
        short_name,
        chain_id,
        network,
        native_currency,
    }
}

static SUPPORTED_CHAINS: &[ChainData] = &[
    chain(1, "Ethereum Mainnet", "eth", "mainnet", "ETH"),
    chain(5, "Ethereum Görli", "gor", "goerli", "ETH"),
    chain(11155111, "Ethereum Sepolia", "sep", "sepolia", "ETH"),
    chain(17000, "Ethereum Holesky", "hol", "holesky", "ETH"),
    chain(10, "Optimism", "oeth", "optimism", "ETH"),
    chain(56, "BNB Smart Chain", "bnb", "binance", "BNB"),
    chain(100, "Gnosis", "gno", "xdai", "xDAI"),
    chain(137, "Polygon", "matic", "matic", "MATIC"),
    chain(324, "zkSync Era", "zksync", "zksync", "ETH"),
    chain(8453, "Base", "base", "base", "ETH"),
    chain(42161, "Arbitrum One", "arb1", "arbitrum", "ETH"),
    chain(43114, "Avalanche C-Chain", "avax", "avalanche", "AVAX"),
    chain(59144, "Linea", "linea", "linea", "ETH"),
    chain(534352, "Scroll", "scr", "scroll", "ETH"),
];

/// Look up metadata for a chain id.
///
/// Returns `None` for `None` input and for ids missing from the table.
pub fn chain_data(chain_id: Option<u64>) -> Option<&'static ChainData> {
    let id = chain_id?;
    SUPPORTED_CHAINS.iter().find(|c| c.chain_id == id)
}

/// Network label for the status line.
pub fn network_name(chain_id: Option<u64>) -> String {
    match (chain_id, chain_data(chain_id)) {
        (_, Some(data)) => data.name.to_string(),
        (Some(id), None) => format!("Unknown ({})", id),
        (None, None) => "—".to_string(),
    }
}

/// Parse a chain id as delivered by a wallet.
///
/// EIP-1193 sends a `0x`-prefixed hex string; the digits are base 16 even
/// without the prefix. A bare JSON number is taken as-is.
pub fn parse_chain_id(raw: &serde_json::Value) -> Option<u64> {
    match raw {
        serde_json::Value::String(s) => {
            let digits = s.trim();
            let digits = digits
                .strip_prefix("0x")
                .or_else(|| digits.strip_prefix("0X"))
                .unwrap_or(digits);
            u64::from_str_radix(digits, 16).ok()
        }
        serde_json::Value::Number(n) => n.as_u64(),
        _ => None,
    }
}
