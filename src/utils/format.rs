//! Formatting utilities for display values.

use crate::config::eth_address;

/// Format an Ethereum address for display (`0x1234...5678`).
///
/// Anything shorter than a full address is passed through unchanged and a
/// missing address renders as an empty string.
pub fn shorten_address(address: Option<&str>) -> String {
    match address {
        Some(addr) if addr.len() >= eth_address::FULL_LEN && addr.is_ascii() => format!(
            "{}...{}",
            &addr[..eth_address::PREFIX_LEN],
            &addr[addr.len() - (eth_address::FULL_LEN - eth_address::SUFFIX_START)..]
        ),
        Some(addr) => addr.to_string(),
        None => String::new(),
    }
}
