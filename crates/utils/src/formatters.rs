// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::U256;

fn to_hex(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Short form of a ciphertext for log lines: `0x` plus the first six and the
/// last six hex digits.
pub fn prettify_ciphertext(data: &[u8]) -> String {
    let hex = format!("0x{}", to_hex(data));
    if hex.len() <= 14 {
        return hex;
    }
    format!("{}...{}", &hex[..8], &hex[hex.len() - 6..])
}

/// Formats a fixed point token amount as a whole number of tokens, rounding
/// half up.
pub fn format_whole_units(amount: U256, decimals: u8) -> String {
    let unit = U256::from(10u64).pow(U256::from(decimals));
    let half = unit / U256::from(2u64);
    amount.saturating_add(half).checked_div(unit).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prettify_keeps_both_ends() {
        let data: Vec<u8> = (0u8..32).collect();
        assert_eq!(prettify_ciphertext(&data), "0x000102...1d1e1f");
    }

    #[test]
    fn prettify_leaves_short_input_alone() {
        assert_eq!(prettify_ciphertext(&[0xab, 0xcd]), "0xabcd");
    }

    #[test]
    fn whole_units_round_half_up() {
        let ether = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(format_whole_units(ether * U256::from(4000u64), 18), "4000");
        assert_eq!(
            format_whole_units(ether + ether / U256::from(2u64), 18),
            "2"
        );
        assert_eq!(
            format_whole_units(ether - U256::from(1u64), 18),
            "1"
        );
        assert_eq!(format_whole_units(U256::from(7u64), 0), "7");
    }
}
