//! Exact decimal scaling for chain values
//!
//! Every numeric field this crate emits is a canonical decimal string.
//! Scaling is string arithmetic on the full-precision `U256` value, never
//! floating point, so `parse(humanize(x))` round-trips for any input.

use ethers::types::U256;

/// Decimal count for the native ether unit (wei -> ETH)
pub const ETHER_DECIMALS: u32 = 18;

/// Scale a raw integer amount down by `decimals` decimal places.
///
/// Trailing zeros in the fractional part are trimmed, and a fraction of
/// zero is dropped entirely: `(10^18, 18)` -> `"1"`, `(10^16, 18)` ->
/// `"0.01"`, `(1234567, 6)` -> `"1.234567"`.
pub fn scale_decimals(value: U256, decimals: u32) -> String {
    let digits = value.to_string();
    if decimals == 0 {
        return digits;
    }

    let decimals = decimals as usize;
    let (integer, fraction) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        // Value is smaller than one whole unit; left-pad the fraction.
        (
            "0".to_string(),
            format!("{:0>width$}", digits, width = decimals),
        )
    };

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        integer
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Human-scaled ether value for a raw wei amount
pub fn wei_to_eth(wei: U256) -> String {
    scale_decimals(wei, ETHER_DECIMALS)
}
