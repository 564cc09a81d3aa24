//! ERC20 ABI encoding/decoding helpers
//!
//! Manual ABI handling for the ERC20 surface this crate touches, without
//! the abigen! macro: decoding `transfer(address,uint256)` call data and
//! encoding/decoding the `name()` / `decimals()` metadata queries.

use ethers::abi::{self, AbiDecode, ParamType, Token};
use ethers::types::{Address, U256};

/// Function selector for transfer(address,uint256)
pub const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Function selector for name()
pub const NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];

/// Function selector for decimals()
pub const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];

/// Whether call data starts with the transfer(address,uint256) selector
pub fn is_transfer_calldata(data: &[u8]) -> bool {
    data.len() >= 4 && data[0..4] == TRANSFER_SELECTOR
}

/// Decode the (recipient, amount) arguments of a transfer(address,uint256) call
pub fn decode_transfer_calldata(data: &[u8]) -> Result<(Address, U256), String> {
    if !is_transfer_calldata(data) {
        return Err("Call data does not start with the transfer selector".to_string());
    }

    let tokens = abi::decode(&[ParamType::Address, ParamType::Uint(256)], &data[4..])
        .map_err(|e| format!("Failed to decode transfer arguments: {}", e))?;

    match (tokens.first().cloned(), tokens.get(1).cloned()) {
        (Some(Token::Address(recipient)), Some(Token::Uint(amount))) => Ok((recipient, amount)),
        _ => Err("Transfer arguments did not decode to (address, uint256)".to_string()),
    }
}

/// Encode a name() call
pub fn encode_name() -> Vec<u8> {
    NAME_SELECTOR.to_vec()
}

/// Decode a name response (string)
pub fn decode_name(data: &[u8]) -> Result<String, String> {
    if data.len() < 64 {
        return Err(format!("Name response too short: {} bytes", data.len()));
    }

    // ABI-encoded string: offset (32 bytes) + length (32 bytes) + data
    String::decode(data).map_err(|e| format!("Failed to decode name: {}", e))
}

/// Encode a decimals() call
pub fn encode_decimals() -> Vec<u8> {
    DECIMALS_SELECTOR.to_vec()
}

/// Decode a decimals response (uint8)
pub fn decode_decimals(data: &[u8]) -> Result<u8, String> {
    if data.len() < 32 {
        return Err(format!("Decimals response too short: {} bytes", data.len()));
    }
    // Decimals is returned as uint8 in a 32-byte word
    let value = U256::decode(data).map_err(|e| format!("Failed to decode decimals: {}", e))?;

    if value > U256::from(255u8) {
        return Err("Decimals value too large".to_string());
    }
    Ok(value.as_u32() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::AbiEncode;
    use ethers::utils::keccak256;
    use std::str::FromStr;

    #[test]
    fn test_selectors() {
        // Verify selectors are correct by computing from function signatures
        assert_eq!(
            TRANSFER_SELECTOR,
            keccak256(b"transfer(address,uint256)")[0..4]
        );
        assert_eq!(NAME_SELECTOR, keccak256(b"name()")[0..4]);
        assert_eq!(DECIMALS_SELECTOR, keccak256(b"decimals()")[0..4]);
    }

    #[test]
    fn test_decode_transfer_calldata() {
        let recipient = Address::from_str("0x1234567890123456789012345678901234567890").unwrap();
        let amount = U256::from(1_000_000u64);

        let mut data = TRANSFER_SELECTOR.to_vec();
        data.extend_from_slice(&abi::encode(&[
            Token::Address(recipient),
            Token::Uint(amount),
        ]));

        let (to, value) = decode_transfer_calldata(&data).unwrap();
        assert_eq!(to, recipient);
        assert_eq!(value, amount);
    }

    #[test]
    fn test_decode_transfer_rejects_other_selectors() {
        // approve(address,uint256)
        let data = [0x09u8, 0x5e, 0xa7, 0xb3, 0x00, 0x00];
        assert!(decode_transfer_calldata(&data).is_err());
        assert!(!is_transfer_calldata(&data));
    }

    #[test]
    fn test_decode_transfer_rejects_truncated_arguments() {
        let mut data = TRANSFER_SELECTOR.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        assert!(decode_transfer_calldata(&data).is_err());
    }

    #[test]
    fn test_decode_name() {
        let encoded = "Test Token".to_string().encode();
        assert_eq!(decode_name(&encoded).unwrap(), "Test Token");
    }

    #[test]
    fn test_decode_decimals() {
        let encoded = U256::from(18u8).encode();
        assert_eq!(decode_decimals(&encoded).unwrap(), 18);
    }

    #[test]
    fn test_decode_decimals_rejects_overflow() {
        let encoded = U256::from(300u64).encode();
        assert!(decode_decimals(&encoded).is_err());
    }
}
