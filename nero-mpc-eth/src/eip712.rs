//! EIP-712 typed-data hashing: domain separation, struct
//! hashing, and the generic field-encoding rules (dynamic types hashed,
//! `bytesN` right-padded, `uintK`/`intK` left-padded with two's-complement
//! for signed negatives).

use nero_mpc_core::hash_symmetric::keccak256;

use crate::error::{EthError, EthResult};

/// The EIP-712 domain separator fields this engine supports. `salt` is
/// omitted: no supported signing flow names it.
pub struct Eip712Domain<'a> {
    /// Human-readable signing domain name.
    pub name: &'a str,
    /// Domain version string.
    pub version: &'a str,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// The verifying contract's address.
    pub verifying_contract: [u8; 20],
}

/// Computes `keccak256(type_string)`, the EIP-712 "type hash" used both
/// for the domain separator and for each struct type in a typed message.
pub fn type_hash(type_string: &str) -> [u8; 32] {
    keccak256(type_string.as_bytes())
}

/// Hashes a struct: `keccak256(type_hash || encoded_field_1 || ... )`,
/// where each `encoded_field` is a 32-byte word produced by one of the
/// `encode_*` functions below (or a nested `struct_hash` for struct-typed
/// fields).
pub fn struct_hash(type_hash: &[u8; 32], encoded_fields: &[[u8; 32]]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(32 * (1 + encoded_fields.len()));
    buf.extend_from_slice(type_hash);
    for field in encoded_fields {
        buf.extend_from_slice(field);
    }
    keccak256(&buf)
}

/// Computes the EIP-712 domain separator, itself just a struct hash
/// against the fixed `EIP712Domain` type.
pub fn domain_separator(domain: &Eip712Domain<'_>) -> [u8; 32] {
    let hash = type_hash("EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)");
    let fields = [
        encode_string(domain.name),
        encode_string(domain.version),
        encode_uint128(domain.chain_id as u128),
        encode_address(&domain.verifying_contract),
    ];
    struct_hash(&hash, &fields)
}

/// Computes the final digest that gets signed: `keccak256(0x1901 ||
/// domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: &[u8; 32], message_struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut buf = Vec::with_capacity(2 + 32 + 32);
    buf.extend_from_slice(&[0x19, 0x01]);
    buf.extend_from_slice(domain_separator);
    buf.extend_from_slice(message_struct_hash);
    keccak256(&buf)
}

/// Encodes a `string` field: its own keccak digest (dynamic types are
/// always hashed, never embedded directly).
pub fn encode_string(value: &str) -> [u8; 32] {
    keccak256(value.as_bytes())
}

/// Encodes a `bytes` field (dynamic-length): its own keccak digest.
pub fn encode_bytes(value: &[u8]) -> [u8; 32] {
    keccak256(value)
}

/// Encodes a fixed-size `bytesN` field: right-padded with zero bytes up
/// to the 32-byte word.
pub fn encode_bytes_n(value: &[u8]) -> EthResult<[u8; 32]> {
    if value.len() > 32 {
        return Err(EthError::FieldTooLarge {
            kind: "bytesN",
            actual: value.len(),
        });
    }
    let mut word = [0u8; 32];
    word[..value.len()].copy_from_slice(value);
    Ok(word)
}

/// Encodes an `address` field: left-padded 20-byte address.
pub fn encode_address(address: &[u8; 20]) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Encodes a `bool` field as the 32-byte word `0` or `1`.
pub fn encode_bool(value: bool) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = u8::from(value);
    word
}

/// Encodes an unsigned integer (`uintK`) from a `u128`: left-padded
/// big-endian.
pub fn encode_uint128(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes an arbitrary-precision unsigned integer given as big-endian
/// bytes (for `uint256` values too large for `u128`): left-padded.
pub fn encode_uint_bytes(be_bytes: &[u8]) -> EthResult<[u8; 32]> {
    if be_bytes.len() > 32 {
        return Err(EthError::FieldTooLarge {
            kind: "uintK",
            actual: be_bytes.len(),
        });
    }
    let mut word = [0u8; 32];
    word[32 - be_bytes.len()..].copy_from_slice(be_bytes);
    Ok(word)
}

/// Encodes a signed integer (`intK`) from an `i128`: two's-complement,
/// left-padded with `0xff` for negative values so `encode_int(-1)` is all
/// `0xff` bytes.
pub fn encode_int128(value: i128) -> [u8; 32] {
    let fill = if value.is_negative() { 0xffu8 } else { 0x00u8 };
    let mut word = [fill; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn addr(s: &str) -> [u8; 20] {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn negative_int256_is_all_ff() {
        assert_eq!(encode_int128(-1), [0xffu8; 32]);
    }

    #[test]
    fn positive_int_is_left_padded_with_zero() {
        let mut expected = [0u8; 32];
        expected[31] = 5;
        assert_eq!(encode_int128(5), expected);
    }

    #[test]
    fn bytes_n_rejects_oversized_input() {
        let oversized = vec![0u8; 33];
        assert!(encode_bytes_n(&oversized).is_err());
    }

    /// The canonical published EIP-712 "Mail" example, verifying the
    /// produced digest against the well-known vector.
    #[test]
    fn mail_example_matches_published_digest() {
        let domain = Eip712Domain {
            name: "Ether Mail",
            version: "1",
            chain_id: 1,
            verifying_contract: addr("CcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC"),
        };
        let domain_sep = domain_separator(&domain);

        let person_type = type_hash("Person(string name,address wallet)");
        let from = struct_hash(
            &person_type,
            &[
                encode_string("Cow"),
                encode_address(&addr("CD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826")),
            ],
        );
        let to = struct_hash(
            &person_type,
            &[
                encode_string("Bob"),
                encode_address(&addr("bBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB")),
            ],
        );

        let mail_type = type_hash(
            "Mail(Person from,Person to,string contents)Person(string name,address wallet)",
        );
        let message_hash = struct_hash(&mail_type, &[from, to, encode_string("Hello, Bob!")]);

        let digest = typed_data_digest(&domain_sep, &message_hash);
        assert_eq!(
            hex::encode(digest),
            "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd"
        );
    }
}
