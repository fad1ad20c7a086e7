//! ERC-4337 `UserOperation` packed hashing.

use nero_mpc_core::hash_symmetric::keccak256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ERC-4337 user operation. Numeric fields are kept as `u128` rather
/// than a full 256-bit bignum type: no value this engine signs over needs
/// more than 128 bits of gas/fee/nonce range, and the dependency stack
/// carries no bignum crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserOperation {
    /// The smart-account address sending the operation.
    pub sender: [u8; 20],
    /// The account's nonce for this operation.
    pub nonce: u128,
    /// Account init code, empty after the account has been deployed.
    pub init_code: Vec<u8>,
    /// The calldata to execute.
    pub call_data: Vec<u8>,
    /// Gas limit for the main execution call.
    pub call_gas_limit: u128,
    /// Gas limit for verification.
    pub verification_gas_limit: u128,
    /// Gas to cover bundler overhead not attributable to the call itself.
    pub pre_verification_gas: u128,
    /// Maximum total fee per unit of gas.
    pub max_fee_per_gas: u128,
    /// Maximum priority fee per unit of gas.
    pub max_priority_fee_per_gas: u128,
    /// Paymaster address and any paymaster-specific data, empty if unused.
    pub paymaster_and_data: Vec<u8>,
}

/// Wire representation matching the ERC-4337 UserOp wire form: numeric
/// fields as `0x`-prefixed hex, byte fields as `0x`-prefixed lower-case
/// hex (empty bytes serialize as `"0x"`).
#[derive(Serialize, Deserialize)]
struct UserOperationWire {
    sender: String,
    nonce: String,
    init_code: String,
    call_data: String,
    call_gas_limit: String,
    verification_gas_limit: String,
    pre_verification_gas: String,
    max_fee_per_gas: String,
    max_priority_fee_per_gas: String,
    paymaster_and_data: String,
}

fn hex_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn hex_u128(value: u128) -> String {
    format!("0x{:x}", value)
}

fn parse_hex_bytes<E: serde::de::Error>(s: &str) -> Result<Vec<u8>, E> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|_| E::custom(format!("invalid hex bytes: {s}")))
}

fn parse_hex_u128<E: serde::de::Error>(s: &str) -> Result<u128, E> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(stripped, 16).map_err(|_| E::custom(format!("invalid hex integer: {s}")))
}

fn parse_hex_address<E: serde::de::Error>(s: &str) -> Result<[u8; 20], E> {
    let bytes = parse_hex_bytes::<E>(s)?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| E::custom(format!("address must be 20 bytes, got {}", b.len())))
}

impl Serialize for UserOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        UserOperationWire {
            sender: hex_bytes(&self.sender),
            nonce: hex_u128(self.nonce),
            init_code: hex_bytes(&self.init_code),
            call_data: hex_bytes(&self.call_data),
            call_gas_limit: hex_u128(self.call_gas_limit),
            verification_gas_limit: hex_u128(self.verification_gas_limit),
            pre_verification_gas: hex_u128(self.pre_verification_gas),
            max_fee_per_gas: hex_u128(self.max_fee_per_gas),
            max_priority_fee_per_gas: hex_u128(self.max_priority_fee_per_gas),
            paymaster_and_data: hex_bytes(&self.paymaster_and_data),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UserOperation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = UserOperationWire::deserialize(deserializer)?;
        Ok(UserOperation {
            sender: parse_hex_address(&wire.sender)?,
            nonce: parse_hex_u128(&wire.nonce)?,
            init_code: parse_hex_bytes(&wire.init_code)?,
            call_data: parse_hex_bytes(&wire.call_data)?,
            call_gas_limit: parse_hex_u128(&wire.call_gas_limit)?,
            verification_gas_limit: parse_hex_u128(&wire.verification_gas_limit)?,
            pre_verification_gas: parse_hex_u128(&wire.pre_verification_gas)?,
            max_fee_per_gas: parse_hex_u128(&wire.max_fee_per_gas)?,
            max_priority_fee_per_gas: parse_hex_u128(&wire.max_priority_fee_per_gas)?,
            paymaster_and_data: parse_hex_bytes(&wire.paymaster_and_data)?,
        })
    }
}

fn left_pad_32(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

impl UserOperation {
    /// Computes the packed hash used as the ERC-4337 `userOpHash`: keccak
    /// of the operation's fixed/dynamic fields (with `initCode`, `callData`
    /// and `paymasterAndData` reduced to their own keccak digests), then
    /// keccak again together with `entryPoint` and `chainId`.
    pub fn hash(&self, entry_point: &[u8; 20], chain_id: u64) -> [u8; 32] {
        let mut packed = Vec::with_capacity(32 * 9);
        let mut sender_word = [0u8; 32];
        sender_word[12..].copy_from_slice(&self.sender);
        packed.extend_from_slice(&sender_word);
        packed.extend_from_slice(&left_pad_32(self.nonce));
        packed.extend_from_slice(&keccak256(&self.init_code));
        packed.extend_from_slice(&keccak256(&self.call_data));
        packed.extend_from_slice(&left_pad_32(self.call_gas_limit));
        packed.extend_from_slice(&left_pad_32(self.verification_gas_limit));
        packed.extend_from_slice(&left_pad_32(self.pre_verification_gas));
        packed.extend_from_slice(&left_pad_32(self.max_fee_per_gas));
        packed.extend_from_slice(&left_pad_32(self.max_priority_fee_per_gas));
        packed.extend_from_slice(&keccak256(&self.paymaster_and_data));

        let inner = keccak256(&packed);

        let mut outer = Vec::with_capacity(96);
        outer.extend_from_slice(&inner);
        let mut entry_point_word = [0u8; 32];
        entry_point_word[12..].copy_from_slice(entry_point);
        outer.extend_from_slice(&entry_point_word);
        outer.extend_from_slice(&left_pad_32(chain_id as u128));

        keccak256(&outer)
    }
}
