// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoding of untyped call results into [`AttributeValue`]s
//!
//! Decoding is best-effort: a wire value of the wrong shape for the expected
//! type degrades to that type's default instead of failing the request. The
//! only hard error is a missing value when a non-void result was expected.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, I256, U256};

use crate::errors::CallError;
use crate::session::CallOutput;
use crate::types::{AttributeValue, SolidityType};

/// Maps one wire value to the value domain for the `expected` type.
///
/// Defaults on mismatch:
///
/// | expected          | default        |
/// |-------------------|----------------|
/// | `address`         | `Bool(false)`  |
/// | `bool`            | `Bool(false)`  |
/// | `bytes`, `bytesN` | empty `Bytes`  |
/// | `string`          | empty `String` |
/// | `uintN`           | `Uint(0)`      |
/// | `intN`            | `Int(0)`       |
/// | `void`            | `Bool(false)`  |
#[must_use]
pub fn decode_value(wire: &DynSolValue, expected: SolidityType) -> AttributeValue {
    match expected {
        SolidityType::Address => match wire {
            DynSolValue::Address(address) => AttributeValue::Address(*address),
            _ => AttributeValue::Bool(false),
        },
        SolidityType::Bool => AttributeValue::Bool(matches!(wire, DynSolValue::Bool(true))),
        SolidityType::Bytes | SolidityType::FixedBytes(_) => {
            let bytes = match wire {
                DynSolValue::Bytes(bytes) => Bytes::copy_from_slice(bytes),
                DynSolValue::FixedBytes(word, size) => {
                    Bytes::copy_from_slice(&word[..(*size).min(word.len())])
                }
                _ => Bytes::new(),
            };
            AttributeValue::Bytes(bytes)
        }
        SolidityType::String => match wire {
            DynSolValue::String(value) => AttributeValue::String(value.clone()),
            _ => AttributeValue::String(String::new()),
        },
        SolidityType::Uint(_) => match wire {
            DynSolValue::Uint(value, _) => AttributeValue::Uint(*value),
            _ => AttributeValue::Uint(U256::ZERO),
        },
        SolidityType::Int(_) => match wire {
            DynSolValue::Int(value, _) => AttributeValue::Int(*value),
            _ => AttributeValue::Int(I256::ZERO),
        },
        // Void outputs are answered before reaching the decoder.
        SolidityType::Void => AttributeValue::Bool(false),
    }
}

/// Maps a call's positional output to the value domain.
///
/// Only the first return slot is used. A `void` call with no output yields
/// `Bool(false)` as a placeholder.
///
/// # Errors
///
/// Returns [`CallError::EmptyResult`] if a non-void type was expected and the
/// output has no first slot.
pub fn decode_output(
    output: &CallOutput,
    expected: SolidityType,
    function: &str,
    contract: Address,
) -> Result<AttributeValue, CallError> {
    match output.get(0) {
        Some(wire) => Ok(decode_value(wire, expected)),
        None if expected.is_void() => Ok(AttributeValue::Bool(false)),
        None => Err(CallError::empty_result(function, contract)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, B256};
    use proptest::prelude::*;

    #[test]
    fn test_matching_shapes_decode() {
        let owner = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        assert_eq!(
            decode_value(&DynSolValue::Address(owner), SolidityType::Address),
            AttributeValue::Address(owner)
        );
        assert_eq!(
            decode_value(&DynSolValue::Bool(true), SolidityType::Bool),
            AttributeValue::Bool(true)
        );
        assert_eq!(
            decode_value(&DynSolValue::String("CK".into()), SolidityType::String),
            AttributeValue::String("CK".into())
        );
        assert_eq!(
            decode_value(&DynSolValue::Uint(U256::from(42), 256), SolidityType::UINT256),
            AttributeValue::Uint(U256::from(42))
        );
        assert_eq!(
            decode_value(&DynSolValue::Int(I256::MINUS_ONE, 8), SolidityType::Int(8)),
            AttributeValue::Int(I256::MINUS_ONE)
        );
        assert_eq!(
            decode_value(&DynSolValue::Bytes(vec![1, 2, 3]), SolidityType::Bytes),
            AttributeValue::Bytes(Bytes::from_static(&[1, 2, 3]))
        );
    }

    #[test]
    fn test_fixed_bytes_truncated_to_size() {
        let mut word = B256::ZERO;
        word[0] = 0xca;
        word[1] = 0xfe;
        assert_eq!(
            decode_value(&DynSolValue::FixedBytes(word, 2), SolidityType::FixedBytes(2)),
            AttributeValue::Bytes(Bytes::from_static(&[0xca, 0xfe]))
        );
    }

    #[test]
    fn test_mismatch_defaults() {
        let wrong = DynSolValue::String("not a number".into());
        assert_eq!(
            decode_value(&wrong, SolidityType::UINT256),
            AttributeValue::Uint(U256::ZERO)
        );
        assert_eq!(
            decode_value(&wrong, SolidityType::INT256),
            AttributeValue::Int(I256::ZERO)
        );
        assert_eq!(
            decode_value(&wrong, SolidityType::Bool),
            AttributeValue::Bool(false)
        );
        assert_eq!(
            decode_value(&wrong, SolidityType::Bytes),
            AttributeValue::Bytes(Bytes::new())
        );
        assert_eq!(
            decode_value(&DynSolValue::Bool(true), SolidityType::String),
            AttributeValue::String(String::new())
        );
    }

    #[test]
    fn test_address_mismatch_degrades_to_false() {
        assert_eq!(
            decode_value(&DynSolValue::Uint(U256::from(1), 256), SolidityType::Address),
            AttributeValue::Bool(false)
        );
    }

    #[test]
    fn test_void_without_output_is_false() {
        let result = decode_output(&CallOutput::empty(), SolidityType::Void, "poke", Address::ZERO);
        assert_eq!(result.unwrap(), AttributeValue::Bool(false));
    }

    #[test]
    fn test_non_void_without_output_is_empty_result() {
        let contract = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let result = decode_output(&CallOutput::empty(), SolidityType::UINT256, "balanceOf", contract);
        match result {
            Err(CallError::EmptyResult { function, contract: c }) => {
                assert_eq!(function, "balanceOf");
                assert_eq!(c, contract);
            }
            other => panic!("expected EmptyResult, got {other:?}"),
        }
    }

    #[test]
    fn test_only_first_slot_is_used() {
        let output = CallOutput::new(vec![
            DynSolValue::Uint(U256::from(7), 256),
            DynSolValue::Uint(U256::from(8), 256),
        ]);
        let value = decode_output(&output, SolidityType::UINT256, "f", Address::ZERO).unwrap();
        assert_eq!(value, AttributeValue::Uint(U256::from(7)));
    }

    proptest! {
        #[test]
        fn prop_uint_round_trips(limbs in any::<[u64; 4]>()) {
            let value = U256::from_limbs(limbs);
            prop_assert_eq!(
                decode_value(&DynSolValue::Uint(value, 256), SolidityType::UINT256),
                AttributeValue::Uint(value)
            );
        }

        #[test]
        fn prop_string_wire_never_decodes_as_number(text in ".*", bits in 1usize..=32) {
            let bits = bits * 8;
            let wire = DynSolValue::String(text);
            prop_assert_eq!(
                decode_value(&wire, SolidityType::Uint(bits)),
                AttributeValue::Uint(U256::ZERO)
            );
            prop_assert_eq!(
                decode_value(&wire, SolidityType::Int(bits)),
                AttributeValue::Int(I256::ZERO)
            );
        }
    }
}
