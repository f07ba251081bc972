// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Single-function ABI fragments

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Selector};
use serde_json::json;

use crate::errors::CallError;
use crate::session::CallOutput;
use crate::types::SolidityType;

/// ABI description of exactly one `view` function: its name, input types and
/// single return type.
///
/// Attribute calls never need a full contract ABI, so the fragment is
/// synthesized from the call itself.
///
/// # Examples
///
/// ```rust
/// use tokenattr::{FunctionFragment, SolidityType};
///
/// let fragment = FunctionFragment::new(
///     "balanceOf",
///     vec![SolidityType::Address],
///     SolidityType::UINT256,
/// )
/// .unwrap();
/// assert_eq!(fragment.signature(), "balanceOf(address)");
/// assert_eq!(fragment.selector().to_string(), "0x70a08231");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionFragment {
    name: String,
    inputs: Vec<SolidityType>,
    output: SolidityType,
}

impl FunctionFragment {
    /// Builds a fragment, validating the function name.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidFunction`] if `name` is not a valid
    /// Solidity identifier, an input is `void`, or a type has a width
    /// Solidity does not allow (such as `uint7` or `bytes40`).
    pub fn new(
        name: &str,
        inputs: Vec<SolidityType>,
        output: SolidityType,
    ) -> Result<Self, CallError> {
        if !is_identifier(name) {
            return Err(CallError::InvalidFunction {
                function: name.to_string(),
                reason: "not a valid Solidity identifier".to_string(),
            });
        }
        if inputs.iter().any(SolidityType::is_void) {
            return Err(CallError::InvalidFunction {
                function: name.to_string(),
                reason: "void is not an input type".to_string(),
            });
        }
        if let Some(ty) = inputs
            .iter()
            .chain(std::iter::once(&output))
            .find(|ty| !ty.has_valid_width())
        {
            return Err(CallError::InvalidFunction {
                function: name.to_string(),
                reason: format!("{ty} is not a valid Solidity type"),
            });
        }
        Ok(Self {
            name: name.to_string(),
            inputs,
            output,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inputs(&self) -> &[SolidityType] {
        &self.inputs
    }

    #[must_use]
    pub fn output(&self) -> SolidityType {
        self.output
    }

    /// Canonical signature, e.g. `balanceOf(address)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
        format!("{}({})", self.name, inputs.join(","))
    }

    /// First four bytes of the keccak hash of the signature.
    #[must_use]
    pub fn selector(&self) -> Selector {
        Selector::from_slice(&keccak256(self.signature().as_bytes())[..4])
    }

    /// Calldata for a call with `arguments`: selector followed by the
    /// ABI-encoded parameters.
    #[must_use]
    pub fn encode_input(&self, arguments: &[DynSolValue]) -> Vec<u8> {
        let mut data = self.selector().to_vec();
        data.extend(DynSolValue::Tuple(arguments.to_vec()).abi_encode_params());
        data
    }

    /// Decodes raw return data into positional outputs.
    ///
    /// Void functions and empty return data (e.g. a call to an address with no
    /// code) produce an empty output.
    ///
    /// # Errors
    ///
    /// Returns the ABI decoder error if the data does not match the output type.
    pub fn decode_output(&self, data: &[u8]) -> Result<CallOutput, alloy_dyn_abi::Error> {
        let Some(ty) = self.output.to_dyn() else {
            return Ok(CallOutput::empty());
        };
        if data.is_empty() {
            return Ok(CallOutput::empty());
        }

        let values = match DynSolType::Tuple(vec![ty]).abi_decode_params(data)? {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };
        Ok(CallOutput::new(values))
    }

    /// JSON ABI of this one function, as a one-element ABI array.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let inputs: Vec<_> = self
            .inputs
            .iter()
            .map(|ty| json!({ "name": "", "type": ty.to_string() }))
            .collect();
        let outputs: Vec<_> = self
            .output
            .to_dyn()
            .map(|_| json!({ "name": "", "type": self.output.to_string() }))
            .into_iter()
            .collect();

        json!([{
            "type": "function",
            "name": self.name,
            "inputs": inputs,
            "outputs": outputs,
            "stateMutability": "view",
        }])
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
