//! Contract-call descriptions handed to the wallet.
//!
//! A [`ContractCall`] names a target contract, carries the ABI fragment it is called
//! through, and holds the ordered string arguments. Construction enforces that the ABI
//! actually declares the function with matching arity and argument types, so a
//! description that reaches the wallet can always be encoded.

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// JSON-RPC method the wallet is asked to perform
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";

sol! {
    /// Calls the frame makes on the OP token
    interface IVotesToken {
        function approve(address spender, uint256 amount) external;
        function delegate(address delegatee) external;
    }
}

/// One input or output parameter of an ABI function
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    pub internal_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl AbiParam {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            internal_type: kind.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

/// A `function` entry of a JSON ABI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunction {
    pub inputs: Vec<AbiParam>,
    pub name: String,
    pub outputs: Vec<AbiParam>,
    pub state_mutability: StateMutability,
    #[serde(rename = "type")]
    pub kind: String,
}

impl AbiFunction {
    /// Non-payable function with no outputs
    pub fn nonpayable(name: &str, inputs: Vec<AbiParam>) -> Self {
        Self {
            inputs,
            name: name.to_string(),
            outputs: Vec::new(),
            state_mutability: StateMutability::Nonpayable,
            kind: "function".to_string(),
        }
    }

    /// Canonical signature, e.g. `approve(address,uint256)`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.kind.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// ABI for `approve(address spender, uint256 amount)`
pub fn approve_abi() -> Vec<AbiFunction> {
    vec![AbiFunction::nonpayable(
        "approve",
        vec![
            AbiParam::new("spender", "address"),
            AbiParam::new("amount", "uint256"),
        ],
    )]
}

/// ABI for `delegate(address delegatee)`
pub fn delegate_abi() -> Vec<AbiFunction> {
    vec![AbiFunction::nonpayable(
        "delegate",
        vec![AbiParam::new("delegatee", "address")],
    )]
}

/// Parse a 0x-prefixed, 20-byte hex address
pub fn parse_address(value: &str) -> Result<Address> {
    if !value.starts_with("0x") && !value.starts_with("0X") {
        return Err(Error::InvalidAddress(format!("{} (missing 0x prefix)", value)));
    }
    Address::from_str(value).map_err(|e| Error::InvalidAddress(format!("{} ({})", value, e)))
}

fn parse_uint(value: &str) -> Result<U256> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Abi(format!(
            "'{}' is not a base-10 unsigned integer",
            value
        )));
    }
    U256::from_str_radix(value, 10)
        .map_err(|e| Error::Abi(format!("'{}' does not fit in uint256: {}", value, e)))
}

/// Everything a wallet needs to build and sign a contract call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    /// Target contract address
    pub to: String,
    /// ABI fragment the call is made through
    pub abi: Vec<AbiFunction>,
    /// Function invoked on `to`
    pub function_name: String,
    /// Ordered arguments, rendered as strings
    pub args: Vec<String>,
    /// CAIP-2 chain id
    pub chain_id: String,
}

impl ContractCall {
    /// Build a call, checking it against its ABI
    pub fn new(
        to: impl Into<String>,
        abi: Vec<AbiFunction>,
        function_name: impl Into<String>,
        args: Vec<String>,
        chain_id: impl Into<String>,
    ) -> Result<Self> {
        let call = Self {
            to: to.into(),
            abi,
            function_name: function_name.into(),
            args,
            chain_id: chain_id.into(),
        };
        call.validate()?;
        Ok(call)
    }

    /// The ABI entry named by `function_name`
    pub fn function(&self) -> Result<&AbiFunction> {
        self.abi
            .iter()
            .find(|f| f.name == self.function_name)
            .ok_or_else(|| {
                Error::Abi(format!(
                    "ABI does not declare function '{}'",
                    self.function_name
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        parse_address(&self.to)?;

        let function = self.function()?;
        if function.inputs.len() != self.args.len() {
            return Err(Error::Abi(format!(
                "{} expects {} arguments, got {}",
                function.signature(),
                function.inputs.len(),
                self.args.len()
            )));
        }

        self.encode_calldata().map(|_| ())
    }

    /// ABI-encoded calldata for the declared function and the string arguments
    pub fn encode_calldata(&self) -> Result<Vec<u8>> {
        let signature = self.function()?.signature();
        match self.args.as_slice() {
            [spender, amount] if signature == IVotesToken::approveCall::SIGNATURE => {
                Ok(IVotesToken::approveCall {
                    spender: parse_address(spender)?,
                    amount: parse_uint(amount)?,
                }
                .abi_encode())
            }
            [delegatee] if signature == IVotesToken::delegateCall::SIGNATURE => {
                Ok(IVotesToken::delegateCall {
                    delegatee: parse_address(delegatee)?,
                }
                .abi_encode())
            }
            args => Err(Error::Abi(format!(
                "Cannot encode {} with {} arguments",
                signature,
                args.len()
            ))),
        }
    }

    /// Wallet-facing `eth_sendTransaction` request for this call
    pub fn to_transaction_request(&self) -> Result<TransactionRequest> {
        let data = self.encode_calldata()?;
        Ok(TransactionRequest {
            chain_id: self.chain_id.clone(),
            method: ETH_SEND_TRANSACTION.to_string(),
            params: TransactionParams {
                abi: self.abi.clone(),
                to: self.to.clone(),
                data: format!("0x{}", hex::encode(data)),
                value: None,
            },
        })
    }
}

/// Transaction request returned to the frame client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub chain_id: String,
    pub method: String,
    pub params: TransactionParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionParams {
    pub abi: Vec<AbiFunction>,
    pub to: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
