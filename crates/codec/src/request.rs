// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::args::{encode_args, CallArg};
use crate::signature::FunctionSignature;
use alloy_primitives::Address;
use umbra_types::LifecycleError;

/// An immutable, fully validated compute task request.
///
/// Building a request parses the signature, checks arity and declared types,
/// and ABI-encodes the arguments eagerly, so a malformed call can never
/// reach the network. Gas values are denominated in the network's
/// smallest-denomination units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    signature: FunctionSignature,
    args: Vec<CallArg>,
    gas_limit: u64,
    gas_price: u64,
    sender: Address,
    contract: Address,
    encoded_args: Vec<u8>,
}

impl TaskRequest {
    pub fn build(
        signature: &str,
        args: Vec<CallArg>,
        gas_limit: u64,
        gas_price: u64,
        sender: Address,
        contract: Address,
    ) -> Result<Self, LifecycleError> {
        let signature = FunctionSignature::parse(signature)?;
        if gas_limit == 0 {
            return Err(LifecycleError::InvalidArgument(
                "gas limit must be strictly positive".to_string(),
            ));
        }
        if gas_price == 0 {
            return Err(LifecycleError::InvalidArgument(
                "gas price must be strictly positive".to_string(),
            ));
        }
        let encoded_args = encode_args(&signature, &args)?;

        Ok(Self {
            signature,
            args,
            gas_limit,
            gas_price,
            sender,
            contract,
            encoded_args,
        })
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn args(&self) -> &[CallArg] {
        &self.args
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn encoded_args(&self) -> &[u8] {
        &self.encoded_args
    }
}
