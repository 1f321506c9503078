// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::param::ParamKind;
use crate::signature::FunctionSignature;
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, I256, U256};
use umbra_types::LifecycleError;

/// One call argument carrying its value and declared wire type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Uint256(U256),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
}

impl CallArg {
    pub fn kind(&self) -> ParamKind {
        match self {
            CallArg::Int32(_) => ParamKind::Int32,
            CallArg::Int64(_) => ParamKind::Int64,
            CallArg::Uint32(_) => ParamKind::Uint32,
            CallArg::Uint64(_) => ParamKind::Uint64,
            CallArg::Uint256(_) => ParamKind::Uint256,
            CallArg::Address(_) => ParamKind::Address,
            CallArg::Bool(_) => ParamKind::Bool,
            CallArg::Bytes(_) => ParamKind::Bytes,
            CallArg::String(_) => ParamKind::String,
        }
    }

    fn to_sol_value(&self) -> Result<DynSolValue, LifecycleError> {
        let value = match self {
            CallArg::Int32(v) => signed(i64::from(*v), 32)?,
            CallArg::Int64(v) => signed(*v, 64)?,
            CallArg::Uint32(v) => DynSolValue::Uint(U256::from(*v), 32),
            CallArg::Uint64(v) => DynSolValue::Uint(U256::from(*v), 64),
            CallArg::Uint256(v) => DynSolValue::Uint(*v, 256),
            CallArg::Address(v) => DynSolValue::Address(*v),
            CallArg::Bool(v) => DynSolValue::Bool(*v),
            CallArg::Bytes(v) => DynSolValue::Bytes(v.clone()),
            CallArg::String(v) => DynSolValue::String(v.clone()),
        };
        Ok(value)
    }
}

fn signed(value: i64, bits: usize) -> Result<DynSolValue, LifecycleError> {
    let value = I256::try_from(value).map_err(|e| {
        LifecycleError::InvalidArgument(format!("{value} does not fit int{bits}: {e}"))
    })?;
    Ok(DynSolValue::Int(value, bits))
}

/// Validates the argument list against the signature and ABI-encodes it as
/// a Solidity tuple. Deterministic, and never touches the network.
pub fn encode_args(
    signature: &FunctionSignature,
    args: &[CallArg],
) -> Result<Vec<u8>, LifecycleError> {
    if args.len() != signature.arity() {
        return Err(LifecycleError::InvalidArgument(format!(
            "`{signature}` expects {} argument(s), got {}",
            signature.arity(),
            args.len()
        )));
    }

    let mut values = Vec::with_capacity(args.len());
    for (position, (arg, expected)) in args.iter().zip(signature.params()).enumerate() {
        if arg.kind() != *expected {
            return Err(LifecycleError::InvalidArgument(format!(
                "argument {position} of `{signature}` is declared {expected} but was given {}",
                arg.kind()
            )));
        }
        values.push(arg.to_sol_value()?);
    }

    Ok(DynSolValue::Tuple(values).abi_encode())
}
