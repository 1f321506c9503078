// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_dyn_abi::DynSolType;
use std::fmt;

/// Whitelist of primitive wire types accepted in signatures and schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Uint256,
    Address,
    Bool,
    Bytes,
    String,
}

impl ParamKind {
    /// Parses one declared-type token, e.g. `int32` or `uint256`.
    pub fn parse(token: &str) -> Option<Self> {
        let kind = match token {
            "int32" => ParamKind::Int32,
            "int64" => ParamKind::Int64,
            "uint32" => ParamKind::Uint32,
            "uint64" => ParamKind::Uint64,
            "uint256" => ParamKind::Uint256,
            "address" => ParamKind::Address,
            "bool" => ParamKind::Bool,
            "bytes" => ParamKind::Bytes,
            "string" => ParamKind::String,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Int32 => "int32",
            ParamKind::Int64 => "int64",
            ParamKind::Uint32 => "uint32",
            ParamKind::Uint64 => "uint64",
            ParamKind::Uint256 => "uint256",
            ParamKind::Address => "address",
            ParamKind::Bool => "bool",
            ParamKind::Bytes => "bytes",
            ParamKind::String => "string",
        }
    }

    pub(crate) fn sol_type(&self) -> DynSolType {
        match self {
            ParamKind::Int32 => DynSolType::Int(32),
            ParamKind::Int64 => DynSolType::Int(64),
            ParamKind::Uint32 => DynSolType::Uint(32),
            ParamKind::Uint64 => DynSolType::Uint(64),
            ParamKind::Uint256 => DynSolType::Uint(256),
            ParamKind::Address => DynSolType::Address,
            ParamKind::Bool => DynSolType::Bool,
            ParamKind::Bytes => DynSolType::Bytes,
            ParamKind::String => DynSolType::String,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
