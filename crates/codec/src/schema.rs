// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::param::ParamKind;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, U256};
use umbra_types::LifecycleError;

/// One declared output field: a wire type and the name to expose it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputField {
    kind: ParamKind,
    name: String,
}

impl OutputField {
    pub fn new(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered description of a task's decrypted output layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputSchema {
    fields: Vec<OutputField>,
}

impl OutputSchema {
    pub fn new(fields: Vec<OutputField>) -> Self {
        Self { fields }
    }

    /// Schema for a call whose result is not fetched (state-mutating tasks).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a field; useful for building schemas inline.
    pub fn field(mut self, kind: ParamKind, name: impl Into<String>) -> Self {
        self.fields.push(OutputField::new(kind, name));
        self
    }

    pub fn fields(&self) -> &[OutputField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn tuple_type(&self) -> DynSolType {
        DynSolType::Tuple(self.fields.iter().map(|f| f.kind.sol_type()).collect())
    }
}

/// A decoded output value in native form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Int(i64),
    Uint(U256),
    Address(Address),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
}

impl DecodedValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DecodedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u256(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            DecodedValue::Address(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(v) => Some(v),
            _ => None,
        }
    }
}

/// Decoded task output: field name to native value, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedResult {
    fields: Vec<(String, DecodedValue)>,
}

impl DecodedResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DecodedValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DecodedValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decodes a decrypted output payload against the declared schema.
pub fn decode_output(
    payload: &[u8],
    schema: &OutputSchema,
) -> Result<DecodedResult, LifecycleError> {
    if schema.is_empty() {
        return Ok(DecodedResult::empty());
    }

    let decoded = schema
        .tuple_type()
        .abi_decode(payload)
        .map_err(|e| LifecycleError::Decode(format!("payload does not match schema: {e}")))?;
    let DynSolValue::Tuple(values) = decoded else {
        return Err(LifecycleError::Decode(
            "payload did not decode to a tuple".to_string(),
        ));
    };

    let fields = schema
        .fields()
        .iter()
        .zip(values)
        .map(|(field, value)| Ok((field.name().to_string(), from_sol(field, value)?)))
        .collect::<Result<Vec<_>, LifecycleError>>()?;

    Ok(DecodedResult { fields })
}

fn from_sol(field: &OutputField, value: DynSolValue) -> Result<DecodedValue, LifecycleError> {
    let mismatch = || {
        LifecycleError::Decode(format!(
            "field `{}` is declared {} but the payload holds a different type",
            field.name(),
            field.kind()
        ))
    };

    match (field.kind(), value) {
        (ParamKind::Int32 | ParamKind::Int64, DynSolValue::Int(v, _)) => i64::try_from(v)
            .map(DecodedValue::Int)
            .map_err(|_| LifecycleError::Decode(format!("field `{}` overflows i64", field.name()))),
        (
            ParamKind::Uint32 | ParamKind::Uint64 | ParamKind::Uint256,
            DynSolValue::Uint(v, _),
        ) => Ok(DecodedValue::Uint(v)),
        (ParamKind::Address, DynSolValue::Address(v)) => Ok(DecodedValue::Address(v)),
        (ParamKind::Bool, DynSolValue::Bool(v)) => Ok(DecodedValue::Bool(v)),
        (ParamKind::Bytes, DynSolValue::Bytes(v)) => Ok(DecodedValue::Bytes(v)),
        (ParamKind::String, DynSolValue::String(v)) => Ok(DecodedValue::String(v)),
        _ => Err(mismatch()),
    }
}
