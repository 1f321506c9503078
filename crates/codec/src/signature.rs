// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::param::ParamKind;
use std::fmt;
use umbra_types::LifecycleError;

/// A parsed call signature such as `add_location(int32,int32)`.
///
/// Signatures are space-free, use Solidity-style declared types from the
/// whitelist, and may take zero arguments (`compute_northernmost()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    name: String,
    params: Vec<ParamKind>,
}

impl FunctionSignature {
    pub fn parse(raw: &str) -> Result<Self, LifecycleError> {
        if raw.chars().any(char::is_whitespace) {
            return Err(invalid(raw, "signatures must not contain whitespace"));
        }
        let Some((name, rest)) = raw.split_once('(') else {
            return Err(invalid(raw, "missing `(`"));
        };
        let Some(param_list) = rest.strip_suffix(')') else {
            return Err(invalid(raw, "missing trailing `)`"));
        };
        if param_list.contains('(') || param_list.contains(')') {
            return Err(invalid(raw, "nested parentheses are not supported"));
        }
        if !is_valid_name(name) {
            return Err(invalid(raw, "function name must be a valid identifier"));
        }

        let params = if param_list.is_empty() {
            Vec::new()
        } else {
            param_list
                .split(',')
                .map(|token| {
                    ParamKind::parse(token).ok_or_else(|| {
                        invalid(raw, format!("unsupported parameter type `{token}`"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            name: name.to_string(),
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The space-free canonical form, identical to the accepted input.
    pub fn canonical(&self) -> String {
        let params: Vec<&str> = self.params.iter().map(ParamKind::as_str).collect();
        format!("{}({})", self.name, params.join(","))
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(raw: &str, why: impl fmt::Display) -> LifecycleError {
    LifecycleError::InvalidSignature(format!("`{raw}`: {why}"))
}
