// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Signature parsing and ABI coding for secret contract calls.
//!
//! Call arguments are declared with a fixed whitelist of primitive wire
//! types ([`ParamKind`]), validated against the parsed function signature,
//! and ABI-encoded with Solidity ABI rules before a request ever reaches
//! the network. Output payloads are decoded the same way against a
//! caller-declared [`OutputSchema`].

mod args;
mod param;
mod request;
mod schema;
mod signature;

pub use args::{encode_args, CallArg};
pub use param::ParamKind;
pub use request::TaskRequest;
pub use schema::{decode_output, DecodedResult, DecodedValue, OutputField, OutputSchema};
pub use signature::FunctionSignature;
