// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Deployment bookkeeping for secret contracts.
//!
//! Deploy scripts write the address of each deployed contract to a flat
//! text file once; the client and tests read it back at runtime. This crate
//! also carries the ledger account policy: the provider's last unlocked
//! account is reserved for the network's key management worker and must not
//! be used as a task sender.

mod accounts;
mod records;

pub use accounts::{usable_accounts, RESERVED_ACCOUNTS};
pub use records::{DeploymentRecords, RegistryError};
