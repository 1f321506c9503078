// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Address;

/// Trailing account slots reserved for the network's key management worker.
pub const RESERVED_ACCOUNTS: usize = 1;

/// Restricts the ledger provider's unlocked account list to the slots that
/// may sign task submissions. The reserved tail is excluded by policy.
pub fn usable_accounts(all: &[Address]) -> &[Address] {
    if all.len() <= RESERVED_ACCOUNTS {
        return &[];
    }
    &all[..all.len() - RESERVED_ACCOUNTS]
}
