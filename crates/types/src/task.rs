// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Address;
use std::fmt;

/// Ledger status code for a task that is registered but not yet final.
pub const ETH_STATUS_PENDING: u8 = 1;
/// Ledger status code for a task whose computation was committed and verified.
pub const ETH_STATUS_VERIFIED: u8 = 2;

/// Opaque task identifier assigned by the network at submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger-confirmation state of a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// No record observed yet.
    Unknown,
    /// Registered on the ledger, computation not yet committed.
    Pending,
    /// Computation committed and verified on-chain.
    Confirmed,
    /// Reverted or rejected on-chain.
    Failed,
}

impl TaskStatus {
    /// Maps the network's numeric status code. `1` is pending, `2` is
    /// confirmed/verified; any other code means the task failed. An absent
    /// record has no code at all.
    pub fn from_eth_status(code: Option<u8>) -> Self {
        match code {
            None => TaskStatus::Unknown,
            Some(ETH_STATUS_PENDING) => TaskStatus::Pending,
            Some(ETH_STATUS_VERIFIED) => TaskStatus::Confirmed,
            Some(_) => TaskStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Confirmed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Unknown => "unknown",
            TaskStatus::Pending => "pending",
            TaskStatus::Confirmed => "confirmed",
            TaskStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One task's record as last observed. Handles are replaced whole on every
/// status query rather than mutated in place; only the poller advances
/// `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub id: TaskId,
    pub status: TaskStatus,
    pub contract: Address,
}

impl TaskHandle {
    /// Handle for a freshly acknowledged submission.
    pub fn pending(id: TaskId, contract: Address) -> Self {
        Self {
            id,
            status: TaskStatus::Pending,
            contract,
        }
    }

    /// A new snapshot of the same task with an updated status.
    pub fn with_status(self, status: TaskStatus) -> Self {
        Self { status, ..self }
    }
}

/// Terminal value of the polling sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task was committed on-chain; its encrypted output can now be
    /// fetched through the confirmed handle.
    Success { handle: TaskHandle },
    Failed { reason: String },
}
