// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::task::TaskId;
use std::fmt;

/// The lifecycle stage a failure originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    Build,
    Submit,
    Poll,
    Fetch,
    Decrypt,
    Decode,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleStage::Build => "build",
            LifecycleStage::Submit => "submit",
            LifecycleStage::Poll => "poll",
            LifecycleStage::Fetch => "fetch",
            LifecycleStage::Decrypt => "decrypt",
            LifecycleStage::Decode => "decode",
        };
        f.write_str(s)
    }
}

/// Ordered progress notifications emitted while a lifecycle invocation runs.
///
/// Every invocation ends with exactly one terminal notice: `ResultReady`,
/// `Cancelled` or `Error`. `Failed` reports the on-chain state transition and
/// is always followed by an `Error` terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleNotice {
    Submitted { id: TaskId },
    Pending { id: TaskId },
    Confirmed { id: TaskId },
    Failed { id: TaskId, reason: String },
    ResultReady { id: TaskId },
    Cancelled,
    Error { stage: LifecycleStage, detail: String },
}

impl LifecycleNotice {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleNotice::ResultReady { .. }
                | LifecycleNotice::Cancelled
                | LifecycleNotice::Error { .. }
        )
    }
}

impl fmt::Display for LifecycleNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleNotice::Submitted { id } => write!(f, "submitted({id})"),
            LifecycleNotice::Pending { id } => write!(f, "pending({id})"),
            LifecycleNotice::Confirmed { id } => write!(f, "confirmed({id})"),
            LifecycleNotice::Failed { id, reason } => write!(f, "failed({id}): {reason}"),
            LifecycleNotice::ResultReady { id } => write!(f, "result-ready({id})"),
            LifecycleNotice::Cancelled => f.write_str("cancelled"),
            LifecycleNotice::Error { stage, detail } => write!(f, "error({stage}): {detail}"),
        }
    }
}
