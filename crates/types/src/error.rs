// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::notice::LifecycleStage;
use thiserror::Error;

/// Failure taxonomy for one lifecycle invocation.
///
/// Builder errors (`InvalidArgument`, `InvalidSignature`) are raised before
/// anything touches the network. `Submission` is fatal and never retried:
/// resubmitting a task double-charges and double-executes on the ledger.
/// `StatusQuery` is only surfaced once the bounded retry budget is spent.
/// Each invocation's error is scoped to its own return value; there is no
/// global error state.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid function signature: {0}")]
    InvalidSignature(String),

    #[error("submission rejected by the network: {0}")]
    Submission(String),

    #[error("status query failed: {0}")]
    StatusQuery(String),

    #[error("timed out waiting for task finality; the on-chain task may still complete")]
    PollTimeout,

    #[error("lifecycle cancelled")]
    Cancelled,

    #[error("{0}")]
    TaskFailed(String),

    #[error("result not available: {0}")]
    ResultNotAvailable(String),

    #[error("could not decrypt task result: {0}")]
    Decryption(String),

    #[error("could not decode task output: {0}")]
    Decode(String),
}

impl LifecycleError {
    /// The stage this error terminates the pipeline in.
    pub fn stage(&self) -> LifecycleStage {
        match self {
            LifecycleError::InvalidArgument(_) | LifecycleError::InvalidSignature(_) => {
                LifecycleStage::Build
            }
            LifecycleError::Submission(_) => LifecycleStage::Submit,
            LifecycleError::StatusQuery(_)
            | LifecycleError::PollTimeout
            | LifecycleError::Cancelled
            | LifecycleError::TaskFailed(_) => LifecycleStage::Poll,
            LifecycleError::ResultNotAvailable(_) => LifecycleStage::Fetch,
            LifecycleError::Decryption(_) => LifecycleStage::Decrypt,
            LifecycleError::Decode(_) => LifecycleStage::Decode,
        }
    }
}
