// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Core data model for the Umbra task lifecycle client.
//!
//! A *task* is one invocation of a secret contract's function, tracked by a
//! [`TaskHandle`] from submission until the network commits it on-chain. This
//! crate holds the value types shared by the codec and the client, plus the
//! error taxonomy every lifecycle stage maps into.

mod error;
mod notice;
mod policy;
mod task;

pub use error::LifecycleError;
pub use notice::{LifecycleNotice, LifecycleStage};
pub use policy::{PollPolicy, DEFAULT_POLL_INTERVAL_MS, DEFAULT_STATUS_QUERY_RETRIES};
pub use task::{
    TaskHandle, TaskId, TaskOutcome, TaskStatus, ETH_STATUS_PENDING, ETH_STATUS_VERIFIED,
};
