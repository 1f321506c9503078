// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Task lifecycle client for secret-contract compute networks.
//!
//! The [`TaskLifecycle`] orchestrator drives one task end to end: build a
//! validated request, submit it, poll the on-chain record until finality,
//! then fetch, decrypt and decode the result. Every stage can terminate the
//! pipeline early with a typed [`umbra_types::LifecycleError`], and ordered
//! progress notices are emitted through a [`ProgressSink`].
//!
//! The external network is reached exclusively through the caller-owned
//! [`ComputeNetwork`] handle; nothing in this crate holds global state, so
//! any number of lifecycle invocations may run concurrently against the
//! same client.

mod cancel;
mod config;
mod lifecycle;
mod network;
mod poll;
mod progress;
mod result;
mod retry;
mod submit;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use config::{find_in_parent, to_grains, ClientConfig, CONFIG_FILENAME, DEFAULT_GAS_LIMIT};
pub use lifecycle::{TaskCall, TaskLifecycle};
pub use network::ComputeNetwork;
pub use poll::poll_until_terminal;
pub use progress::ProgressSink;
pub use result::{decrypt_result, fetch_encrypted, retrieve_and_decode};
pub use retry::{retry_with_backoff, to_retry, RetryError};
pub use submit::submit;
