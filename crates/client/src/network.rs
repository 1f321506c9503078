// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy_primitives::Bytes;
use anyhow::Result;
use async_trait::async_trait;
use umbra_codec::TaskRequest;
use umbra_types::TaskHandle;

/// Fixed interface to the external compute network.
///
/// Implementations are caller-owned and threaded through every lifecycle
/// call; there is no process-wide client instance. All methods are
/// idempotent except `submit_task`, which registers a task on the ledger
/// and must therefore be called at most once per request.
#[async_trait]
pub trait ComputeNetwork: Send + Sync {
    /// Registers one computation task. Irreversible from the client's
    /// perspective: a second submission is a second task.
    async fn submit_task(&self, request: &TaskRequest) -> Result<TaskHandle>;

    /// Returns a fresh status snapshot of the task record.
    async fn task_status(&self, handle: &TaskHandle) -> Result<TaskHandle>;

    /// Fetches the encrypted, ABI-encoded output of a confirmed task.
    async fn fetch_result(&self, handle: &TaskHandle) -> Result<Bytes>;

    /// Decrypts an output payload with the task key pair held by the
    /// network client.
    async fn decrypt(&self, payload: Bytes) -> Result<Bytes>;
}
