// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::cancel::CancelToken;
use crate::network::ComputeNetwork;
use crate::retry::{retry_with_backoff, to_retry};
use futures::future;
use tokio::time::{self, Instant};
use tracing::{info, warn};
use umbra_types::{LifecycleError, PollPolicy, TaskHandle, TaskOutcome, TaskStatus};

/// Polls the task record until it reaches a terminal state.
///
/// Status queries for one handle are issued strictly sequentially; each
/// iteration sleeps `policy.interval`, checks the cancel token and the
/// deadline, then queries once. After a timeout or cancellation no further
/// queries are issued. The returned sequence of snapshots never regresses
/// out of a terminal state.
pub async fn poll_until_terminal<N>(
    network: &N,
    handle: TaskHandle,
    policy: &PollPolicy,
    mut cancel: CancelToken,
) -> Result<TaskOutcome, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    let deadline = policy.timeout.map(|timeout| Instant::now() + timeout);
    let mut current = handle;

    loop {
        if let Some(outcome) = terminal_outcome(&current) {
            return Ok(outcome);
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                info!(task_id = %current.id, "polling cancelled; on-chain task left untouched");
                return Err(LifecycleError::Cancelled);
            }
            _ = wait_for_deadline(deadline) => {
                warn!(task_id = %current.id, "gave up waiting for task finality");
                return Err(LifecycleError::PollTimeout);
            }
            _ = time::sleep(policy.interval) => {}
        }

        current = query_status(network, &current, policy).await?;
    }
}

fn terminal_outcome(handle: &TaskHandle) -> Option<TaskOutcome> {
    match handle.status {
        TaskStatus::Confirmed => {
            info!(task_id = %handle.id, "task confirmed on-chain");
            Some(TaskOutcome::Success {
                handle: handle.clone(),
            })
        }
        TaskStatus::Failed => Some(TaskOutcome::Failed {
            reason: format!("task {} failed or was reverted on-chain", handle.id),
        }),
        TaskStatus::Pending | TaskStatus::Unknown => None,
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

/// One status query. Unlike submission these are idempotent, so transient
/// failures are retried with the interval as initial backoff before the
/// error is surfaced.
async fn query_status<N>(
    network: &N,
    handle: &TaskHandle,
    policy: &PollPolicy,
) -> Result<TaskHandle, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    let backoff_ms = (policy.interval.as_millis() as u64).max(1);
    retry_with_backoff(
        || async { network.task_status(handle).await.map_err(to_retry) },
        policy.max_query_retries + 1,
        backoff_ms,
    )
    .await
    .map_err(|e| LifecycleError::StatusQuery(format!("{e:#}")))
}
