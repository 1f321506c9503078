// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::network::ComputeNetwork;
use tracing::info;
use umbra_codec::TaskRequest;
use umbra_types::{LifecycleError, TaskHandle};

/// Submits one task to the network and returns its pending handle.
///
/// Rejections map to `Submission` and are never retried here: a
/// resubmitted task is charged and executed a second time on the ledger,
/// so the decision to try again belongs to the caller.
pub async fn submit<N>(network: &N, request: TaskRequest) -> Result<TaskHandle, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    info!(
        function = %request.signature(),
        contract = %request.contract(),
        gas_limit = request.gas_limit(),
        "submitting compute task"
    );

    let handle = network
        .submit_task(&request)
        .await
        .map_err(|e| LifecycleError::Submission(format!("{e:#}")))?;

    info!(task_id = %handle.id, "task registered with the network");
    Ok(handle)
}
