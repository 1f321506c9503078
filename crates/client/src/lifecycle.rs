// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::cancel::CancelToken;
use crate::config::{to_grains, DEFAULT_GAS_LIMIT};
use crate::network::ComputeNetwork;
use crate::poll::poll_until_terminal;
use crate::progress::ProgressSink;
use crate::result::retrieve_and_decode;
use crate::submit::submit;
use alloy_primitives::Address;
use umbra_codec::{CallArg, DecodedResult, OutputSchema, TaskRequest};
use umbra_types::{LifecycleError, LifecycleNotice, PollPolicy, TaskOutcome};

/// Descriptor inputs for one task invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCall {
    pub signature: String,
    pub args: Vec<CallArg>,
    pub gas_limit: u64,
    pub gas_price: u64,
    pub sender: Address,
    pub contract: Address,
}

impl TaskCall {
    /// A call with the stock gas budget (500k units at one grain each).
    pub fn new(
        signature: impl Into<String>,
        args: Vec<CallArg>,
        sender: Address,
        contract: Address,
    ) -> Self {
        Self {
            signature: signature.into(),
            args,
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price: to_grains(1),
            sender,
            contract,
        }
    }

    pub fn with_gas(mut self, gas_limit: u64, gas_price: u64) -> Self {
        self.gas_limit = gas_limit;
        self.gas_price = gas_price;
        self
    }
}

/// Drives one task from descriptor to decoded result.
///
/// Stages: build, submit, poll, then fetch/decrypt/decode when an output
/// schema was declared. Progress notices are emitted in order and every
/// invocation ends with exactly one terminal notice, including on
/// cancellation. Each `run` owns its handle; the orchestrator itself holds
/// no per-task state and may be reused across invocations.
pub struct TaskLifecycle<'a, N: ComputeNetwork + ?Sized> {
    network: &'a N,
    policy: PollPolicy,
    progress: ProgressSink,
}

impl<'a, N: ComputeNetwork + ?Sized> TaskLifecycle<'a, N> {
    pub fn new(network: &'a N) -> Self {
        Self {
            network,
            policy: PollPolicy::default(),
            progress: ProgressSink::disabled(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(
        &self,
        call: TaskCall,
        schema: &OutputSchema,
        cancel: CancelToken,
    ) -> Result<DecodedResult, LifecycleError> {
        let outcome = self.drive(call, schema, cancel).await;
        match &outcome {
            Ok(_) => {}
            Err(LifecycleError::Cancelled) => self.progress.emit(LifecycleNotice::Cancelled),
            Err(e) => self.progress.emit(LifecycleNotice::Error {
                stage: e.stage(),
                detail: e.to_string(),
            }),
        }
        outcome
    }

    async fn drive(
        &self,
        call: TaskCall,
        schema: &OutputSchema,
        cancel: CancelToken,
    ) -> Result<DecodedResult, LifecycleError> {
        let request = TaskRequest::build(
            &call.signature,
            call.args,
            call.gas_limit,
            call.gas_price,
            call.sender,
            call.contract,
        )?;

        let handle = submit(self.network, request).await?;
        let id = handle.id.clone();
        self.progress
            .emit(LifecycleNotice::Submitted { id: id.clone() });
        self.progress.emit(LifecycleNotice::Pending { id: id.clone() });

        match poll_until_terminal(self.network, handle, &self.policy, cancel).await? {
            TaskOutcome::Failed { reason } => {
                self.progress.emit(LifecycleNotice::Failed {
                    id,
                    reason: reason.clone(),
                });
                Err(LifecycleError::TaskFailed(reason))
            }
            TaskOutcome::Success { handle } => {
                self.progress
                    .emit(LifecycleNotice::Confirmed { id: id.clone() });
                let decoded = if schema.is_empty() {
                    DecodedResult::empty()
                } else {
                    retrieve_and_decode(self.network, &handle, schema).await?
                };
                self.progress.emit(LifecycleNotice::ResultReady { id });
                Ok(decoded)
            }
        }
    }
}
