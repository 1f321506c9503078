// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! End-to-end lifecycle runs against the in-process mock network.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use umbra_client::{
    cancel_pair, fetch_encrypted, submit, CancelToken, ProgressSink, TaskCall, TaskLifecycle,
};
use umbra_codec::{CallArg, DecodedResult, DecodedValue, OutputSchema, ParamKind, TaskRequest};
use umbra_registry::{usable_accounts, DeploymentRecords};
use umbra_test_helpers::{init_tracing, MockNetwork};
use umbra_types::{LifecycleError, LifecycleNotice, LifecycleStage, PollPolicy};

fn sender() -> Address {
    Address::repeat_byte(0x11)
}

fn contract() -> Address {
    Address::repeat_byte(0x22)
}

fn add_location_call(latitude: i32, longitude: i32) -> TaskCall {
    TaskCall::new(
        "add_location(int32,int32)",
        vec![CallArg::Int32(latitude), CallArg::Int32(longitude)],
        sender(),
        contract(),
    )
}

fn addition_call(a: u64, b: u64) -> TaskCall {
    TaskCall::new(
        "addition(uint256,uint256)",
        vec![
            CallArg::Uint256(U256::from(a)),
            CallArg::Uint256(U256::from(b)),
        ],
        sender(),
        contract(),
    )
}

async fn run_lifecycle(
    network: &MockNetwork,
    call: TaskCall,
    schema: &OutputSchema,
) -> (
    Result<DecodedResult, LifecycleError>,
    Vec<LifecycleNotice>,
) {
    run_lifecycle_with_policy(network, call, schema, PollPolicy::default()).await
}

async fn run_lifecycle_with_policy(
    network: &MockNetwork,
    call: TaskCall,
    schema: &OutputSchema,
    policy: PollPolicy,
) -> (
    Result<DecodedResult, LifecycleError>,
    Vec<LifecycleNotice>,
) {
    init_tracing();
    let (sink, mut rx) = ProgressSink::channel();
    let lifecycle = TaskLifecycle::new(network)
        .with_policy(policy)
        .with_progress(sink);
    let outcome = lifecycle.run(call, schema, CancelToken::never()).await;
    drop(lifecycle);

    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    (outcome, notices)
}

fn assert_single_terminal(notices: &[LifecycleNotice]) {
    let terminals = notices.iter().filter(|n| n.is_terminal()).count();
    assert_eq!(terminals, 1, "expected one terminal notice in {notices:?}");
    assert!(
        notices.last().is_some_and(LifecycleNotice::is_terminal),
        "terminal notice must come last in {notices:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_mutating_call_confirms_with_empty_result() {
    let network = MockNetwork::new().with_pending_polls(2);
    let (outcome, notices) = run_lifecycle(
        &network,
        add_location_call(40_000_000, -8_000_000),
        &OutputSchema::empty(),
    )
    .await;

    assert!(outcome.unwrap().is_empty());
    assert_single_terminal(&notices);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::ResultReady { .. })
    ));
    assert_eq!(network.submissions(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_compute_over_accumulated_state() {
    let network = MockNetwork::new();
    let schema = OutputSchema::empty().field(ParamKind::Int32, "northernmostLocation");

    for (latitude, longitude) in [(10_000_000, 0), (20_000_000, 30_000_000)] {
        let (outcome, _) = run_lifecycle(
            &network,
            add_location_call(latitude, longitude),
            &OutputSchema::empty(),
        )
        .await;
        outcome.unwrap();
    }

    let call = TaskCall::new("compute_northernmost()", vec![], sender(), contract());
    let (outcome, notices) = run_lifecycle(&network, call, &schema).await;

    let result = outcome.unwrap();
    assert_eq!(
        result
            .get("northernmostLocation")
            .and_then(DecodedValue::as_i64),
        Some(20_000_000)
    );
    assert_single_terminal(&notices);
}

#[tokio::test(start_paused = true)]
async fn test_addition_task_decodes_sum() {
    let network = MockNetwork::new();
    let schema = OutputSchema::empty().field(ParamKind::Uint256, "sum");

    let (outcome, _) = run_lifecycle(&network, addition_call(76, 17), &schema).await;

    let result = outcome.unwrap();
    assert_eq!(
        result.get("sum").and_then(DecodedValue::as_u256),
        Some(U256::from(93u64))
    );
}

#[tokio::test(start_paused = true)]
async fn test_progress_notices_are_ordered() {
    let network = MockNetwork::new();
    let schema = OutputSchema::empty().field(ParamKind::Uint256, "sum");

    let (outcome, notices) = run_lifecycle(&network, addition_call(1, 2), &schema).await;
    outcome.unwrap();

    assert_eq!(notices.len(), 4);
    assert!(matches!(notices[0], LifecycleNotice::Submitted { .. }));
    assert!(matches!(notices[1], LifecycleNotice::Pending { .. }));
    assert!(matches!(notices[2], LifecycleNotice::Confirmed { .. }));
    assert!(matches!(notices[3], LifecycleNotice::ResultReady { .. }));
    assert_single_terminal(&notices);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_polling() {
    init_tracing();
    let network = Arc::new(MockNetwork::new().with_pending_polls(1_000));
    let (handle, token) = cancel_pair();
    let (sink, mut rx) = ProgressSink::channel();

    let worker = {
        let network = Arc::clone(&network);
        tokio::spawn(async move {
            TaskLifecycle::new(&*network)
                .with_progress(sink)
                .run(
                    add_location_call(1, 2),
                    &OutputSchema::empty(),
                    token,
                )
                .await
        })
    };

    // Let a few poll iterations happen before pulling the plug.
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    handle.cancel();

    let outcome = worker.await.unwrap();
    assert!(matches!(outcome, Err(LifecycleError::Cancelled)));

    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    assert_single_terminal(&notices);
    assert!(matches!(notices.last(), Some(LifecycleNotice::Cancelled)));

    // No further observation after cancellation.
    let queries = network.status_queries();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(network.status_queries(), queries);
}

#[tokio::test(start_paused = true)]
async fn test_poll_timeout_bounds_queries() {
    let network = MockNetwork::new().with_pending_polls(1_000);
    let policy = PollPolicy::default()
        .with_interval(Duration::from_secs(1))
        .with_timeout(Duration::from_millis(2_500));

    let (outcome, notices) = run_lifecycle_with_policy(
        &network,
        add_location_call(1, 2),
        &OutputSchema::empty(),
        policy,
    )
    .await;

    assert!(matches!(outcome, Err(LifecycleError::PollTimeout)));
    assert_eq!(network.status_queries(), 2);
    assert_single_terminal(&notices);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Poll,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_transient_status_faults_are_absorbed() {
    let network = MockNetwork::new();
    network.inject_status_faults(2);

    let (outcome, _) = run_lifecycle(
        &network,
        add_location_call(1, 2),
        &OutputSchema::empty(),
    )
    .await;

    outcome.unwrap();
    // Two faulted attempts plus the one that landed.
    assert_eq!(network.status_queries(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_status_faults_beyond_budget_surface() {
    let network = MockNetwork::new();
    network.inject_status_faults(10);
    let policy = PollPolicy {
        max_query_retries: 1,
        ..PollPolicy::default()
    };

    let (outcome, notices) = run_lifecycle_with_policy(
        &network,
        add_location_call(1, 2),
        &OutputSchema::empty(),
        policy,
    )
    .await;

    assert!(matches!(outcome, Err(LifecycleError::StatusQuery(_))));
    assert_eq!(network.status_queries(), 2);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Poll,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_wrong_decryption_key_is_decryption_error() {
    let network = MockNetwork::new();
    network.use_wrong_decryption_key();
    let schema = OutputSchema::empty().field(ParamKind::Uint256, "sum");

    let (outcome, notices) = run_lifecycle(&network, addition_call(76, 17), &schema).await;

    assert!(matches!(outcome, Err(LifecycleError::Decryption(_))));
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Decrypt,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_schema_mismatch_is_decode_error() {
    let network = MockNetwork::new();
    // The addition task produces a single word; this schema wants two.
    let schema = OutputSchema::empty()
        .field(ParamKind::Uint256, "a")
        .field(ParamKind::Uint256, "b");

    let (outcome, notices) = run_lifecycle(&network, addition_call(1, 2), &schema).await;

    assert!(matches!(outcome, Err(LifecycleError::Decode(_))));
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Decode,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_truncated_output_is_decode_error() {
    let network = MockNetwork::new();
    network.truncate_results();
    let schema = OutputSchema::empty().field(ParamKind::Uint256, "sum");

    let (outcome, notices) = run_lifecycle(&network, addition_call(76, 17), &schema).await;

    assert!(matches!(outcome, Err(LifecycleError::Decode(_))));
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Decode,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_before_confirmation_is_rejected() {
    let network = MockNetwork::new().with_pending_polls(1_000);
    let request = TaskRequest::build(
        "addition(uint256,uint256)",
        vec![
            CallArg::Uint256(U256::from(1u64)),
            CallArg::Uint256(U256::from(2u64)),
        ],
        500_000,
        1,
        sender(),
        contract(),
    )
    .unwrap();

    let handle = submit(&network, request).await.unwrap();
    let err = fetch_encrypted(&network, &handle).await.unwrap_err();
    assert!(matches!(err, LifecycleError::ResultNotAvailable(_)));
}

#[tokio::test(start_paused = true)]
async fn test_failed_task_reports_reason() {
    let network = MockNetwork::new();
    network.fail_next_task();

    let (outcome, notices) = run_lifecycle(
        &network,
        add_location_call(1, 2),
        &OutputSchema::empty(),
    )
    .await;

    assert!(matches!(outcome, Err(LifecycleError::TaskFailed(_))));
    assert!(notices
        .iter()
        .any(|n| matches!(n, LifecycleNotice::Failed { .. })));
    assert_single_terminal(&notices);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Poll,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_terminal_status_is_sticky() {
    let network = MockNetwork::new().with_pending_polls(0);
    let request = TaskRequest::build(
        "add_location(int32,int32)",
        vec![CallArg::Int32(1), CallArg::Int32(2)],
        500_000,
        1,
        sender(),
        contract(),
    )
    .unwrap();
    let handle = submit(&network, request).await.unwrap();

    use umbra_client::ComputeNetwork;
    let first = network.task_status(&handle).await.unwrap();
    let second = network.task_status(&first).await.unwrap();
    let third = network.task_status(&second).await.unwrap();
    assert!(first.status.is_terminal());
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test(start_paused = true)]
async fn test_builder_error_never_touches_network() {
    let network = MockNetwork::new();
    let call = TaskCall::new(
        "add location(int32,int32)",
        vec![CallArg::Int32(1), CallArg::Int32(2)],
        sender(),
        contract(),
    );

    let (outcome, notices) = run_lifecycle(&network, call, &OutputSchema::empty()).await;

    assert!(matches!(outcome, Err(LifecycleError::InvalidSignature(_))));
    assert_eq!(network.submissions(), 0);
    assert_eq!(network.status_queries(), 0);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Build,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_argument_type_mismatch_never_touches_network() {
    let network = MockNetwork::new();
    let call = TaskCall::new(
        "add_location(int32,int32)",
        vec![CallArg::Int32(1), CallArg::Uint256(U256::from(2u64))],
        sender(),
        contract(),
    );

    let (outcome, notices) = run_lifecycle(&network, call, &OutputSchema::empty()).await;

    assert!(matches!(outcome, Err(LifecycleError::InvalidArgument(_))));
    assert_eq!(network.submissions(), 0);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Build,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_submission_is_submission_error() {
    let network = MockNetwork::new();
    network.reject_submissions("out of gas deposit");

    let (outcome, notices) = run_lifecycle(
        &network,
        add_location_call(1, 2),
        &OutputSchema::empty(),
    )
    .await;

    let err = outcome.unwrap_err();
    assert!(matches!(err, LifecycleError::Submission(_)));
    assert!(err.to_string().contains("out of gas deposit"));
    assert_eq!(network.status_queries(), 0);
    assert!(matches!(
        notices.last(),
        Some(LifecycleNotice::Error {
            stage: LifecycleStage::Submit,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_contract_address_from_registry() {
    let dir = tempfile::tempdir().unwrap();
    let records = DeploymentRecords::new(dir.path());
    records.record("simple_addition", contract()).unwrap();

    // The provider's last unlocked account is reserved; sign with the first
    // usable one.
    let unlocked: Vec<Address> = (0u8..10).map(Address::repeat_byte).collect();
    let signers = usable_accounts(&unlocked);
    assert_eq!(signers.len(), 9);

    let network = MockNetwork::new();
    let schema = OutputSchema::empty().field(ParamKind::Uint256, "sum");
    let call = TaskCall::new(
        "addition(uint256,uint256)",
        vec![
            CallArg::Uint256(U256::from(76u64)),
            CallArg::Uint256(U256::from(17u64)),
        ],
        signers[0],
        records.address_of("simple_addition").unwrap(),
    );

    let (outcome, _) = run_lifecycle(&network, call, &schema).await;
    assert_eq!(
        outcome.unwrap().get("sum").and_then(DecodedValue::as_u256),
        Some(U256::from(93u64))
    );
}
