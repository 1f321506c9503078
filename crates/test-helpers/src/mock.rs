// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::collections::HashMap;
use std::sync::Mutex;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Bytes, I256, U256};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use umbra_client::ComputeNetwork;
use umbra_codec::TaskRequest;
use umbra_types::{TaskHandle, TaskId, TaskStatus, ETH_STATUS_PENDING, ETH_STATUS_VERIFIED};

const AES_NONCE_LEN: usize = 12;
const ETH_STATUS_REVERTED: u8 = 3;

/// Passphrase behind the simulated task key pair.
const KEY_PASSPHRASE: &str = "cupcake";

fn derive_key(passphrase: &str) -> [u8; 32] {
    Sha256::digest(passphrase.as_bytes()).into()
}

struct MockTask {
    /// Status queries remaining before the record turns terminal.
    polls_left: u32,
    eth_status: Option<u8>,
    result: Vec<u8>,
    fail: bool,
}

struct MockState {
    next_task: u64,
    tasks: HashMap<TaskId, MockTask>,
    /// Contract state for the location scenario.
    locations: Vec<(i32, i32)>,
    reject_submissions: Option<String>,
    status_faults: u32,
    pending_polls: u32,
    fail_next_task: bool,
    wrong_key: bool,
    truncate_results: bool,
    status_queries: u64,
    submissions: u64,
}

/// In-process stand-in for the compute network.
///
/// Executes a handful of known secret-contract functions eagerly at
/// submission, then replays the on-chain confirmation dance through
/// `task_status`: each task stays pending for a configurable number of
/// queries before its record turns terminal and stays there. Results are
/// served AES-256-GCM encrypted, nonce prepended, under a key derived from
/// the simulated key pair passphrase.
pub struct MockNetwork {
    state: Mutex<MockState>,
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                next_task: 0,
                tasks: HashMap::new(),
                locations: Vec::new(),
                reject_submissions: None,
                status_faults: 0,
                pending_polls: 1,
                fail_next_task: false,
                wrong_key: false,
                truncate_results: false,
                status_queries: 0,
                submissions: 0,
            }),
        }
    }

    /// Number of status queries each task answers `pending` before
    /// confirming.
    pub fn with_pending_polls(self, polls: u32) -> Self {
        self.lock().pending_polls = polls;
        self
    }

    /// Rejects every subsequent submission with the given message.
    pub fn reject_submissions(&self, message: impl Into<String>) {
        self.lock().reject_submissions = Some(message.into());
    }

    /// Fails the next `count` status queries with a transient error.
    pub fn inject_status_faults(&self, count: u32) {
        self.lock().status_faults = count;
    }

    /// The next submitted task ends up reverted instead of confirmed.
    pub fn fail_next_task(&self) {
        self.lock().fail_next_task = true;
    }

    /// Decrypts with a key that does not match the one results were
    /// encrypted under.
    pub fn use_wrong_decryption_key(&self) {
        self.lock().wrong_key = true;
    }

    /// Serves result payloads with the second half of the plaintext cut
    /// off, so they decrypt fine but no longer decode.
    pub fn truncate_results(&self) {
        self.lock().truncate_results = true;
    }

    pub fn status_queries(&self) -> u64 {
        self.lock().status_queries
    }

    pub fn submissions(&self) -> u64 {
        self.lock().submissions
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn execute(state: &mut MockState, request: &TaskRequest) -> Result<Vec<u8>> {
        match request.signature().name() {
            "add_location" => {
                let decoded = DynSolType::Tuple(vec![DynSolType::Int(32), DynSolType::Int(32)])
                    .abi_decode(request.encoded_args())?;
                let DynSolValue::Tuple(values) = decoded else {
                    bail!("argument payload is not a tuple");
                };
                let latitude = as_i32(&values[0])?;
                let longitude = as_i32(&values[1])?;
                state.locations.push((latitude, longitude));
                Ok(Vec::new())
            }
            "compute_northernmost" => {
                let northernmost = state
                    .locations
                    .iter()
                    .map(|(latitude, _)| *latitude)
                    .max()
                    .unwrap_or(0);
                Ok(DynSolValue::Tuple(vec![DynSolValue::Int(
                    I256::try_from(northernmost)?,
                    32,
                )])
                .abi_encode())
            }
            "addition" => {
                let decoded = DynSolType::Tuple(vec![DynSolType::Uint(256), DynSolType::Uint(256)])
                    .abi_decode(request.encoded_args())?;
                let DynSolValue::Tuple(values) = decoded else {
                    bail!("argument payload is not a tuple");
                };
                let sum = as_u256(&values[0])?.wrapping_add(as_u256(&values[1])?);
                Ok(DynSolValue::Tuple(vec![DynSolValue::Uint(sum, 256)]).abi_encode())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn encrypt(plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&derive_key(KEY_PASSPHRASE))?;
        let mut nonce_bytes = [0u8; AES_NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
            .map_err(|e| anyhow!("could not encrypt result: {e}"))?;
        let mut payload = nonce_bytes.to_vec();
        payload.extend(ciphertext);
        Ok(payload)
    }
}

fn as_i32(value: &DynSolValue) -> Result<i32> {
    let (int, _) = value
        .as_int()
        .ok_or_else(|| anyhow!("expected a signed integer"))?;
    let wide = i64::try_from(int).map_err(|_| anyhow!("integer does not fit 64 bits"))?;
    i32::try_from(wide).map_err(|_| anyhow!("integer does not fit 32 bits"))
}

fn as_u256(value: &DynSolValue) -> Result<U256> {
    let (uint, _) = value
        .as_uint()
        .ok_or_else(|| anyhow!("expected an unsigned integer"))?;
    Ok(uint)
}

#[async_trait]
impl ComputeNetwork for MockNetwork {
    async fn submit_task(&self, request: &TaskRequest) -> Result<TaskHandle> {
        let mut state = self.lock();
        if let Some(message) = &state.reject_submissions {
            bail!("{message}");
        }

        let result = Self::execute(&mut state, request)?;

        state.next_task += 1;
        let digest = Sha256::digest(state.next_task.to_be_bytes());
        let id = TaskId::new(format!("0x{}", hex::encode(digest)));

        let fail = std::mem::take(&mut state.fail_next_task);
        let polls_left = state.pending_polls;
        state.tasks.insert(
            id.clone(),
            MockTask {
                polls_left,
                eth_status: Some(ETH_STATUS_PENDING),
                result,
                fail,
            },
        );
        state.submissions += 1;

        Ok(TaskHandle::pending(id, request.contract()))
    }

    async fn task_status(&self, handle: &TaskHandle) -> Result<TaskHandle> {
        let mut state = self.lock();
        state.status_queries += 1;

        if state.status_faults > 0 {
            state.status_faults -= 1;
            bail!("transient status query failure");
        }

        let Some(task) = state.tasks.get_mut(&handle.id) else {
            return Ok(handle.clone().with_status(TaskStatus::from_eth_status(None)));
        };

        // Terminal records are sticky.
        let code = task.eth_status;
        if TaskStatus::from_eth_status(code).is_terminal() {
            return Ok(handle.clone().with_status(TaskStatus::from_eth_status(code)));
        }

        if task.polls_left > 0 {
            task.polls_left -= 1;
        }
        if task.polls_left == 0 {
            task.eth_status = Some(if task.fail {
                ETH_STATUS_REVERTED
            } else {
                ETH_STATUS_VERIFIED
            });
        }

        Ok(handle
            .clone()
            .with_status(TaskStatus::from_eth_status(task.eth_status)))
    }

    async fn fetch_result(&self, handle: &TaskHandle) -> Result<Bytes> {
        let state = self.lock();
        let task = state
            .tasks
            .get(&handle.id)
            .ok_or_else(|| anyhow!("no record for task {}", handle.id))?;
        if task.eth_status != Some(ETH_STATUS_VERIFIED) {
            bail!("task {} has no committed result", handle.id);
        }
        let plaintext = if state.truncate_results {
            &task.result[..task.result.len() / 2]
        } else {
            &task.result[..]
        };
        Ok(Bytes::from(Self::encrypt(plaintext)?))
    }

    async fn decrypt(&self, payload: Bytes) -> Result<Bytes> {
        let passphrase = if self.lock().wrong_key {
            "muffin"
        } else {
            KEY_PASSPHRASE
        };
        if payload.len() < AES_NONCE_LEN {
            bail!("payload shorter than the nonce header");
        }
        let (nonce, ciphertext) = payload.split_at(AES_NONCE_LEN);
        let cipher = Aes256Gcm::new_from_slice(&derive_key(passphrase))?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| anyhow!("authentication failed: {e}"))?;
        Ok(Bytes::from(plaintext))
    }
}
