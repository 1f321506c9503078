// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::network::ComputeNetwork;
use alloy_primitives::Bytes;
use tracing::info;
use umbra_codec::{decode_output, DecodedResult, OutputSchema};
use umbra_types::{LifecycleError, TaskHandle, TaskStatus};

/// Fetches the encrypted output of a confirmed task.
pub async fn fetch_encrypted<N>(
    network: &N,
    handle: &TaskHandle,
) -> Result<Bytes, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    if handle.status != TaskStatus::Confirmed {
        return Err(LifecycleError::ResultNotAvailable(format!(
            "task {} is {}; results exist only after confirmation",
            handle.id, handle.status
        )));
    }
    network
        .fetch_result(handle)
        .await
        .map_err(|e| LifecycleError::ResultNotAvailable(format!("{e:#}")))
}

/// Decrypts an encrypted output payload through the network client's task
/// key pair.
pub async fn decrypt_result<N>(network: &N, payload: Bytes) -> Result<Bytes, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    network
        .decrypt(payload)
        .await
        .map_err(|e| LifecycleError::Decryption(format!("{e:#}")))
}

/// The full result pipeline: fetch, decrypt, decode. Each stage fails
/// independently with its own error variant.
pub async fn retrieve_and_decode<N>(
    network: &N,
    handle: &TaskHandle,
    schema: &OutputSchema,
) -> Result<DecodedResult, LifecycleError>
where
    N: ComputeNetwork + ?Sized,
{
    let encrypted = fetch_encrypted(network, handle).await?;
    let plaintext = decrypt_result(network, encrypted).await?;
    let decoded = decode_output(&plaintext, schema)?;
    info!(task_id = %handle.id, fields = decoded.len(), "task result decoded");
    Ok(decoded)
}
