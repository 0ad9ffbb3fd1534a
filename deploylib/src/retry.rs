// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Calldata, TxHash};
use crate::transaction_config::{MaxFeePerGas, TransactionConfig};
use crate::TX_TIMEOUT;
use alloy::network::TransactionBuilder;
use alloy::providers::{PendingTransactionBuilder, PendingTransactionError, Provider};
use alloy::transports::{RpcError, TransportErrorKind};
use std::time::Duration;

pub(crate) const MAX_RETRIES: u8 = 3;
const DEFAULT_RETRY_INTERVAL_MS: u64 = 4000;
const BROADCAST_TRANSACTION_TIMEOUT_MS: u64 = 5000;
const WATCH_TIMEOUT_MS: u64 = 1000;

#[derive(thiserror::Error, Debug)]
pub enum TransactionError {
    #[error(transparent)]
    RpcError(#[from] RpcError<TransportErrorKind>),
    #[error(transparent)]
    PendingTransactionError(#[from] PendingTransactionError),
    #[error("Timeout: {0:?}")]
    Timeout(#[from] tokio::time::error::Elapsed),
}

/// Execute an async closure that returns a result. Retry on failure.
pub(crate) async fn retry<F, Fut, T, E>(
    mut action: F,
    operation_id: &str,
    retry_interval_ms: Option<u64>,
) -> Result<T, E>
where
    F: FnMut() -> Fut + Send,
    Fut: std::future::Future<Output = Result<T, E>> + Send,
    E: std::fmt::Debug,
{
    let mut retries = 0;

    loop {
        match action().await {
            Ok(result) => return Ok(result),
            Err(err) => {
                if retries == MAX_RETRIES {
                    error!("{operation_id} failed after {retries} retries: {err:?}");
                    return Err(err);
                }

                retries += 1;
                let retry_interval_ms = retry_interval_ms.unwrap_or(DEFAULT_RETRY_INTERVAL_MS);
                let delay = Duration::from_millis(retry_interval_ms * retries.pow(2) as u64);

                warn!(
                    "Error trying {operation_id}: {err:?}. Retry #{retries} in {:?} second(s).",
                    delay.as_secs()
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Send a transaction from `from` to `to` and wait for it to be confirmed.
///
/// Broadcast failures are retried, and a stuck transaction is replaced by resending with
/// the same nonce.
pub(crate) async fn send_transaction_with_retries<P: Provider>(
    provider: &P,
    calldata: Calldata,
    to: Address,
    from: Address,
    tx_identifier: &str,
    transaction_config: &TransactionConfig,
) -> Result<TxHash, TransactionError> {
    let mut nonce: Option<u64> = None;
    let mut retries = 0;

    loop {
        let max_fee_per_gas =
            resolve_max_fee_per_gas(provider, &transaction_config.max_fee_per_gas).await?;

        let mut transaction_request = provider
            .transaction_request()
            .with_from(from)
            .with_to(to)
            .with_input(calldata.clone());

        if let Some(max_fee_per_gas) = max_fee_per_gas {
            transaction_request.set_max_fee_per_gas(max_fee_per_gas);
        }

        // Retry with the same nonce to replace a stuck transaction
        if let Some(nonce) = nonce {
            transaction_request.set_nonce(nonce);
        } else {
            nonce = transaction_request.nonce;
        }

        let pending_tx_builder_result = tokio::time::timeout(
            Duration::from_millis(BROADCAST_TRANSACTION_TIMEOUT_MS),
            provider.send_transaction(transaction_request.clone()),
        )
        .await;

        let pending_tx_builder = match pending_tx_builder_result {
            Ok(Ok(pending_tx_builder)) => pending_tx_builder,
            Ok(Err(err)) => {
                if retries == MAX_RETRIES {
                    error!("Failed to send {tx_identifier} transaction after {retries} retries. Giving up. Error: {err:?}");
                    break Err(TransactionError::from(err));
                }

                retries += 1;
                let delay = Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS * retries.pow(2) as u64);

                warn!(
                    "Error sending {tx_identifier} transaction: {err:?}. Retry #{} in {} second(s).",
                    retries,
                    delay.as_secs(),
                );

                tokio::time::sleep(delay).await;

                continue;
            }
            Err(err) => {
                if retries == MAX_RETRIES {
                    error!("Failed to send {tx_identifier} transaction after {retries} retries. Giving up. Error: {err:?}");
                    break Err(TransactionError::from(err));
                }

                retries += 1;
                let delay = Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS * retries.pow(2) as u64);

                warn!(
                    "Error sending {tx_identifier} transaction: {err:?}. Retry #{} in {} second(s).",
                    retries,
                    delay.as_secs(),
                );

                tokio::time::sleep(delay).await;

                continue;
            }
        };

        debug!(
            "{tx_identifier} transaction is pending with tx_hash: {:?}",
            pending_tx_builder.tx_hash()
        );

        let watch_result = retry(
            || async {
                PendingTransactionBuilder::from_config(
                    provider.root().clone(),
                    pending_tx_builder.inner().clone(),
                )
                .with_timeout(Some(TX_TIMEOUT))
                .watch()
                .await
            },
            "watching pending transaction",
            Some(WATCH_TIMEOUT_MS),
        )
        .await;

        match watch_result {
            Ok(tx_hash) => {
                debug!("{tx_identifier} transaction with hash {tx_hash:?} is successful");
                break Ok(tx_hash);
            }
            Err(err) => {
                if retries == MAX_RETRIES {
                    error!("Failed to confirm {tx_identifier} transaction after {retries} retries. Giving up. Error: {err:?}");
                    break Err(TransactionError::from(err));
                }

                retries += 1;
                let delay = Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS * retries.pow(2) as u64);

                warn!(
                    "Error confirming {tx_identifier} transaction: {err:?}. Retry #{} in {} second(s).",
                    retries,
                    delay.as_secs(),
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Resolve the configured fee policy to a concrete cap, if any.
async fn resolve_max_fee_per_gas<P: Provider>(
    provider: &P,
    max_fee_per_gas: &MaxFeePerGas,
) -> Result<Option<u128>, TransactionError> {
    match max_fee_per_gas {
        MaxFeePerGas::Auto | MaxFeePerGas::Unlimited => Ok(None),
        MaxFeePerGas::Custom(fee) => Ok(Some(*fee)),
        MaxFeePerGas::LimitedAuto(limit) => {
            let estimate = provider.estimate_eip1559_fees().await?;
            Ok(Some(estimate.max_fee_per_gas.min(*limit)))
        }
    }
}
