// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, TxHash};
use alloy::dyn_abi::{DecodedEvent, DynSolValue, EventExt};
use alloy::json_abi::{Event, JsonAbi};
use alloy::primitives::LogData;
use alloy::rpc::types::Log;

/// An event emitted by the contract during one transaction, with its arguments in
/// declaration order (indexed and non-indexed interleaved as declared in the ABI).
#[derive(Clone, Debug, PartialEq)]
pub struct ContractEvent {
    pub name: String,
    pub args: Vec<DynSolValue>,
}

/// The result of executing a state-changing contract method: the confirmed transaction
/// hash and the decoded events the contract emitted, in receipt order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionReceipt {
    pub tx_hash: TxHash,
    pub events: Vec<ContractEvent>,
}

impl ExecutionReceipt {
    /// The first event with the given name, in receipt order. `None` if the
    /// transaction emitted no such event.
    pub fn first_event(&self, name: &str) -> Option<&ContractEvent> {
        self.events.iter().find(|event| event.name == name)
    }
}

/// Decode the logs the contract at `contract_address` emitted. Logs from other
/// contracts and logs that do not match any ABI event are skipped.
pub(crate) fn decode_contract_events(
    abi: &JsonAbi,
    contract_address: Address,
    logs: &[Log],
) -> Vec<ContractEvent> {
    logs.iter()
        .filter(|log| log.inner.address == contract_address)
        .filter_map(|log| decode_log(abi, &log.inner.data))
        .collect()
}

fn decode_log(abi: &JsonAbi, log: &LogData) -> Option<ContractEvent> {
    let topic0 = *log.topics().first()?;
    let event = abi
        .events()
        .find(|event| !event.anonymous && event.selector() == topic0)?;

    match event.decode_log(log) {
        Ok(decoded) => Some(ContractEvent {
            name: event.name.clone(),
            args: ordered_event_args(event, decoded),
        }),
        Err(err) => {
            debug!("Skipping log that does not decode as {}: {err}", event.name);
            None
        }
    }
}

/// Reassemble the positional argument list from the separately decoded indexed
/// and body values.
fn ordered_event_args(event: &Event, decoded: DecodedEvent) -> Vec<DynSolValue> {
    let mut indexed = decoded.indexed.into_iter();
    let mut body = decoded.body.into_iter();

    event
        .inputs
        .iter()
        .filter_map(|input| {
            if input.indexed {
                indexed.next()
            } else {
                body.next()
            }
        })
        .collect()
}
