// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::env::{DeployEnv, ExecuteError};
use crate::registry::{self, DeploymentRecord};
use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::JsonAbi;
use alloy::primitives::address;
use async_trait::async_trait;
use deploylib::common::{Address, TxHash};
use deploylib::contract::deployed::{ContractEvent, ExecutionReceipt};
use std::collections::HashMap;
use std::sync::Mutex;

/// A call observed by the mock environment, in invocation order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ResolveAccount(String),
    GetDeployment(String),
    Execute {
        contract: String,
        from: Address,
        method: String,
        args: Vec<DynSolValue>,
    },
}

/// Recording in-memory implementation of the deploy environment.
#[derive(Default)]
pub struct MockEnv {
    accounts: HashMap<String, Address>,
    deployments: HashMap<String, DeploymentRecord>,
    receipt_events: Vec<ContractEvent>,
    calls: Mutex<Vec<Call>>,
}

impl MockEnv {
    pub fn add_account(&mut self, role: &str, address: Address) {
        self.accounts.insert(role.to_string(), address);
    }

    pub fn add_deployment(&mut self, name: &str, record: DeploymentRecord) {
        self.deployments.insert(name.to_string(), record);
    }

    /// Events the next `execute` receipt will carry, in receipt order.
    pub fn set_receipt_events(&mut self, events: Vec<ContractEvent>) {
        self.receipt_events = events;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    pub fn factory_record() -> DeploymentRecord {
        DeploymentRecord {
            address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            abi: JsonAbi::default(),
            transaction_hash: None,
            block_number: None,
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

#[async_trait]
impl DeployEnv for MockEnv {
    fn resolve_account(&self, role: &str) -> Option<Address> {
        self.record(Call::ResolveAccount(role.to_string()));
        self.accounts.get(role).copied()
    }

    fn get_deployment(&self, name: &str) -> Result<DeploymentRecord, registry::Error> {
        self.record(Call::GetDeployment(name.to_string()));
        self.deployments
            .get(name)
            .cloned()
            .ok_or_else(|| registry::Error::DeploymentNotFound(name.to_string()))
    }

    async fn execute(
        &self,
        contract: &str,
        from: Address,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<ExecutionReceipt, ExecuteError> {
        self.record(Call::Execute {
            contract: contract.to_string(),
            from,
            method: method.to_string(),
            args,
        });
        Ok(ExecutionReceipt {
            tx_hash: TxHash::ZERO,
            events: self.receipt_events.clone(),
        })
    }
}
