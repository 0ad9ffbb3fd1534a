// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::accounts::NamedAccounts;
use crate::registry::{self, DeploymentRecord, DeploymentStore};
use alloy::dyn_abi::DynSolValue;
use alloy::providers::Provider;
use async_trait::async_trait;
use deploylib::common::Address;
use deploylib::contract::deployed::{DeployedContract, Error as ContractError, ExecutionReceipt};
use deploylib::transaction_config::TransactionConfig;

#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Registry(#[from] registry::Error),
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// The capabilities a deploy task runs against: named-account resolution, deployment
/// record lookup, and transaction execution on a previously deployed contract.
#[async_trait]
pub trait DeployEnv: Send + Sync {
    fn resolve_account(&self, role: &str) -> Option<Address>;

    fn get_deployment(&self, name: &str) -> Result<DeploymentRecord, registry::Error>;

    /// Call a state-changing method on the named deployed contract with `from` as the
    /// transaction sender, wait for the transaction to be confirmed, and return the
    /// receipt with the contract's decoded events.
    async fn execute(
        &self,
        contract: &str,
        from: Address,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<ExecutionReceipt, ExecuteError>;
}

/// The real environment: accounts and records on disk, transactions on chain.
pub struct ChainEnv<P: Provider> {
    accounts: NamedAccounts,
    store: DeploymentStore,
    provider: P,
    transaction_config: TransactionConfig,
}

impl<P: Provider> ChainEnv<P> {
    pub fn new(
        accounts: NamedAccounts,
        store: DeploymentStore,
        provider: P,
        transaction_config: TransactionConfig,
    ) -> Self {
        Self {
            accounts,
            store,
            provider,
            transaction_config,
        }
    }
}

#[async_trait]
impl<P: Provider + Clone> DeployEnv for ChainEnv<P> {
    fn resolve_account(&self, role: &str) -> Option<Address> {
        self.accounts.resolve(role)
    }

    fn get_deployment(&self, name: &str) -> Result<DeploymentRecord, registry::Error> {
        self.store.load(name)
    }

    async fn execute(
        &self,
        contract: &str,
        from: Address,
        method: &str,
        args: Vec<DynSolValue>,
    ) -> Result<ExecutionReceipt, ExecuteError> {
        let record = self.store.load(contract)?;
        let handler = DeployedContract::new(record.address, record.abi, self.provider.clone());
        let receipt = handler
            .execute(from, method, &args, &self.transaction_config)
            .await?;
        Ok(receipt)
    }
}
