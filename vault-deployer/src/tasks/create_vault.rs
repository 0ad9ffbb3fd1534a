// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::accounts::DEPLOYER;
use crate::env::DeployEnv;
use crate::task::{DeployTask, TaskError};
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::address;
use async_trait::async_trait;
use deploylib::common::Address;
use tracing::{debug, info};

const YIELD_VAULT_FACTORY: &str = "YieldVaultFactory";
const CREATE_VAULT_METHOD: &str = "createVault";
const VAULT_CREATED_EVENT: &str = "UpgradableVaultCreated";

const VAULT_NAME: &str = "Test Yield Vault";
const VAULT_SYMBOL: &str = "TYV";
/// Underlying asset the new vault wraps.
const VAULT_ASSET: Address = address!("AA40c0c7644e0b2B224509571e10ad20d9C4ef28");

/// Creates a test yield vault through the already-deployed factory and reports the
/// address the factory announced for it.
pub struct VaultCreationTask;

impl VaultCreationTask {
    /// Returns the new vault's address, or `None` if the factory did not announce one.
    pub async fn create_vault(&self, env: &dyn DeployEnv) -> Result<Option<Address>, TaskError> {
        let deployer = env
            .resolve_account(DEPLOYER)
            .ok_or(TaskError::NamedAccountNotSet(DEPLOYER))?;

        let factory = env.get_deployment(YIELD_VAULT_FACTORY)?;
        info!("Using YieldVaultFactory at: {}", factory.address);

        let receipt = env
            .execute(
                YIELD_VAULT_FACTORY,
                deployer,
                CREATE_VAULT_METHOD,
                vec![
                    DynSolValue::String(VAULT_NAME.to_string()),
                    DynSolValue::String(VAULT_SYMBOL.to_string()),
                    DynSolValue::Address(VAULT_ASSET),
                    DynSolValue::Address(deployer),
                ],
            )
            .await?;

        match receipt
            .first_event(VAULT_CREATED_EVENT)
            .and_then(|event| event.args.first())
        {
            Some(DynSolValue::Address(vault)) => {
                println!("Vault is deployed at: {vault}");
                Ok(Some(*vault))
            }
            _ => {
                // A missing event is not treated as a failure.
                debug!(
                    "No {VAULT_CREATED_EVENT} event in transaction {}",
                    receipt.tx_hash
                );
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl DeployTask for VaultCreationTask {
    fn tag(&self) -> &'static str {
        "CreateVault"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &[YIELD_VAULT_FACTORY]
    }

    async fn run(&self, env: &dyn DeployEnv) -> Result<(), TaskError> {
        self.create_vault(env).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, MockEnv};
    use deploylib::contract::deployed::ContractEvent;

    fn env_with_factory(deployer: Address) -> MockEnv {
        let mut env = MockEnv::default();
        env.add_account(DEPLOYER, deployer);
        env.add_deployment(YIELD_VAULT_FACTORY, MockEnv::factory_record());
        env
    }

    fn vault_created(vault: Address) -> ContractEvent {
        ContractEvent {
            name: VAULT_CREATED_EVENT.to_string(),
            args: vec![DynSolValue::Address(vault)],
        }
    }

    #[tokio::test]
    async fn test_missing_deployer_fails_before_any_lookup_or_submission() {
        let env = MockEnv::default();

        let result = VaultCreationTask.create_vault(&env).await;

        assert!(matches!(
            result,
            Err(TaskError::NamedAccountNotSet("deployer"))
        ));
        assert_eq!(
            env.calls(),
            vec![Call::ResolveAccount(DEPLOYER.to_string())]
        );
    }

    #[tokio::test]
    async fn test_submits_exactly_one_transaction_with_the_literal_arguments() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let vault = address!("1000000000000000000000000000000000000001");
        let mut env = env_with_factory(deployer);
        env.set_receipt_events(vec![vault_created(vault)]);

        VaultCreationTask
            .create_vault(&env)
            .await
            .expect("task should succeed");

        // The deployment lookup (and its log line) must precede the submission.
        assert_eq!(
            env.calls(),
            vec![
                Call::ResolveAccount(DEPLOYER.to_string()),
                Call::GetDeployment(YIELD_VAULT_FACTORY.to_string()),
                Call::Execute {
                    contract: YIELD_VAULT_FACTORY.to_string(),
                    from: deployer,
                    method: CREATE_VAULT_METHOD.to_string(),
                    args: vec![
                        DynSolValue::String("Test Yield Vault".to_string()),
                        DynSolValue::String("TYV".to_string()),
                        DynSolValue::Address(VAULT_ASSET),
                        DynSolValue::Address(deployer),
                    ],
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_reports_the_address_announced_by_the_factory() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let vault = address!("1000000000000000000000000000000000000001");
        let mut env = env_with_factory(deployer);
        env.set_receipt_events(vec![vault_created(vault)]);

        let result = VaultCreationTask
            .create_vault(&env)
            .await
            .expect("task should succeed");

        assert_eq!(result, Some(vault));
    }

    #[tokio::test]
    async fn test_completes_silently_when_the_event_is_absent() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let mut env = env_with_factory(deployer);
        env.set_receipt_events(vec![ContractEvent {
            name: "OwnershipTransferred".to_string(),
            args: vec![],
        }]);

        let result = VaultCreationTask
            .create_vault(&env)
            .await
            .expect("task should succeed");

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_first_matching_event_wins() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let first = address!("000000000000000000000000000000000000000a");
        let second = address!("000000000000000000000000000000000000000b");
        let mut env = env_with_factory(deployer);
        env.set_receipt_events(vec![vault_created(first), vault_created(second)]);

        let result = VaultCreationTask
            .create_vault(&env)
            .await
            .expect("task should succeed");

        assert_eq!(result, Some(first));
    }

    #[tokio::test]
    async fn test_missing_factory_record_propagates_unmodified() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let mut env = MockEnv::default();
        env.add_account(DEPLOYER, deployer);

        let result = VaultCreationTask.create_vault(&env).await;

        assert!(matches!(
            result,
            Err(TaskError::Registry(
                crate::registry::Error::DeploymentNotFound(name)
            )) if name == YIELD_VAULT_FACTORY
        ));
    }
}
