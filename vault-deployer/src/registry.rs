// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

#![allow(dead_code)]

use alloy::json_abi::JsonAbi;
use deploylib::common::{Address, TxHash};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No deployment record exists for contract: {0}")]
    DeploymentNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A previously deployed contract, as recorded by the deployment that created it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub address: Address,
    pub abi: JsonAbi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// Directory of deployment records, one `<ContractName>.json` per contract.
/// The caller namespaces the directory per network.
pub struct DeploymentStore {
    storage_path: PathBuf,
}

impl DeploymentStore {
    pub fn new_with_path(storage_path: PathBuf) -> Result<Self, Error> {
        std::fs::create_dir_all(&storage_path)?;
        Ok(Self { storage_path })
    }

    /// Load the record of a previously deployed contract by name.
    pub fn load(&self, name: &str) -> Result<DeploymentRecord, Error> {
        let file_path = self.record_path(name);
        let json = std::fs::read_to_string(&file_path)
            .map_err(|_| Error::DeploymentNotFound(name.to_string()))?;
        let record = serde_json::from_str(&json)?;
        Ok(record)
    }

    /// Persist the record of a deployed contract under its name.
    pub fn save(&self, name: &str, record: &DeploymentRecord) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(self.record_path(name), json)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.storage_path.join(format!("{name}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn record() -> DeploymentRecord {
        let abi: JsonAbi = serde_json::from_str(
            r#"[
                {
                    "type": "function",
                    "name": "createVault",
                    "inputs": [
                        { "name": "name", "type": "string" },
                        { "name": "symbol", "type": "string" },
                        { "name": "asset", "type": "address" },
                        { "name": "admin", "type": "address" }
                    ],
                    "outputs": [],
                    "stateMutability": "nonpayable"
                }
            ]"#,
        )
        .expect("ABI fixture should parse");

        DeploymentRecord {
            address: address!("2000000000000000000000000000000000000002"),
            abi,
            transaction_hash: None,
            block_number: Some(42),
        }
    }

    #[test]
    fn test_save_and_load_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store =
            DeploymentStore::new_with_path(dir.path().join("sepolia")).expect("store dir");

        let record = record();
        store
            .save("YieldVaultFactory", &record)
            .expect("save should succeed");

        assert!(store.contains("YieldVaultFactory"));
        let loaded = store.load("YieldVaultFactory").expect("load should succeed");
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_missing_record_is_deployment_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = DeploymentStore::new_with_path(dir.path().to_path_buf()).expect("store dir");

        let result = store.load("YieldVaultFactory");
        assert!(matches!(result, Err(Error::DeploymentNotFound(name)) if name == "YieldVaultFactory"));
    }
}
