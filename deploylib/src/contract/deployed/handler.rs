// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::{Address, Calldata, TxHash};
use crate::contract::deployed::error::Error;
use crate::contract::deployed::receipt::{decode_contract_events, ExecutionReceipt};
use crate::retry::{retry, send_transaction_with_retries};
use crate::transaction_config::TransactionConfig;
use alloy::consensus::TxReceipt as _;
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::JsonAbi;
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;

const RECEIPT_RETRY_INTERVAL_MS: u64 = 500;

/// Handler for a contract that is already deployed, addressed by its on-chain address
/// and driven by its ABI rather than compile-time bindings. The ABI is data here: it
/// comes from a deployment record, not from this crate.
pub struct DeployedContract<P: Provider> {
    address: Address,
    abi: JsonAbi,
    provider: P,
}

impl<P: Provider> DeployedContract<P> {
    /// Create a new handler instance from a deployed contract's address and ABI.
    pub fn new(address: Address, abi: JsonAbi, provider: P) -> Self {
        Self {
            address,
            abi,
            provider,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Execute a state-changing method with `from` as the transaction sender and wait
    /// for the transaction to be confirmed. Returns the confirmed transaction's hash
    /// together with the events the contract emitted.
    pub async fn execute(
        &self,
        from: Address,
        method: &str,
        args: &[DynSolValue],
        transaction_config: &TransactionConfig,
    ) -> Result<ExecutionReceipt, Error> {
        let (calldata, to) = self.execute_calldata(method, args)?;

        let tx_hash = send_transaction_with_retries(
            &self.provider,
            calldata,
            to,
            from,
            method,
            transaction_config,
        )
        .await?;

        let receipt = self.get_receipt(tx_hash).await?;
        if !receipt.status() {
            return Err(Error::TransactionReverted(tx_hash));
        }

        let events = decode_contract_events(&self.abi, self.address, receipt.inner.logs());
        debug!(
            "{method} transaction {tx_hash} confirmed with {} decoded event(s)",
            events.len()
        );

        Ok(ExecutionReceipt { tx_hash, events })
    }

    /// Returns the transaction calldata for a method call.
    pub fn execute_calldata(
        &self,
        method: &str,
        args: &[DynSolValue],
    ) -> Result<(Calldata, Address), Error> {
        let function = self
            .abi
            .function(method)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::UnknownMethod(method.to_string()))?;

        let calldata = function.abi_encode_input(args)?;

        Ok((calldata.into(), self.address))
    }

    /// The receipt can lag the confirmation on some RPC providers, so retry briefly.
    async fn get_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt, Error> {
        retry(
            || async {
                self.provider
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(|err| Error::Rpc(format!("Failed to get transaction receipt: {err}")))?
                    .ok_or(Error::ReceiptNotFound(tx_hash))
            },
            "get_transaction_receipt",
            Some(RECEIPT_RETRY_INTERVAL_MS),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::http_provider;
    use alloy::primitives::address;

    fn factory_abi() -> JsonAbi {
        serde_json::from_str(
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
                    "outputs": [{ "name": "vault", "type": "address" }],
                    "stateMutability": "nonpayable"
                }
            ]"#,
        )
        .expect("ABI fixture should parse")
    }

    fn handler() -> DeployedContract<impl Provider> {
        let provider = http_provider("http://localhost:8545".parse().expect("valid URL"));
        let factory = address!("2000000000000000000000000000000000000002");
        DeployedContract::new(factory, factory_abi(), provider)
    }

    #[test]
    fn test_calldata_starts_with_the_function_selector() {
        let handler = handler();
        let admin = address!("000000000000000000000000000000000000000d");
        let asset = address!("AA40c0c7644e0b2B224509571e10ad20d9C4ef28");

        let args = [
            DynSolValue::String("Test Yield Vault".to_string()),
            DynSolValue::String("TYV".to_string()),
            DynSolValue::Address(asset),
            DynSolValue::Address(admin),
        ];

        let (calldata, to) = handler
            .execute_calldata("createVault", &args)
            .expect("encoding should succeed");

        let function = factory_abi().function("createVault").expect("fixture has createVault")[0].clone();
        assert_eq!(&calldata[..4], function.selector().as_slice());
        assert_eq!(to, handler.address());

        let decoded = function
            .abi_decode_input(&calldata[4..])
            .expect("calldata should decode");
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let handler = handler();
        let result = handler.execute_calldata("createVaultV2", &[]);
        assert!(matches!(result, Err(Error::UnknownMethod(_))));
    }
}
