// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::common::TxHash;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Method not found in contract ABI: {0}")]
    UnknownMethod(String),
    #[error("ABI encoding error: {0}")]
    AbiEncoding(#[from] alloy::dyn_abi::Error),
    #[error(transparent)]
    Transaction(#[from] crate::TransactionError),
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("No receipt found for transaction: {0}")]
    ReceiptNotFound(TxHash),
    #[error("Transaction reverted: {0}")]
    TransactionReverted(TxHash),
}
