// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{CustomNetwork, Network};
use alloy::network::Ethereum;
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
};
use alloy::providers::{Identity, ProviderBuilder, RootProvider};
use alloy::transports::http::reqwest;
use std::env;
use std::sync::OnceLock;

/// environment variable to connect to a custom EVM network
pub const RPC_URL: &str = "RPC_URL";
const RPC_URL_BUILD_TIME_VAL: Option<&str> = option_env!("RPC_URL");
/// environment variable to select one of the known EVM networks
pub const EVM_NETWORK: &str = "EVM_NETWORK";

const LOCAL_RPC_URL: &str = "http://localhost:8545";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to get EVM network: {0}")]
    FailedToGetEvmNetwork(String),
}

static EVM_NETWORK_CACHE: OnceLock<Network> = OnceLock::new();

/// Select the EVM network.
///
/// Try to obtain it first from environment variables. If that fails and `local` is true,
/// fall back to the hardcoded local node endpoint. There is no silent default to a public
/// network: deploying against the wrong chain is worse than failing here.
pub fn get_evm_network(local: bool) -> Result<Network, Error> {
    if let Some(network) = EVM_NETWORK_CACHE.get() {
        return Ok(network.clone());
    }

    let res = match get_evm_network_from_env() {
        Ok(evm_network) => Ok(evm_network),
        Err(_) if local => Ok(local_evm_network_hardcoded()),
        Err(err) => {
            error!("Failed to obtain the desired EVM network via any means");
            Err(err)
        }
    };

    if let Ok(network) = res.as_ref() {
        let _ = EVM_NETWORK_CACHE.set(network.clone());
    }

    res
}

/// Get the `Network` from environment variables.
///
/// Returns an error if we cannot obtain the network from any means.
fn get_evm_network_from_env() -> Result<Network, Error> {
    let selector = env::var(EVM_NETWORK).ok();

    match selector.as_deref() {
        Some("local") => {
            info!("Using local EVM network as {EVM_NETWORK} is set to 'local'");
            return Ok(local_evm_network_hardcoded());
        }
        Some("mainnet") => {
            info!("Using Ethereum mainnet as {EVM_NETWORK} is set to 'mainnet'");
            return Ok(Network::Mainnet);
        }
        Some("sepolia") => {
            info!("Using Sepolia as {EVM_NETWORK} is set to 'sepolia'");
            return Ok(Network::Sepolia);
        }
        _ => {}
    }

    let rpc_url = env::var(RPC_URL)
        .ok()
        .or_else(|| RPC_URL_BUILD_TIME_VAL.map(|s| s.to_string()));

    if let Some(rpc_url) = rpc_url {
        info!("Using custom EVM network from environment variables");
        Ok(Network::Custom(CustomNetwork::new(&rpc_url)))
    } else {
        Err(Error::FailedToGetEvmNetwork(format!(
            "missing env var, make sure to set {EVM_NETWORK} or {RPC_URL}"
        )))
    }
}

/// The `Network::Custom` pointing at a local development node.
fn local_evm_network_hardcoded() -> Network {
    Network::Custom(CustomNetwork::new(LOCAL_RPC_URL))
}

#[allow(clippy::type_complexity)]
pub fn http_provider(
    rpc_url: reqwest::Url,
) -> FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
> {
    ProviderBuilder::new().connect_http(rpc_url)
}
