// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod accounts;
mod args;
mod env;
mod opt;
mod registry;
mod task;
mod tasks;
#[cfg(test)]
mod test_support;

use crate::accounts::NamedAccounts;
use crate::args::max_fee_per_gas::get_max_fee_per_gas_from_opt_param;
use crate::env::ChainEnv;
use crate::opt::Opt;
use crate::registry::DeploymentStore;
use crate::task::TaskRunner;
use crate::tasks::create_vault::VaultCreationTask;
use clap::Parser;
use color_eyre::eyre::Context;
use color_eyre::Result;
use deploylib::transaction_config::TransactionConfig;
use deploylib::wallet::Wallet;
use deploylib::Network;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SECRET_KEY_ENV: &str = "SECRET_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let opt = Opt::parse();

    let network = Network::new(opt.local)?;
    info!("Deploying on EVM network: {network}");

    let secret_key = std::env::var(SECRET_KEY_ENV)
        .wrap_err(format!("make sure you've provided the {SECRET_KEY_ENV} env var"))?;
    let wallet = Wallet::new_from_private_key(network.clone(), &secret_key)
        .wrap_err("Failed to load EVM wallet from key")?;

    let accounts = NamedAccounts::with_deployer(wallet.address());
    let store = DeploymentStore::new_with_path(opt.deployments_dir.join(network.identifier()))?;
    let transaction_config = TransactionConfig {
        max_fee_per_gas: get_max_fee_per_gas_from_opt_param(opt.max_fee_per_gas),
    };

    let chain_env = ChainEnv::new(accounts, store, wallet.to_provider(), transaction_config);

    let mut runner = TaskRunner::default();
    runner.register(VaultCreationTask);
    runner.run(&chain_env, opt.tag.as_deref()).await?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
