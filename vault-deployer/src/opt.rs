// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::args::max_fee_per_gas::MaxFeePerGasParam;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Opt {
    /// Run against a local development node when no EVM network is configured
    /// through the environment variables.
    #[clap(long)]
    pub local: bool,

    /// Directory holding the deployment records, namespaced per network.
    #[clap(long, default_value = "deployments")]
    pub deployments_dir: PathBuf,

    /// Only run the tasks registered under this tag (and their dependencies).
    #[clap(long)]
    pub tag: Option<String>,

    /// The maximum fee per gas for the deployment transactions.
    ///
    /// Valid values are "auto", "limited-auto:<WEI AMOUNT>", "unlimited",
    /// or a custom value specified in WEI.
    #[clap(long, verbatim_doc_comment)]
    pub max_fee_per_gas: Option<MaxFeePerGasParam>,
}
