// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use deploylib::common::Address;
use std::collections::HashMap;
use std::env;
use tracing::warn;

/// Role of the account that signs and funds the deployment transactions.
pub const DEPLOYER: &str = "deployer";

/// environment variable prefix to bind extra roles, e.g. `NAMED_ACCOUNT_TREASURY`
const NAMED_ACCOUNT_ENV_PREFIX: &str = "NAMED_ACCOUNT_";

/// Logical account roles bound to concrete chain addresses.
#[derive(Clone, Debug, Default)]
pub struct NamedAccounts {
    accounts: HashMap<String, Address>,
}

impl NamedAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Named accounts with `deployer` bound to the given address, plus any
    /// `NAMED_ACCOUNT_<ROLE>` environment overrides.
    pub fn with_deployer(deployer: Address) -> Self {
        let mut accounts = Self::new();
        accounts.insert(DEPLOYER, deployer);
        accounts.apply_env_overrides();
        accounts
    }

    pub fn insert(&mut self, role: &str, address: Address) {
        self.accounts.insert(role.to_string(), address);
    }

    /// Resolve a role to its address. A role that was never bound, or whose
    /// environment override did not parse, resolves to `None`.
    pub fn resolve(&self, role: &str) -> Option<Address> {
        self.accounts.get(role).copied()
    }

    fn apply_env_overrides(&mut self) {
        for (key, value) in env::vars() {
            let Some(role) = key.strip_prefix(NAMED_ACCOUNT_ENV_PREFIX) else {
                continue;
            };
            match value.parse::<Address>() {
                Ok(address) => self.insert(&role.to_ascii_lowercase(), address),
                Err(err) => warn!("Ignoring {key}: invalid address: {err}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_unbound_role_resolves_to_none() {
        let accounts = NamedAccounts::new();
        assert_eq!(accounts.resolve(DEPLOYER), None);
    }

    #[test]
    fn test_deployer_is_bound() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let accounts = NamedAccounts::with_deployer(deployer);
        assert_eq!(accounts.resolve(DEPLOYER), Some(deployer));
    }

    #[test]
    fn test_env_override_binds_extra_role() {
        let treasury = "0xAA40c0c7644e0b2B224509571e10ad20d9C4ef28";
        std::env::set_var("NAMED_ACCOUNT_TREASURY", treasury);

        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let accounts = NamedAccounts::with_deployer(deployer);

        std::env::remove_var("NAMED_ACCOUNT_TREASURY");
        assert_eq!(
            accounts.resolve("treasury"),
            Some(address!("AA40c0c7644e0b2B224509571e10ad20d9C4ef28"))
        );
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        std::env::set_var("NAMED_ACCOUNT_EMPTY", "");

        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let accounts = NamedAccounts::with_deployer(deployer);

        std::env::remove_var("NAMED_ACCOUNT_EMPTY");
        assert_eq!(accounts.resolve("empty"), None);
    }
}
