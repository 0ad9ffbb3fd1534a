// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use deploylib::transaction_config::MaxFeePerGas;

#[derive(Debug, Copy, Clone)]
pub enum MaxFeePerGasParam {
    Auto,
    LimitedAuto(u128),
    Unlimited,
    Custom(u128),
}

impl std::str::FromStr for MaxFeePerGasParam {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();

        match s.as_str() {
            "auto" => Ok(MaxFeePerGasParam::Auto),
            "unlimited" => Ok(MaxFeePerGasParam::Unlimited),
            _ => {
                if let Some(rest) = s.strip_prefix("limited-auto:") {
                    rest.parse::<u128>()
                        .map(MaxFeePerGasParam::LimitedAuto)
                        .map_err(|_| format!("Invalid limited-auto value: {rest}"))
                } else {
                    s.parse::<u128>()
                        .map(MaxFeePerGasParam::Custom)
                        .map_err(|_| format!("Invalid custom value: {s}"))
                }
            }
        }
    }
}

impl std::fmt::Display for MaxFeePerGasParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "MaxFeePerGas::Auto"),
            Self::LimitedAuto(value) => write!(f, "MaxFeePerGas::LimitedAuto({value})"),
            Self::Unlimited => write!(f, "MaxFeePerGas::Unlimited"),
            Self::Custom(value) => write!(f, "MaxFeePerGas::Custom({value})"),
        }
    }
}

pub fn get_max_fee_per_gas_from_opt_param(param: Option<MaxFeePerGasParam>) -> MaxFeePerGas {
    match param.unwrap_or(MaxFeePerGasParam::Auto) {
        MaxFeePerGasParam::Auto => MaxFeePerGas::Auto,
        MaxFeePerGasParam::LimitedAuto(value) => MaxFeePerGas::LimitedAuto(value),
        MaxFeePerGasParam::Unlimited => MaxFeePerGas::Unlimited,
        MaxFeePerGasParam::Custom(value) => MaxFeePerGas::Custom(value),
    }
}
