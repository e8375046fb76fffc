use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::Network;

pub struct Config {
    pub account_id: String,
    pub validator_account_id: String,
    pub primary_rpc: String,
    pub secondary_rpc: String,
    pub network: Network,
    pub metapool_contract_id: String,
    pub parallel_limit: usize,
    pub farm_page_limit: u64,
    pub quote_debounce: Duration,
    pub rpc_timeout: Option<Duration>,
    pub unstake_amount: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let primary_rpc = required("PRIMARY_RPC")?;
        let secondary_rpc = lookup("SECONDARY_RPC").unwrap_or_else(|| primary_rpc.clone());
        let network = match lookup("NETWORK_ID") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "NETWORK_ID",
                value,
            })?,
            None => Network::from_node_url(&primary_rpc),
        };

        Ok(Self {
            account_id: required("ACCOUNT_ID")?,
            validator_account_id: lookup("VALIDATOR_ACCOUNT_ID")
                .unwrap_or_else(|| "aurora.pool.near".to_string()),
            metapool_contract_id: lookup("METAPOOL_CONTRACT_ID")
                .unwrap_or_else(|| network.default_metapool_contract().to_string()),
            primary_rpc,
            secondary_rpc,
            network,
            parallel_limit: parse_or(&lookup, "PARALLEL_LIMIT", 16)?,
            farm_page_limit: parse_or(&lookup, "FARM_PAGE_LIMIT", 300)?,
            quote_debounce: Duration::from_millis(parse_or(&lookup, "QUOTE_DEBOUNCE_MS", 500)?),
            rpc_timeout: parse_opt::<u64, _>(&lookup, "RPC_TIMEOUT_MS")?.map(Duration::from_millis),
            unstake_amount: lookup("UNSTAKE_AMOUNT"),
        })
    }
}

fn parse_opt<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(None),
    }
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(lookup, name)?.unwrap_or(default))
}
