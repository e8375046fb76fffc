//! Static classification of staking pool contracts by the factory that
//! deployed them. Pool account ids are `<name>.<factory>`.

use crate::models::{Network, ValidatorVersion};

const VALIDATOR_VERSIONS: &[(Network, &str, ValidatorVersion)] = &[
    (Network::Mainnet, "poolv1.near", ValidatorVersion::Legacy),
    (Network::Mainnet, "pool.near", ValidatorVersion::Farming),
    (Network::Testnet, "pool.f863973.m0", ValidatorVersion::Legacy),
    (Network::Testnet, "factory01.littlefarm.testnet", ValidatorVersion::Farming),
    (Network::Testnet, "factory.colorpalette.testnet", ValidatorVersion::Farming),
];

/// Unknown factories are treated as legacy pools.
pub fn validator_version(network: Network, account_id: &str) -> ValidatorVersion {
    let factory = match account_id.split_once('.') {
        Some((name, factory)) if !name.is_empty() => factory,
        _ => return ValidatorVersion::Legacy,
    };

    VALIDATOR_VERSIONS
        .iter()
        .find(|(net, suffix, _)| *net == network && factory == *suffix)
        .map(|(_, _, version)| *version)
        .unwrap_or(ValidatorVersion::Legacy)
}

pub fn is_farming_validator(network: Network, account_id: &str) -> bool {
    validator_version(network, account_id) == ValidatorVersion::Farming
}
