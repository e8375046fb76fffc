use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAINNET: &str = "mainnet";
pub const TESTNET: &str = "testnet";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Anything that is not a mainnet node is treated as testnet.
    pub fn from_node_url(node_url: &str) -> Self {
        if node_url.contains(MAINNET) {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET,
            Network::Testnet => TESTNET,
        }
    }

    pub fn default_metapool_contract(&self) -> &'static str {
        match self {
            Network::Mainnet => "meta-pool.near",
            Network::Testnet => "meta-v2.pool.testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            MAINNET => Ok(Network::Mainnet),
            TESTNET => Ok(Network::Testnet),
            other => Err(format!("unknown network {}", other)),
        }
    }
}
