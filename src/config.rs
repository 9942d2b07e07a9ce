use clap::Parser;
use uuid::Uuid;

use std::path::PathBuf;
use std::time::Duration;

use crate::blockchain::Address;
use crate::network::NodeSettings;

/// Command-line configuration of a ledger node
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Replicated proof-of-work ledger node")]
pub struct NodeConfig {
    /// Interface the HTTP server binds to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP server listens on
    #[arg(short, long, default_value_t = 3001)]
    pub port: u16,

    /// URL other nodes reach this node at; derived from host and port when absent
    #[arg(long)]
    pub node_url: Option<String>,

    /// Directory holding the chain snapshot
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Milliseconds allowed for each request to a peer
    #[arg(long, default_value_t = 5_000)]
    pub peer_timeout_ms: u64,

    /// Seconds allowed for a nonce search; unbounded when absent
    #[arg(long)]
    pub mining_timeout_secs: Option<u64>,

    /// Amount credited to this node for each mined block
    #[arg(long, default_value_t = 12.5)]
    pub mining_reward: f64,
}

impl NodeConfig {
    pub fn node_url(&self) -> String {
        self.node_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port))
    }

    /// Settings for the node, with a fresh reward address
    pub fn node_settings(&self) -> NodeSettings {
        NodeSettings {
            node_url: self.node_url(),
            node_address: Address(Uuid::new_v4().simple().to_string()),
            mining_reward: self.mining_reward,
            peer_timeout: Duration::from_millis(self.peer_timeout_ms),
            mining_timeout: self.mining_timeout_secs.map(Duration::from_secs),
        }
    }
}
