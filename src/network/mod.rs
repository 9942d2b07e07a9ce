// Network module
//
// This module contains everything that involves other nodes:
// - The peer registry
// - The outbound peer transport
// - Fan-out result collection
// - Longest-chain selection
// - The node context tying the ledger to its peers

pub mod broadcast;
pub mod consensus;
pub mod node;
pub mod registry;
pub mod transport;

// Re-export main components for easier access
pub use broadcast::PeerOutcome;
pub use node::{Node, NodeError, NodeSettings};
pub use transport::HttpTransport;
