// Blockchain module
//
// This module contains the ledger engine:
// - Block and transaction structures
// - Proof of work
// - Chain validation
// - Pending transaction pool
// - The ledger owning a node's chain and pool
// - Chain snapshot storage

pub mod block;
pub mod chain;
pub mod pool;
pub mod pow;
pub mod storage;
pub mod transaction;
pub mod validation;

// Re-export main components for easier access
pub use block::{Block, BlockData};
pub use chain::{AddressData, Ledger, LedgerError};
pub use transaction::{Address, Transaction};
