use log::{info, warn};
use thiserror::Error;

use super::block::Block;
use super::pool::TransactionPool;
use super::transaction::{Address, Transaction};
use super::validation::is_valid;

/// Errors that can occur during ledger operations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: f64, available: f64 },

    #[error("Duplicate transaction id: {0}")]
    DuplicateTransaction(String),

    #[error("Chain tip moved from {expected} to {actual} while mining")]
    StaleTip { expected: String, actual: String },
}

/// Work handed to the proof-of-work engine
///
/// Captures the chain tip and pool contents at the moment mining started.
#[derive(Debug, Clone)]
pub struct MiningJob {
    pub previous_hash: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
}

/// Everything recorded for one address
#[derive(Debug, Clone)]
pub struct AddressData {
    pub transactions: Vec<Transaction>,
    pub balance: f64,
}

/// A node's chain together with its pending transactions
#[derive(Debug, Clone)]
pub struct Ledger {
    /// The chain of blocks, never empty
    chain: Vec<Block>,

    /// Pending transactions to be included in the next block
    pool: TransactionPool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates a ledger holding only the genesis block
    pub fn new() -> Self {
        Ledger {
            chain: vec![Block::genesis()],
            pool: TransactionPool::new(),
        }
    }

    /// Restores a ledger from a previously saved chain
    ///
    /// # Returns
    ///
    /// `None` if the chain does not pass validation
    pub fn from_chain(chain: Vec<Block>, pending: Vec<Transaction>) -> Option<Self> {
        if !is_valid(&chain) {
            return None;
        }

        Some(Ledger {
            chain,
            pool: TransactionPool::from_transactions(pending),
        })
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        self.pool.transactions()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Gets the last block in the chain
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger chain always holds the genesis block")
    }

    /// Adds a transaction to the pending pool
    ///
    /// The amount must not exceed the sender's balance as recorded on the
    /// chain; mining rewards are exempt. An id already present in the pool
    /// or on the chain is refused.
    ///
    /// # Returns
    ///
    /// The index of the block that will include this transaction
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<u64, LedgerError> {
        if self.contains_transaction(&transaction.transaction_id) {
            return Err(LedgerError::DuplicateTransaction(
                transaction.transaction_id,
            ));
        }

        if !transaction.is_mining_reward() {
            let available = self.balance_of(&transaction.sender);
            if transaction.amount > available {
                return Err(LedgerError::InsufficientBalance {
                    required: transaction.amount,
                    available,
                });
            }
        }

        self.pool.submit(transaction);

        Ok(self.last_block().index + 1)
    }

    /// Captures the work for the next block
    pub fn mining_job(&self) -> MiningJob {
        let last_block = self.last_block();

        MiningJob {
            previous_hash: last_block.hash.clone(),
            index: last_block.index + 1,
            transactions: self.pool.drain_for_mining(),
        }
    }

    /// Seals transactions in a new block and appends it
    ///
    /// Only the sealed transactions leave the pending pool, so transfers
    /// submitted while the nonce search ran wait for the next block instead
    /// of being dropped.
    pub fn new_block(
        &mut self,
        nonce: u64,
        previous_hash: String,
        hash: String,
        transactions: Vec<Transaction>,
    ) -> Block {
        let index = self.last_block().index + 1;
        self.seal(index, nonce, previous_hash, hash, transactions)
    }

    fn seal(
        &mut self,
        index: u64,
        nonce: u64,
        previous_hash: String,
        hash: String,
        transactions: Vec<Transaction>,
    ) -> Block {
        self.pool.remove_sealed(&transactions);

        let block = Block::new(index, transactions, nonce, previous_hash, hash);
        self.chain.push(block.clone());

        info!("Appended block {} ({})", block.index, block.hash);
        block
    }

    /// Appends the result of a finished mining job
    ///
    /// Fails without touching the ledger if the chain tip changed since the
    /// job was taken.
    pub fn append_mined(&mut self, job: MiningJob, nonce: u64, hash: String) -> Result<Block, LedgerError> {
        let last_block = self.last_block();
        if last_block.hash != job.previous_hash || last_block.index + 1 != job.index {
            return Err(LedgerError::StaleTip {
                expected: job.previous_hash,
                actual: last_block.hash.clone(),
            });
        }

        Ok(self.seal(job.index, nonce, job.previous_hash, hash, job.transactions))
    }

    /// Applies a block received from a peer
    ///
    /// The block is accepted only if it extends the current tip by exactly
    /// one. Acceptance clears the pending pool.
    ///
    /// # Returns
    ///
    /// true if the block was appended
    pub fn receive_block(&mut self, block: Block) -> bool {
        let last_block = self.last_block();
        let correct_hash = last_block.hash == block.previous_block_hash;
        let correct_index = last_block.index + 1 == block.index;

        if !(correct_hash && correct_index) {
            warn!(
                "Rejected block {} (previous hash {}): tip is block {} ({})",
                block.index, block.previous_block_hash, last_block.index, last_block.hash
            );
            return false;
        }

        info!("Accepted block {} ({}) from peer", block.index, block.hash);
        self.chain.push(block);
        self.pool.clear();
        true
    }

    /// Replaces chain and pool with a peer's, if the peer's chain is longer and valid
    ///
    /// # Returns
    ///
    /// true if the ledger was replaced
    pub fn adopt_chain(&mut self, chain: Vec<Block>, pending: Vec<Transaction>) -> bool {
        if chain.len() <= self.chain.len() {
            return false;
        }

        if !is_valid(&chain) {
            warn!("Refused longer chain of length {}: validation failed", chain.len());
            return false;
        }

        info!(
            "Replacing chain of length {} with chain of length {}",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
        self.pool = TransactionPool::from_transactions(pending);
        true
    }

    /// Checks the pool and the chain for a transaction id
    pub fn contains_transaction(&self, transaction_id: &str) -> bool {
        self.pool.contains(transaction_id) || self.find_transaction_by_id(transaction_id).is_some()
    }

    /// All transactions on the chain involving an address, in chain order
    pub fn transactions_for(&self, address: &Address) -> Vec<Transaction> {
        self.chain
            .iter()
            .flat_map(|block| block.transactions.iter())
            .filter(|transaction| transaction.involves(address))
            .cloned()
            .collect()
    }

    /// Net amount received by an address on the chain
    pub fn balance_of(&self, address: &Address) -> f64 {
        balance_from(address, &self.transactions_for(address))
    }

    /// Transactions and balance of an address
    pub fn address_data(&self, address: &Address) -> AddressData {
        let transactions = self.transactions_for(address);
        let balance = balance_from(address, &transactions);

        AddressData {
            transactions,
            balance,
        }
    }

    pub fn find_block_by_hash(&self, hash: &str) -> Option<&Block> {
        self.chain.iter().find(|block| block.hash == hash)
    }

    /// Finds a transaction on the chain along with the block sealing it
    pub fn find_transaction_by_id(&self, transaction_id: &str) -> Option<(&Transaction, &Block)> {
        self.chain.iter().find_map(|block| {
            block
                .transactions
                .iter()
                .find(|transaction| transaction.transaction_id == transaction_id)
                .map(|transaction| (transaction, block))
        })
    }
}

fn balance_from(address: &Address, transactions: &[Transaction]) -> f64 {
    transactions.iter().fold(0.0, |balance, transaction| {
        if &transaction.recipient == address {
            balance + transaction.amount
        } else if &transaction.sender == address {
            balance - transaction.amount
        } else {
            balance
        }
    })
}
