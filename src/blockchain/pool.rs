use std::collections::HashSet;

use super::transaction::Transaction;

/// Transactions accepted by this node but not yet sealed in a block
#[derive(Debug, Clone, Default)]
pub struct TransactionPool {
    transactions: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool holding the given transactions, in order
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        TransactionPool { transactions }
    }

    /// Appends a transaction
    pub fn submit(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Returns the current contents without removing them
    ///
    /// The pool keeps these transactions until the block sealing them is
    /// appended, so an abandoned search loses nothing.
    pub fn drain_for_mining(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Removes the transactions that were sealed in a block
    pub fn remove_sealed(&mut self, sealed: &[Transaction]) {
        let ids: HashSet<&str> = sealed.iter().map(|t| t.transaction_id.as_str()).collect();
        self.transactions
            .retain(|t| !ids.contains(t.transaction_id.as_str()));
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn contains(&self, transaction_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|t| t.transaction_id == transaction_id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_and_drain_keeps_contents() {
        let mut pool = TransactionPool::new();
        pool.submit(Transaction::new(1.0, "a".into(), "b".into()));
        pool.submit(Transaction::new(2.0, "a".into(), "c".into()));

        let drained = pool.drain_for_mining();

        assert_eq!(drained.len(), 2);
        assert_eq!(pool.len(), 2);
        assert_eq!(drained[1].amount, 2.0);
    }

    #[test]
    fn test_remove_sealed_keeps_late_arrivals() {
        let mut pool = TransactionPool::new();
        pool.submit(Transaction::new(1.0, "a".into(), "b".into()));
        let sealed = pool.drain_for_mining();

        let late = Transaction::new(2.0, "a".into(), "c".into());
        pool.submit(late.clone());
        pool.remove_sealed(&sealed);

        assert_eq!(pool.transactions(), &[late]);
    }

    #[test]
    fn test_contains_and_clear() {
        let transaction = Transaction::new(1.0, "a".into(), "b".into());
        let mut pool = TransactionPool::from_transactions(vec![transaction.clone()]);

        assert!(pool.contains(&transaction.transaction_id));
        pool.clear();
        assert!(pool.is_empty());
        assert!(!pool.contains(&transaction.transaction_id));
    }
}
