//! A ledger node: the chain, the pending pool and the peer registry behind
//! one context object, plus the protocols that talk to other nodes

use futures::future::join_all;
use log::{info, warn};
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinError;

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::broadcast::{collect_outcomes, failures, PeerOutcome};
use super::consensus::select_longest;
use super::registry::PeerRegistry;
use super::transport::{with_timeout, PeerTransport};
use crate::api::schema::{ChainSnapshot, TransactionRequest};
use crate::blockchain::pow::{hash_block_candidate, mine_cancellable, CancelFlag};
use crate::blockchain::storage::SnapshotStore;
use crate::blockchain::{Address, AddressData, Block, BlockData, Ledger, LedgerError, Transaction};

/// Errors that can occur during node operations
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Mining was cancelled")]
    MiningCancelled,

    #[error("Mining gave up after {0:?}")]
    MiningTimedOut(Duration),

    #[error("Mining worker failed: {0}")]
    Worker(#[from] JoinError),
}

/// Fixed parameters of a node
#[derive(Debug, Clone)]
pub struct NodeSettings {
    /// URL other nodes reach this node at
    pub node_url: String,

    /// Address credited with mining rewards
    pub node_address: Address,

    /// Amount of each mining reward
    pub mining_reward: f64,

    /// Time allowed for each peer request
    pub peer_timeout: Duration,

    /// Time allowed for a nonce search, unbounded when `None`
    pub mining_timeout: Option<Duration>,
}

/// Result of a transaction broadcast
#[derive(Debug, Clone)]
pub struct BroadcastOutcome {
    pub transaction: Transaction,
    pub peers: Vec<PeerOutcome>,
}

/// Result of a successful mining round
#[derive(Debug, Clone)]
pub struct MineOutcome {
    pub block: Block,
    pub reward: Transaction,
    pub peers: Vec<PeerOutcome>,
}

/// Result of a consensus pass
#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    pub replaced: bool,
    pub chain: Vec<Block>,
    pub peers: Vec<PeerOutcome>,
}

/// A single ledger node
pub struct Node {
    settings: NodeSettings,

    /// Chain and pending pool; every mutation is one critical section
    ledger: Mutex<Ledger>,

    registry: Mutex<PeerRegistry>,

    transport: Arc<dyn PeerTransport>,

    store: Option<SnapshotStore>,

    /// Held for the whole of a mining round
    mining: AsyncMutex<()>,

    /// Cancellation flag of the running nonce search
    active_search: Mutex<Option<CancelFlag>>,
}

impl Node {
    /// Creates a node holding only the genesis block
    pub fn new(settings: NodeSettings, transport: Arc<dyn PeerTransport>) -> Self {
        let registry = PeerRegistry::new(settings.node_url.clone());

        Node {
            settings,
            ledger: Mutex::new(Ledger::new()),
            registry: Mutex::new(registry),
            transport,
            store: None,
            mining: AsyncMutex::new(()),
            active_search: Mutex::new(None),
        }
    }

    /// Attaches a snapshot store, resuming from its chain when that chain is valid
    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        match store.load() {
            Ok(Some(chain)) => {
                let len = chain.len();
                match Ledger::from_chain(chain, Vec::new()) {
                    Some(ledger) => {
                        info!("Resumed chain of length {} from {}", len, store.path().display());
                        self.ledger = Mutex::new(ledger);
                    }
                    None => warn!(
                        "Snapshot at {} holds an invalid chain, starting from genesis",
                        store.path().display()
                    ),
                }
            }
            Ok(None) => info!("No snapshot at {}, starting from genesis", store.path().display()),
            Err(err) => warn!("Failed to read snapshot, starting from genesis: {}", err),
        }

        self.store = Some(store);
        self
    }

    pub fn settings(&self) -> &NodeSettings {
        &self.settings
    }

    /// The full state served to peers
    pub fn snapshot(&self) -> ChainSnapshot {
        let ledger = self.ledger.lock().unwrap();
        let registry = self.registry.lock().unwrap();

        ChainSnapshot {
            chain: ledger.chain().to_vec(),
            pending_transactions: ledger.pending_transactions().to_vec(),
            current_node_url: registry.self_url().to_string(),
            network_nodes: registry.peers().to_vec(),
        }
    }

    pub fn chain_len(&self) -> usize {
        self.ledger.lock().unwrap().len()
    }

    pub fn peers(&self) -> Vec<String> {
        self.registry.lock().unwrap().peers().to_vec()
    }

    /// Adds a transaction submitted directly or forwarded by a peer
    ///
    /// # Returns
    ///
    /// The index of the block that will include the transaction
    pub fn submit_transaction(&self, request: TransactionRequest) -> Result<u64, LedgerError> {
        let sender = Address(request.sender);
        let recipient = Address(request.recipient);
        let transaction = match request.transaction_id {
            Some(id) => Transaction::with_id(request.amount, sender, recipient, id),
            None => Transaction::new(request.amount, sender, recipient),
        };

        self.ledger.lock().unwrap().add_transaction(transaction)
    }

    /// Creates a transaction, queues it locally and forwards it to every peer
    pub async fn broadcast_transaction(
        &self,
        amount: f64,
        sender: Address,
        recipient: Address,
    ) -> Result<BroadcastOutcome, LedgerError> {
        let transaction = Transaction::new(amount, sender, recipient);
        {
            let mut ledger = self.ledger.lock().unwrap();
            ledger.add_transaction(transaction.clone())?;
            self.persist(&ledger);
        }

        let peers = self.peers();
        let results = join_all(peers.iter().map(|peer| {
            with_timeout(
                self.settings.peer_timeout,
                self.transport.send_transaction(peer, &transaction),
            )
        }))
        .await;
        let peers = collect_outcomes("Transaction broadcast", &peers, &results);

        info!(
            "Broadcast transaction {} to {} peers ({} failed)",
            transaction.transaction_id,
            peers.len(),
            failures(&peers)
        );

        Ok(BroadcastOutcome { transaction, peers })
    }

    /// Mines the pending pool into a block, broadcasts it and queues a reward
    ///
    /// The nonce search runs on a blocking worker. It is abandoned when a
    /// peer block or a longer chain is adopted in the meantime, or when the
    /// configured mining timeout elapses; the pending pool is kept either way.
    pub async fn mine(&self) -> Result<MineOutcome, NodeError> {
        let _round = self.mining.lock().await;

        let job = self.ledger.lock().unwrap().mining_job();
        let cancel = CancelFlag::new();
        *self.active_search.lock().unwrap() = Some(cancel.clone());

        info!(
            "Mining block {} over {} pending transactions",
            job.index,
            job.transactions.len()
        );

        let search = {
            let job = job.clone();
            let cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                let data = BlockData::new(&job.transactions, job.index);
                mine_cancellable(&job.previous_hash, &data, &cancel)
                    .map(|nonce| (nonce, hash_block_candidate(&job.previous_hash, &data, nonce)))
            })
        };

        let found = await_search(search, self.settings.mining_timeout, &cancel).await;
        self.active_search.lock().unwrap().take();
        if let Err(NodeError::MiningTimedOut(limit)) = &found {
            warn!("Mining block {} gave up after {:?}", job.index, limit);
        }

        let (nonce, hash) = found?.ok_or(NodeError::MiningCancelled)?;

        let block = {
            let mut ledger = self.ledger.lock().unwrap();
            let block = ledger.append_mined(job, nonce, hash)?;
            self.persist(&ledger);
            block
        };
        info!("Mined block {} with nonce {}", block.index, block.nonce);

        let peers = self.peers();
        let results = join_all(peers.iter().map(|peer| {
            with_timeout(
                self.settings.peer_timeout,
                self.transport.send_block(peer, &block),
            )
        }))
        .await;
        let peers = collect_outcomes("Block broadcast", &peers, &results);

        let reward = self
            .broadcast_transaction(
                self.settings.mining_reward,
                Address::mining_reward(),
                self.settings.node_address.clone(),
            )
            .await?;

        Ok(MineOutcome {
            block,
            reward: reward.transaction,
            peers,
        })
    }

    /// Applies a block offered by a peer
    ///
    /// # Returns
    ///
    /// true if the block extended the chain
    pub fn receive_block(&self, block: Block) -> bool {
        let accepted = self.ledger.lock().unwrap().receive_block(block);
        if accepted {
            self.cancel_search();
        }
        accepted
    }

    /// Registers a single peer
    pub fn register_node(&self, url: &str) -> bool {
        self.registry.lock().unwrap().register(url)
    }

    /// Registers a batch of peers
    ///
    /// # Returns
    ///
    /// The number of peers added
    pub fn register_bulk(&self, urls: &[String]) -> usize {
        self.registry
            .lock()
            .unwrap()
            .register_bulk(urls.iter().map(String::as_str))
    }

    /// Introduces a new node to the whole network
    ///
    /// Every known peer is told about `url` first; once all of them have
    /// answered, `url` receives this node's full registry including itself.
    pub async fn register_and_broadcast(&self, url: &str) -> Vec<PeerOutcome> {
        let (others, all_nodes) = {
            let mut registry = self.registry.lock().unwrap();
            registry.register(url);
            let others: Vec<String> = registry
                .peers()
                .iter()
                .filter(|peer| peer.as_str() != url)
                .cloned()
                .collect();
            (others, registry.with_self())
        };

        let results = join_all(others.iter().map(|peer| {
            with_timeout(
                self.settings.peer_timeout,
                self.transport.register_node(peer, url),
            )
        }))
        .await;
        let mut outcomes = collect_outcomes("Peer registration", &others, &results);

        let bulk = with_timeout(
            self.settings.peer_timeout,
            self.transport.register_bulk(url, &all_nodes),
        )
        .await;
        outcomes.extend(collect_outcomes(
            "Bulk registration",
            &[url.to_string()],
            &[bulk],
        ));

        self.persist(&self.ledger.lock().unwrap());

        outcomes
    }

    /// Runs the longest-valid-chain rule against every peer
    pub async fn consensus(&self) -> ConsensusOutcome {
        let peers = self.peers();
        let results = join_all(peers.iter().map(|peer| {
            with_timeout(self.settings.peer_timeout, self.transport.fetch_chain(peer))
        }))
        .await;
        let outcomes = collect_outcomes("Chain fetch", &peers, &results);

        let local_len = self.chain_len();
        let candidate = select_longest(local_len, results.into_iter().filter_map(Result::ok));

        let (replaced, chain) = {
            let mut ledger = self.ledger.lock().unwrap();
            let replaced = match candidate {
                Some(candidate) => {
                    ledger.adopt_chain(candidate.chain, candidate.pending_transactions)
                }
                None => false,
            };
            (replaced, ledger.chain().to_vec())
        };

        if replaced {
            self.cancel_search();
        } else {
            info!("Kept local chain of length {}", chain.len());
        }

        ConsensusOutcome {
            replaced,
            chain,
            peers: outcomes,
        }
    }

    pub fn find_block(&self, hash: &str) -> Option<Block> {
        self.ledger.lock().unwrap().find_block_by_hash(hash).cloned()
    }

    pub fn find_transaction(&self, transaction_id: &str) -> Option<(Transaction, Block)> {
        self.ledger
            .lock()
            .unwrap()
            .find_transaction_by_id(transaction_id)
            .map(|(transaction, block)| (transaction.clone(), block.clone()))
    }

    pub fn address_data(&self, address: &Address) -> AddressData {
        self.ledger.lock().unwrap().address_data(address)
    }

    /// Stops the running nonce search, if any
    fn cancel_search(&self) {
        if let Some(cancel) = self.active_search.lock().unwrap().take() {
            info!("Abandoning local nonce search");
            cancel.cancel();
        }
    }

    /// Writes the chain snapshot; failures are logged and otherwise ignored
    fn persist(&self, ledger: &Ledger) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save(ledger.chain()) {
                warn!("Failed to write chain snapshot: {}", err);
            }
        }
    }
}

/// Waits for a nonce search, cancelling it once `limit` elapses
async fn await_search<F, T>(search: F, limit: Option<Duration>, cancel: &CancelFlag) -> Result<T, NodeError>
where
    F: Future<Output = Result<T, JoinError>>,
{
    match limit {
        Some(limit) => match tokio::time::timeout(limit, search).await {
            Ok(joined) => Ok(joined?),
            Err(_) => {
                cancel.cancel();
                Err(NodeError::MiningTimedOut(limit))
            }
        },
        None => Ok(search.await?),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::schema::{NoteResponse, ReceiveBlockResponse};
    use crate::blockchain::validation::is_valid;
    use crate::network::transport::TransportError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Delivers peer calls straight to in-process nodes
    #[derive(Default)]
    pub(crate) struct Mesh {
        nodes: Mutex<HashMap<String, Arc<Node>>>,
        fixed_chains: Mutex<HashMap<String, ChainSnapshot>>,
    }

    impl Mesh {
        fn node(&self, peer: &str) -> Result<Arc<Node>, TransportError> {
            self.nodes
                .lock()
                .unwrap()
                .get(peer)
                .cloned()
                .ok_or_else(|| TransportError::Unreachable(peer.to_string()))
        }

        /// Makes `peer` answer chain fetches with a fixed snapshot
        fn serve_chain(&self, peer: &str, snapshot: ChainSnapshot) {
            self.fixed_chains
                .lock()
                .unwrap()
                .insert(peer.to_string(), snapshot);
        }
    }

    #[async_trait]
    impl PeerTransport for Mesh {
        async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, TransportError> {
            if let Some(snapshot) = self.fixed_chains.lock().unwrap().get(peer) {
                return Ok(snapshot.clone());
            }
            Ok(self.node(peer)?.snapshot())
        }

        async fn send_block(&self, peer: &str, block: &Block) -> Result<ReceiveBlockResponse, TransportError> {
            let accepted = self.node(peer)?.receive_block(block.clone());
            Ok(ReceiveBlockResponse::new(accepted, block.clone()))
        }

        async fn send_transaction(&self, peer: &str, transaction: &Transaction) -> Result<NoteResponse, TransportError> {
            let result = self.node(peer)?.submit_transaction(TransactionRequest::from(transaction));
            Ok(NoteResponse::for_submission(&result))
        }

        async fn register_node(&self, peer: &str, new_node_url: &str) -> Result<NoteResponse, TransportError> {
            self.node(peer)?.register_node(new_node_url);
            Ok(NoteResponse::new("New node registered successfully."))
        }

        async fn register_bulk(&self, peer: &str, urls: &[String]) -> Result<NoteResponse, TransportError> {
            self.node(peer)?.register_bulk(urls);
            Ok(NoteResponse::new("Bulk registration successful."))
        }
    }

    pub(crate) fn settings(url: &str) -> NodeSettings {
        NodeSettings {
            node_url: url.to_string(),
            node_address: Address(format!("miner-{}", url)),
            mining_reward: 12.5,
            peer_timeout: Duration::from_secs(2),
            mining_timeout: None,
        }
    }

    fn spawn(mesh: &Arc<Mesh>, url: &str) -> Arc<Node> {
        let node = Arc::new(Node::new(settings(url), mesh.clone()));
        mesh.nodes
            .lock()
            .unwrap()
            .insert(url.to_string(), node.clone());
        node
    }

    #[tokio::test]
    async fn test_register_and_broadcast_links_everyone() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");
        let c = spawn(&mesh, "http://c");
        let x = spawn(&mesh, "http://x");

        a.register_and_broadcast("http://b").await;
        a.register_and_broadcast("http://c").await;
        let outcomes = a.register_and_broadcast("http://x").await;

        assert_eq!(failures(&outcomes), 0);
        for node in [&a, &b, &c] {
            assert!(node.peers().contains(&"http://x".to_string()));
        }
        for url in ["http://a", "http://b", "http://c"] {
            assert!(x.peers().contains(&url.to_string()));
        }
        assert!(!x.peers().contains(&"http://x".to_string()));
    }

    #[tokio::test]
    async fn test_register_and_broadcast_tolerates_dead_peer() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let x = spawn(&mesh, "http://x");
        a.register_node("http://gone");

        let outcomes = a.register_and_broadcast("http://x").await;

        assert_eq!(failures(&outcomes), 1);
        assert!(x.peers().contains(&"http://a".to_string()));
        assert!(x.peers().contains(&"http://gone".to_string()));
    }

    #[tokio::test]
    async fn test_mine_broadcasts_block_and_reward() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");
        a.register_and_broadcast("http://b").await;

        let outcome = a.mine().await.unwrap();

        assert_eq!(outcome.block.index, 2);
        assert_eq!(a.chain_len(), 2);
        assert_eq!(b.chain_len(), 2);
        assert!(outcome.peers.iter().all(|peer| peer.ok));
        assert_eq!(
            outcome.peers[0].note.as_deref(),
            Some("New Block received and accepted")
        );

        // the reward waits in both pools for the next block
        assert!(outcome.reward.is_mining_reward());
        assert_eq!(a.snapshot().pending_transactions, vec![outcome.reward.clone()]);
        assert_eq!(b.snapshot().pending_transactions, vec![outcome.reward.clone()]);

        let second = a.mine().await.unwrap();
        assert_eq!(second.block.transactions, vec![outcome.reward]);
        assert_eq!(
            b.address_data(&a.settings().node_address).balance,
            12.5
        );
        assert!(is_valid(&b.snapshot().chain));
    }

    #[tokio::test]
    async fn test_over_balance_broadcast_is_rejected() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");

        let result = a
            .broadcast_transaction(5.0, "alice".into(), "bob".into())
            .await;

        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        let block = a.mine().await.unwrap().block;
        assert!(block.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_consensus_adopts_longer_valid_chain() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");

        a.mine().await.unwrap();
        a.mine().await.unwrap();
        for _ in 0..4 {
            b.mine().await.unwrap();
        }
        a.register_node("http://b");
        assert_eq!(a.chain_len(), 3);

        let outcome = a.consensus().await;

        assert!(outcome.replaced);
        assert_eq!(a.chain_len(), 5);
        assert_eq!(outcome.chain, b.snapshot().chain);
        assert_eq!(a.snapshot().pending_transactions, b.snapshot().pending_transactions);
    }

    #[tokio::test]
    async fn test_consensus_keeps_chain_when_longest_is_invalid() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");

        a.mine().await.unwrap();
        a.mine().await.unwrap();
        for _ in 0..4 {
            b.mine().await.unwrap();
        }
        let mut forged = b.snapshot();
        forged.chain[2].nonce += 1;
        mesh.serve_chain("http://b", forged);
        a.register_node("http://b");

        let outcome = a.consensus().await;

        assert!(!outcome.replaced);
        assert_eq!(a.chain_len(), 3);
    }

    #[tokio::test]
    async fn test_consensus_survives_unreachable_peer() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");
        b.mine().await.unwrap();
        a.register_node("http://gone");
        a.register_node("http://b");

        let outcome = a.consensus().await;

        assert!(outcome.replaced);
        assert_eq!(failures(&outcome.peers), 1);
        assert_eq!(a.chain_len(), 2);
    }

    #[tokio::test]
    async fn test_receive_block_rejects_out_of_order() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let b = spawn(&mesh, "http://b");
        b.mine().await.unwrap();
        let block = b.mine().await.unwrap().block;

        assert!(!a.receive_block(block));
        assert_eq!(a.chain_len(), 1);
    }

    #[tokio::test]
    async fn test_accepted_block_cancels_search() {
        let mesh = Arc::new(Mesh::default());
        let a = spawn(&mesh, "http://a");
        let cancel = CancelFlag::new();
        *a.active_search.lock().unwrap() = Some(cancel.clone());

        let last = a.snapshot().chain[0].clone();
        let block = Block::new(2, Vec::new(), 0, last.hash, "h".to_string());

        assert!(a.receive_block(block));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_search_timeout_cancels_worker() {
        let cancel = CancelFlag::new();
        let search = futures::future::pending::<Result<Option<u64>, JoinError>>();

        let result = await_search(search, Some(Duration::from_millis(10)), &cancel).await;

        assert!(matches!(result, Err(NodeError::MiningTimedOut(_))));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_search_within_limit_returns_nonce() {
        let cancel = CancelFlag::new();
        let search = futures::future::ready(Ok::<_, JoinError>(Some(42u64)));

        let result = await_search(search, Some(Duration::from_secs(60)), &cancel).await;

        assert_eq!(result.unwrap(), Some(42));
        assert!(!cancel.is_cancelled());
    }

    fn temp_store() -> SnapshotStore {
        let dir = std::env::temp_dir().join(format!("ledger-node-{}", uuid::Uuid::new_v4().simple()));
        SnapshotStore::new(dir).unwrap()
    }

    fn stored_len(store: &SnapshotStore) -> usize {
        store.load().unwrap().map_or(0, |chain| chain.len())
    }

    #[tokio::test]
    async fn test_mined_chain_is_resumed_from_snapshot() {
        let mesh = Arc::new(Mesh::default());
        let store = temp_store();
        let a = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());

        a.mine().await.unwrap();
        a.mine().await.unwrap();
        assert_eq!(stored_len(&store), 3);

        let resumed = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());
        assert_eq!(resumed.chain_len(), 3);
        assert_eq!(resumed.snapshot().chain, a.snapshot().chain);
        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_snapshot_starts_from_genesis() {
        let mesh = Arc::new(Mesh::default());
        let store = temp_store();
        let a = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());
        a.mine().await.unwrap();

        let mut forged = store.load().unwrap().unwrap();
        forged[1].nonce += 1;
        store.save(&forged).unwrap();
        let resumed = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());
        assert_eq!(resumed.chain_len(), 1);

        std::fs::write(store.path(), b"{ truncated").unwrap();
        let resumed = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());
        assert_eq!(resumed.chain_len(), 1);
        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }

    #[tokio::test]
    async fn test_snapshot_written_on_broadcast_paths() {
        let mesh = Arc::new(Mesh::default());
        let store = temp_store();
        let a = Node::new(settings("http://a"), mesh.clone()).with_store(store.clone());
        assert!(store.load().unwrap().is_none());

        a.register_and_broadcast("http://gone").await;
        assert_eq!(stored_len(&store), 1);

        std::fs::remove_file(store.path()).unwrap();
        a.broadcast_transaction(1.0, Address::mining_reward(), "bob".into())
            .await
            .unwrap();
        assert_eq!(stored_len(&store), 1);

        a.mine().await.unwrap();
        assert_eq!(stored_len(&store), 2);
        let _ = std::fs::remove_dir_all(store.path().parent().unwrap());
    }
}
