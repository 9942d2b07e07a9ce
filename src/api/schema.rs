//! Request and response bodies shared by the HTTP routes and the peer client

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::{AddressData, Block, LedgerError, Transaction};
use crate::network::PeerOutcome;

/// Body of `POST /transaction` and `POST /transaction/broadcast`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// The amount to transfer
    pub amount: f64,

    /// The sender's address
    pub sender: String,

    /// The recipient's address
    pub recipient: String,

    /// Id assigned by the node that created the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl From<&Transaction> for TransactionRequest {
    fn from(transaction: &Transaction) -> Self {
        TransactionRequest {
            amount: transaction.amount,
            sender: transaction.sender.0.clone(),
            recipient: transaction.recipient.0.clone(),
            transaction_id: Some(transaction.transaction_id.clone()),
        }
    }
}

/// A plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    pub note: String,
}

impl NoteResponse {
    pub fn new(note: impl Into<String>) -> Self {
        NoteResponse { note: note.into() }
    }

    /// Note answering a transaction submission
    pub fn for_submission(result: &Result<u64, LedgerError>) -> Self {
        match result {
            Ok(index) => Self::new(format!("Transaction will be added in block {}.", index)),
            Err(LedgerError::DuplicateTransaction(_)) => Self::new("Duplicate Transaction"),
            Err(_) => Self::new("Invalid Transaction"),
        }
    }
}

/// Response of `POST /transaction/broadcast`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BroadcastTransactionResponse {
    pub note: String,

    pub transaction: Transaction,

    /// How each peer answered
    pub peers: Vec<PeerOutcome>,
}

/// Response of `GET /mine`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MineResponse {
    pub note: String,

    /// The newly mined block
    pub block: Block,

    /// The reward transaction queued for the next block
    pub reward: Transaction,

    /// How each peer answered the block broadcast
    pub peers: Vec<PeerOutcome>,
}

/// Body of `POST /receive-new-block`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveBlockRequest {
    pub new_block: Block,
}

/// Response of `POST /receive-new-block`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveBlockResponse {
    pub note: String,

    pub accepted: bool,

    pub new_block: Block,
}

impl ReceiveBlockResponse {
    pub fn new(accepted: bool, new_block: Block) -> Self {
        let note = if accepted {
            "New Block received and accepted"
        } else {
            "New Block Rejected."
        };

        ReceiveBlockResponse {
            note: note.to_string(),
            accepted,
            new_block,
        }
    }
}

/// Body of `POST /register-node` and `POST /register-and-broadcast-node`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNodeRequest {
    pub new_node_url: String,
}

/// Body of `POST /register-nodes-bulk`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBulkRequest {
    pub all_network_nodes: Vec<String>,
}

/// Response of `POST /register-and-broadcast-node`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterBroadcastResponse {
    pub note: String,

    pub peers: Vec<PeerOutcome>,
}

/// A node's full state, served by `GET /blockchain`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,

    pub pending_transactions: Vec<Transaction>,

    #[serde(default)]
    pub current_node_url: String,

    #[serde(default)]
    pub network_nodes: Vec<String>,
}

/// Response of `GET /consensus`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsensusResponse {
    pub note: String,

    /// The chain this node holds after the consensus pass
    pub chain: Vec<Block>,

    pub peers: Vec<PeerOutcome>,
}

/// Response of `GET /block/{hash}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlockResponse {
    pub block: Option<Block>,
}

/// Response of `GET /transaction/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionLookupResponse {
    pub transaction: Option<Transaction>,

    pub block: Option<Block>,
}

/// Transactions and balance of one address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDataResponse {
    pub address_transactions: Vec<Transaction>,

    pub address_balance: f64,
}

impl From<AddressData> for AddressDataResponse {
    fn from(data: AddressData) -> Self {
        AddressDataResponse {
            address_transactions: data.transactions,
            address_balance: data.balance,
        }
    }
}

/// Response of `GET /address/{address}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub address_data: AddressDataResponse,
}
