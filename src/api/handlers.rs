use actix_web::{web, HttpResponse, Responder};
use log::warn;

use crate::api::schema::{
    AddressResponse, BlockResponse, BroadcastTransactionResponse, ChainSnapshot,
    ConsensusResponse, MineResponse, NoteResponse, ReceiveBlockRequest, ReceiveBlockResponse,
    RegisterBroadcastResponse, RegisterBulkRequest, RegisterNodeRequest,
    TransactionLookupResponse, TransactionRequest,
};
use crate::blockchain::{Address, LedgerError};
use crate::network::{Node, NodeError};

/// Data structure for the node state
pub type NodeData = web::Data<Node>;

/// Get the full blockchain
///
/// Returns the chain, the pending transactions and the peer registry.
/// Peers fetch this during consensus.
#[utoipa::path(
    get,
    path = "/blockchain",
    responses(
        (status = 200, description = "Node state retrieved successfully", body = ChainSnapshot)
    )
)]
pub async fn get_blockchain(node: NodeData) -> impl Responder {
    HttpResponse::Ok().json(node.snapshot())
}

/// Add a transaction to the pending pool
///
/// Rejected with "Invalid Transaction" when the amount exceeds the sender's balance
#[utoipa::path(
    post,
    path = "/transaction",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Submission result", body = NoteResponse)
    )
)]
pub async fn new_transaction(
    node: NodeData,
    transaction_req: web::Json<TransactionRequest>,
) -> impl Responder {
    let result = node.submit_transaction(transaction_req.into_inner());

    HttpResponse::Ok().json(NoteResponse::for_submission(&result))
}

/// Create a transaction and broadcast it
///
/// Queues the transaction locally and forwards it to every peer
#[utoipa::path(
    post,
    path = "/transaction/broadcast",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Transaction broadcast, or a note saying why it was refused", body = BroadcastTransactionResponse)
    )
)]
pub async fn broadcast_transaction(
    node: NodeData,
    transaction_req: web::Json<TransactionRequest>,
) -> impl Responder {
    let request = transaction_req.into_inner();

    match node
        .broadcast_transaction(
            request.amount,
            Address(request.sender),
            Address(request.recipient),
        )
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(BroadcastTransactionResponse {
            note: "Transaction created and broadcast successfully.".to_string(),
            transaction: outcome.transaction,
            peers: outcome.peers,
        }),
        Err(err) => HttpResponse::Ok().json(NoteResponse::for_submission(&Err(err))),
    }
}

/// Mine a new block
///
/// Seals the pending transactions, broadcasts the block and queues a mining reward
#[utoipa::path(
    get,
    path = "/mine",
    responses(
        (status = 200, description = "Block mined successfully", body = MineResponse),
        (status = 409, description = "Mining abandoned because the chain moved"),
        (status = 500, description = "Mining failed")
    )
)]
pub async fn mine_block(node: NodeData) -> impl Responder {
    match node.mine().await {
        Ok(outcome) => HttpResponse::Ok().json(MineResponse {
            note: "Block mined and broadcast successfully".to_string(),
            block: outcome.block,
            reward: outcome.reward,
            peers: outcome.peers,
        }),
        Err(err @ NodeError::MiningCancelled)
        | Err(err @ NodeError::Ledger(LedgerError::StaleTip { .. })) => {
            warn!("Mining abandoned: {}", err);
            HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("Failed to mine block: {}", err)
            }))
        }
        Err(err) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mine block: {}", err)
        })),
    }
}

/// Receive a block mined by a peer
///
/// Accepted only if it extends the local chain by exactly one block
#[utoipa::path(
    post,
    path = "/receive-new-block",
    request_body = ReceiveBlockRequest,
    responses(
        (status = 200, description = "Block accepted or rejected", body = ReceiveBlockResponse)
    )
)]
pub async fn receive_new_block(
    node: NodeData,
    block_req: web::Json<ReceiveBlockRequest>,
) -> impl Responder {
    let block = block_req.into_inner().new_block;
    let accepted = node.receive_block(block.clone());

    HttpResponse::Ok().json(ReceiveBlockResponse::new(accepted, block))
}

/// Register a node and introduce it to the network
#[utoipa::path(
    post,
    path = "/register-and-broadcast-node",
    request_body = RegisterNodeRequest,
    responses(
        (status = 200, description = "Node registered with the network", body = RegisterBroadcastResponse)
    )
)]
pub async fn register_and_broadcast_node(
    node: NodeData,
    register_req: web::Json<RegisterNodeRequest>,
) -> impl Responder {
    let peers = node.register_and_broadcast(&register_req.new_node_url).await;

    HttpResponse::Ok().json(RegisterBroadcastResponse {
        note: "New node registered with network successfully.".to_string(),
        peers,
    })
}

/// Register a single node
#[utoipa::path(
    post,
    path = "/register-node",
    request_body = RegisterNodeRequest,
    responses(
        (status = 200, description = "Node registered", body = NoteResponse)
    )
)]
pub async fn register_node(
    node: NodeData,
    register_req: web::Json<RegisterNodeRequest>,
) -> impl Responder {
    node.register_node(&register_req.new_node_url);

    HttpResponse::Ok().json(NoteResponse::new("New node registered successfully."))
}

/// Register a batch of nodes
#[utoipa::path(
    post,
    path = "/register-nodes-bulk",
    request_body = RegisterBulkRequest,
    responses(
        (status = 200, description = "Nodes registered", body = NoteResponse)
    )
)]
pub async fn register_nodes_bulk(
    node: NodeData,
    bulk_req: web::Json<RegisterBulkRequest>,
) -> impl Responder {
    node.register_bulk(&bulk_req.all_network_nodes);

    HttpResponse::Ok().json(NoteResponse::new("Bulk registration successful."))
}

/// Run the longest-valid-chain rule against every peer
#[utoipa::path(
    get,
    path = "/consensus",
    responses(
        (status = 200, description = "Consensus result", body = ConsensusResponse)
    )
)]
pub async fn consensus(node: NodeData) -> impl Responder {
    let outcome = node.consensus().await;
    let note = if outcome.replaced {
        "This chain has been replaced."
    } else {
        "Current chain has not been replaced"
    };

    HttpResponse::Ok().json(ConsensusResponse {
        note: note.to_string(),
        chain: outcome.chain,
        peers: outcome.peers,
    })
}

/// Get a block by its hash
#[utoipa::path(
    get,
    path = "/block/{hash}",
    params(("hash" = String, Path, description = "Hash of the block")),
    responses(
        (status = 200, description = "The block, or null", body = BlockResponse)
    )
)]
pub async fn get_block(node: NodeData, hash: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(BlockResponse {
        block: node.find_block(&hash),
    })
}

/// Get a transaction by its id, with the block sealing it
#[utoipa::path(
    get,
    path = "/transaction/{id}",
    params(("id" = String, Path, description = "Id of the transaction")),
    responses(
        (status = 200, description = "The transaction and block, or nulls", body = TransactionLookupResponse)
    )
)]
pub async fn get_transaction(node: NodeData, id: web::Path<String>) -> impl Responder {
    let (transaction, block) = match node.find_transaction(&id) {
        Some((transaction, block)) => (Some(transaction), Some(block)),
        None => (None, None),
    };

    HttpResponse::Ok().json(TransactionLookupResponse { transaction, block })
}

/// Get every transaction of an address and its balance
#[utoipa::path(
    get,
    path = "/address/{address}",
    params(("address" = String, Path, description = "The address to look up")),
    responses(
        (status = 200, description = "Address transactions and balance", body = AddressResponse)
    )
)]
pub async fn get_address(node: NodeData, address: web::Path<String>) -> impl Responder {
    let address = Address(address.into_inner());

    HttpResponse::Ok().json(AddressResponse {
        address_data: node.address_data(&address).into(),
    })
}
