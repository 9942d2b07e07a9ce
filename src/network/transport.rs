//! Outbound requests to peer nodes

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use std::future::Future;
use std::time::Duration;

use crate::api::schema::{
    ChainSnapshot, NoteResponse, ReceiveBlockRequest, ReceiveBlockResponse, RegisterBulkRequest,
    RegisterNodeRequest, TransactionRequest,
};
use crate::blockchain::{Block, Transaction};

/// Errors that can occur while talking to a peer
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Peer did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Peer unreachable: {0}")]
    Unreachable(String),
}

/// The peer protocol as seen from the sending node
#[async_trait]
pub trait PeerTransport: Send + Sync {
    /// Fetches a peer's chain and pending transactions
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, TransportError>;

    /// Offers a newly mined block to a peer
    async fn send_block(&self, peer: &str, block: &Block) -> Result<ReceiveBlockResponse, TransportError>;

    /// Forwards a transaction to a peer's pending pool
    async fn send_transaction(&self, peer: &str, transaction: &Transaction) -> Result<NoteResponse, TransportError>;

    /// Asks a peer to register a single node
    async fn register_node(&self, peer: &str, new_node_url: &str) -> Result<NoteResponse, TransportError>;

    /// Asks a peer to register a batch of nodes
    async fn register_bulk(&self, peer: &str, urls: &[String]) -> Result<NoteResponse, TransportError>;
}

/// Bounds a peer call so a silent peer cannot stall a fan-out
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| TransportError::Timeout(limit))?
}

/// Peer transport over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(HttpTransport { client })
    }

    fn endpoint(peer: &str, path: &str) -> String {
        format!("{}{}", peer.trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, peer: &str, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(Self::endpoint(peer, path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PeerTransport for HttpTransport {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, TransportError> {
        let response = self
            .client
            .get(Self::endpoint(peer, "/blockchain"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn send_block(&self, peer: &str, block: &Block) -> Result<ReceiveBlockResponse, TransportError> {
        let body = ReceiveBlockRequest {
            new_block: block.clone(),
        };

        self.post(peer, "/receive-new-block", &body).await
    }

    async fn send_transaction(&self, peer: &str, transaction: &Transaction) -> Result<NoteResponse, TransportError> {
        self.post(peer, "/transaction", &TransactionRequest::from(transaction))
            .await
    }

    async fn register_node(&self, peer: &str, new_node_url: &str) -> Result<NoteResponse, TransportError> {
        let body = RegisterNodeRequest {
            new_node_url: new_node_url.to_string(),
        };

        self.post(peer, "/register-node", &body).await
    }

    async fn register_bulk(&self, peer: &str, urls: &[String]) -> Result<NoteResponse, TransportError> {
        let body = RegisterBulkRequest {
            all_network_nodes: urls.to_vec(),
        };

        self.post(peer, "/register-nodes-bulk", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        assert_eq!(
            HttpTransport::endpoint("http://localhost:3001/", "/blockchain"),
            "http://localhost:3001/blockchain"
        );
        assert_eq!(
            HttpTransport::endpoint("http://localhost:3002", "/register-node"),
            "http://localhost:3002/register-node"
        );
    }

    #[tokio::test]
    async fn test_with_timeout_reports_slow_peer() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, TransportError>(())
        };

        let result = with_timeout(Duration::from_millis(10), slow).await;

        assert!(matches!(result, Err(TransportError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_an_error() {
        let transport = HttpTransport::new(Duration::from_millis(500)).unwrap();

        let result = transport.fetch_chain("http://127.0.0.1:9").await;

        assert!(result.is_err());
    }
}
