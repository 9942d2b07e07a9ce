use log::warn;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transport::TransportError;
use crate::api::schema::{ChainSnapshot, NoteResponse, ReceiveBlockResponse};

/// How one peer answered a fan-out request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PeerOutcome {
    /// URL of the peer
    pub peer: String,

    /// Whether the peer answered at all
    pub ok: bool,

    /// The peer's own note, when it answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Why the request failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Responses that carry a note worth reporting back
pub trait PeerNote {
    fn note(&self) -> Option<String>;
}

impl PeerNote for NoteResponse {
    fn note(&self) -> Option<String> {
        Some(self.note.clone())
    }
}

impl PeerNote for ReceiveBlockResponse {
    fn note(&self) -> Option<String> {
        Some(self.note.clone())
    }
}

impl PeerNote for ChainSnapshot {
    fn note(&self) -> Option<String> {
        Some(format!("chain length {}", self.chain.len()))
    }
}

impl PeerOutcome {
    pub fn from_result<T: PeerNote>(peer: &str, result: &Result<T, TransportError>) -> Self {
        match result {
            Ok(response) => PeerOutcome {
                peer: peer.to_string(),
                ok: true,
                note: response.note(),
                error: None,
            },
            Err(err) => PeerOutcome {
                peer: peer.to_string(),
                ok: false,
                note: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Pairs fan-out results with their peers, logging every failure
///
/// A failed peer never aborts the operation; it catches up on the next
/// consensus pass.
pub fn collect_outcomes<T: PeerNote>(
    operation: &str,
    peers: &[String],
    results: &[Result<T, TransportError>],
) -> Vec<PeerOutcome> {
    peers
        .iter()
        .zip(results)
        .map(|(peer, result)| {
            if let Err(err) = result {
                warn!("{} to {} failed: {}", operation, peer, err);
            }
            PeerOutcome::from_result(peer, result)
        })
        .collect()
}

/// Number of peers that did not answer
pub fn failures(outcomes: &[PeerOutcome]) -> usize {
    outcomes.iter().filter(|outcome| !outcome.ok).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_outcomes_keeps_partial_success() {
        let peers = vec!["http://b".to_string(), "http://c".to_string()];
        let results = vec![
            Ok(NoteResponse::new("ok")),
            Err(TransportError::Unreachable("http://c".to_string())),
        ];

        let outcomes = collect_outcomes("Registration", &peers, &results);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].ok);
        assert_eq!(outcomes[0].note.as_deref(), Some("ok"));
        assert!(!outcomes[1].ok);
        assert!(outcomes[1].error.as_deref().unwrap().contains("http://c"));
        assert_eq!(failures(&outcomes), 1);
    }
}
