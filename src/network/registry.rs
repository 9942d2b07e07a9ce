use log::info;

/// The set of peers this node broadcasts to and queries during consensus
///
/// Registration order is preserved. The node's own URL is never stored.
#[derive(Debug, Clone)]
pub struct PeerRegistry {
    self_url: String,
    peers: Vec<String>,
}

impl PeerRegistry {
    pub fn new(self_url: impl Into<String>) -> Self {
        PeerRegistry {
            self_url: self_url.into(),
            peers: Vec::new(),
        }
    }

    pub fn self_url(&self) -> &str {
        &self.self_url
    }

    /// Registers a peer unless it is already known or is this node
    ///
    /// # Returns
    ///
    /// true if the peer was added
    pub fn register(&mut self, url: &str) -> bool {
        if url == self.self_url || self.contains(url) {
            return false;
        }

        info!("Registered peer {}", url);
        self.peers.push(url.to_string());
        true
    }

    /// Registers every URL of a batch
    ///
    /// # Returns
    ///
    /// The number of peers added
    pub fn register_bulk<'a, I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        urls.into_iter().filter(|url| self.register(url)).count()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.peers.iter().any(|peer| peer == url)
    }

    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    /// Every known peer followed by this node
    pub fn with_self(&self) -> Vec<String> {
        let mut all = self.peers.clone();
        all.push(self.self_url.clone());
        all
    }
}
