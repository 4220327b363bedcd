// Caller-owned request deduplication for per-player fetches.

/// Proof that a request was started. Completed responses are checked against
/// the guard with [`RequestGuard::accept`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    pub generation: u64,
}

/// Tracks the most recently requested key and a generation counter.
///
/// Starting a request for the key already in flight is a no-op. Starting one
/// for a different key bumps the generation, so responses belonging to an
/// earlier selection are recognised as stale and dropped.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard<K> {
    current: Option<K>,
    generation: u64,
}

impl<K: Clone + PartialEq> RequestGuard<K> {
    pub fn new() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }

    /// Start a request for `key`. `None` when `key` is already the current
    /// request.
    pub fn begin(&mut self, key: K) -> Option<Ticket<K>> {
        if self.current.as_ref() == Some(&key) {
            return None;
        }
        self.generation += 1;
        self.current = Some(key.clone());
        Some(Ticket {
            key,
            generation: self.generation,
        })
    }

    /// Whether a response for `ticket` still belongs to the current request.
    pub fn accept(&self, ticket: &Ticket<K>) -> bool {
        ticket.generation == self.generation && self.current.as_ref() == Some(&ticket.key)
    }

    /// Forget the current key so the next `begin` for it goes through again.
    /// Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.current = None;
        self.generation += 1;
    }

    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
