use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use tracing::debug;

/// Capped, time-windowed set of recently listed transaction ids
///
/// Entries expire after `ttl` and the oldest entries are evicted once
/// `capacity` is reached, so memory stays bounded over a long-running scan.
#[derive(Debug)]
pub struct SeenTxids {
    order: VecDeque<(String, Instant)>,
    members: HashSet<String>,
    capacity: usize,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl SeenTxids {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            order: VecDeque::new(),
            members: HashSet::new(),
            capacity: capacity.max(1),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Return only ids not seen within the window, and remember them
    pub fn filter_new(&mut self, txids: Vec<String>) -> Vec<String> {
        self.filter_new_at(txids, Instant::now())
    }

    pub fn filter_new_at(&mut self, txids: Vec<String>, now: Instant) -> Vec<String> {
        self.expire(now);

        let mut fresh = Vec::new();
        for txid in txids {
            if self.members.contains(&txid) {
                self.hits += 1;
                continue;
            }
            self.misses += 1;
            self.insert(txid.clone(), now);
            fresh.push(txid);
        }
        fresh
    }

    pub fn get_stats(&self) -> SeenStats {
        SeenStats {
            hits: self.hits,
            misses: self.misses,
            size: self.members.len(),
        }
    }

    fn insert(&mut self, txid: String, now: Instant) {
        while self.order.len() >= self.capacity {
            if let Some((evicted, _)) = self.order.pop_front() {
                self.members.remove(&evicted);
            }
        }
        self.members.insert(txid.clone());
        self.order.push_back((txid, now));
    }

    fn expire(&mut self, now: Instant) {
        let mut expired = 0;
        while let Some((_, seen_at)) = self.order.front() {
            if now.saturating_duration_since(*seen_at) < self.ttl {
                break;
            }
            if let Some((txid, _)) = self.order.pop_front() {
                self.members.remove(&txid);
                expired += 1;
            }
        }
        if expired > 0 {
            debug!("Expired {} txids from seen window", expired);
        }
    }
}

/// Seen-window statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

impl SeenStats {
    /// Share of listed ids that were already seen, as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            (self.hits as f64 / (self.hits + self.misses) as f64) * 100.0
        }
    }
}
