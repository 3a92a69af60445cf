//! Breadth-first frontier with an enqueue-time visited set
//!
//! A URL is marked visited the moment it is enqueued, not when it is fetched.
//! A page linked from two parents before either copy is processed therefore
//! lands on the queue exactly once.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched, tagged with its discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The normalized URL to fetch
    pub url: Url,

    /// Zero-based discovery sequence number
    pub order: u64,
}

/// FIFO work queue plus the set of every URL ever enqueued
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    next_order: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` to the tail unless it was enqueued before
    ///
    /// Returns `true` if the URL was new. The visited check and insert are a
    /// single `HashSet::insert`, so a URL can never be half-registered.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if !self.visited.insert(url.as_str().to_owned()) {
            return false;
        }

        let order = self.next_order;
        self.next_order += 1;
        self.queue.push_back(FrontierEntry { url, order });
        true
    }

    /// Removes and returns the oldest entry
    pub fn dequeue(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    /// Returns true if the URL has ever been enqueued
    pub fn contains(&self, url: &Url) -> bool {
        self.visited.contains(url.as_str())
    }

    /// Entries still waiting to be fetched
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Size of the visited set (URLs ever enqueued)
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
