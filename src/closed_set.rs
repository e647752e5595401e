//! Visited-state table keyed by canonical board encoding.
//!
//! A fixed array of buckets, each chaining `(key, cost)` entries. The key
//! covers only interior cells. Boards keep walls and goals on the outer ring
//! (see [`Board::new`]), so no brick ever moves there.

use tracing::trace;

use crate::board::{Board, Cell};

pub const BUCKET_COUNT: usize = 1000;

/// How a search treats a state it has already recorded.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RevisitPolicy {
    /// A recorded state is never admitted again.
    InsertOnce,
    /// A recorded state is admitted again when reached more cheaply.
    Reopen,
}

#[derive(Clone, Debug)]
struct Entry {
    key: String,
    cost: u32,
}

#[derive(Clone, Debug)]
pub struct ClosedSet {
    buckets: Vec<Vec<Entry>>,
    len: usize,
}

impl Default for ClosedSet {
    fn default() -> Self {
        ClosedSet::new()
    }
}

/// Encodes interior cell `v` as the character `'A' + v`.
pub fn state_key(board: &Board) -> String {
    let (height, width) = (board.height(), board.width());
    board
        .rows()
        .skip(1)
        .take(height - 2)
        .flat_map(|row| &row[1..width - 1])
        .map(|&v| encode(v))
        .collect()
}

fn encode(v: Cell) -> char {
    let code = i64::from(b'A') + i64::from(v);
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Position-weighted sum of character codes, modulo the bucket count.
pub fn bucket_index(key: &str) -> usize {
    let total = key
        .chars()
        .zip(1u64..)
        .fold(0u64, |acc, (c, weight)| {
            acc.wrapping_add(u64::from(c as u32).wrapping_mul(weight))
        });
    (total % BUCKET_COUNT as u64) as usize
}

impl ClosedSet {
    pub fn new() -> ClosedSet {
        ClosedSet {
            buckets: vec![Vec::new(); BUCKET_COUNT],
            len: 0,
        }
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Best known cost for `key`, or `None` if it was never recorded.
    pub fn value(&self, key: &str) -> Option<u32> {
        self.buckets[bucket_index(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.cost)
    }

    /// Appends a new entry without looking for an existing one.
    pub fn insert(&mut self, key: String, cost: u32) {
        let index = bucket_index(&key);
        self.buckets[index].push(Entry { key, cost });
        self.len += 1;
    }

    /// Overwrites the cost of an existing entry. Returns false if absent.
    pub fn update(&mut self, key: &str, cost: u32) -> bool {
        match self.buckets[bucket_index(key)]
            .iter_mut()
            .find(|e| e.key == key)
        {
            Some(entry) => {
                entry.cost = cost;
                true
            }
            None => false,
        }
    }

    /// Records `key` at `cost` if the policy lets the state be expanded,
    /// returning whether it should enter the frontier.
    pub fn admit(&mut self, key: String, cost: u32, policy: RevisitPolicy) -> bool {
        match (self.value(&key), policy) {
            (None, _) => {
                self.insert(key, cost);
                true
            }
            (Some(known), RevisitPolicy::Reopen) if known > cost => {
                trace!(known, cost, "reopening state");
                self.update(&key, cost);
                true
            }
            _ => false,
        }
    }
}
