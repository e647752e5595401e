//! Open lists. Each search owns its own instance.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

use crate::heuristic::manhattan;
use crate::node::{NodeId, SearchNode};

/// Selection order over the nodes waiting to be expanded.
pub trait Frontier {
    fn push(&mut self, id: NodeId, node: &SearchNode);
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out.
#[derive(Debug, Default)]
pub struct FifoQueue(VecDeque<NodeId>);

impl Frontier for FifoQueue {
    fn push(&mut self, id: NodeId, _: &SearchNode) {
        self.0.push_back(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// First in, last out.
#[derive(Debug, Default)]
pub struct FiloStack(Vec<NodeId>);

impl Frontier for FiloStack {
    fn push(&mut self, id: NodeId, _: &SearchNode) {
        self.0.push(id);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Lowest f(n) = g(n) + h(n) first; among equal f, the earliest inserted.
#[derive(Debug, Default)]
pub struct BestFirst {
    heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
    inserted: u64,
}

impl Frontier for BestFirst {
    fn push(&mut self, id: NodeId, node: &SearchNode) {
        let f = node.cost + manhattan(&node.board);
        self.heap.push(Reverse((f, self.inserted, id)));
        self.inserted += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
