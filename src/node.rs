//! Search graph storage.
//!
//! Nodes live in one growable arena and point at their parent by index, so
//! any number of frontier entries can share ancestors. The arena is dropped
//! as a whole when the search returns.

use crate::board::Board;
use crate::moves::Move;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct SearchNode {
    pub board: Board,
    /// Moves from the root, g(n).
    pub cost: u32,
    pub via: Option<Move>,
    pub parent: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn root(&mut self, board: Board) -> NodeId {
        self.push(SearchNode {
            board,
            cost: 0,
            via: None,
            parent: None,
        })
    }

    pub fn child(&mut self, parent: NodeId, via: Move, board: Board) -> NodeId {
        let cost = self[parent].cost + 1;
        self.push(SearchNode {
            board,
            cost,
            via: Some(via),
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves leading from the root to `id`, oldest first.
    pub fn path_to(&self, id: NodeId) -> Vec<Move> {
        let mut path: Vec<Move> = std::iter::successors(Some(id), |&n| self[n].parent)
            .filter_map(|n| self[n].via)
            .collect();
        path.reverse();
        path
    }
}

impl std::ops::Index<NodeId> for NodeArena {
    type Output = SearchNode;
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
