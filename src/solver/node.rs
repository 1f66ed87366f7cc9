//! Index-addressed arena of search nodes.
//!
//! Nodes only point back at their parent by index, so the node graph of a run
//! is a tree and is dropped in one piece with the arena.

use crate::board::Board;
use crate::moves::Move;

pub(crate) type NodeId = usize;

/// The root node is always the first one pushed.
pub(crate) const ROOT: NodeId = 0;

pub(crate) struct Node {
    pub board: Board,
    pub parent: Option<NodeId>,
    /// The move that led here from the parent.
    pub via: Option<Move>,
    /// Moves from the root.
    pub cost: u32,
}

pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new(root: Board) -> Self {
        Self {
            nodes: vec![Node {
                board: root,
                parent: None,
                via: None,
                cost: 0,
            }],
        }
    }

    pub fn push(&mut self, board: Board, parent: NodeId, via: Move) -> NodeId {
        let cost = self.nodes[parent].cost + 1;
        self.nodes.push(Node {
            board,
            parent: Some(parent),
            via: Some(via),
            cost,
        });
        self.nodes.len() - 1
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Walks parent links from `id` back to the root and returns the moves in
    /// play order.
    pub fn path(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.nodes[id].cost as usize);
        let mut current = Some(id);
        while let Some(node) = current.map(|id| &self.nodes[id]) {
            moves.extend(node.via);
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}
