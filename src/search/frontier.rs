//! Frontier policies for graph search.
//!
//! The frontier holds nodes that have been generated but not yet expanded.
//! BFS uses a FIFO queue; UCS and A* use a min-priority queue. Neither
//! filters duplicate states: re-expansion is prevented by the closed set in
//! the search driver, not here.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::node::NodeId;

/// A container of pending nodes with a fixed pop order.
pub trait Frontier {
    /// Inserts a node. Policies without an ordering key ignore `priority`.
    fn push(&mut self, node: NodeId, priority: f64);

    /// Removes and returns the next node, or `None` when empty.
    fn pop(&mut self) -> Option<NodeId>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}

/// First-in, first-out frontier.
#[derive(Debug, Default)]
pub struct Queue {
    items: VecDeque<NodeId>,
}

impl Queue {
    pub fn new() -> Self {
        Queue {
            items: VecDeque::new(),
        }
    }
}

impl Frontier for Queue {
    fn push(&mut self, node: NodeId, _priority: f64) {
        self.items.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.items.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// priority first, and among equal priorities the earliest push.
#[derive(Debug)]
struct Entry {
    priority: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority frontier with stable (insertion-order) tie-breaking.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl Frontier for PriorityQueue {
    fn push(&mut self, node: NodeId, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.node)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
