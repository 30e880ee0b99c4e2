//! Search-tree nodes with arena allocation.
//!
//! Every node generated during one search call is stored in a contiguous
//! `Vec` and referenced by `NodeId`. A node records the index of the node that
//! generated it, so plan reconstruction is a walk over indices back to the
//! root rather than a chain of owned references.

/// Index of a node inside a `NodeArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// One point in the search tree.
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    pub state: S,
    /// Node that generated this one; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Transition taken from the parent; `None` only for the root.
    pub action: Option<A>,
    /// Path cost from the root. Set once, at creation.
    pub cumulative_cost: f64,
}

impl<S, A> Node<S, A> {
    /// Creates a root node: no parent, no action, zero cost.
    pub fn root(state: S) -> Self {
        Node {
            state,
            parent: None,
            action: None,
            cumulative_cost: 0.0,
        }
    }

    /// Creates a child node reached from `parent` via `action`.
    pub fn child(state: S, parent: NodeId, action: A, cumulative_cost: f64) -> Self {
        Node {
            state,
            parent: Some(parent),
            action: Some(action),
            cumulative_cost,
        }
    }
}

/// Arena holding every node generated during a single search call.
#[derive(Debug)]
pub struct NodeArena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Allocates a node and returns its ID.
    pub fn allocate(&mut self, node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S, A: Clone> NodeArena<S, A> {
    /// Returns the actions leading from the root to `id`, oldest first.
    ///
    /// The root yields an empty plan.
    pub fn actions(&self, id: NodeId) -> Vec<A> {
        let mut plan = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let node = self.get(cur);
            if let Some(action) = &node.action {
                plan.push(action.clone());
            }
            current = node.parent;
        }
        plan.reverse();
        plan
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_parent_action_or_cost() {
        let node: Node<u8, char> = Node::root(7);
        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.cumulative_cost, 0.0);
    }

    #[test]
    fn root_plan_is_empty() {
        let mut arena: NodeArena<u8, char> = NodeArena::new();
        let root = arena.allocate(Node::root(0));
        assert!(arena.actions(root).is_empty());
    }

    #[test]
    fn actions_are_returned_oldest_first() {
        let mut arena = NodeArena::new();
        let root = arena.allocate(Node::root(0));
        let a = arena.allocate(Node::child(1, root, 'a', 1.0));
        let b = arena.allocate(Node::child(2, a, 'b', 2.0));
        let c = arena.allocate(Node::child(3, b, 'c', 3.0));
        assert_eq!(arena.actions(c), vec!['a', 'b', 'c']);
        // Reading a plan never disturbs ancestors.
        assert_eq!(arena.actions(b), vec!['a', 'b']);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn siblings_share_a_parent() {
        let mut arena = NodeArena::new();
        let root = arena.allocate(Node::root("start"));
        let left = arena.allocate(Node::child("l", root, 'L', 1.0));
        let right = arena.allocate(Node::child("r", root, 'R', 1.0));
        assert_eq!(arena.get(left).parent, Some(root));
        assert_eq!(arena.get(right).parent, Some(root));
        assert_eq!(arena.actions(right), vec!['R']);
    }
}
