//! Lattice node addressing and the memoized node-value cache.

use std::collections::HashMap;

use num_traits::Float;

/// Address of a node in a recombining lattice.
///
/// A node is identified by how many of its `step` moves were up moves;
/// the order of the moves does not matter. Always `num_up_moves <= step`.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::NodeIndex;
///
/// let node = NodeIndex::new(1, 2);
/// // up-then-down and down-then-up land on the same node
/// assert_eq!(NodeIndex::ROOT.up().down(), NodeIndex::ROOT.down().up());
/// assert_eq!(node.up(), NodeIndex::new(2, 3));
/// assert_eq!(node.down(), NodeIndex::new(1, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex {
    /// Number of up moves taken to reach the node.
    pub num_up_moves: usize,
    /// Time step of the node (0 at the root).
    pub step: usize,
}

impl NodeIndex {
    /// The root node `(0, 0)`.
    pub const ROOT: NodeIndex = NodeIndex {
        num_up_moves: 0,
        step: 0,
    };

    /// Creates a node index.
    #[inline]
    pub const fn new(num_up_moves: usize, step: usize) -> Self {
        Self { num_up_moves, step }
    }

    /// Child reached by an up move.
    #[inline]
    pub const fn up(self) -> Self {
        Self::new(self.num_up_moves + 1, self.step + 1)
    }

    /// Child reached by a down move.
    #[inline]
    pub const fn down(self) -> Self {
        Self::new(self.num_up_moves, self.step + 1)
    }

    /// Number of down moves taken to reach the node.
    #[inline]
    pub const fn num_down_moves(self) -> usize {
        self.step - self.num_up_moves
    }

    /// Returns whether the node lies in a lattice of `num_steps` steps.
    #[inline]
    pub const fn is_within(self, num_steps: usize) -> bool {
        self.num_up_moves <= self.step && self.step <= num_steps
    }
}

/// Number of distinct nodes in a lattice of `num_steps` steps.
///
/// `(n + 1)(n + 2) / 2`: step `k` holds `k + 1` nodes.
///
/// # Examples
/// ```
/// use pricer_pricing::lattice::node_count;
///
/// assert_eq!(node_count(0), 1);
/// assert_eq!(node_count(6), 28);
/// ```
#[inline]
pub const fn node_count(num_steps: usize) -> usize {
    (num_steps + 1) * (num_steps + 2) / 2
}

/// Memoized node values for one pricer.
///
/// Append-only during a valuation and cleared before the next one.
#[derive(Debug, Clone, Default)]
pub struct NodeCache<T: Float> {
    values: HashMap<NodeIndex, T>,
}

impl<T: Float> NodeCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Creates an empty cache sized for a lattice of `num_steps` steps.
    pub fn with_capacity_for(num_steps: usize) -> Self {
        Self {
            values: HashMap::with_capacity(node_count(num_steps)),
        }
    }

    /// Value of a node, if it has been evaluated.
    #[inline]
    pub fn get(&self, node: NodeIndex) -> Option<T> {
        self.values.get(&node).copied()
    }

    /// Stores the value of a node.
    #[inline]
    pub fn insert(&mut self, node: NodeIndex, value: T) {
        self.values.insert(node, value);
    }

    /// Removes every stored value, keeping the allocation.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of nodes stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no node has been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
