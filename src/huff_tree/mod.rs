/*! A Huffman tree for byte symbols, stored as an arena of nodes.

Construction is fully deterministic so that the same input always produces
the same code table:
 - Leaves start out ordered by ascending weight, with ties broken by ascending
   symbol value.
 - The two lowest entries are merged, the first becoming the left (0) child.
 - The merged node is reinserted before every existing entry of equal weight.

Internal nodes refer to their children by index into the arena, so nothing
about a node's identity depends on which symbols it covers.
*/

pub mod codetable;
pub mod frequency;

pub use codetable::{CodeTable, CodeTableError};
pub use frequency::FrequencyTable;

use log::{debug, trace};

use std::collections::BTreeMap;

/// Index of a node within a `HuffTree`
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
  Leaf {
    sym: u8,
    weight: usize,
  },
  Internal {
    left: NodeId,
    right: NodeId,
    weight: usize,
  },
}

impl Node {
  pub fn weight(&self) -> usize {
    match self {
      Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
    }
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self, Node::Leaf { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
  nodes: Vec<Node>,
  root: Option<NodeId>,
}

impl HuffTree {
  /// Build the merge tree for the given frequencies. An empty table yields a
  /// tree with no nodes and no root.
  pub fn build(freqs: &FrequencyTable) -> Self {
    let mut leaves: Vec<(u8, usize)> = freqs.iter().collect();
    // Stable, so equal weights stay in ascending symbol order
    leaves.sort_by_key(|&(_, weight)| weight);

    let mut nodes = Vec::with_capacity(2 * leaves.len());
    for (sym, weight) in leaves.into_iter() {
      nodes.push(Node::Leaf { sym, weight });
    }

    // Kept in descending order so the lowest-weight entry is always at the back.
    let mut working: Vec<NodeId> = (0..nodes.len()).rev().collect();

    let root = loop {
      let left = match working.pop() {
        Some(id) => id,
        None => {
          debug!("No symbols to build a tree from");
          return Self { nodes, root: None };
        }
      };
      let right = match working.pop() {
        Some(id) => id,
        None => break left,
      };

      let weight = nodes[left].weight() + nodes[right].weight();
      let id = nodes.len();
      nodes.push(Node::Internal {
        left,
        right,
        weight,
      });

      // Past every entry of greater or equal weight, i.e. ahead of equal
      // weights in ascending order.
      let idx = working.partition_point(|&n| nodes[n].weight() >= weight);
      working.insert(idx, id);
    };

    debug!(
      "Built Huffman tree: {} nodes, root weight {}",
      nodes.len(),
      nodes[root].weight()
    );
    Self {
      nodes,
      root: Some(root),
    }
  }

  pub fn root(&self) -> Option<NodeId> {
    self.root
  }

  pub fn node(&self, id: NodeId) -> Option<&Node> {
    self.nodes.get(id)
  }

  /// Total number of nodes, leaves and internal nodes alike
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn leaf_count(&self) -> usize {
    self.nodes.iter().filter(|n| n.is_leaf()).count()
  }

  /// Assign codes by walking the tree depth-first from the root. Going left
  /// appends a 0, going right appends a 1. A tree made of a single leaf gives
  /// that leaf the code `0`. Results are in ascending symbol order.
  pub fn codes(&self) -> Vec<(u8, Vec<u8>)> {
    let root = match self.root {
      Some(r) => r,
      None => return Vec::new(),
    };

    let mut codes = BTreeMap::new();
    if let Node::Leaf { sym, .. } = self.nodes[root] {
      codes.insert(sym, vec![0u8]);
    } else {
      let mut stack = vec![(root, Vec::new())];
      while let Some((id, path)) = stack.pop() {
        match self.nodes[id] {
          Node::Leaf { sym, .. } => {
            trace!("Symbol {:#04x} gets code {:?}", sym, path);
            codes.insert(sym, path);
          }
          Node::Internal { left, right, .. } => {
            let mut rpath = path.clone();
            rpath.push(1);
            let mut lpath = path;
            lpath.push(0);
            stack.push((right, rpath));
            stack.push((left, lpath));
          }
        }
      }
    }
    codes.into_iter().collect()
  }

  /// Code length for each symbol in the tree
  pub fn code_lengths(&self) -> BTreeMap<u8, usize> {
    self
      .codes()
      .into_iter()
      .map(|(sym, code)| (sym, code.len()))
      .collect()
  }

  /// Sum of weight * code length over all leaves: the number of payload bits
  /// needed to encode the input the tree was built from.
  pub fn weighted_path_length(&self) -> usize {
    let lengths = self.code_lengths();
    self
      .nodes
      .iter()
      .filter_map(|n| match n {
        Node::Leaf { sym, weight } => Some(weight * lengths[sym]),
        Node::Internal { .. } => None,
      })
      .sum()
  }
}
