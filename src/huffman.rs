//! Huffman tree construction and code table derivation
//!
//! The tree is rebuilt on decode from the frequency key alone, so the merge
//! order here is part of the format: the working list is scanned linearly
//! for the first minimum, and merged nodes are appended at the end.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::frequency::{FrequencyTable, Unit};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        unit: Unit,
        weight: u64,
    },
    Internal {
        left: Box<HuffNode>,
        right: Box<HuffNode>,
        weight: u64,
    },
}

impl HuffNode {
    pub fn leaf(unit: Unit, weight: u64) -> Self {
        HuffNode::Leaf { unit, weight }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    pub fn from_frequencies(freqs: &FrequencyTable) -> Result<Self> {
        let leaves = freqs
            .iter()
            .map(|e| HuffNode::leaf(e.unit, e.count))
            .collect();
        Self::from_leaves(leaves)
    }

    pub fn from_leaves(mut nodes: Vec<HuffNode>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(CodecError::InsufficientSymbols);
        }
        nodes
            .iter()
            .try_fold(0u64, |total, node| total.checked_add(node.weight()))
            .ok_or(CodecError::WeightOverflow)?;
        let leaves = nodes.len();

        while nodes.len() > 1 {
            let first = nodes.remove(position_of_min(&nodes));
            let second = nodes.remove(position_of_min(&nodes));
            nodes.push(HuffNode::merge(first, second));
        }

        let root = nodes.pop().ok_or(CodecError::InsufficientSymbols)?;
        debug!(leaves, weight = root.weight(), "built huffman tree");
        Ok(Self { root })
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }
}

/// Index of the first node with the smallest weight. `nodes` must be
/// non-empty.
fn position_of_min(nodes: &[HuffNode]) -> usize {
    let mut min = 0;
    for (i, node) in nodes.iter().enumerate().skip(1) {
        if node.weight() < nodes[min].weight() {
            min = i;
        }
    }
    min
}

/// Bit path from the root to one leaf. `false` is a left edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitCode(Vec<bool>);

impl BitCode {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    fn with(&self, bit: bool) -> Self {
        let mut bits = self.0.clone();
        bits.push(bit);
        BitCode(bits)
    }
}

impl fmt::Display for BitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping unit -> code, plus its inverse for decoding.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    codes: HashMap<Unit, BitCode>,
    units: HashMap<BitCode, Unit>,
    max_code_len: usize,
}

impl CodeTable {
    /// Walks the tree with the root path seeded as a single `0`, so a
    /// one-leaf tree still gets a non-empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable::default();
        table.walk(tree.root(), BitCode(vec![false]));
        debug!(
            codes = table.codes.len(),
            max_code_len = table.max_code_len,
            "derived code table"
        );
        table
    }

    fn walk(&mut self, node: &HuffNode, path: BitCode) {
        match node {
            HuffNode::Leaf { unit, .. } => {
                trace!(unit, code = %path, "code");
                self.max_code_len = self.max_code_len.max(path.len());
                self.units.insert(path.clone(), *unit);
                self.codes.insert(*unit, path);
            }
            HuffNode::Internal { left, right, .. } => {
                self.walk(left, path.with(false));
                self.walk(right, path.with(true));
            }
        }
    }

    pub fn get(&self, unit: Unit) -> Option<&BitCode> {
        self.codes.get(&unit)
    }

    /// The code for `unit` rendered as `0`/`1` text.
    pub fn code_string(&self, unit: Unit) -> Option<String> {
        self.get(unit).map(BitCode::to_string)
    }

    pub fn unit_for(&self, code: &BitCode) -> Option<Unit> {
        self.units.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unit, &BitCode)> {
        self.codes.iter()
    }
}
