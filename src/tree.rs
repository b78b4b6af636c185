//! Huffman tree construction, code derivation, and the decode cursor.
//!
//! The tree lives in an arena: nodes are plain structs addressed by index,
//! so ownership is structural and teardown is a single `Vec` drop. For 256
//! symbols the arena never exceeds 511 nodes.
//!
//! Construction is the canonical greedy merge. Every byte value gets a leaf
//! (zero frequencies included), so the merged tree always has 256 leaves and
//! every codeword comes out non-empty. Ties on frequency are broken by
//! insertion sequence (leaves in ascending byte order, then merge products
//! in creation order), which makes the tree shape a pure function of the
//! frequency table. The decoder rebuilds its tree from the code table alone,
//! top-down, and both sides agree by construction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::codes::{Codes, Codeword};
use crate::error::{HuffzyError, HuffzyResult};
use crate::freq::{Frequencies, NUM_SYMBOLS};

/// Arena index of a node. 511 nodes max, so u16 is plenty.
type NodeId = u16;

const MAX_NODES: usize = 2 * NUM_SYMBOLS - 1;

#[derive(Debug, Clone)]
struct Node {
    freq: u64,
    byte: u8,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn leaf(byte: u8, freq: u64) -> Self {
        Self {
            freq,
            byte,
            left: None,
            right: None,
        }
    }

    fn internal(freq: u64, left: NodeId, right: NodeId) -> Self {
        Self {
            freq,
            byte: 0,
            left: Some(left),
            right: Some(right),
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Min-heap entry: lowest frequency wins, insertion sequence breaks ties.
/// `BinaryHeap` is a max-heap, so the ordering is reversed here.
#[derive(PartialEq, Eq)]
struct HeapItem {
    freq: u64,
    seq: u16,
    id: NodeId,
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the optimal prefix-code tree for `frequencies` by repeatedly
    /// merging the two lightest subtrees. The first tree extracted becomes
    /// the left (0) child of the merge.
    pub fn from_frequencies(frequencies: &Frequencies) -> Self {
        let mut nodes = Vec::with_capacity(MAX_NODES);
        let mut heap = BinaryHeap::with_capacity(NUM_SYMBOLS);

        for i in 0..NUM_SYMBOLS {
            let freq = frequencies[i as u8];
            nodes.push(Node::leaf(i as u8, freq));
            heap.push(HeapItem {
                freq,
                seq: i as u16,
                id: i as NodeId,
            });
        }

        while heap.len() > 1 {
            let first = heap.pop().unwrap();
            let second = heap.pop().unwrap();

            let id = nodes.len() as NodeId;
            // Saturating: counts in a crafted header may sum past u64
            let freq = first.freq.saturating_add(second.freq);
            nodes.push(Node::internal(freq, first.id, second.id));
            heap.push(HeapItem { freq, seq: id, id });
        }

        let root = heap.pop().unwrap().id;
        Self { nodes, root }
    }

    /// Rebuild an equivalent tree from a code table, walking each codeword
    /// from the root and creating internal nodes on demand. Rejects tables
    /// whose codewords collide (one a prefix of another) or leave an
    /// internal node with a missing child; the sole exception is a root
    /// carrying only the 0-edge, which is how a promoted single-symbol
    /// table reconstructs.
    pub fn from_codes(codes: &Codes) -> HuffzyResult<Self> {
        let mut nodes = vec![Node::leaf(0, 0)];

        for (byte, codeword) in codes.iter() {
            if codeword.is_empty() {
                continue;
            }

            let mut cur: NodeId = 0;
            for bit in codeword.iter() {
                if nodes[cur as usize].is_leaf() && nodes[cur as usize].freq > 0 {
                    return Err(HuffzyError::malformed_header(
                        "code table is not prefix-free",
                    ));
                }
                let next = if bit {
                    nodes[cur as usize].right
                } else {
                    nodes[cur as usize].left
                };
                cur = match next {
                    Some(id) => id,
                    None => {
                        let id = nodes.len() as NodeId;
                        nodes.push(Node::leaf(0, 0));
                        let slot = &mut nodes[cur as usize];
                        if bit {
                            slot.right = Some(id);
                        } else {
                            slot.left = Some(id);
                        }
                        id
                    }
                };
            }

            let dest = &mut nodes[cur as usize];
            if !dest.is_leaf() || dest.freq > 0 {
                return Err(HuffzyError::malformed_header(
                    "code table is not prefix-free",
                ));
            }
            dest.byte = byte;
            // Marks the node as occupied during construction; the weight
            // itself is never read back on the decode side.
            dest.freq = 1;
        }

        let tree = Self { nodes, root: 0 };
        tree.check_complete()?;
        Ok(tree)
    }

    fn check_complete(&self) -> HuffzyResult<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            match (node.left, node.right) {
                (Some(_), Some(_)) | (None, None) => {}
                // A lone 0-edge under the root is the reconstructed form of
                // the promoted single-symbol tree
                (Some(left), None)
                    if i == self.root as usize
                        && self.nodes[left as usize].is_leaf() => {}
                _ => {
                    return Err(HuffzyError::malformed_header(
                        "code table leaves a one-way branch",
                    ))
                }
            }
        }
        Ok(())
    }

    /// Derive the code table with one depth-first walk: 0 for a left edge,
    /// 1 for a right edge. A root that is itself a leaf gets the one-bit
    /// codeword `0` so even a degenerate tree stays decodable.
    pub fn compute_codes(&self) -> Codes {
        let mut codes = Codes::new();

        let root = &self.nodes[self.root as usize];
        if root.is_leaf() {
            let mut promoted = Codeword::new();
            promoted.push(false);
            codes.set(root.byte, promoted);
            return codes;
        }

        let mut path = Codeword::new();
        self.collect_codes(self.root, &mut path, &mut codes);
        codes
    }

    fn collect_codes(&self, id: NodeId, path: &mut Codeword, codes: &mut Codes) {
        let node = &self.nodes[id as usize];
        if node.is_leaf() {
            codes.set(node.byte, path.clone());
            return;
        }

        if let Some(left) = node.left {
            path.push(false);
            self.collect_codes(left, path, codes);
            path.pop();
        }
        if let Some(right) = node.right {
            path.push(true);
            self.collect_codes(right, path, codes);
            path.pop();
        }
    }

    pub fn walker(&self) -> TreeWalker<'_> {
        TreeWalker {
            tree: self,
            cur: self.root,
        }
    }
}

/// Decode cursor over an immutable tree: one fixed root index, one mobile
/// position. Owns nothing.
pub struct TreeWalker<'a> {
    tree: &'a HuffmanTree,
    cur: NodeId,
}

impl TreeWalker<'_> {
    /// Follow one edge. From a leaf the cursor first snaps back to the
    /// root, so a fresh codeword always starts at the top.
    #[inline]
    pub fn step(&mut self, bit: bool) {
        if self.is_leaf() {
            self.cur = self.tree.root;
        }
        let node = &self.tree.nodes[self.cur as usize];
        let next = if bit { node.right } else { node.left };
        debug_assert!(next.is_some(), "walker stepped off a validated tree");
        if let Some(id) = next {
            self.cur = id;
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tree.nodes[self.cur as usize].is_leaf()
    }

    /// Byte value at the current position. Meaningful only on a leaf.
    #[inline]
    pub fn byte(&self) -> u8 {
        self.tree.nodes[self.cur as usize].byte
    }
}
