use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use log::{debug, trace};

use crate::frequency::FrequencyTable;

/// Path from the root to a leaf: `false` goes left (bit 0), `true` goes right (bit 1).
pub type Code = Vec<bool>;
pub type CodeTable = BTreeMap<char, Code>;

/// Index of a node inside [`PrefixTree`].
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: char,
        freq: u64,
    },
    /// Unused right sibling of the only leaf of a one-symbol tree.
    Placeholder,
    Internal {
        freq: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Placeholder => 0,
            Node::Internal { freq, .. } => *freq,
        }
    }
}

/// Huffman tree stored as an arena. Children always precede their parent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PrefixTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl PrefixTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of leaves holding a real symbol.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn depth_of(tree: &PrefixTree, id: NodeId) -> usize {
            match tree.node(id) {
                Node::Internal { left, right, .. } => {
                    1 + depth_of(tree, *left).max(depth_of(tree, *right))
                }
                _ => 0,
            }
        }
        depth_of(self, self.root)
    }
}

/// Entry of the merge queue. Ordered by frequency, then by insertion
/// sequence, both reversed so that `BinaryHeap` pops the minimum.
#[derive(Debug, Eq, PartialEq)]
struct HeapNode {
    freq: u64,
    seq: usize,
    id: NodeId,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Greedy two-minimum merging. Leaves enter the queue in ascending symbol
/// order and every merged node gets the next sequence number, so on equal
/// frequency the earlier inserted node wins and becomes the left child.
///
/// Returns `None` for an empty table. A single symbol gets a synthetic
/// sibling so that it is still coded with one bit.
pub fn build_huffman_tree(frequencies: &FrequencyTable) -> Option<PrefixTree> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut nodes = Vec::with_capacity(2 * frequencies.len());
    let mut heap = BinaryHeap::with_capacity(frequencies.len());

    for (symbol, freq) in frequencies.iter() {
        let id = nodes.len();
        nodes.push(Node::Leaf { symbol, freq });
        heap.push(HeapNode { freq, seq: id, id });
    }

    if nodes.len() == 1 {
        let freq = nodes[0].freq();
        let placeholder = nodes.len();
        nodes.push(Node::Placeholder);
        let root = nodes.len();
        nodes.push(Node::Internal {
            freq,
            left: 0,
            right: placeholder,
        });
        debug!("Single symbol, added placeholder leaf");
        return Some(PrefixTree { nodes, root });
    }

    let mut seq = nodes.len();
    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let freq = left.freq.saturating_add(right.freq);
        let id = nodes.len();
        nodes.push(Node::Internal {
            freq,
            left: left.id,
            right: right.id,
        });
        trace!("Merged nodes {} + {} into {} (freq {})", left.id, right.id, id, freq);
        heap.push(HeapNode { freq, seq, id });
        seq += 1;
    }

    let root = heap.pop()?.id;
    debug!("Tree construction complete, {} nodes", nodes.len());
    Some(PrefixTree { nodes, root })
}

pub fn build_code_table(tree: &PrefixTree) -> CodeTable {
    fn walk(tree: &PrefixTree, id: NodeId, prefix: &mut Code, table: &mut CodeTable) {
        match *tree.node(id) {
            Node::Leaf { symbol, .. } => {
                trace!("Assigning code to {:?}: {}", symbol, format_code(prefix));
                table.insert(symbol, prefix.clone());
            }
            Node::Placeholder => {}
            Node::Internal { left, right, .. } => {
                prefix.push(false);
                walk(tree, left, prefix, table);
                prefix.pop();
                prefix.push(true);
                walk(tree, right, prefix, table);
                prefix.pop();
            }
        }
    }

    let mut table = CodeTable::new();
    walk(tree, tree.root(), &mut Vec::new(), &mut table);
    table
}

/// Renders a code as a string of `0` and `1`.
pub fn format_code(code: &[bool]) -> String {
    code.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes_for(text: &str) -> CodeTable {
        let tree = build_huffman_tree(&FrequencyTable::from_text(text)).unwrap();
        build_code_table(&tree)
    }

    fn as_strings(table: &CodeTable) -> BTreeMap<char, String> {
        table.iter().map(|(&s, c)| (s, format_code(c))).collect()
    }

    #[test]
    fn empty_table_has_no_tree() {
        assert!(build_huffman_tree(&FrequencyTable::default()).is_none());
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let tree = build_huffman_tree(&FrequencyTable::from_text("aaaa")).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node(tree.root()).freq(), 4);

        let table = build_code_table(&tree);
        assert_eq!(table.len(), 1);
        assert_eq!(table[&'a'], vec![false]);
    }

    #[test]
    fn worked_example() {
        let codes = as_strings(&codes_for("abbcccd"));
        assert_eq!(codes[&'c'], "0");
        assert_eq!(codes[&'b'], "10");
        assert_eq!(codes[&'a'], "110");
        assert_eq!(codes[&'d'], "111");
    }

    #[test]
    fn internal_nodes_sum_children() {
        let tree = build_huffman_tree(&FrequencyTable::from_text("hello huffman")).unwrap();
        for node in &tree.nodes {
            if let Node::Internal { freq, left, right } = *node {
                assert_eq!(freq, tree.node(left).freq() + tree.node(right).freq());
            }
        }
        assert_eq!(tree.node(tree.root()).freq(), 13);
        assert_eq!(tree.leaf_count(), 10);
    }

    #[test]
    fn equal_frequencies_give_balanced_stable_tree() {
        let first = build_huffman_tree(&FrequencyTable::from_text("aabbccdd")).unwrap();
        for _ in 0..10 {
            let again = build_huffman_tree(&FrequencyTable::from_text("ddccbbaa")).unwrap();
            assert_eq!(first, again);
        }
        let codes = as_strings(&build_code_table(&first));
        assert_eq!(codes[&'a'], "00");
        assert_eq!(codes[&'b'], "01");
        assert_eq!(codes[&'c'], "10");
        assert_eq!(codes[&'d'], "11");
    }

    #[test]
    fn codes_are_prefix_free() {
        let table = codes_for("the quick brown fox jumps over the lazy dog");
        let codes: Vec<&Code> = table.values().collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn more_frequent_symbols_get_shorter_codes() {
        let freq = FrequencyTable::from_text("aaaaaaaaaaaaaaaabbbbbbbbccccdde");
        let tree = build_huffman_tree(&freq).unwrap();
        let table = build_code_table(&tree);
        let mut by_freq: Vec<(u64, usize)> = freq
            .iter()
            .map(|(s, f)| (f, table[&s].len()))
            .collect();
        by_freq.sort();
        for pair in by_freq.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }
}
