//! AVL tree used as a column index
//!
//! Each subtree is exclusively owned by its parent node. Rotations move
//! ownership of child links with `Option::take`; no node is ever aliased.
//!
//! Heights count edges: a single node has height 0 and the empty tree -1.
//!
//! Duplicate keys are rejected: the first value stored under a key is kept
//! and later inserts of the same key are no-ops.

use std::borrow::Borrow;
use std::cmp::Ordering;

/// Storage offset type
pub type RecordOffset = u64;

/// Column index mapping a column value to one record offset.
pub type BalancedIndex = AvlTree<String, RecordOffset>;

/// Height reported by an empty tree.
pub const EMPTY_HEIGHT: isize = -1;

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    height: isize,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + link_height(&self.left).max(link_height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        link_height(&self.left) - link_height(&self.right)
    }
}

fn link_height<K, V>(link: &Link<K, V>) -> isize {
    link.as_ref().map_or(EMPTY_HEIGHT, |node| node.height)
}

fn link_balance<K, V>(link: &Link<K, V>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Right rotation; the left child becomes the subtree root.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Left rotation; the right child becomes the subtree root.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Refreshes the cached height and applies at most one single or double
/// rotation so that the balance factor is back in {-1, 0, 1}.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();

    match node.balance_factor() {
        2 => {
            // Left-right: straighten the left child first
            if link_balance(&node.left) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            rotate_right(node)
        }
        -2 => {
            // Right-left: straighten the right child first
            if link_balance(&node.right) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            rotate_left(node)
        }
        _ => node,
    }
}

fn insert_into<K: Ord, V>(
    link: Link<K, V>,
    key: K,
    value: V,
    inserted: &mut bool,
) -> Box<Node<K, V>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Node::leaf(key, value);
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_into(node.left.take(), key, value, inserted)),
        Ordering::Greater => {
            node.right = Some(insert_into(node.right.take(), key, value, inserted))
        }
        Ordering::Equal => return node,
    }

    rebalance(node)
}

/// Self-balancing binary search tree.
#[derive(Debug)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `false` and leaves the tree untouched when `key` is already
    /// present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut inserted = false;
        self.root = Some(insert_into(self.root.take(), key, value, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Exact-match lookup.
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = &self.root;
        while let Some(node) = cursor {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = &node.left,
                Ordering::Greater => cursor = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Checks cached heights, balance factors, key order and entry count
    /// for every node.
    pub fn validate_structure(&self) -> Result<(), String> {
        check_subtree(&self.root)?;

        let mut count = 0usize;
        let mut previous: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = previous {
                if prev >= key {
                    return Err(format!("keys out of order at in-order position {}", count));
                }
            }
            previous = Some(key);
            count += 1;
        }

        if count != self.len {
            return Err(format!(
                "size {} does not match {} reachable nodes",
                self.len, count
            ));
        }

        Ok(())
    }
}

impl<K, V> AvlTree<K, V> {
    /// Number of entries held
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root node, `EMPTY_HEIGHT` for an empty tree
    pub fn height(&self) -> isize {
        link_height(&self.root)
    }

    /// In-order traversal, ascending by key
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }
}

fn check_subtree<K, V>(link: &Link<K, V>) -> Result<isize, String> {
    let Some(node) = link else {
        return Ok(EMPTY_HEIGHT);
    };

    let left = check_subtree(&node.left)?;
    let right = check_subtree(&node.right)?;
    let actual = 1 + left.max(right);

    if node.height != actual {
        return Err(format!(
            "cached height {} differs from actual height {}",
            node.height, actual
        ));
    }
    if (left - right).abs() > 1 {
        return Err(format!("balance factor {} out of range", left - right));
    }

    Ok(actual)
}

/// In-order iterator over `(key, value)` pairs
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some((&node.key, &node.value))
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
