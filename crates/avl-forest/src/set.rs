//! Ordered set of unique `i64` keys backed by the node arena.

use crate::print::render;
use crate::types::{AvlNode, Dir, Link};
use crate::util::rebalance;
use crate::validate::{validate, InvariantError};

/// AVL tree set over an index arena.
///
/// The handle owns the arena; nodes refer to each other by `Option<u32>`
/// index. Slots freed by deletion go on a free list and are reused by later
/// inserts, so arena capacity tracks the live key count.
#[derive(Clone, Debug, Default)]
pub struct AvlSet {
    arena: Vec<AvlNode>,
    free: Vec<u32>,
    root: Link,
    len: usize,
}

impl AvlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Cached height of the whole tree; 0 when empty.
    pub fn height(&self) -> i32 {
        crate::util::height_of(&self.arena, self.root)
    }

    /// Whether `key` is present. Iterative descent, no mutation.
    pub fn contains(&self, key: i64) -> bool {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if node.key == key {
                return true;
            }
            curr = node.link(descent(key, node.key));
        }
        false
    }

    /// Smallest key without removing it.
    pub fn first(&self) -> Option<i64> {
        let mut curr = self.root?;
        while let Some(l) = self.arena[curr as usize].link(Dir::Left) {
            curr = l;
        }
        Some(self.arena[curr as usize].key)
    }

    /// Add `key`; returns whether it was newly inserted. Inserting a key
    /// that is already present leaves the tree untouched.
    pub fn insert(&mut self, key: i64) -> bool {
        let (root, added) = self.insert_at(self.root, key);
        self.root = root;
        added
    }

    /// Remove `key`; returns whether it was present. Removing an absent key
    /// leaves the tree untouched.
    pub fn delete(&mut self, key: i64) -> bool {
        let (root, removed) = self.delete_at(self.root, key);
        self.root = root;
        removed
    }

    /// Remove and return the smallest key.
    ///
    /// Panics on the empty tree; callers must check [`AvlSet::is_empty`]
    /// first.
    pub fn delete_min(&mut self) -> i64 {
        let root = self.root.expect("delete_min on an empty tree");
        let (root, min) = self.delete_min_at(root);
        self.root = root;
        min
    }

    /// Drop every node at once.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// In-order walk: ascending keys.
    pub fn for_each<F: FnMut(i64)>(&self, mut visit: F) {
        walk(&self.arena, self.root, &mut visit);
    }

    /// Lazy in-order iterator over the keys.
    pub fn iter(&self) -> Iter<'_> {
        let mut it = Iter {
            arena: &self.arena,
            stack: Vec::new(),
        };
        it.descend(self.root);
        it
    }

    /// Re-derive every height and re-check order, balance, and arena
    /// bookkeeping. Debug facility; not a production call path.
    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        let (_, counted) = validate(&self.arena, self.root, None, None)?;
        if counted != self.len {
            return Err(InvariantError::LengthMismatch {
                counted,
                recorded: self.len,
            });
        }
        if counted + self.free.len() != self.arena.len() {
            return Err(InvariantError::SlotLeak {
                live: counted,
                free: self.free.len(),
                slots: self.arena.len(),
            });
        }
        Ok(())
    }

    /// [`AvlSet::assert_valid`], escalated to a panic. Crashes loudly rather
    /// than correcting anything.
    pub fn sanity_check(&self) {
        if let Err(e) = self.assert_valid() {
            panic!("invariant violated: {e}");
        }
    }

    /// Debug rendering of the tree shape with per-node heights.
    pub fn print(&self) -> String {
        render(&self.arena, self.root, "")
    }

    fn alloc(&mut self, key: i64) -> u32 {
        self.len += 1;
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = AvlNode::new(key);
                i
            }
            None => {
                let i = self.arena.len() as u32;
                self.arena.push(AvlNode::new(key));
                i
            }
        }
    }

    fn release(&mut self, i: u32) {
        self.len -= 1;
        self.free.push(i);
    }

    fn insert_at(&mut self, t: Link, key: i64) -> (Link, bool) {
        let Some(i) = t else {
            return (Some(self.alloc(key)), true);
        };
        let node_key = self.arena[i as usize].key;
        if key == node_key {
            return (t, false);
        }
        let d = descent(key, node_key);
        let (sub, added) = self.insert_at(self.arena[i as usize].link(d), key);
        self.arena[i as usize].set_link(d, sub);
        (rebalance(&mut self.arena, t), added)
    }

    fn delete_min_at(&mut self, i: u32) -> (Link, i64) {
        match self.arena[i as usize].link(Dir::Left) {
            None => {
                // This node holds the minimum: splice in its right child.
                let min = self.arena[i as usize].key;
                let right = self.arena[i as usize].link(Dir::Right);
                self.release(i);
                (right, min)
            }
            Some(l) => {
                let (sub, min) = self.delete_min_at(l);
                self.arena[i as usize].set_link(Dir::Left, sub);
                (rebalance(&mut self.arena, Some(i)), min)
            }
        }
    }

    fn delete_at(&mut self, t: Link, key: i64) -> (Link, bool) {
        let Some(i) = t else {
            return (None, false);
        };
        let node_key = self.arena[i as usize].key;
        let (t, removed) = if key == node_key {
            match self.arena[i as usize].link(Dir::Right) {
                Some(r) => {
                    // Successor-copy: the node keeps its identity and only
                    // its key changes, so no restructuring happens above
                    // this point.
                    let (sub, successor) = self.delete_min_at(r);
                    self.arena[i as usize].set_link(Dir::Right, sub);
                    self.arena[i as usize].key = successor;
                    (Some(i), true)
                }
                None => {
                    let left = self.arena[i as usize].link(Dir::Left);
                    self.release(i);
                    (left, true)
                }
            }
        } else {
            let d = descent(key, node_key);
            let (sub, removed) = self.delete_at(self.arena[i as usize].link(d), key);
            self.arena[i as usize].set_link(d, sub);
            (Some(i), removed)
        };
        (rebalance(&mut self.arena, t), removed)
    }
}

/// Descent direction for `key` at a node holding `node_key`.
#[inline]
fn descent(key: i64, node_key: i64) -> Dir {
    if key > node_key {
        Dir::Right
    } else {
        Dir::Left
    }
}

fn walk<F: FnMut(i64)>(arena: &[AvlNode], t: Link, visit: &mut F) {
    if let Some(i) = t {
        walk(arena, arena[i as usize].link(Dir::Left), visit);
        visit(arena[i as usize].key);
        walk(arena, arena[i as usize].link(Dir::Right), visit);
    }
}

/// In-order key iterator holding an explicit descent stack; the node model
/// has no parent links, so the pending spine lives here.
pub struct Iter<'a> {
    arena: &'a [AvlNode],
    stack: Vec<u32>,
}

impl Iter<'_> {
    fn descend(&mut self, mut t: Link) {
        while let Some(i) = t {
            self.stack.push(i);
            t = self.arena[i as usize].link(Dir::Left);
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let i = self.stack.pop()?;
        let key = self.arena[i as usize].key;
        let right = self.arena[i as usize].link(Dir::Right);
        self.descend(right);
        Some(key)
    }
}

impl<'a> IntoIterator for &'a AvlSet {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
