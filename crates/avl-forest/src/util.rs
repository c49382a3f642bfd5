//! Height cache, rotation, and rebalancing primitives.
//!
//! All functions work on the node arena directly and return the index of
//! the new subtree root where the root can change, leaving it to the caller
//! to store the result back into the slot it came from.

use crate::types::{AvlNode, Dir, Link};

/// Cached height of a subtree; 0 for the empty tree. Never recomputes from
/// children.
#[inline]
pub fn height_of(arena: &[AvlNode], t: Link) -> i32 {
    match t {
        Some(i) => arena[i as usize].height,
        None => 0,
    }
}

/// Recompute one node's cached height from its children.
pub(crate) fn fix_height(arena: &mut [AvlNode], i: u32) {
    let l = height_of(arena, arena[i as usize].link(Dir::Left));
    let r = height_of(arena, arena[i as usize].link(Dir::Right));
    arena[i as usize].height = 1 + l.max(r);
}

/// Promote `child[d]` of the node at `i` into its place.
///
/// The promoted child's opposite-side subtree (the one between the two
/// nodes) is reattached under the demoted node, which becomes the new
/// root's `!d` child. Returns the new subtree root index.
///
/// Panics if the node has no child in the rotation direction.
pub fn rotate(arena: &mut [AvlNode], i: u32, d: Dir) -> u32 {
    let promoted = arena[i as usize]
        .link(d)
        .expect("rotate requires a child in the rotation direction");
    let middle = arena[promoted as usize].link(d.flip());

    arena[i as usize].set_link(d, middle);
    arena[promoted as usize].set_link(d.flip(), Some(i));

    // Demoted node first: the new root's height depends on it.
    fix_height(arena, i);
    fix_height(arena, promoted);
    promoted
}

/// Restore the balance invariant at `t` after one structural edit directly
/// beneath it, fixing the cached height either way. Returns the new subtree
/// root; `None` stays `None`.
///
/// A single edit step changes subtree heights by at most one level, so at
/// most one direction can be over-tall here and the routine returns as soon
/// as it has rotated.
pub fn rebalance(arena: &mut [AvlNode], t: Link) -> Link {
    let Some(i) = t else {
        return t;
    };

    for d in [Dir::Left, Dir::Right] {
        let e = d.flip();
        if height_of(arena, arena[i as usize].link(d))
            > height_of(arena, arena[i as usize].link(e)) + 1
        {
            let inner = arena[i as usize].link(d).expect("over-tall child exists");
            // A strictly taller same-direction grandchild takes the single
            // rotation; ties go through the double rotation.
            if height_of(arena, arena[inner as usize].link(d))
                > height_of(arena, arena[inner as usize].link(e))
            {
                return Some(rotate(arena, i, d));
            }
            let new_inner = rotate(arena, inner, e);
            arena[i as usize].set_link(d, Some(new_inner));
            return Some(rotate(arena, i, d));
        }
    }

    fix_height(arena, i);
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(arena: &mut Vec<AvlNode>, key: i64) -> u32 {
        arena.push(AvlNode::new(key));
        (arena.len() - 1) as u32
    }

    #[test]
    fn height_of_empty_is_zero() {
        assert_eq!(height_of(&[], None), 0);
    }

    #[test]
    fn rotate_right_promotes_left_child() {
        // 2(1(0, _), _) --rotate Left--> 1(0, 2)
        let mut arena = Vec::new();
        let a = leaf(&mut arena, 0);
        let b = leaf(&mut arena, 1);
        let c = leaf(&mut arena, 2);
        arena[b as usize].set_link(Dir::Left, Some(a));
        arena[b as usize].height = 2;
        arena[c as usize].set_link(Dir::Left, Some(b));
        arena[c as usize].height = 3;

        let root = rotate(&mut arena, c, Dir::Left);
        assert_eq!(root, b);
        assert_eq!(arena[b as usize].link(Dir::Left), Some(a));
        assert_eq!(arena[b as usize].link(Dir::Right), Some(c));
        assert_eq!(arena[c as usize].link(Dir::Left), None);
        assert_eq!(arena[c as usize].height, 1);
        assert_eq!(arena[b as usize].height, 2);
    }

    #[test]
    fn rotate_moves_middle_subtree_across() {
        // 3(1(0, 2), 4) --rotate Left--> 1(0, 3(2, 4))
        let mut arena = Vec::new();
        let k0 = leaf(&mut arena, 0);
        let k1 = leaf(&mut arena, 1);
        let k2 = leaf(&mut arena, 2);
        let k3 = leaf(&mut arena, 3);
        let k4 = leaf(&mut arena, 4);
        arena[k1 as usize].child = [Some(k0), Some(k2)];
        arena[k1 as usize].height = 2;
        arena[k3 as usize].child = [Some(k1), Some(k4)];
        arena[k3 as usize].height = 3;

        let root = rotate(&mut arena, k3, Dir::Left);
        assert_eq!(root, k1);
        assert_eq!(arena[k1 as usize].child, [Some(k0), Some(k3)]);
        assert_eq!(arena[k3 as usize].child, [Some(k2), Some(k4)]);
        assert_eq!(arena[k3 as usize].height, 2);
        assert_eq!(arena[k1 as usize].height, 3);
    }

    #[test]
    #[should_panic(expected = "rotate requires a child")]
    fn rotate_without_child_is_a_contract_violation() {
        let mut arena = Vec::new();
        let only = leaf(&mut arena, 7);
        rotate(&mut arena, only, Dir::Right);
    }

    #[test]
    fn rebalance_of_empty_is_a_noop() {
        let mut arena: Vec<AvlNode> = Vec::new();
        assert_eq!(rebalance(&mut arena, None), None);
    }

    #[test]
    fn rebalance_applies_single_rotation_for_outer_imbalance() {
        // 0 -> 1 -> 2 hanging right; node 0 is over-tall on the right with a
        // same-direction grandchild, so one rotation resolves it.
        let mut arena = Vec::new();
        let k0 = leaf(&mut arena, 0);
        let k1 = leaf(&mut arena, 1);
        let k2 = leaf(&mut arena, 2);
        arena[k1 as usize].set_link(Dir::Right, Some(k2));
        arena[k1 as usize].height = 2;
        arena[k0 as usize].set_link(Dir::Right, Some(k1));
        arena[k0 as usize].height = 3;

        let root = rebalance(&mut arena, Some(k0)).unwrap();
        assert_eq!(root, k1);
        assert_eq!(arena[k1 as usize].child, [Some(k0), Some(k2)]);
        assert_eq!(arena[k1 as usize].height, 2);
    }

    #[test]
    fn rebalance_applies_double_rotation_for_inner_imbalance() {
        // 2 with left child 0 whose right child is 1; the opposite-direction
        // grandchild is the taller one, so the inner node rotates up first.
        let mut arena = Vec::new();
        let k0 = leaf(&mut arena, 0);
        let k1 = leaf(&mut arena, 1);
        let k2 = leaf(&mut arena, 2);
        arena[k0 as usize].set_link(Dir::Right, Some(k1));
        arena[k0 as usize].height = 2;
        arena[k2 as usize].set_link(Dir::Left, Some(k0));
        arena[k2 as usize].height = 3;

        let root = rebalance(&mut arena, Some(k2)).unwrap();
        assert_eq!(root, k1);
        assert_eq!(arena[k1 as usize].child, [Some(k0), Some(k2)]);
        assert_eq!(arena[k1 as usize].height, 2);
        assert_eq!(arena[k0 as usize].height, 1);
        assert_eq!(arena[k2 as usize].height, 1);
    }
}
