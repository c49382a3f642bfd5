//! Height-balanced binary search tree over an index arena.
//!
//! `avl-forest` stores an ordered set of unique `i64` keys in an AVL tree:
//! every node caches the height of its own subtree, and each structural
//! change walks back up the edited spine applying a single or double
//! rotation wherever one child ends up taller than the other by more than
//! one level.
//!
//! Instead of owned pointers, all links are `Option<u32>` indices into a
//! `Vec`-backed arena owned by the [`AvlSet`] handle. Rotations reassign
//! indices and never move or copy nodes; slots freed by deletion are
//! recycled by later inserts.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`AvlNode`], [`Dir`], the [`Link`] index alias |
//! | [`util`] | height cache, rotation, and rebalancing primitives |
//! | [`set`] | the [`AvlSet`] handle and its operations |
//! | [`validate`] | invariant re-derivation, [`InvariantError`] |
//! | [`print`] | debug rendering of the tree shape |

pub mod print;
pub mod set;
pub mod types;
pub mod util;
pub mod validate;

pub use set::{AvlSet, Iter};
pub use types::{AvlNode, Dir, Link};
pub use util::{height_of, rebalance, rotate};
pub use validate::InvariantError;
