//! Invariant re-derivation for debug builds and test harnesses.
//!
//! The checks here recompute everything the tree caches (heights from the
//! leaves up, key bounds from the root down) and report the first
//! disagreement instead of correcting it.

use thiserror::Error;

use crate::types::{AvlNode, Dir, Link};

/// First invariant violation found by [`validate`] or
/// [`crate::AvlSet::assert_valid`]. Any of these means an implementation
/// defect, not a recoverable runtime condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("height cache broken at key {key}: cached {cached}, derived {derived}")]
    BrokenHeight { key: i64, cached: i32, derived: i32 },

    #[error("balance violated at key {key}: left height {left}, right height {right}")]
    OutOfBalance { key: i64, left: i32, right: i32 },

    #[error("order violated at key {key}: outside ({low:?}, {high:?})")]
    OutOfOrder {
        key: i64,
        low: Option<i64>,
        high: Option<i64>,
    },

    #[error("length mismatch: counted {counted} nodes, recorded {recorded}")]
    LengthMismatch { counted: usize, recorded: usize },

    #[error("arena bookkeeping broken: {live} live + {free} free != {slots} slots")]
    SlotLeak {
        live: usize,
        free: usize,
        slots: usize,
    },
}

/// Walk the subtree at `t`, re-deriving each node's height and checking the
/// cached value, the balance bound, and the `(low, high)` key window.
/// Returns the derived height and node count.
pub(crate) fn validate(
    arena: &[AvlNode],
    t: Link,
    low: Option<i64>,
    high: Option<i64>,
) -> Result<(i32, usize), InvariantError> {
    let Some(i) = t else {
        return Ok((0, 0));
    };
    let node = &arena[i as usize];

    if low.is_some_and(|b| node.key <= b) || high.is_some_and(|b| node.key >= b) {
        return Err(InvariantError::OutOfOrder {
            key: node.key,
            low,
            high,
        });
    }

    let (lh, lc) = validate(arena, node.link(Dir::Left), low, Some(node.key))?;
    let (rh, rc) = validate(arena, node.link(Dir::Right), Some(node.key), high)?;

    let derived = 1 + lh.max(rh);
    if node.height != derived {
        return Err(InvariantError::BrokenHeight {
            key: node.key,
            cached: node.height,
            derived,
        });
    }
    if (lh - rh).abs() > 1 {
        return Err(InvariantError::OutOfBalance {
            key: node.key,
            left: lh,
            right: rh,
        });
    }

    Ok((derived, 1 + lc + rc))
}
