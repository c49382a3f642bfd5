//! Debug rendering of the tree shape.

use crate::types::{AvlNode, Dir, Link};

/// Render the subtree at `t`, one node per line with its cached height,
/// children indented under `tab`. The empty tree renders as `∅`.
pub fn render(arena: &[AvlNode], t: Link, tab: &str) -> String {
    match t {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let child_tab = format!("{tab}  ");
            let left = render(arena, n.link(Dir::Left), &child_tab);
            let right = render(arena, n.link(Dir::Right), &child_tab);
            format!(
                "{} [h={}]\n{tab}L={left}\n{tab}R={right}",
                n.key, n.height
            )
        }
    }
}
