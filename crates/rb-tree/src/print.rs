use std::fmt::Debug;

use crate::arena::Arena;

/// Debug printer for the tree under `node`. Sentinels print as `∅`.
pub(crate) fn print<T: Debug>(arena: &Arena<T>, node: u32, tab: &str) -> String {
    let n = arena.node(node);
    let Some(v) = n.value() else {
        return "∅".to_string();
    };
    let color = if n.is_black() { "black" } else { "red" };
    let (l, r) = arena.children(node);
    let left = print(arena, l, &format!("{tab}  "));
    let right = print(arena, r, &format!("{tab}  "));
    format!("Node[{node}] {color} {{ {v:?} }}\n{tab}L={left}\n{tab}R={right}")
}
