use crate::arena::Arena;
use crate::Error;

/// Populated nodes under `root`, in order.
pub(crate) fn in_order<T>(arena: &Arena<T>, root: u32) -> Vec<u32> {
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut curr = root;
    loop {
        while !arena.is_sentinel(curr) {
            stack.push(curr);
            curr = arena.l(curr);
        }
        let Some(n) = stack.pop() else {
            return out;
        };
        out.push(n);
        curr = arena.r(n);
    }
}

/// Black nodes on the path from `n` down to a sentinel, `n` and the sentinel
/// included.
pub(crate) fn black_height<T>(arena: &Arena<T>, n: u32) -> Result<usize, Error> {
    let node = arena.node(n);
    if node.is_sentinel() {
        return if node.is_black() {
            Ok(1)
        } else {
            Err(Error::RedSentinel(n))
        };
    }

    let (l, r) = arena.children(n);
    for child in [l, r] {
        if arena.p(child) != Some(n) {
            return Err(Error::BrokenParentLink { parent: n, child });
        }
        if !node.is_black() && !arena.is_black(child) {
            return Err(Error::ConsecutiveReds { node: n, child });
        }
    }

    let left = black_height(arena, l)?;
    let right = black_height(arena, r)?;
    if left != right {
        return Err(Error::UnbalancedBlacks { node: n, left, right });
    }
    Ok(left + usize::from(node.is_black()))
}

/// Re-checks every red-black invariant of the tree rooted at `root`.
///
/// With equivalent values present, rotations may leave an equivalent in the
/// left subtree of another, so ordering is checked as a non-decreasing
/// in-order sequence.
pub(crate) fn validate<T, C>(
    arena: &Arena<T>,
    root: u32,
    len: usize,
    before: &C,
) -> Result<(), Error>
where
    C: Fn(&T, &T) -> bool,
{
    if arena.p(root).is_some() {
        return Err(Error::RootHasParent(root));
    }
    if !arena.is_black(root) {
        return Err(Error::RootNotBlack(root));
    }
    black_height(arena, root)?;

    let nodes = in_order(arena, root);
    for pair in nodes.windows(2) {
        let (prev, node) = (pair[0], pair[1]);
        if let (Some(a), Some(b)) = (arena.value(prev), arena.value(node)) {
            if before(b, a) {
                return Err(Error::SortOrder { prev, node });
            }
        }
    }
    if nodes.len() != len {
        return Err(Error::CountMismatch {
            found: nodes.len(),
            expected: len,
        });
    }
    Ok(())
}
