//! Red-black balancing over an [`Arena`].
//!
//! Every function takes the current root index and returns the root after
//! the operation. The root moves only when a rotation pivots around it, and
//! [`rotate`] is the one place that reports it.

use tracing::trace;

use crate::arena::Arena;

/// Relinks `n`'s child `child` to `replacement`, and points `replacement`
/// back at `n`.
///
/// Panics if `child` is not a child of `n`.
pub(crate) fn replace_child<T>(arena: &mut Arena<T>, n: u32, child: u32, replacement: u32) {
    let (l, r) = arena.children(n);
    if l == child {
        arena.set_l(n, replacement);
    } else if r == child {
        arena.set_r(n, replacement);
    } else {
        panic!("invariant violation: node {child} is not a child of {n}");
    }
    arena.set_p(replacement, Some(n));
}

/// Pivots `new_parent` above its parent `old_parent`.
///
/// ```text
///        (g)                 (g)
///         |                   |
///      old_parent          new_parent
///       /     \              /    \
///  new_parent  c    =>      a   old_parent
///    /   \                        /   \
///   a     b                      b     c
/// ```
///
/// The mirror image applies when `new_parent` is the right child.
pub(crate) fn rotate<T>(
    arena: &mut Arena<T>,
    mut root: u32,
    old_parent: u32,
    new_parent: u32,
) -> u32 {
    trace!(old_parent, new_parent, "rotate");
    match arena.p(old_parent) {
        Some(g) => replace_child(arena, g, old_parent, new_parent),
        None => {
            arena.set_p(new_parent, None);
            root = new_parent;
        }
    }

    let (nl, nr) = arena.children(new_parent);
    let new_child = if arena.l(old_parent) == new_parent { nr } else { nl };

    replace_child(arena, old_parent, new_parent, new_child);
    replace_child(arena, new_parent, new_child, old_parent);
    root
}

/// Returns the first populated node equivalent to `value` on the descent
/// from `root`.
pub(crate) fn find<T, C>(arena: &Arena<T>, root: u32, value: &T, before: &C) -> Option<u32>
where
    C: Fn(&T, &T) -> bool,
{
    let mut curr = root;
    while let Some(v) = arena.value(curr) {
        curr = if before(value, v) {
            arena.l(curr)
        } else if before(v, value) {
            arena.r(curr)
        } else {
            return Some(curr);
        };
    }
    None
}

/// Inserts `value` at the sentinel reached by descent. Equivalent values
/// descend right, so the new node follows any run of equivalents.
pub(crate) fn insert<T, C>(arena: &mut Arena<T>, root: u32, value: T, before: &C) -> u32
where
    C: Fn(&T, &T) -> bool,
{
    let mut curr = root;
    while let Some(v) = arena.value(curr) {
        curr = if before(&value, v) {
            arena.l(curr)
        } else {
            arena.r(curr)
        };
    }
    arena.promote(curr, value);
    rebalance_insert(arena, root, curr)
}

fn rebalance_insert<T>(arena: &mut Arena<T>, mut root: u32, mut n: u32) -> u32 {
    loop {
        let Some(p) = arena.p(n) else {
            trace!(n, "insert: new root");
            arena.set_black(n, true);
            return root;
        };
        if arena.is_black(p) {
            return root;
        }

        // A red parent is never the root.
        let g = arena.p(p).expect("invariant violation: red node without parent");
        let (gl, gr) = arena.children(g);
        let u = if gl == p { gr } else { gl };

        if !arena.is_black(u) {
            trace!(n, p, u, g, "insert: red uncle");
            arena.set_black(p, true);
            arena.set_black(u, true);
            arena.set_black(g, false);
            n = g;
            continue;
        }

        let mut p = p;
        let (pl, pr) = arena.children(p);
        if (gl == p && pr == n) || (gr == p && pl == n) {
            trace!(n, p, g, "insert: inner grandchild");
            root = rotate(arena, root, p, n);
            p = n;
        }

        trace!(p, g, "insert: outer grandchild");
        arena.set_black(g, false);
        arena.set_black(p, true);
        return rotate(arena, root, g, p);
    }
}

/// Removes the value held by populated node `target`.
///
/// The node that physically leaves the tree is the in-order predecessor
/// when the left subtree is populated, else the in-order successor when the
/// right subtree is populated, else `target` itself. Its value moves into
/// `target` before it is excised. Returns the new root and `target`'s
/// original value.
pub(crate) fn remove<T>(arena: &mut Arena<T>, root: u32, target: u32) -> (u32, T) {
    let (l, r) = arena.children(target);
    let candidate = if !arena.is_sentinel(l) {
        let mut c = l;
        while !arena.is_sentinel(arena.r(c)) {
            c = arena.r(c);
        }
        c
    } else if !arena.is_sentinel(r) {
        let mut c = r;
        while !arena.is_sentinel(arena.l(c)) {
            c = arena.l(c);
        }
        c
    } else {
        target
    };

    let (root, v) = excise(arena, root, candidate);
    if candidate == target {
        (root, v)
    } else {
        (root, arena.replace_value(target, v))
    }
}

/// Unlinks `candidate`, which has at most one populated child, and returns
/// the value it held.
fn excise<T>(arena: &mut Arena<T>, root: u32, candidate: u32) -> (u32, T) {
    let Some(p) = arena.p(candidate) else {
        trace!(candidate, "remove: last value, root demoted");
        return (root, arena.demote(candidate));
    };

    let (l, r) = arena.children(candidate);
    let (replacement, discarded) = if arena.is_sentinel(r) { (l, r) } else { (r, l) };
    if !arena.is_sentinel(discarded) {
        panic!("invariant violation: excising node {candidate} with two populated children");
    }

    let black = arena.is_black(candidate);
    replace_child(arena, p, candidate, replacement);
    arena.release(discarded);
    let v = arena
        .release(candidate)
        .expect("invariant violation: excised candidate holds no value");

    if !black {
        return (root, v);
    }
    if !arena.is_black(replacement) {
        trace!(replacement, "remove: red replacement recolored");
        arena.set_black(replacement, true);
        return (root, v);
    }
    (rebalance_remove(arena, root, replacement), v)
}

#[inline]
fn sibling<T>(arena: &Arena<T>, p: u32, n: u32) -> u32 {
    let (l, r) = arena.children(p);
    if l == n {
        r
    } else {
        l
    }
}

/// Repairs the black deficiency carried by `n`.
fn rebalance_remove<T>(arena: &mut Arena<T>, mut root: u32, mut n: u32) -> u32 {
    loop {
        let Some(p) = arena.p(n) else {
            arena.set_black(n, true);
            return root;
        };

        let mut s = sibling(arena, p, n);
        if !arena.is_black(s) {
            trace!(n, p, s, "remove: red sibling");
            arena.set_black(s, true);
            arena.set_black(p, false);
            root = rotate(arena, root, p, s);
            s = sibling(arena, p, n);
        }

        // The deficient side has black-height >= 1, so the sibling is
        // populated.
        let (sl, sr) = arena.children(s);
        let s_children_black = arena.is_black(sl) && arena.is_black(sr);

        if arena.is_black(p) && arena.is_black(s) && s_children_black {
            trace!(n, p, s, "remove: black family, deficiency moves up");
            arena.set_black(s, false);
            n = p;
            continue;
        }

        if !arena.is_black(p) && arena.is_black(s) && s_children_black {
            trace!(n, p, s, "remove: red parent absorbs deficiency");
            arena.set_black(p, true);
            arena.set_black(s, false);
            return root;
        }

        let n_left = arena.l(p) == n;
        if n_left && arena.is_black(sr) && !arena.is_black(sl) {
            trace!(n, p, s, "remove: sibling has red inner child");
            root = rotate(arena, root, s, sl);
            arena.set_black(s, false);
            s = arena.r(p);
            arena.set_black(s, true);
        } else if !n_left && arena.is_black(sl) && !arena.is_black(sr) {
            trace!(n, p, s, "remove: sibling has red inner child");
            root = rotate(arena, root, s, sr);
            arena.set_black(s, false);
            s = arena.l(p);
            arena.set_black(s, true);
        }

        trace!(n, p, s, "remove: sibling has red outer child");
        let outer = if n_left { arena.r(s) } else { arena.l(s) };
        arena.set_black(outer, true);
        root = rotate(arena, root, p, s);
        let p_black = arena.is_black(p);
        arena.set_black(s, p_black);
        arena.set_black(p, true);
        return root;
    }
}
