use std::fmt;

use tracing::debug;

use crate::arena::Arena;
use crate::{print, util, validate, Error};

fn default_before<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

/// Arena slots needed for `values` values: one per value plus one sentinel
/// per empty position.
fn slots_for(values: usize) -> usize {
    values.saturating_mul(2).saturating_add(1)
}

/// Red-black tree ordered by a caller-supplied `before` predicate.
///
/// Values the predicate cannot tell apart are equivalent. Adding an
/// equivalent value keeps the earlier one; [`find`](Self::find) and
/// [`remove`](Self::remove) act on whichever equivalent the descent reaches
/// first.
///
/// ```
/// use rb_tree::RbTree;
///
/// let mut tree = RbTree::new();
/// for v in [5, 3, 8] {
///     tree.add(v);
/// }
/// assert_eq!(tree.find(&3), Some(&3));
/// assert_eq!(tree.remove(&3), Some(3));
/// assert_eq!(tree.find(&3), None);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct RbTree<T, C = fn(&T, &T) -> bool>
where
    C: Fn(&T, &T) -> bool,
{
    arena: Arena<T>,
    root: u32,
    before: C,
    len: usize,
}

impl<T> RbTree<T, fn(&T, &T) -> bool>
where
    T: Ord,
{
    pub fn new() -> Self {
        Self::with_before(default_before::<T>)
    }

    /// Empty tree with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_before_and_capacity(default_before::<T>, capacity)
    }
}

impl<T> Default for RbTree<T, fn(&T, &T) -> bool>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> RbTree<T, C>
where
    C: Fn(&T, &T) -> bool,
{
    /// Empty tree bound to `before` for its whole lifetime.
    pub fn with_before(before: C) -> Self {
        Self::with_before_and_capacity(before, 0)
    }

    pub fn with_before_and_capacity(before: C, capacity: usize) -> Self {
        let mut arena = Arena::with_capacity(slots_for(capacity));
        let root = arena.sentinel(None);
        Self {
            arena,
            root,
            before,
            len: 0,
        }
    }

    /// Reserves room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional.saturating_mul(2));
    }

    pub fn before(&self) -> &C {
        &self.before
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value`. Never fails; equivalent values already present stay.
    pub fn add(&mut self, value: T) {
        self.root = util::insert(&mut self.arena, self.root, value, &self.before);
        self.len += 1;
    }

    /// Removes one value equivalent to `value` and returns it, or `None`
    /// when there is none.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let Some(target) = util::find(&self.arena, self.root, value, &self.before) else {
            debug!(len = self.len, "remove: no equivalent value");
            return None;
        };
        let (root, removed) = util::remove(&mut self.arena, self.root, target);
        self.root = root;
        self.len -= 1;
        Some(removed)
    }

    /// Returns a stored value equivalent to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        util::find(&self.arena, self.root, value, &self.before).and_then(|i| self.arena.value(i))
    }

    pub fn contains(&self, value: &T) -> bool {
        util::find(&self.arena, self.root, value, &self.before).is_some()
    }

    /// Drops every value, leaving a single sentinel.
    pub fn clear(&mut self) {
        debug!(len = self.len, "clear");
        self.arena.clear();
        self.root = self.arena.sentinel(None);
        self.len = 0;
    }

    /// Black nodes on any path from the root down to a sentinel, the root
    /// excluded and the sentinel included. Zero for an empty tree.
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut n = self.root;
        while !self.arena.is_sentinel(n) {
            n = self.arena.l(n);
            if self.arena.is_black(n) {
                height += 1;
            }
        }
        height
    }

    /// References to every stored value, in order.
    pub fn to_vec(&self) -> Vec<&T> {
        validate::in_order(&self.arena, self.root)
            .into_iter()
            .filter_map(|i| self.arena.value(i))
            .collect()
    }

    /// Re-checks every red-black invariant, the parent links, the value
    /// order and the value count.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant found.
    pub fn validate(&self) -> Result<(), Error> {
        validate::validate(&self.arena, self.root, self.len, &self.before)
    }

    /// Arena slots in use, sentinels included. `2 * len() + 1` in a
    /// consistent tree.
    pub fn slots(&self) -> usize {
        self.arena.live()
    }
}

impl<T, C> RbTree<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> bool,
{
    /// Renders the tree shape with node colors.
    pub fn print(&self) -> String {
        print::print(&self.arena, self.root, "")
    }
}

impl<T, C> fmt::Debug for RbTree<T, C>
where
    T: fmt::Debug,
    C: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.to_vec()).finish()
    }
}
