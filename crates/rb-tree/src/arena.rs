use std::mem;

use crate::types::{RbNode, Slot};

/// `Vec`-backed node storage with slot reuse.
///
/// Slots released by excision go onto a free list and are handed out again
/// by later promotions, so a long add/remove workload does not grow the
/// arena beyond its peak population.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    nodes: Vec<RbNode<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(slots),
            free: Vec::new(),
        }
    }

    pub fn reserve(&mut self, slots: usize) {
        self.nodes.reserve(slots.saturating_sub(self.free.len()));
    }

    /// Number of slots in use, sentinels included.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
    }

    #[inline]
    pub fn node(&self, i: u32) -> &RbNode<T> {
        &self.nodes[i as usize]
    }

    #[cfg(test)]
    pub fn node_mut(&mut self, i: u32) -> &mut RbNode<T> {
        &mut self.nodes[i as usize]
    }

    /// Allocates a fresh sentinel under `p`.
    pub fn sentinel(&mut self, p: Option<u32>) -> u32 {
        if let Some(i) = self.free.pop() {
            self.nodes[i as usize] = RbNode::sentinel(p);
            return i;
        }
        let i = u32::try_from(self.nodes.len()).expect("arena exceeds u32 index space");
        self.nodes.push(RbNode::sentinel(p));
        i
    }

    /// Returns slot `i` to the free list, yielding the value it held.
    pub fn release(&mut self, i: u32) -> Option<T> {
        let node = mem::replace(&mut self.nodes[i as usize], RbNode::sentinel(None));
        self.free.push(i);
        match node.slot {
            Slot::Populated { v, .. } => Some(v),
            Slot::Sentinel => None,
        }
    }

    /// Turns sentinel `i` into a red node holding `v` with two new sentinel
    /// children.
    pub fn promote(&mut self, i: u32, v: T) {
        if !self.is_sentinel(i) {
            panic!("invariant violation: promoting populated node {i}");
        }
        let l = self.sentinel(Some(i));
        let r = self.sentinel(Some(i));
        let node = &mut self.nodes[i as usize];
        node.slot = Slot::Populated { v, l, r };
        node.b = false;
    }

    /// Turns populated node `i` back into a black sentinel, releasing both of
    /// its children. Both children must be sentinels.
    pub fn demote(&mut self, i: u32) -> T {
        let (l, r) = self.children(i);
        if !self.is_sentinel(l) || !self.is_sentinel(r) {
            panic!("invariant violation: demoting node {i} with populated children");
        }
        self.release(l);
        self.release(r);
        let node = &mut self.nodes[i as usize];
        node.b = true;
        match mem::replace(&mut node.slot, Slot::Sentinel) {
            Slot::Populated { v, .. } => v,
            Slot::Sentinel => unreachable!("checked by children()"),
        }
    }

    #[inline]
    pub fn is_sentinel(&self, i: u32) -> bool {
        self.nodes[i as usize].is_sentinel()
    }

    #[inline]
    pub fn is_black(&self, i: u32) -> bool {
        self.nodes[i as usize].is_black()
    }

    #[inline]
    pub fn set_black(&mut self, i: u32, black: bool) {
        let node = &mut self.nodes[i as usize];
        if !black && node.is_sentinel() {
            panic!("invariant violation: coloring sentinel {i} red");
        }
        node.b = black;
    }

    #[inline]
    pub fn p(&self, i: u32) -> Option<u32> {
        self.nodes[i as usize].p
    }

    #[inline]
    pub fn set_p(&mut self, i: u32, p: Option<u32>) {
        self.nodes[i as usize].p = p;
    }

    /// Children of a node that is structurally guaranteed to be populated.
    #[inline]
    pub fn children(&self, i: u32) -> (u32, u32) {
        match self.nodes[i as usize].slot {
            Slot::Populated { l, r, .. } => (l, r),
            Slot::Sentinel => panic!("invariant violation: sentinel {i} has no children"),
        }
    }

    #[inline]
    pub fn l(&self, i: u32) -> u32 {
        self.children(i).0
    }

    #[inline]
    pub fn r(&self, i: u32) -> u32 {
        self.children(i).1
    }

    #[inline]
    pub fn set_l(&mut self, i: u32, child: u32) {
        match &mut self.nodes[i as usize].slot {
            Slot::Populated { l, .. } => *l = child,
            Slot::Sentinel => panic!("invariant violation: linking under sentinel {i}"),
        }
    }

    #[inline]
    pub fn set_r(&mut self, i: u32, child: u32) {
        match &mut self.nodes[i as usize].slot {
            Slot::Populated { r, .. } => *r = child,
            Slot::Sentinel => panic!("invariant violation: linking under sentinel {i}"),
        }
    }

    #[inline]
    pub fn value(&self, i: u32) -> Option<&T> {
        self.nodes[i as usize].value()
    }

    /// Swaps the value held by populated node `i` for `v`.
    pub fn replace_value(&mut self, i: u32, v: T) -> T {
        match &mut self.nodes[i as usize].slot {
            Slot::Populated { v: held, .. } => mem::replace(held, v),
            Slot::Sentinel => panic!("invariant violation: sentinel {i} holds no value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;

    #[test]
    fn promote_allocates_two_black_sentinels() {
        let mut arena = Arena::<i32>::with_capacity(3);
        let root = arena.sentinel(None);
        arena.promote(root, 7);

        let (l, r) = arena.children(root);
        assert!(!arena.is_black(root));
        assert_eq!(arena.value(root), Some(&7));
        for child in [l, r] {
            assert!(arena.is_sentinel(child));
            assert!(arena.is_black(child));
            assert_eq!(arena.p(child), Some(root));
        }
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::<i32>::with_capacity(0);
        let root = arena.sentinel(None);
        arena.promote(root, 1);
        let (l, _) = arena.children(root);

        assert_eq!(arena.release(l), None);
        assert_eq!(arena.live(), 2);
        let again = arena.sentinel(Some(root));
        assert_eq!(again, l);
        assert_eq!(arena.live(), 3);
    }

    #[test]
    fn demote_returns_value_and_frees_children() {
        let mut arena = Arena::<String>::with_capacity(3);
        let root = arena.sentinel(None);
        arena.promote(root, "x".to_string());

        assert_eq!(arena.demote(root), "x");
        assert!(arena.is_sentinel(root));
        assert!(arena.is_black(root));
        assert_eq!(arena.live(), 1);
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn coloring_sentinel_red_panics() {
        let mut arena = Arena::<i32>::with_capacity(1);
        let root = arena.sentinel(None);
        arena.set_black(root, false);
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn sentinel_children_panics() {
        let mut arena = Arena::<i32>::with_capacity(1);
        let root = arena.sentinel(None);
        let _ = arena.children(root);
    }
}
