//! Node model.
//!
//! Every position in the tree is an arena slot. Empty positions are real
//! sentinel nodes rather than `None` links, so rotation and rebalancing never
//! special-case a missing child. Links are `u32` indices into the arena; the
//! parent link is a back-reference only and carries no ownership.

/// What a slot currently holds.
#[derive(Clone, Debug)]
pub enum Slot<T> {
    /// Empty subtree position. Always black, never has children.
    Sentinel,
    /// Value-carrying position owning exactly two children.
    Populated { v: T, l: u32, r: u32 },
}

#[derive(Clone, Debug)]
pub struct RbNode<T> {
    pub p: Option<u32>,
    /// Node color: `true` = black, `false` = red.
    pub b: bool,
    pub slot: Slot<T>,
}

impl<T> RbNode<T> {
    pub fn sentinel(p: Option<u32>) -> Self {
        Self {
            p,
            b: true,
            slot: Slot::Sentinel,
        }
    }

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self.slot, Slot::Sentinel)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.b
    }

    #[inline]
    pub fn value(&self) -> Option<&T> {
        match &self.slot {
            Slot::Populated { v, .. } => Some(v),
            Slot::Sentinel => None,
        }
    }
}
