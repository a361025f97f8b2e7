//! Arena-backed red-black tree ordered by a caller-supplied predicate.
//!
//! Every empty subtree is a real, always-black sentinel node, so rotation and
//! rebalancing code never special-cases a missing child. Nodes live in a
//! `Vec` arena and link to each other by `u32` index; the parent link is a
//! plain back-reference used for upward walks during rebalancing.
//!
//! Insertion, removal and lookup are worst-case O(log n). The tree is not
//! synchronized; mutation takes `&mut self`.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | `types` | node and slot representation |
//! | `arena` | slot storage, sentinel promotion and demotion |
//! | `util` | rotation, insert and remove rebalancing |
//! | `validate` | invariant checker and in-order walk |
//! | `print` | debug renderer |
//! | `tree` | [`RbTree`] container |

mod arena;
mod error;
mod print;
mod tree;
mod types;
mod util;
mod validate;

pub use error::Error;
pub use tree::RbTree;
