use thiserror::Error;

/// Broken red-black invariant reported by [`RbTree::validate`].
///
/// Node numbers are arena indices, useful together with
/// [`RbTree::print`].
///
/// [`RbTree::validate`]: crate::RbTree::validate
/// [`RbTree::print`]: crate::RbTree::print
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("root {0} has a parent")]
    RootHasParent(u32),
    #[error("root {0} is not black")]
    RootNotBlack(u32),
    #[error("sentinel {0} is red")]
    RedSentinel(u32),
    #[error("red node {node} has red child {child}")]
    ConsecutiveReds { node: u32, child: u32 },
    #[error("child {child} does not link back to parent {parent}")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("node {node} has unbalanced blacks, left:{left} right:{right}")]
    UnbalancedBlacks { node: u32, left: usize, right: usize },
    #[error("node {node} orders before its in-order predecessor {prev}")]
    SortOrder { prev: u32, node: u32 },
    #[error("tree holds {found} values, expected {expected}")]
    CountMismatch { found: usize, expected: usize },
}
