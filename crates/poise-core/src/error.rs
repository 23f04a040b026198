//! Errors returned by tree operations that are handed a bad node id.
//!
//! Geometry and dispatch never fail at runtime: degenerate parent sizes,
//! missing widget ancestors and non-widget parents are absorbed where they
//! occur. These variants only describe misuse of the public API.

use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The id is stale or was never issued by this tree.
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// A widget-only operation was applied to a plain scene node.
    #[error("node {0:?} is not a widget")]
    NotAWidget(NodeId),

    /// `add_child` on a node that already has a parent.
    #[error("node {0:?} already has a parent")]
    AlreadyParented(NodeId),

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle { parent: NodeId, child: NodeId },

    /// The scene root cannot be detached, reparented or destroyed.
    #[error("the scene root cannot be moved or destroyed")]
    RootImmovable,
}

pub type TreeResult<T> = Result<T, TreeError>;
