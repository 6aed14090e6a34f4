//! Graph construction errors.

use thiserror::Error;

use super::types::{EdgeId, NodeId};

/// Snapshot contract violations detected while building a [`Graph`](super::model::Graph).
///
/// Dangling edges are not errors: they are dropped during construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
	/// Two raw nodes share an identifier.
	#[error("duplicate node id `{id}` in snapshot")]
	DuplicateNodeId { id: NodeId },

	/// Two raw edges share an identifier.
	#[error("duplicate edge id `{id}` in snapshot")]
	DuplicateEdgeId { id: EdgeId },
}
