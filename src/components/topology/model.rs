//! Graph model built from a snapshot, with a bidirectional adjacency index.
//!
//! A [`Graph`] is immutable once built. A new snapshot always produces a new
//! graph, so indices handed out by an old graph are never reinterpreted; lookups
//! by id against the new graph simply return `None` for vanished entities.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::debug;

use super::error::GraphError;
use super::types::{
	EdgeAttrs, EdgeId, EdgeKind, NodeAttrs, NodeId, NodeKind, RawEdge, RawNode, TopologySnapshot,
};

/// Dense index of a node inside the [`Graph`] that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub usize);

/// Dense index of an edge inside the [`Graph`] that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

/// A node of the built graph. Its position lives in the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: NodeId,
	pub kind: NodeKind,
	pub attrs: NodeAttrs,
}

/// An edge whose endpoints are guaranteed to exist.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub id: EdgeId,
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub kind: EdgeKind,
	pub attrs: EdgeAttrs,
}

impl GraphEdge {
	/// The endpoint opposite to `node`. A self-loop returns `node` itself.
	pub fn opposite(&self, node: NodeIdx) -> NodeIdx {
		if self.source == node {
			self.target
		} else {
			self.source
		}
	}
}

/// Per-node incident edges and neighbors.
///
/// Parallel edges are not collapsed: a neighbor connected by two edges
/// appears twice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyIndex {
	incident: Vec<Vec<EdgeIdx>>,
	neighbors: Vec<Vec<NodeIdx>>,
}

impl AdjacencyIndex {
	fn build(node_count: usize, edges: &[GraphEdge]) -> Self {
		let mut incident = vec![Vec::new(); node_count];
		let mut neighbors = vec![Vec::new(); node_count];

		for (i, edge) in edges.iter().enumerate() {
			let idx = EdgeIdx(i);
			incident[edge.source.0].push(idx);
			neighbors[edge.source.0].push(edge.target);
			if edge.source != edge.target {
				incident[edge.target.0].push(idx);
				neighbors[edge.target.0].push(edge.source);
			}
		}

		Self {
			incident,
			neighbors,
		}
	}

	/// Edges touching `node`. Empty for an index this graph never issued.
	pub fn incident(&self, node: NodeIdx) -> &[EdgeIdx] {
		self.incident.get(node.0).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Opposite endpoints of [`incident`](Self::incident), in the same order.
	pub fn neighbors(&self, node: NodeIdx) -> &[NodeIdx] {
		self.neighbors.get(node.0).map(Vec::as_slice).unwrap_or(&[])
	}
}

/// Node and edge sets of one snapshot plus the derived adjacency.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	node_lookup: HashMap<NodeId, NodeIdx>,
	edge_lookup: HashMap<EdgeId, EdgeIdx>,
	adjacency: AdjacencyIndex,
}

impl Graph {
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, idx: NodeIdx) -> Option<&GraphNode> {
		self.nodes.get(idx.0)
	}

	pub fn edge(&self, idx: EdgeIdx) -> Option<&GraphEdge> {
		self.edges.get(idx.0)
	}

	/// Resolve a node identifier. Unknown ids resolve to `None`.
	pub fn node_index(&self, id: &str) -> Option<NodeIdx> {
		self.node_lookup.get(id).copied()
	}

	/// Resolve an edge identifier. Unknown ids resolve to `None`.
	pub fn edge_index(&self, id: &str) -> Option<EdgeIdx> {
		self.edge_lookup.get(id).copied()
	}

	pub fn adjacency(&self) -> &AdjacencyIndex {
		&self.adjacency
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Iterate nodes together with their indices.
	pub fn indexed_nodes(&self) -> impl Iterator<Item = (NodeIdx, &GraphNode)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	/// Iterate edges together with their indices.
	pub fn indexed_edges(&self) -> impl Iterator<Item = (EdgeIdx, &GraphEdge)> {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeIdx(i), e))
	}
}

/// Build a graph from raw node and edge lists.
///
/// Fails on duplicate node or edge identifiers. Edges touching a host are
/// spokes regardless of an explicit kind. Edges whose source or target is
/// missing from `nodes` are dropped, since the data layer may return a
/// filtered page of nodes.
pub fn build(nodes: &[RawNode], edges: &[RawEdge]) -> Result<Graph, GraphError> {
	let mut graph_nodes = Vec::with_capacity(nodes.len());
	let mut node_lookup = HashMap::with_capacity(nodes.len());

	for raw in nodes {
		match node_lookup.entry(raw.id.clone()) {
			Entry::Occupied(_) => {
				return Err(GraphError::DuplicateNodeId { id: raw.id.clone() });
			}
			Entry::Vacant(slot) => {
				slot.insert(NodeIdx(graph_nodes.len()));
			}
		}
		graph_nodes.push(GraphNode {
			id: raw.id.clone(),
			kind: raw.kind,
			attrs: raw.attrs.clone(),
		});
	}

	let mut graph_edges = Vec::with_capacity(edges.len());
	let mut edge_lookup = HashMap::with_capacity(edges.len());
	let mut dropped = 0usize;

	for raw in edges {
		let (Some(&source), Some(&target)) =
			(node_lookup.get(&raw.source), node_lookup.get(&raw.target))
		else {
			dropped += 1;
			continue;
		};
		match edge_lookup.entry(raw.id.clone()) {
			Entry::Occupied(_) => {
				return Err(GraphError::DuplicateEdgeId { id: raw.id.clone() });
			}
			Entry::Vacant(slot) => {
				slot.insert(EdgeIdx(graph_edges.len()));
			}
		}
		let derived = EdgeKind::between(graph_nodes[source.0].kind, graph_nodes[target.0].kind);
		let kind = match (derived, raw.kind) {
			// an anchor endpoint always makes a spoke
			(EdgeKind::Spoke, Some(EdgeKind::Peer)) => {
				debug!("topology: edge {} touches a host, ignoring explicit peer kind", raw.id);
				EdgeKind::Spoke
			}
			(EdgeKind::Spoke, _) => EdgeKind::Spoke,
			(EdgeKind::Peer, explicit) => explicit.unwrap_or(EdgeKind::Peer),
		};
		graph_edges.push(GraphEdge {
			id: raw.id.clone(),
			source,
			target,
			kind,
			attrs: raw.attrs.clone(),
		});
	}

	if dropped > 0 {
		debug!("topology: dropped {} edges with endpoints outside the snapshot", dropped);
	}

	let adjacency = AdjacencyIndex::build(graph_nodes.len(), &graph_edges);

	Ok(Graph {
		nodes: graph_nodes,
		edges: graph_edges,
		node_lookup,
		edge_lookup,
		adjacency,
	})
}

impl TopologySnapshot {
	/// Build the graph for this snapshot. See [`build`].
	pub fn build(&self) -> Result<Graph, GraphError> {
		build(&self.nodes, &self.edges)
	}
}
