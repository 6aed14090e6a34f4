//! Hover highlight computation.
//!
//! Every hover event produces a fresh [`HighlightState`] value. Nothing is
//! cleared or patched in place, so the renderer can hold on to the previous
//! value without observing a half-updated set.

use std::collections::HashSet;

use super::model::{EdgeIdx, Graph, NodeIdx};

/// Nodes and edges emphasized for the current hover target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	nodes: HashSet<NodeIdx>,
	edges: HashSet<EdgeIdx>,
}

impl HighlightState {
	pub fn contains_node(&self, idx: NodeIdx) -> bool {
		self.nodes.contains(&idx)
	}

	pub fn contains_edge(&self, idx: EdgeIdx) -> bool {
		self.edges.contains(&idx)
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}

	pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> + '_ {
		self.nodes.iter().copied()
	}

	pub fn edges(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
		self.edges.iter().copied()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}
}

/// Highlight for a hovered node: the node, its neighbors and its incident edges.
///
/// `None` or an id absent from `graph` yields an empty state. Cost is
/// proportional to the node's degree.
pub fn on_node_hover(graph: &Graph, id: Option<&str>) -> HighlightState {
	let Some(idx) = id.and_then(|id| graph.node_index(id)) else {
		return HighlightState::default();
	};
	node_highlight(graph, idx)
}

/// Highlight for a hovered edge: its two endpoints and the edge itself.
///
/// `None` or an id absent from `graph` yields an empty state.
pub fn on_edge_hover(graph: &Graph, id: Option<&str>) -> HighlightState {
	let Some(idx) = id.and_then(|id| graph.edge_index(id)) else {
		return HighlightState::default();
	};
	edge_highlight(graph, idx)
}

pub(crate) fn node_highlight(graph: &Graph, idx: NodeIdx) -> HighlightState {
	if graph.node(idx).is_none() {
		return HighlightState::default();
	}
	let adjacency = graph.adjacency();
	let neighbors = adjacency.neighbors(idx);

	let mut nodes = HashSet::with_capacity(neighbors.len() + 1);
	nodes.insert(idx);
	nodes.extend(neighbors.iter().copied());

	HighlightState {
		nodes,
		edges: adjacency.incident(idx).iter().copied().collect(),
	}
}

pub(crate) fn edge_highlight(graph: &Graph, idx: EdgeIdx) -> HighlightState {
	let Some(edge) = graph.edge(idx) else {
		return HighlightState::default();
	};
	HighlightState {
		nodes: [edge.source, edge.target].into_iter().collect(),
		edges: [idx].into_iter().collect(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::model::build;
	use crate::components::topology::types::{NodeKind, RawEdge, RawNode};

	fn star() -> Graph {
		build(
			&[
				RawNode::new("h1", NodeKind::Host),
				RawNode::new("i1", NodeKind::Interface),
				RawNode::new("i2", NodeKind::Interface),
				RawNode::new("i3", NodeKind::Interface),
			],
			&[
				RawEdge::new("h1-i1", "h1", "i1"),
				RawEdge::new("i1-i2", "i1", "i2"),
				RawEdge::new("i2-i3", "i2", "i3"),
			],
		)
		.unwrap()
	}

	#[test]
	fn node_hover_covers_one_hop() {
		let graph = star();
		let state = on_node_hover(&graph, Some("i1"));

		let ids: HashSet<&str> = state
			.nodes()
			.map(|n| graph.node(n).unwrap().id.as_str())
			.collect();
		assert_eq!(ids, HashSet::from(["h1", "i1", "i2"]));
		assert_eq!(state.edge_count(), 2);
		assert!(!state.contains_edge(graph.edge_index("i2-i3").unwrap()));
	}

	#[test]
	fn edge_hover_covers_endpoints() {
		let graph = star();
		let state = on_edge_hover(&graph, Some("i2-i3"));

		assert_eq!(state.node_count(), 2);
		assert!(state.contains_node(graph.node_index("i2").unwrap()));
		assert!(state.contains_node(graph.node_index("i3").unwrap()));
		assert_eq!(state.edges().collect::<Vec<_>>(), vec![graph.edge_index("i2-i3").unwrap()]);
	}

	#[test]
	fn unknown_or_null_ids_are_empty() {
		let graph = star();
		assert!(on_node_hover(&graph, None).is_empty());
		assert!(on_node_hover(&graph, Some("nope")).is_empty());
		assert!(on_edge_hover(&graph, None).is_empty());
		assert!(on_edge_hover(&graph, Some("nope")).is_empty());
	}

	#[test]
	fn repeated_hover_is_identical() {
		let graph = star();
		assert_eq!(on_node_hover(&graph, Some("i2")), on_node_hover(&graph, Some("i2")));
	}

	#[test]
	fn isolated_node_highlights_itself() {
		let graph = build(&[RawNode::new("i1", NodeKind::Interface)], &[]).unwrap();
		let state = on_node_hover(&graph, Some("i1"));
		assert_eq!(state.node_count(), 1);
		assert_eq!(state.edge_count(), 0);
	}
}
