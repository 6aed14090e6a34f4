//! Graph invariants over generated snapshots.
//!
//! Snapshots mix hosts and interfaces, and edges may dangle, loop back on their
//! node, or run parallel to one another.

use std::collections::HashSet;

use overlay_topology::components::topology::model::NodeIdx;
use overlay_topology::components::topology::{build, on_edge_hover, on_node_hover};
use overlay_topology::{EdgeKind, NodeKind, RawEdge, RawNode};
use proptest::prelude::*;

/// Nodes are `n0..n{count}`; edge endpoints may name up to three missing nodes.
fn snapshot() -> impl Strategy<Value = (Vec<RawNode>, Vec<RawEdge>)> {
	(1usize..8)
		.prop_flat_map(|count| {
			(
				prop::collection::vec(any::<bool>(), count),
				prop::collection::vec((0..count + 3, 0..count + 3), 0..24),
			)
		})
		.prop_map(|(hosts, pairs)| {
			let nodes = hosts
				.iter()
				.enumerate()
				.map(|(i, &host)| {
					let kind = if host { NodeKind::Host } else { NodeKind::Interface };
					RawNode::new(format!("n{i}"), kind)
				})
				.collect();
			let edges = pairs
				.iter()
				.enumerate()
				.map(|(j, &(s, t))| RawEdge::new(format!("e{j}"), format!("n{s}"), format!("n{t}")))
				.collect();
			(nodes, edges)
		})
}

proptest! {
	#[test]
	fn built_edges_resolve_both_endpoints((nodes, edges) in snapshot()) {
		let graph = build(&nodes, &edges).unwrap();
		let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

		for edge in graph.edges() {
			prop_assert!(graph.node(edge.source).is_some());
			prop_assert!(graph.node(edge.target).is_some());
		}
		for raw in &edges {
			let resolvable = known.contains(raw.source.as_str()) && known.contains(raw.target.as_str());
			prop_assert_eq!(graph.edge_index(raw.id.as_str()).is_some(), resolvable);
		}
	}

	#[test]
	fn neighbors_are_the_opposite_endpoints_of_incident_edges((nodes, edges) in snapshot()) {
		let graph = build(&nodes, &edges).unwrap();

		for (idx, _) in graph.indexed_nodes() {
			let mut neighbors = graph.adjacency().neighbors(idx).to_vec();
			let mut opposites: Vec<NodeIdx> = graph
				.adjacency()
				.incident(idx)
				.iter()
				.map(|&e| graph.edge(e).unwrap().opposite(idx))
				.collect();
			neighbors.sort();
			opposites.sort();
			prop_assert_eq!(neighbors, opposites);
		}
	}

	#[test]
	fn host_edges_are_spokes((nodes, edges) in snapshot()) {
		let graph = build(&nodes, &edges).unwrap();

		for edge in graph.edges() {
			let touches_host = [edge.source, edge.target]
				.iter()
				.any(|&n| graph.node(n).unwrap().kind == NodeKind::Host);
			let expected = if touches_host { EdgeKind::Spoke } else { EdgeKind::Peer };
			prop_assert_eq!(edge.kind, expected);
		}
	}

	#[test]
	fn node_highlight_is_deterministic((nodes, edges) in snapshot()) {
		let graph = build(&nodes, &edges).unwrap();
		let ids = nodes
			.iter()
			.map(|n| n.id.to_string())
			.chain((0..3).map(|i| format!("missing{i}")));

		for id in ids {
			let first = on_node_hover(&graph, Some(id.as_str()));
			prop_assert_eq!(&first, &on_node_hover(&graph, Some(id.as_str())));

			match graph.node_index(&id) {
				Some(idx) => {
					let mut expected: HashSet<NodeIdx> =
						graph.adjacency().neighbors(idx).iter().copied().collect();
					expected.insert(idx);
					prop_assert_eq!(first.nodes().collect::<HashSet<_>>(), expected);
					prop_assert_eq!(first.edge_count(), graph.adjacency().incident(idx).len());
				}
				None => prop_assert!(first.is_empty()),
			}
		}
	}

	#[test]
	fn edge_highlight_is_deterministic((nodes, edges) in snapshot()) {
		let graph = build(&nodes, &edges).unwrap();

		for raw in &edges {
			let id = raw.id.as_str();
			let first = on_edge_hover(&graph, Some(id));
			prop_assert_eq!(&first, &on_edge_hover(&graph, Some(id)));

			match graph.edge_index(id) {
				Some(idx) => {
					let edge = graph.edge(idx).unwrap();
					let expected: HashSet<NodeIdx> = [edge.source, edge.target].into_iter().collect();
					prop_assert_eq!(first.nodes().collect::<HashSet<_>>(), expected);
					prop_assert_eq!(first.edges().collect::<Vec<_>>(), vec![idx]);
				}
				None => prop_assert!(first.is_empty()),
			}
		}
	}
}
