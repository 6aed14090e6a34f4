//! Pointer routing: hover state machine and click forwarding.
//!
//! The rendering surface reports what is under the pointer as a [`Picked`]
//! identifier. The coordinator resolves it against the current [`Graph`],
//! recomputes the [`HighlightState`] when the hover target changes, and tells
//! the host application through a [`TopologyEvents`] sink.
//!
//! Only tunnels between two interfaces respond to hover. Pointing at a
//! host-to-interface spoke counts as pointing at nothing.

use super::highlight::{self, HighlightState};
use super::model::{Graph, GraphEdge, NodeIdx};
use super::types::{EdgeId, EdgeKind, NodeId};

/// Entity under the pointer, as reported by the rendering surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Picked {
	Node(NodeId),
	Edge(EdgeId),
	Nothing,
}

/// Current hover target. Node and edge hover never coexist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverTarget {
	#[default]
	Idle,
	Node(NodeId),
	Edge(EdgeId),
}

/// Semantic callbacks exposed to the host application.
pub trait TopologyEvents {
	fn node_hovered(&self, id: Option<&NodeId>);
	fn link_hovered(&self, id: Option<&EdgeId>);
	fn node_clicked(&self, id: &NodeId);
}

/// Whether hovering `edge` highlights it.
pub fn is_hoverable(edge: &GraphEdge) -> bool {
	match edge.kind {
		EdgeKind::Peer => true,
		EdgeKind::Spoke => false,
	}
}

/// Routes pointer events for one mounted view.
#[derive(Clone, Debug, Default)]
pub struct InteractionCoordinator {
	hover: HoverTarget,
	highlight: HighlightState,
}

impl InteractionCoordinator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn hover(&self) -> &HoverTarget {
		&self.hover
	}

	pub fn highlight(&self) -> &HighlightState {
		&self.highlight
	}

	/// Index of the hovered node in `graph`, if a node is hovered.
	pub fn hovered_node(&self, graph: &Graph) -> Option<NodeIdx> {
		match &self.hover {
			HoverTarget::Node(id) => graph.node_index(id.as_str()),
			HoverTarget::Edge(_) | HoverTarget::Idle => None,
		}
	}

	/// Handle pointer movement. Returns `true` when the hover target changed.
	pub fn handle_pointer_move<E: TopologyEvents + ?Sized>(
		&mut self,
		graph: &Graph,
		picked: Picked,
		events: &E,
	) -> bool {
		let next = resolve(graph, picked);
		if next == self.hover {
			return false;
		}
		self.transition(graph, next, events);
		true
	}

	/// Handle a click. Only nodes produce an event.
	pub fn handle_click<E: TopologyEvents + ?Sized>(&self, graph: &Graph, picked: &Picked, events: &E) {
		if let Picked::Node(id) = picked {
			if graph.node_index(id.as_str()).is_some() {
				events.node_clicked(id);
			}
		}
	}

	/// The pointer left the surface.
	pub fn leave<E: TopologyEvents + ?Sized>(&mut self, graph: &Graph, events: &E) {
		if self.hover != HoverTarget::Idle {
			self.transition(graph, HoverTarget::Idle, events);
		}
	}

	/// Re-resolve the hover target against a freshly built `graph`.
	///
	/// A target that vanished with the rebuild falls back to idle and the host
	/// gets the matching `None` event. A surviving target keeps its hover and
	/// only has its highlight recomputed for the new indices.
	pub fn rebind<E: TopologyEvents + ?Sized>(&mut self, graph: &Graph, events: &E) {
		let picked = match &self.hover {
			HoverTarget::Idle => Picked::Nothing,
			HoverTarget::Node(id) => Picked::Node(id.clone()),
			HoverTarget::Edge(id) => Picked::Edge(id.clone()),
		};
		let next = resolve(graph, picked);
		if next == self.hover {
			self.highlight = highlight_for(graph, &next);
		} else {
			self.transition(graph, next, events);
		}
	}

	fn transition<E: TopologyEvents + ?Sized>(&mut self, graph: &Graph, next: HoverTarget, events: &E) {
		match (&self.hover, &next) {
			(HoverTarget::Node(_), HoverTarget::Node(_)) | (HoverTarget::Edge(_), HoverTarget::Edge(_)) => {}
			(HoverTarget::Node(_), _) => events.node_hovered(None),
			(HoverTarget::Edge(_), _) => events.link_hovered(None),
			(HoverTarget::Idle, _) => {}
		}

		self.highlight = highlight_for(graph, &next);

		match &next {
			HoverTarget::Node(id) => events.node_hovered(Some(id)),
			HoverTarget::Edge(id) => events.link_hovered(Some(id)),
			HoverTarget::Idle => {}
		}
		self.hover = next;
	}
}

fn resolve(graph: &Graph, picked: Picked) -> HoverTarget {
	match picked {
		Picked::Node(id) if graph.node_index(id.as_str()).is_some() => HoverTarget::Node(id),
		Picked::Edge(id) => {
			let hoverable = graph
				.edge_index(id.as_str())
				.and_then(|idx| graph.edge(idx))
				.is_some_and(is_hoverable);
			if hoverable {
				HoverTarget::Edge(id)
			} else {
				HoverTarget::Idle
			}
		}
		Picked::Node(_) | Picked::Nothing => HoverTarget::Idle,
	}
}

fn highlight_for(graph: &Graph, target: &HoverTarget) -> HighlightState {
	match target {
		HoverTarget::Idle => HighlightState::default(),
		HoverTarget::Node(id) => highlight::on_node_hover(graph, Some(id.as_str())),
		HoverTarget::Edge(id) => highlight::on_edge_hover(graph, Some(id.as_str())),
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::topology::model::build;
	use crate::components::topology::types::{NodeKind, RawEdge, RawNode};

	#[derive(Debug, PartialEq)]
	enum Event {
		Node(Option<String>),
		Link(Option<String>),
		Click(String),
	}

	#[derive(Default)]
	struct Log(RefCell<Vec<Event>>);

	impl Log {
		fn take(&self) -> Vec<Event> {
			self.0.take()
		}
	}

	impl TopologyEvents for Log {
		fn node_hovered(&self, id: Option<&NodeId>) {
			self.0.borrow_mut().push(Event::Node(id.map(|i| i.to_string())));
		}

		fn link_hovered(&self, id: Option<&EdgeId>) {
			self.0.borrow_mut().push(Event::Link(id.map(|i| i.to_string())));
		}

		fn node_clicked(&self, id: &NodeId) {
			self.0.borrow_mut().push(Event::Click(id.to_string()));
		}
	}

	fn graph() -> Graph {
		build(
			&[
				RawNode::new("h1", NodeKind::Host),
				RawNode::new("i1", NodeKind::Interface),
				RawNode::new("i2", NodeKind::Interface),
			],
			&[RawEdge::new("spoke", "h1", "i1"), RawEdge::new("tunnel", "i1", "i2")],
		)
		.unwrap()
	}

	fn node(id: &str) -> Picked {
		Picked::Node(id.into())
	}

	fn edge(id: &str) -> Picked {
		Picked::Edge(id.into())
	}

	#[test]
	fn node_to_edge_clears_node_first() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();

		assert!(coordinator.handle_pointer_move(&graph, node("i1"), &log));
		assert!(coordinator.handle_pointer_move(&graph, edge("tunnel"), &log));

		assert_eq!(
			log.take(),
			vec![
				Event::Node(Some("i1".into())),
				Event::Node(None),
				Event::Link(Some("tunnel".into())),
			]
		);
		assert_eq!(coordinator.highlight().edge_count(), 1);
		assert_eq!(coordinator.highlight().node_count(), 2);
	}

	#[test]
	fn same_target_is_not_reported_twice() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();

		coordinator.handle_pointer_move(&graph, node("i1"), &log);
		let before = coordinator.highlight().clone();
		assert!(!coordinator.handle_pointer_move(&graph, node("i1"), &log));

		assert_eq!(log.take().len(), 1);
		assert_eq!(coordinator.highlight(), &before);
	}

	#[test]
	fn spoke_edges_count_as_nothing() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();

		assert!(!coordinator.handle_pointer_move(&graph, edge("spoke"), &log));
		assert_eq!(coordinator.hover(), &HoverTarget::Idle);
		assert!(coordinator.highlight().is_empty());

		coordinator.handle_pointer_move(&graph, edge("tunnel"), &log);
		coordinator.handle_pointer_move(&graph, edge("spoke"), &log);
		assert_eq!(
			log.take(),
			vec![Event::Link(Some("tunnel".into())), Event::Link(None)]
		);
	}

	#[test]
	fn stale_ids_are_nothing() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();

		assert!(!coordinator.handle_pointer_move(&graph, node("gone"), &log));
		coordinator.handle_click(&graph, &node("gone"), &log);
		assert!(log.take().is_empty());
	}

	#[test]
	fn clicks_only_forward_nodes() {
		let graph = graph();
		let log = Log::default();
		let coordinator = InteractionCoordinator::new();

		coordinator.handle_click(&graph, &node("h1"), &log);
		coordinator.handle_click(&graph, &edge("tunnel"), &log);
		coordinator.handle_click(&graph, &Picked::Nothing, &log);

		assert_eq!(log.take(), vec![Event::Click("h1".into())]);
	}

	#[test]
	fn leave_returns_to_idle() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();

		coordinator.handle_pointer_move(&graph, node("h1"), &log);
		coordinator.leave(&graph, &log);
		coordinator.leave(&graph, &log);

		assert_eq!(coordinator.hover(), &HoverTarget::Idle);
		assert!(coordinator.highlight().is_empty());
		assert_eq!(log.take(), vec![Event::Node(Some("h1".into())), Event::Node(None)]);
	}

	#[test]
	fn rebind_keeps_surviving_hover_and_drops_stale_one() {
		let graph = graph();
		let log = Log::default();
		let mut coordinator = InteractionCoordinator::new();
		coordinator.handle_pointer_move(&graph, node("i2"), &log);
		log.take();

		// i2 survives at a different index
		let reordered = build(
			&[RawNode::new("i2", NodeKind::Interface), RawNode::new("i1", NodeKind::Interface)],
			&[RawEdge::new("tunnel", "i1", "i2")],
		)
		.unwrap();
		coordinator.rebind(&reordered, &log);
		assert!(log.take().is_empty());
		assert_eq!(coordinator.hovered_node(&reordered), reordered.node_index("i2"));
		assert_eq!(coordinator.highlight().node_count(), 2);

		let without = build(&[RawNode::new("i1", NodeKind::Interface)], &[]).unwrap();
		coordinator.rebind(&without, &log);
		assert_eq!(log.take(), vec![Event::Node(None)]);
		assert!(coordinator.highlight().is_empty());
	}
}
