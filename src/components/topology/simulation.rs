//! Force simulation driving node positions.
//!
//! `force_graph` integrates many-body repulsion and velocity damping. It only
//! knows one global spring, so its spring is disabled and link forces are
//! applied here instead, d3-style: every tick each link nudges its endpoints
//! towards its own rest distance, scaled by the link strength and the current
//! heat (`alpha`). Heat decays every tick and the simulation goes idle once it
//! drops below `alpha_min`; [`ForceEngine::reheat`] restarts it.

use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::model::{EdgeIdx, Graph, NodeIdx};
use super::physics::{ForceEngine, LinkParams, PhysicsConfig};

/// Converts d3-scale charge strengths into `force_graph` repulsion.
const CHARGE_SCALE: f64 = 10.0;
const NODE_MASS: f32 = 10.0;

#[derive(Clone, Debug)]
struct Link {
	source: usize,
	target: usize,
	params: LinkParams,
	/// Share of the correction applied to the target end.
	bias: f64,
}

/// Owned simulation handle for one mounted view and one graph.
pub struct TopologySimulation {
	engine: ForceGraph<NodeIdx, ()>,
	handles: Vec<DefaultNodeIdx>,
	links: Vec<Link>,
	charges: Vec<f64>,
	pinned: Vec<bool>,
	positions: Vec<(f64, f64)>,
	alpha: f64,
	alpha_decay: f64,
	alpha_min: f64,
}

impl TopologySimulation {
	/// Create a simulation for `graph` with nodes seeded on a ring around the origin.
	///
	/// The simulation starts cold; apply a [`PhysicsPolicy`](super::physics::PhysicsPolicy)
	/// to configure and heat it.
	pub fn new(graph: &Graph, config: &PhysicsConfig) -> Self {
		let mut engine = ForceGraph::new(SimulationParameters {
			force_charge: 0.0,
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: config.velocity_retention as f32,
		});

		let count = graph.nodes().len();
		let ring = 10.0 * (count.max(1) as f64).sqrt();
		let mut handles = Vec::with_capacity(count);
		let mut positions = Vec::with_capacity(count);

		for (idx, _) in graph.indexed_nodes() {
			let angle = (idx.0 as f64) * 2.0 * PI / count as f64;
			let (x, y) = (ring * angle.cos(), ring * angle.sin());
			handles.push(engine.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: NODE_MASS,
				is_anchor: false,
				user_data: idx,
			}));
			positions.push((x, y));
		}

		let adjacency = graph.adjacency();
		let links = graph
			.edges()
			.iter()
			.map(|edge| {
				let ds = adjacency.incident(edge.source).len() as f64;
				let dt = adjacency.incident(edge.target).len() as f64;
				Link {
					source: edge.source.0,
					target: edge.target.0,
					params: config.peer,
					bias: ds / (ds + dt),
				}
			})
			.collect();

		Self {
			engine,
			handles,
			links,
			charges: vec![config.charge; count],
			pinned: vec![false; count],
			positions,
			alpha: 0.0,
			alpha_decay: config.alpha_decay,
			alpha_min: config.alpha_min,
		}
	}

	/// Copy positions and pins of nodes that survive from `previous`, matched by id.
	pub fn carry_over(&mut self, graph: &Graph, previous_graph: &Graph, previous: &TopologySimulation) {
		let mut carried = 0usize;
		for (idx, node) in graph.indexed_nodes() {
			let Some(old) = previous_graph.node_index(node.id.as_str()) else {
				continue;
			};
			if let Some(&(x, y)) = previous.positions.get(old.0) {
				self.positions[idx.0] = (x, y);
				self.pinned[idx.0] = previous.pinned.get(old.0).copied().unwrap_or(false);
				carried += 1;
			}
		}
		self.write_back();
		debug!("topology: carried {} node positions into new layout", carried);
	}

	pub fn positions(&self) -> &[(f64, f64)] {
		&self.positions
	}

	pub fn position(&self, idx: NodeIdx) -> Option<(f64, f64)> {
		self.positions.get(idx.0).copied()
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_running(&self) -> bool {
		self.alpha >= self.alpha_min
	}

	pub fn link_params(&self, edge: EdgeIdx) -> Option<LinkParams> {
		self.links.get(edge.0).map(|l| l.params)
	}

	/// Fix a node at a position, e.g. while it is dragged. It stays pinned.
	pub fn pin(&mut self, idx: NodeIdx, x: f64, y: f64) {
		let Some(pos) = self.positions.get_mut(idx.0) else {
			return;
		};
		*pos = (x, y);
		self.pinned[idx.0] = true;
		let handle = self.handles[idx.0];
		self.engine.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	/// Advance one step. Returns `false` without doing anything once cooled.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.is_running() {
			return false;
		}

		self.engine.parameters.force_charge = (self.mean_repulsion() * self.alpha) as f32;
		self.engine.update(dt);

		let positions = &mut self.positions;
		self.engine.visit_nodes(|node| {
			let NodeIdx(i) = node.data.user_data;
			positions[i] = (node.x() as f64, node.y() as f64);
		});

		self.apply_links();
		self.write_back();

		self.alpha -= self.alpha * self.alpha_decay;
		true
	}

	fn mean_repulsion(&self) -> f64 {
		if self.charges.is_empty() {
			return 0.0;
		}
		let sum: f64 = self.charges.iter().map(|c| -c).sum();
		(sum / self.charges.len() as f64).max(0.0) * CHARGE_SCALE
	}

	fn apply_links(&mut self) {
		for link in &self.links {
			let (xs, ys) = self.positions[link.source];
			let (xt, yt) = self.positions[link.target];
			let (dx, dy) = (xt - xs, yt - ys);
			let len = (dx * dx + dy * dy).sqrt();
			if len < 1e-6 {
				continue;
			}
			let k = (len - link.params.distance) / len * self.alpha * link.params.strength;
			let (cx, cy) = (dx * k, dy * k);

			if !self.pinned[link.target] {
				let t = &mut self.positions[link.target];
				t.0 -= cx * link.bias;
				t.1 -= cy * link.bias;
			}
			if !self.pinned[link.source] {
				let s = &mut self.positions[link.source];
				s.0 += cx * (1.0 - link.bias);
				s.1 += cy * (1.0 - link.bias);
			}
		}
	}

	fn write_back(&mut self) {
		let positions = &self.positions;
		let pinned = &self.pinned;
		self.engine.visit_nodes_mut(|node| {
			let NodeIdx(i) = node.data.user_data;
			let (x, y) = positions[i];
			node.data.x = x as f32;
			node.data.y = y as f32;
			node.data.is_anchor = pinned[i];
		});
	}
}

impl ForceEngine for TopologySimulation {
	fn set_link(&mut self, edge: EdgeIdx, params: LinkParams) {
		if let Some(link) = self.links.get_mut(edge.0) {
			link.params = params;
		}
	}

	fn set_charge(&mut self, node: NodeIdx, strength: f64) {
		if let Some(charge) = self.charges.get_mut(node.0) {
			*charge = strength;
		}
	}

	fn reheat(&mut self) {
		self.alpha = 1.0;
		debug!("topology: simulation reheated");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::model::build;
	use crate::components::topology::physics::PhysicsPolicy;
	use crate::components::topology::types::{NodeKind, RawEdge, RawNode};

	fn pair() -> Graph {
		build(
			&[RawNode::new("h1", NodeKind::Host), RawNode::new("i1", NodeKind::Interface)],
			&[RawEdge::new("e", "h1", "i1")],
		)
		.unwrap()
	}

	fn distance(sim: &TopologySimulation, a: usize, b: usize) -> f64 {
		let (xa, ya) = sim.positions()[a];
		let (xb, yb) = sim.positions()[b];
		((xa - xb).powi(2) + (ya - yb).powi(2)).sqrt()
	}

	#[test]
	fn starts_cold_until_policy_applied() {
		let graph = pair();
		let config = PhysicsConfig::default();
		let mut sim = TopologySimulation::new(&graph, &config);
		assert!(!sim.is_running());
		assert!(!sim.tick(0.016));

		PhysicsPolicy::new(config).apply(&graph, &mut sim);
		assert!(sim.is_running());
		assert_eq!(sim.link_params(EdgeIdx(0)).unwrap().distance, 6.0);
	}

	#[test]
	fn cools_down_and_stops() {
		let graph = pair();
		let config = PhysicsConfig::default();
		let mut sim = TopologySimulation::new(&graph, &config);
		PhysicsPolicy::new(config).apply(&graph, &mut sim);

		let mut ticks = 0;
		while sim.tick(0.016) {
			ticks += 1;
			assert!(ticks < 10_000);
		}
		assert!(sim.alpha() < 0.001);
		assert!(sim.positions().iter().all(|(x, y)| x.is_finite() && y.is_finite()));
	}

	#[test]
	fn link_pass_pulls_towards_rest_distance() {
		let graph = pair();
		let config = PhysicsConfig::default();
		let mut sim = TopologySimulation::new(&graph, &config);
		sim.pin(NodeIdx(0), 0.0, 0.0);
		sim.positions[1] = (100.0, 0.0);
		sim.set_link(
			EdgeIdx(0),
			LinkParams {
				distance: 6.0,
				strength: 1.0,
			},
		);
		sim.alpha = 1.0;
		sim.apply_links();

		// pinned source stays, the free end absorbs its share of the correction
		assert_eq!(sim.positions()[0], (0.0, 0.0));
		assert!(distance(&sim, 0, 1) < 100.0);
		assert!(distance(&sim, 0, 1) >= 6.0 - 1e-9);
	}

	#[test]
	fn carry_over_keeps_surviving_positions() {
		let config = PhysicsConfig::default();
		let old_graph = pair();
		let mut old = TopologySimulation::new(&old_graph, &config);
		old.pin(NodeIdx(1), 42.0, -7.0);

		let new_graph = build(
			&[RawNode::new("i2", NodeKind::Interface), RawNode::new("i1", NodeKind::Interface)],
			&[],
		)
		.unwrap();
		let mut sim = TopologySimulation::new(&new_graph, &config);
		sim.carry_over(&new_graph, &old_graph, &old);

		assert_eq!(sim.position(NodeIdx(1)), Some((42.0, -7.0)));
		assert_ne!(sim.position(NodeIdx(0)), Some((42.0, -7.0)));
	}

	#[test]
	fn empty_graph_is_harmless() {
		let graph = Graph::default();
		let config = PhysicsConfig::default();
		let mut sim = TopologySimulation::new(&graph, &config);
		PhysicsPolicy::new(config).apply(&graph, &mut sim);
		assert!(sim.tick(0.016));
		assert!(sim.positions().is_empty());
	}
}
