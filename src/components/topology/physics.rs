//! Per-kind force parameters for the layout simulation.
//!
//! Hosts anchor their interfaces with short, stiff spokes. Tunnels between
//! interfaces are long and soft so peer meshes spread out instead of knotting
//! on top of their hosts.

use log::debug;
use serde::Deserialize;

use super::model::{EdgeIdx, Graph, GraphEdge, GraphNode, NodeIdx};
use super::types::EdgeKind;

/// Rest length and stiffness of a link force.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct LinkParams {
	/// Target distance between the endpoints, in world units.
	pub distance: f64,
	/// Fraction of the distance error corrected per tick at full heat (0..=1).
	pub strength: f64,
}

/// Tunable physics settings. Missing fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Links with at least one anchor endpoint.
	pub spoke: LinkParams,
	/// Links between two leaves.
	pub peer: LinkParams,
	/// Repulsive many-body strength shared by every node (negative repels).
	pub charge: f64,
	/// Fraction of heat lost per tick.
	pub alpha_decay: f64,
	/// Heat below which the simulation stops ticking.
	pub alpha_min: f64,
	/// Velocity damping handed to the force engine (0..=1, higher keeps more).
	pub velocity_retention: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			spoke: LinkParams {
				distance: 6.0,
				strength: 1.0,
			},
			peer: LinkParams {
				distance: 30.0,
				strength: 0.2,
			},
			charge: -15.0,
			alpha_decay: 0.0228,
			alpha_min: 0.001,
			velocity_retention: 0.6,
		}
	}
}

/// The simulation surface the policy configures.
///
/// Implemented by [`TopologySimulation`](super::simulation::TopologySimulation);
/// tests substitute a recorder.
pub trait ForceEngine {
	/// Set the link force for one edge.
	fn set_link(&mut self, edge: EdgeIdx, params: LinkParams);
	/// Set the many-body strength of one node.
	fn set_charge(&mut self, node: NodeIdx, strength: f64);
	/// Restart cooling from full heat.
	fn reheat(&mut self);
}

/// Maps edges and nodes to force parameters.
#[derive(Clone, Debug, Default)]
pub struct PhysicsPolicy {
	config: PhysicsConfig,
}

impl PhysicsPolicy {
	pub fn new(config: PhysicsConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &PhysicsConfig {
		&self.config
	}

	pub fn parameters_for(&self, edge: &GraphEdge) -> LinkParams {
		match edge.kind {
			EdgeKind::Spoke => self.config.spoke,
			EdgeKind::Peer => self.config.peer,
		}
	}

	pub fn charge_for(&self, _node: &GraphNode) -> f64 {
		self.config.charge
	}

	/// Push every link and charge parameter into `engine`, then re-heat it.
	///
	/// Run once per graph rebuild before the simulation ticks. Running it again
	/// after the layout settled (for example with a new config) restarts it.
	pub fn apply<E: ForceEngine>(&self, graph: &Graph, engine: &mut E) {
		for (idx, edge) in graph.indexed_edges() {
			engine.set_link(idx, self.parameters_for(edge));
		}
		for (idx, node) in graph.indexed_nodes() {
			engine.set_charge(idx, self.charge_for(node));
		}
		engine.reheat();
		debug!(
			"topology: applied physics to {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
	}

	/// Swap the config and re-apply it, re-heating the simulation.
	pub fn reconfigure<E: ForceEngine>(&mut self, config: PhysicsConfig, graph: &Graph, engine: &mut E) {
		self.config = config;
		self.apply(graph, engine);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::topology::model::build;
	use crate::components::topology::types::{NodeKind, RawEdge, RawNode};

	#[derive(Default)]
	struct Recorder {
		links: Vec<(EdgeIdx, LinkParams)>,
		charges: Vec<(NodeIdx, f64)>,
		reheats: usize,
	}

	impl ForceEngine for Recorder {
		fn set_link(&mut self, edge: EdgeIdx, params: LinkParams) {
			self.links.push((edge, params));
		}

		fn set_charge(&mut self, node: NodeIdx, strength: f64) {
			self.charges.push((node, strength));
		}

		fn reheat(&mut self) {
			self.reheats += 1;
		}
	}

	fn graph() -> Graph {
		build(
			&[
				RawNode::new("h1", NodeKind::Host),
				RawNode::new("i1", NodeKind::Interface),
				RawNode::new("i2", NodeKind::Interface),
			],
			&[RawEdge::new("s", "h1", "i1"), RawEdge::new("p", "i1", "i2")],
		)
		.unwrap()
	}

	#[test]
	fn apply_configures_everything_then_reheats_once() {
		let graph = graph();
		let mut engine = Recorder::default();
		PhysicsPolicy::default().apply(&graph, &mut engine);

		assert_eq!(engine.links.len(), 2);
		assert_eq!(engine.links[0].1.distance, 6.0);
		assert_eq!(engine.links[1].1.distance, 30.0);
		assert_eq!(engine.charges.len(), 3);
		assert!(engine.charges.iter().all(|&(_, c)| c == -15.0));
		assert_eq!(engine.reheats, 1);
	}

	#[test]
	fn reconfigure_reheats_again() {
		let graph = graph();
		let mut engine = Recorder::default();
		let mut policy = PhysicsPolicy::default();
		policy.apply(&graph, &mut engine);

		let config = PhysicsConfig {
			charge: -40.0,
			..PhysicsConfig::default()
		};
		policy.reconfigure(config, &graph, &mut engine);

		assert_eq!(engine.reheats, 2);
		assert_eq!(engine.charges.last().unwrap().1, -40.0);
	}

	#[test]
	fn partial_config_keeps_defaults() {
		let config: PhysicsConfig = serde_json::from_str(r#"{ "charge": -5.0 }"#).unwrap();
		assert_eq!(config.charge, -5.0);
		assert_eq!(config.peer, PhysicsConfig::default().peer);
	}
}
