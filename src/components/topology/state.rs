//! View state for one mounted topology canvas.
//!
//! Combines the graph, its force simulation and the interaction coordinator
//! with the pan/zoom transform and in-progress drag or pan gestures. Created
//! when the component mounts and mutated by the animation loop and the
//! pointer handlers.

use log::{debug, info};

use super::curve::EdgeCurve;
use super::interaction::{InteractionCoordinator, Picked, TopologyEvents};
use super::model::{EdgeIdx, Graph, NodeIdx};
use super::physics::{ForceEngine, PhysicsConfig, PhysicsPolicy};
use super::render::curvature_for;
use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::TopologySimulation;

/// Pointer travel in screen pixels after which a press is a drag, not a click.
pub const CLICK_SLOP: f64 = 3.0;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Pan and zoom transform applied to the entire view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Graph, simulation and interaction state behind one canvas.
pub struct TopologyState {
	graph: Graph,
	simulation: TopologySimulation,
	policy: PhysicsPolicy,
	coordinator: InteractionCoordinator,
	scale: ScaleConfig,
	/// Sizes for the current zoom, rebuilt only when `transform.k` changes.
	scaled: ScaledValues,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	/// Set once the pointer travelled beyond [`CLICK_SLOP`] since the last press.
	pub moved: bool,
	pub width: f64,
	pub height: f64,
	/// Seconds since mount, drives the particle flow.
	pub flow_time: f64,
}

impl TopologyState {
	pub fn new(graph: Graph, physics: PhysicsConfig, scale: ScaleConfig, width: f64, height: f64) -> Self {
		let policy = PhysicsPolicy::new(physics);
		let mut simulation = TopologySimulation::new(&graph, policy.config());
		policy.apply(&graph, &mut simulation);
		info!(
			"topology: mounted {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);

		Self {
			graph,
			simulation,
			policy,
			coordinator: InteractionCoordinator::new(),
			scaled: ScaledValues::new(&scale, 1.0),
			scale,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			moved: false,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	pub fn simulation(&self) -> &TopologySimulation {
		&self.simulation
	}

	pub fn coordinator(&self) -> &InteractionCoordinator {
		&self.coordinator
	}

	pub fn scale_config(&self) -> &ScaleConfig {
		&self.scale
	}

	pub fn scaled(&self) -> &ScaledValues {
		&self.scaled
	}

	pub fn physics(&self) -> &PhysicsConfig {
		self.policy.config()
	}

	/// Swap in a freshly built graph.
	///
	/// Surviving nodes keep their positions, the policy is re-applied (which
	/// reheats the layout) and the hover target is re-resolved by id.
	pub fn replace_snapshot<E: TopologyEvents + ?Sized>(&mut self, graph: Graph, events: &E) {
		let mut simulation = TopologySimulation::new(&graph, self.policy.config());
		simulation.carry_over(&graph, &self.graph, &self.simulation);
		self.policy.apply(&graph, &mut simulation);
		self.coordinator.rebind(&graph, events);
		self.drag = DragState::default();

		info!(
			"topology: snapshot replaced, {} nodes, {} edges",
			graph.nodes().len(),
			graph.edges().len()
		);
		self.graph = graph;
		self.simulation = simulation;
	}

	/// Swap the physics configuration and reheat the current layout.
	pub fn reconfigure_physics(&mut self, config: PhysicsConfig) {
		self.policy.reconfigure(config, &self.graph, &mut self.simulation);
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Closest node whose hit radius contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.simulation.positions();

		self.graph
			.indexed_nodes()
			.filter_map(|(idx, node)| {
				let (x, y) = positions.get(idx.0).copied()?;
				let d = ((x - gx).powi(2) + (y - gy).powi(2)).sqrt();
				(d < self.scaled.hit_radius_of(node.kind)).then_some((idx, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Closest edge whose drawn curve passes within the hit tolerance.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<EdgeIdx> {
		let p = self.screen_to_graph(sx, sy);
		let positions = self.simulation.positions();

		self.graph
			.indexed_edges()
			.filter_map(|(idx, edge)| {
				let start = positions.get(edge.source.0).copied()?;
				let end = positions.get(edge.target.0).copied()?;
				let curve = EdgeCurve::new(start, end, curvature_for(edge.kind, &self.scale.edge));
				let d = curve.distance_to(p);
				(d <= self.scaled.edge_hit_tolerance).then_some((idx, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// What the rendering surface shows under a screen point. Nodes win over edges.
	pub fn pick(&self, sx: f64, sy: f64) -> Picked {
		if let Some(node) = self.node_at_position(sx, sy).and_then(|idx| self.graph.node(idx)) {
			return Picked::Node(node.id.clone());
		}
		match self.edge_at_position(sx, sy).and_then(|idx| self.graph.edge(idx)) {
			Some(edge) => Picked::Edge(edge.id.clone()),
			None => Picked::Nothing,
		}
	}

	/// Start a node drag if a node is under the pointer, otherwise a pan.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.moved = false;

		if let Some(idx) = self.node_at_position(sx, sy) {
			let (nx, ny) = self.simulation.position(idx).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node: Some(idx),
				start_x: sx,
				start_y: sy,
				node_start_x: nx,
				node_start_y: ny,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	/// Route pointer movement to an active gesture, or to hover tracking when idle.
	pub fn pointer_move<E: TopologyEvents + ?Sized>(&mut self, sx: f64, sy: f64, events: &E) {
		if self.drag.active {
			self.track_slop(self.drag.start_x, self.drag.start_y, sx, sy);
			if !self.moved {
				return;
			}
			if let Some(idx) = self.drag.node {
				let x = self.drag.node_start_x + (sx - self.drag.start_x) / self.transform.k;
				let y = self.drag.node_start_y + (sy - self.drag.start_y) / self.transform.k;
				self.simulation.pin(idx, x, y);
				if !self.simulation.is_running() {
					self.simulation.reheat();
				}
			}
			return;
		}

		if self.pan.active {
			self.track_slop(self.pan.start_x, self.pan.start_y, sx, sy);
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}

		let picked = self.pick(sx, sy);
		self.coordinator.handle_pointer_move(&self.graph, picked, events);
	}

	/// End a gesture. A press that never travelled beyond [`CLICK_SLOP`] is a click.
	pub fn pointer_up<E: TopologyEvents + ?Sized>(&mut self, sx: f64, sy: f64, events: &E) {
		let pressed = self.drag.active || self.pan.active;
		if pressed && !self.moved {
			let picked = self.pick(sx, sy);
			self.coordinator.handle_click(&self.graph, &picked, events);
		}
		if let Some(idx) = self.drag.node.filter(|_| self.moved) {
			debug!("topology: node {} pinned after drag", idx.0);
		}
		self.end_gesture();
	}

	/// The pointer left the canvas.
	pub fn pointer_leave<E: TopologyEvents + ?Sized>(&mut self, events: &E) {
		self.end_gesture();
		self.coordinator.leave(&self.graph, events);
	}

	/// Zoom around a screen point. Positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
		self.refresh_scale();
	}

	/// Advance time and the layout by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.refresh_scale();
		self.simulation.tick(dt);
		self.flow_time += dt as f64;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn refresh_scale(&mut self) {
		if self.scaled.k != self.transform.k {
			self.scaled = ScaledValues::new(&self.scale, self.transform.k);
		}
	}

	fn track_slop(&mut self, x0: f64, y0: f64, x: f64, y: f64) {
		if !self.moved && ((x - x0).powi(2) + (y - y0).powi(2)).sqrt() > CLICK_SLOP {
			self.moved = true;
		}
	}

	fn end_gesture(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}
}
