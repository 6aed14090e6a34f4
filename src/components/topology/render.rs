//! Canvas rendering for the topology view.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with their particles (world space)
//! 3. Nodes outside the highlight, then highlighted nodes with rings and labels on top
//!
//! What to draw for an entity is decided by the pure [`node_decoration`] and
//! [`edge_appearance`] functions; the `draw_*` functions only translate those
//! decisions into canvas calls. Nothing here mutates view state.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::curve::EdgeCurve;
use super::highlight::HighlightState;
use super::model::{EdgeIdx, GraphEdge, GraphNode, NodeIdx};
use super::particles::particle_positions;
use super::scale::{EdgeScaleConfig, ScaledValues};
use super::state::TopologyState;
use super::theme::Paints;
use super::types::EdgeKind;

/// Emphasis ring drawn around a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ring {
	Hovered,
	Neighbor,
}

/// Per-node drawing decisions for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeDecoration {
	/// Drawn faded because another part of the graph is highlighted.
	pub dimmed: bool,
	pub ring: Option<Ring>,
	/// Draw name and address labels.
	pub labelled: bool,
}

/// Per-edge drawing decisions for one frame. Sizes are world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAppearance {
	pub width: f64,
	pub curvature: f64,
	pub particles: usize,
	pub particle_radius: f64,
	pub highlighted: bool,
	pub dimmed: bool,
}

/// Everything a single entity draw needs, assembled once per frame.
pub struct FrameContext<'a> {
	pub scale: &'a ScaledValues,
	pub edge_config: &'a EdgeScaleConfig,
	pub paints: &'a Paints,
	pub highlight: &'a HighlightState,
	pub hovered: Option<NodeIdx>,
	pub positions: &'a [(f64, f64)],
	pub flow_time: f64,
}

pub fn node_decoration(
	idx: NodeIdx,
	node: &GraphNode,
	highlight: &HighlightState,
	hovered: Option<NodeIdx>,
) -> NodeDecoration {
	let is_hovered = hovered == Some(idx);
	let ring = if is_hovered {
		Some(Ring::Hovered)
	} else if highlight.contains_node(idx) {
		Some(Ring::Neighbor)
	} else {
		None
	};
	NodeDecoration {
		dimmed: !highlight.is_empty() && ring.is_none(),
		ring,
		labelled: node.kind.is_anchor(),
	}
}

/// Spokes are straight; peer tunnels bow so parallel meshes stay readable.
pub fn curvature_for(kind: EdgeKind, config: &EdgeScaleConfig) -> f64 {
	match kind {
		EdgeKind::Spoke => 0.0,
		EdgeKind::Peer => config.peer_curvature,
	}
}

pub fn edge_appearance(
	edge: &GraphEdge,
	highlighted: bool,
	any_highlight: bool,
	scale: &ScaledValues,
	config: &EdgeScaleConfig,
) -> EdgeAppearance {
	let extra = if highlighted {
		scale.highlight_extra_width
	} else {
		0.0
	};
	let dimmed = any_highlight && !highlighted;

	let curvature = curvature_for(edge.kind, config);

	match edge.kind {
		EdgeKind::Spoke => EdgeAppearance {
			width: scale.spoke_width + extra,
			curvature,
			particles: 0,
			particle_radius: 0.0,
			highlighted,
			dimmed,
		},
		EdgeKind::Peer => EdgeAppearance {
			width: scale.peer_width + extra,
			curvature,
			particles: config.peer_particles,
			particle_radius: if highlighted {
				scale.particle_radius * 2.0
			} else {
				scale.particle_radius
			},
			highlighted,
			dimmed,
		},
	}
}

/// Renders the complete view to the canvas.
pub fn render(state: &TopologyState, ctx: &CanvasRenderingContext2d, paints: &Paints) {
	ctx.set_fill_style_str(&paints.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let graph = state.graph();
	let frame = FrameContext {
		scale: state.scaled(),
		edge_config: &state.scale_config().edge,
		paints,
		highlight: state.coordinator().highlight(),
		hovered: state.coordinator().hovered_node(graph),
		positions: state.simulation().positions(),
		flow_time: state.flow_time,
	};

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for (idx, edge) in graph.indexed_edges() {
		draw_edge(ctx, idx, edge, &frame);
	}

	// Pass 1: nodes outside the highlight
	for (idx, node) in graph.indexed_nodes() {
		if !frame.highlight.contains_node(idx) && frame.hovered != Some(idx) {
			draw_node(ctx, idx, node, &frame);
		}
	}

	// Pass 2: highlighted nodes on top
	for (idx, node) in graph.indexed_nodes() {
		if frame.highlight.contains_node(idx) || frame.hovered == Some(idx) {
			draw_node(ctx, idx, node, &frame);
		}
	}

	ctx.restore();
}

/// Draws one edge and its particles. Called once per edge per frame.
pub fn draw_edge(ctx: &CanvasRenderingContext2d, idx: EdgeIdx, edge: &GraphEdge, frame: &FrameContext<'_>) {
	let (Some(&start), Some(&end)) =
		(frame.positions.get(edge.source.0), frame.positions.get(edge.target.0))
	else {
		return;
	};
	let look = edge_appearance(
		edge,
		frame.highlight.contains_edge(idx),
		!frame.highlight.is_empty(),
		frame.scale,
		frame.edge_config,
	);
	let curve = EdgeCurve::new(start, end, look.curvature);

	ctx.set_global_alpha(if look.dimmed { frame.paints.dim_alpha } else { 1.0 });
	ctx.set_stroke_style_str(if look.highlighted {
		frame.paints.edge_highlight.as_str()
	} else {
		frame.paints.edge(edge.kind)
	});
	ctx.set_line_width(look.width);

	ctx.begin_path();
	ctx.move_to(curve.start.0, curve.start.1);
	if curve.curved {
		let _ = ctx.quadratic_curve_to(curve.control.0, curve.control.1, curve.end.0, curve.end.1);
	} else {
		ctx.line_to(curve.end.0, curve.end.1);
	}
	ctx.stroke();

	if look.particles > 0 {
		ctx.set_fill_style_str(&frame.paints.particle);
		for (x, y) in particle_positions(
			curve,
			look.particles,
			frame.flow_time,
			frame.edge_config.particle_speed,
		) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, look.particle_radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(1.0);
}

/// Draws one node with its ring and labels. Called once per node per frame.
pub fn draw_node(ctx: &CanvasRenderingContext2d, idx: NodeIdx, node: &GraphNode, frame: &FrameContext<'_>) {
	let Some(&(x, y)) = frame.positions.get(idx.0) else {
		return;
	};
	let deco = node_decoration(idx, node, frame.highlight, frame.hovered);
	let radius = frame.scale.radius_of(node.kind);
	let alpha = if deco.dimmed { frame.paints.dim_alpha } else { 1.0 };

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(frame.paints.node(node.kind));
	ctx.fill();

	if let Some(ring) = deco.ring {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius * frame.scale.ring_factor, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(match ring {
			Ring::Hovered => frame.paints.hover_ring.as_str(),
			Ring::Neighbor => frame.paints.neighbor_ring.as_str(),
		});
		ctx.set_line_width(frame.scale.ring_width);
		ctx.stroke();
	}

	if deco.labelled {
		draw_labels(ctx, node, x, y + radius * frame.scale.ring_factor, alpha, frame);
	}

	ctx.set_global_alpha(1.0);
}

fn draw_labels(
	ctx: &CanvasRenderingContext2d,
	node: &GraphNode,
	x: f64,
	top: f64,
	alpha: f64,
	frame: &FrameContext<'_>,
) {
	let name = node.attrs.name.as_deref().unwrap_or(node.id.as_str());
	let gap = frame.scale.label_size * 0.25;

	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	ctx.set_font(&frame.scale.label_font);
	ctx.set_fill_style_str(&frame.paints.label);
	let _ = ctx.fill_text(name, x, top + gap);

	let address_alpha = alpha * frame.scale.address_alpha;
	if let Some(address) = node.attrs.address.as_deref() {
		if address_alpha > 0.01 {
			ctx.set_global_alpha(address_alpha);
			ctx.set_font(&frame.scale.address_font);
			ctx.set_fill_style_str(&frame.paints.address);
			let _ = ctx.fill_text(address, x, top + gap * 2.0 + frame.scale.label_size);
		}
	}
}
