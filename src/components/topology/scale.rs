//! Zoom-dependent scaling configuration for topology visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: the coordinate system of the simulation. Values in
//!   world-space grow on screen as the view zooms in.
//! - **Screen-space**: canvas pixels. Values in screen-space keep their pixel
//!   size at every zoom level.
//!
//! Drawing happens after the canvas transform is applied, so every value in
//! [`ScaledValues`] is expressed in world-space.

use std::f64::consts::LN_2;

use super::types::NodeKind;

/// Defines how a visual size scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value for a base value at zoom level `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Defines how opacity scales with zoom level.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Constant alpha regardless of zoom.
	Constant,
	/// Fully visible at `full_alpha_k`, invisible at `zero_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	/// Alpha multiplier in `0..=1` for zoom level `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

/// Relative node size per kind. Anchors render larger.
pub fn node_size(kind: NodeKind) -> f64 {
	match kind {
		NodeKind::Host => 2.0,
		NodeKind::Interface => 1.0,
	}
}

/// Node and emphasis ring sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units, multiplied by [`node_size`].
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Pointer hit radius in world units, multiplied by [`node_size`].
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Emphasis ring radius relative to the node radius.
	pub ring_factor: f64,
	/// Ring stroke width in screen pixels.
	pub ring_width: f64,
}

/// Label typography for anchor nodes.
#[derive(Clone, Debug)]
pub struct LabelScaleConfig {
	/// Name label size in screen pixels at zoom 1.
	pub size: f64,
	/// Screen-pixel bounds of the name label at any zoom.
	pub min_px: f64,
	pub max_px: f64,
	/// Address label size relative to the name label.
	pub address_ratio: f64,
	/// Address label visibility by zoom.
	pub address_alpha: AlphaBehavior,
}

/// Edge strokes, curvature and particles.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Spoke stroke width in screen pixels.
	pub spoke_width: f64,
	/// Peer tunnel stroke width in screen pixels.
	pub peer_width: f64,
	/// Added stroke width when an edge is highlighted, in screen pixels.
	pub highlight_extra_width: f64,
	/// Curvature of peer tunnels (control point offset / chord length).
	pub peer_curvature: f64,
	/// Particles per peer tunnel.
	pub peer_particles: usize,
	/// Particle radius in screen pixels.
	pub particle_radius: f64,
	/// Edge fraction travelled by a particle per second.
	pub particle_speed: f64,
	/// Pointer tolerance around edges in screen pixels.
	pub hit_tolerance: f64,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub label: LabelScaleConfig,
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 2.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 2.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 3.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				ring_factor: 1.4,
				ring_width: 1.5,
			},
			label: LabelScaleConfig {
				size: 12.0,
				min_px: 4.0,
				max_px: 22.0,
				address_ratio: 0.8,
				address_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 0.8,
					full_alpha_k: 1.5,
				},
			},
			edge: EdgeScaleConfig {
				spoke_width: 0.5,
				peer_width: 1.0,
				highlight_extra_width: 2.0,
				peer_curvature: 0.2,
				peer_particles: 2,
				particle_radius: 1.5,
				particle_speed: 0.4,
				hit_tolerance: 4.0,
			},
		}
	}
}

/// Screen-pixel name label size at zoom `k`.
///
/// Grows with the logarithm of the zoom so labels stay legible when zoomed in
/// without crowding the view when zoomed out. Equals `size` at `k = 1`.
pub fn label_screen_px(config: &LabelScaleConfig, k: f64) -> f64 {
	(config.size * (1.0 + k).ln() / LN_2).clamp(config.min_px, config.max_px)
}

/// Pre-computed world-space values for one zoom level.
///
/// Built once per frame; the font strings are the only allocations a frame makes.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	/// Base node radius before the per-kind size multiplier.
	pub node_radius: f64,
	pub hit_radius: f64,
	pub ring_factor: f64,
	pub ring_width: f64,
	/// Name label size in world units.
	pub label_size: f64,
	pub label_font: String,
	pub address_font: String,
	pub address_alpha: f64,
	pub spoke_width: f64,
	pub peer_width: f64,
	pub highlight_extra_width: f64,
	pub particle_radius: f64,
	pub edge_hit_tolerance: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = label_screen_px(&config.label, k) / k;
		let address_size = label_size * config.label.address_ratio;

		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			ring_factor: config.node.ring_factor,
			ring_width: config.node.ring_width / k,
			label_size,
			label_font: format!("{}px sans-serif", label_size),
			address_font: format!("{}px monospace", address_size),
			address_alpha: config.label.address_alpha.apply(k),
			spoke_width: config.edge.spoke_width / k,
			peer_width: config.edge.peer_width / k,
			highlight_extra_width: config.edge.highlight_extra_width / k,
			particle_radius: config.edge.particle_radius / k,
			edge_hit_tolerance: config.edge.hit_tolerance / k,
		}
	}

	/// Radius of a node of `kind`, in world units.
	pub fn radius_of(&self, kind: NodeKind) -> f64 {
		self.node_radius * node_size(kind)
	}

	/// Pointer hit radius of a node of `kind`, in world units.
	pub fn hit_radius_of(&self, kind: NodeKind) -> f64 {
		self.hit_radius * node_size(kind)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn label_is_nominal_at_unit_zoom() {
		let config = ScaleConfig::default();
		assert!((label_screen_px(&config.label, 1.0) - 12.0).abs() < 1e-9);
		assert!((ScaledValues::new(&config, 1.0).label_size - 12.0).abs() < 1e-9);
	}

	#[test]
	fn label_grows_logarithmically_within_bounds() {
		let config = ScaleConfig::default().label;
		assert_eq!(label_screen_px(&config, 1000.0), config.max_px);
		assert_eq!(label_screen_px(&config, 0.01), config.min_px);

		let unbounded = LabelScaleConfig {
			max_px: f64::INFINITY,
			..config
		};
		let at_2 = label_screen_px(&unbounded, 2.0);
		let at_4 = label_screen_px(&unbounded, 4.0);
		assert!(at_2 > 12.0);
		assert!(at_4 > at_2);
		assert!(at_4 < 2.0 * at_2);
	}

	#[test]
	fn world_label_shrinks_when_zoomed_in() {
		let config = ScaleConfig::default();
		let near = ScaledValues::new(&config, 4.0);
		let far = ScaledValues::new(&config, 1.0);
		assert!(near.label_size < far.label_size);
	}

	#[test]
	fn clamped_behavior_keeps_minimum_screen_size() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 2.0,
			max_screen: f64::INFINITY,
		};
		assert_eq!(behavior.apply(2.0, 1.0), 2.0);
		assert_eq!(behavior.apply(2.0, 0.1), 20.0);
	}

	#[test]
	fn address_label_fades_out_when_zoomed_out() {
		let config = ScaleConfig::default();
		assert_eq!(ScaledValues::new(&config, 0.5).address_alpha, 0.0);
		assert_eq!(ScaledValues::new(&config, 2.0).address_alpha, 1.0);
	}

	#[test]
	fn anchors_are_larger() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert!(scaled.radius_of(NodeKind::Host) > scaled.radius_of(NodeKind::Interface));
	}
}
