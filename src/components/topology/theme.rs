//! Colors for the topology view.
//!
//! A [`Theme`] describes colors; [`Paints`] holds the CSS strings derived from
//! it once, so the frame loop never formats colors.

use super::types::{EdgeKind, NodeKind};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub host: Color,
	pub interface: Color,
	pub spoke: Color,
	pub peer: Color,
	/// Stroke of highlighted edges of either kind.
	pub edge_highlight: Color,
	pub particle: Color,
	/// Ring around the hovered node.
	pub hover_ring: Color,
	/// Ring around highlighted neighbors.
	pub neighbor_ring: Color,
	pub label: Color,
	pub address: Color,
	/// Global alpha of entities outside an active highlight.
	pub dim_alpha: f64,
}

impl Theme {
	/// Dark theme (default). Hosts are darker and more saturated than interfaces.
	pub fn default_theme() -> Self {
		let interface = Color::rgb(129, 161, 193);
		Self {
			name: "default",
			background: Color::rgb(22, 27, 34),
			host: Color::rgb(70, 98, 140),
			interface,
			spoke: Color::rgba(140, 160, 180, 0.35),
			peer: Color::rgba(140, 160, 180, 0.7),
			edge_highlight: Color::rgb(235, 203, 139),
			particle: Color::rgb(235, 203, 139),
			hover_ring: Color::rgb(255, 255, 255),
			neighbor_ring: interface.lighten(0.5).with_alpha(0.8),
			label: Color::rgba(255, 255, 255, 0.9),
			address: Color::rgba(200, 210, 220, 0.75),
			dim_alpha: 0.3,
		}
	}

	/// Light theme for embedding in bright admin pages.
	pub fn light() -> Self {
		let host = Color::rgb(33, 55, 90);
		Self {
			name: "light",
			background: Color::rgb(248, 249, 251),
			host,
			interface: Color::rgb(120, 150, 190),
			spoke: Color::rgba(90, 100, 115, 0.35),
			peer: Color::rgba(90, 100, 115, 0.7),
			edge_highlight: Color::rgb(214, 108, 36),
			particle: Color::rgb(214, 108, 36),
			hover_ring: Color::rgb(214, 108, 36),
			neighbor_ring: Color::rgba(214, 108, 36, 0.6),
			label: host.darken(0.3),
			address: Color::rgba(60, 70, 85, 0.8),
			dim_alpha: 0.25,
		}
	}

	pub fn node_color(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Host => self.host,
			NodeKind::Interface => self.interface,
		}
	}

	pub fn edge_color(&self, kind: EdgeKind) -> Color {
		match kind {
			EdgeKind::Spoke => self.spoke,
			EdgeKind::Peer => self.peer,
		}
	}

	/// Derive the CSS strings used while drawing.
	pub fn paints(&self) -> Paints {
		Paints {
			background: self.background.to_css(),
			host: self.node_color(NodeKind::Host).to_css(),
			interface: self.node_color(NodeKind::Interface).to_css(),
			spoke: self.edge_color(EdgeKind::Spoke).to_css(),
			peer: self.edge_color(EdgeKind::Peer).to_css(),
			edge_highlight: self.edge_highlight.to_css(),
			particle: self.particle.to_css(),
			hover_ring: self.hover_ring.to_css(),
			neighbor_ring: self.neighbor_ring.to_css(),
			label: self.label.to_css(),
			address: self.address.to_css(),
			dim_alpha: self.dim_alpha,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

/// CSS strings for a [`Theme`], computed once per mount.
#[derive(Clone, Debug)]
pub struct Paints {
	pub background: String,
	host: String,
	interface: String,
	spoke: String,
	peer: String,
	pub edge_highlight: String,
	pub particle: String,
	pub hover_ring: String,
	pub neighbor_ring: String,
	pub label: String,
	pub address: String,
	pub dim_alpha: f64,
}

impl Paints {
	pub fn node(&self, kind: NodeKind) -> &str {
		match kind {
			NodeKind::Host => &self.host,
			NodeKind::Interface => &self.interface,
		}
	}

	pub fn edge(&self, kind: EdgeKind) -> &str {
		match kind {
			EdgeKind::Spoke => &self.spoke,
			EdgeKind::Peer => &self.peer,
		}
	}
}
