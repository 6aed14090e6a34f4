//! Edge geometry shared by drawing, particles and pointer picking.
//!
//! An edge is a quadratic curve whose control point sits off the midpoint,
//! perpendicular to the chord, by `curvature × length`. Zero curvature gives a
//! straight segment.

/// Samples used when measuring distance to a curved edge.
const PICK_SEGMENTS: usize = 16;

/// Geometry of one edge in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCurve {
	pub start: (f64, f64),
	pub control: (f64, f64),
	pub end: (f64, f64),
	pub curved: bool,
}

impl EdgeCurve {
	pub fn new(start: (f64, f64), end: (f64, f64), curvature: f64) -> Self {
		let (dx, dy) = (end.0 - start.0, end.1 - start.1);
		let mid = ((start.0 + end.0) / 2.0, (start.1 + end.1) / 2.0);
		let curved = curvature != 0.0 && (dx != 0.0 || dy != 0.0);
		let control = if curved {
			(mid.0 - dy * curvature, mid.1 + dx * curvature)
		} else {
			mid
		};
		Self {
			start,
			control,
			end,
			curved,
		}
	}

	pub fn length(&self) -> f64 {
		let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
		(dx * dx + dy * dy).sqrt()
	}

	/// Point at parameter `t` in `0..=1`.
	pub fn point_at(&self, t: f64) -> (f64, f64) {
		if !self.curved {
			return (
				self.start.0 + (self.end.0 - self.start.0) * t,
				self.start.1 + (self.end.1 - self.start.1) * t,
			);
		}
		let u = 1.0 - t;
		(
			u * u * self.start.0 + 2.0 * u * t * self.control.0 + t * t * self.end.0,
			u * u * self.start.1 + 2.0 * u * t * self.control.1 + t * t * self.end.1,
		)
	}

	/// Approximate shortest distance from `p` to the edge.
	pub fn distance_to(&self, p: (f64, f64)) -> f64 {
		if !self.curved {
			return segment_distance(p, self.start, self.end);
		}
		let mut best = f64::INFINITY;
		let mut prev = self.start;
		for i in 1..=PICK_SEGMENTS {
			let next = self.point_at(i as f64 / PICK_SEGMENTS as f64);
			best = best.min(segment_distance(p, prev, next));
			prev = next;
		}
		best
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len_sq = abx * abx + aby * aby;
	let t = if len_sq > 0.0 {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
