//! Directional particles travelling along tunnels from source to target.

use super::curve::EdgeCurve;

/// Positions of `count` evenly spaced particles on `curve` at `flow_time`.
///
/// `speed` is the fraction of the edge travelled per second. Particles wrap
/// around at the target. Returns an iterator so the per-frame path does not
/// allocate.
pub fn particle_positions(
	curve: EdgeCurve,
	count: usize,
	flow_time: f64,
	speed: f64,
) -> impl Iterator<Item = (f64, f64)> {
	let phase = (flow_time * speed).rem_euclid(1.0);
	(0..count).map(move |i| {
		let t = (phase + i as f64 / count as f64).fract();
		curve.point_at(t)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn particles_are_evenly_spaced_and_move() {
		let curve = EdgeCurve::new((0.0, 0.0), (100.0, 0.0), 0.0);

		let at_rest: Vec<_> = particle_positions(curve, 4, 0.0, 0.5).collect();
		assert_eq!(at_rest, vec![(0.0, 0.0), (25.0, 0.0), (50.0, 0.0), (75.0, 0.0)]);

		let later: Vec<_> = particle_positions(curve, 4, 0.1, 0.5).collect();
		assert!((later[0].0 - 5.0).abs() < 1e-9);
	}

	#[test]
	fn particles_wrap_at_the_target() {
		let curve = EdgeCurve::new((0.0, 0.0), (10.0, 0.0), 0.0);
		let (x, _) = particle_positions(curve, 1, 2.5, 1.0).next().unwrap();
		assert!((x - 5.0).abs() < 1e-9);
	}

	#[test]
	fn zero_particles_yield_nothing() {
		let curve = EdgeCurve::new((0.0, 0.0), (10.0, 0.0), 0.0);
		assert_eq!(particle_positions(curve, 0, 1.0, 1.0).count(), 0);
	}
}
