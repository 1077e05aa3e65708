//! One-time deconstruction-offset precompute.
//!
//! Each part is pushed outward from the scene origin along the direction of
//! its bounding-box center. Parts sitting at the origin get a random unit
//! direction so the displacement is never degenerate.

use glam::Vec3;
use rand::Rng;

/// A bounding-box center closer to the origin than this is treated as
/// degenerate and gets a random direction instead.
const CENTER_EPSILON: f32 = 0.01;

/// Compute the outward displacement for a part with the given bounding-box
/// center.
///
/// Magnitude is drawn uniformly from [0.6, 1.4); the Y component carries an
/// extra jitter in [-0.15, 0.15) so the disassembly reads less mechanical.
pub fn deconstruction_offset(
    bbox_center: Vec3,
    rng: &mut impl Rng,
) -> Vec3 {
    let dir = if bbox_center.length() < CENTER_EPSILON {
        random_unit_vector(rng)
    } else {
        bbox_center.normalize()
    };

    let magnitude = rng.random_range(0.6..1.4);
    let mut offset = dir * magnitude;
    offset.y += rng.random_range(-0.15..0.15);
    offset
}

/// Uniform random unit vector via rejection sampling over the unit cube.
fn random_unit_vector(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-4 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn centered_part_gets_unit_direction() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let offset = deconstruction_offset(Vec3::ZERO, &mut rng);
            assert!(offset.length() > 0.0, "offset must not be zero");
            // Strip the Y jitter: the magnitude along the random direction
            // stays within the authored draw range.
            let xz = Vec3::new(offset.x, 0.0, offset.z);
            assert!(xz.length() <= 1.4 + 1e-5);
        }
    }

    #[test]
    fn random_unit_vector_is_normalized() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..128 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn offset_points_away_from_center_direction() {
        let mut rng = StdRng::seed_from_u64(11);
        let center = Vec3::new(2.0, 0.0, 0.0);
        for _ in 0..64 {
            let offset = deconstruction_offset(center, &mut rng);
            // Outward along +X, with magnitude in the authored range.
            assert!(offset.x >= 0.6 - 1e-5);
            assert!(offset.x < 1.4);
            assert_eq!(offset.z, 0.0);
            assert!(offset.y.abs() < 0.15 + 1e-5);
        }
    }

    #[test]
    fn magnitude_stays_in_draw_range() {
        let mut rng = StdRng::seed_from_u64(19);
        let center = Vec3::new(0.0, 3.0, 4.0);
        for _ in 0..64 {
            let offset = deconstruction_offset(center, &mut rng);
            let along = offset.dot(center.normalize());
            assert!((0.6 - 0.15..1.4 + 0.15).contains(&along));
        }
    }
}
