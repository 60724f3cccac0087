//! Point generation for polygon primitives

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::{GROUND_Y, WORLD_WIDTH};

/// Points of a regular polygon around `center` (first vertex at angle 0)
pub fn regular_polygon(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            center + Vec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// A pointy star outline alternating `outer` and `inner` radii
pub fn star(center: Vec2, outer: f32, inner: f32, points: u32) -> Vec<Vec2> {
    let points = points.max(2);
    let steps = points * 2;
    (0..steps)
        .map(|i| {
            // Start pointing up
            let theta = (i as f32 / steps as f32) * 2.0 * PI - PI / 2.0;
            let r = if i % 2 == 0 { outer } else { inner };
            center + Vec2::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

/// Triangle wing hinged at `hinge`; `flap` in radians drives up/down stroke
pub fn wing(hinge: Vec2, span: f32, flap: f32) -> Vec<Vec2> {
    let lift = flap.sin() * span * 0.8;
    vec![
        hinge + Vec2::new(-span * 0.35, 0.0),
        hinge + Vec2::new(span * 0.35, 0.0),
        hinge + Vec2::new(span * 0.1, -lift),
    ]
}

/// Beak pointing left (toward the player)
pub fn beak(tip_base: Vec2, length: f32) -> Vec<Vec2> {
    vec![
        tip_base + Vec2::new(0.0, -3.0),
        tip_base + Vec2::new(-length, 1.0),
        tip_base + Vec2::new(0.0, 4.0),
    ]
}

/// Fixed star field above the horizon: (position, radius).
///
/// Uses a small integer hash so the sky is identical every frame without
/// storing it or touching the game RNG.
pub fn star_field(count: u32) -> Vec<(Vec2, f32)> {
    (0..count)
        .map(|i| {
            let h1 = hash(i.wrapping_mul(2) + 1);
            let h2 = hash(i.wrapping_mul(2) + 2);
            let x = (h1 % 10_000) as f32 / 10_000.0 * WORLD_WIDTH;
            let y = (h2 % 10_000) as f32 / 10_000.0 * (GROUND_Y - 60.0);
            let r = 0.8 + ((h1 >> 16) % 3) as f32 * 0.5;
            (Vec2::new(x, y), r)
        })
        .collect()
}

fn hash(mut x: u32) -> u32 {
    x = x.wrapping_mul(2654435761); // Golden ratio hash
    x ^= x >> 15;
    x = x.wrapping_mul(2246822519);
    x ^= x >> 13;
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_polygon_radius() {
        let pts = regular_polygon(Vec2::new(10.0, 10.0), 5.0, 8);
        assert_eq!(pts.len(), 8);
        for p in pts {
            assert!(((p - Vec2::new(10.0, 10.0)).length() - 5.0).abs() < 1e-4);
        }
        assert_eq!(regular_polygon(Vec2::ZERO, 1.0, 1).len(), 3);
    }

    #[test]
    fn test_star_alternates_radii() {
        let pts = star(Vec2::ZERO, 10.0, 4.0, 5);
        assert_eq!(pts.len(), 10);
        assert!((pts[0].length() - 10.0).abs() < 1e-4);
        assert!((pts[1].length() - 4.0).abs() < 1e-4);
        assert!(pts[0].y < 0.0, "first point faces up");
    }

    #[test]
    fn test_star_field_is_stable_and_above_ground() {
        let a = star_field(40);
        let b = star_field(40);
        assert_eq!(a, b);
        for (p, r) in a {
            assert!(p.x >= 0.0 && p.x <= WORLD_WIDTH);
            assert!(p.y >= 0.0 && p.y < GROUND_Y);
            assert!(r > 0.0);
        }
    }
}
