//! Circle overlap tests
//!
//! Every gameplay shape is a circle, and entity counts stay in the dozens, so
//! a brute-force squared distance check is all the broad and narrow phase
//! there is.

use glam::Vec2;

/// True when two circles touch or overlap (touching counts as a hit)
#[inline]
pub fn circle_hit(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Indices of every circle in `targets` that overlaps the probe, highest
/// index first so callers can `remove` while walking the list.
pub fn overlapping_desc<T>(
    center: Vec2,
    radius: f32,
    targets: &[T],
    shape: impl Fn(&T) -> (Vec2, f32),
) -> Vec<usize> {
    targets
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, t)| {
            let (pos, r) = shape(t);
            circle_hit(center, radius, pos, r)
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_hit_touching_counts() {
        assert!(circle_hit(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circle_hit(Vec2::ZERO, 5.0, Vec2::new(10.01, 0.0), 5.0));
    }

    #[test]
    fn test_circle_hit_diagonal() {
        // 3-4-5 triangle
        assert!(circle_hit(Vec2::new(1.0, 1.0), 2.0, Vec2::new(4.0, 5.0), 3.0));
        assert!(!circle_hit(Vec2::new(1.0, 1.0), 2.0, Vec2::new(4.0, 5.0), 2.9));
    }

    #[test]
    fn test_overlapping_desc_order() {
        let targets = [
            (Vec2::new(0.0, 0.0), 1.0),
            (Vec2::new(100.0, 0.0), 1.0),
            (Vec2::new(5.0, 0.0), 1.0),
        ];
        let hits = overlapping_desc(Vec2::ZERO, 10.0, &targets, |t| *t);
        assert_eq!(hits, vec![2, 0]);
    }
}
