//! Closest pair of points in the plane.
//!
//! | Function | Strategy | Cost |
//! |----------|----------|------|
//! | [`closest_pair_brute_force`] | Every unordered pair, nested loops | O(n²) |
//! | [`closest_pair`] | Divide and conquer over x-sorted points with a strip merge | O(n log² n) |
//!
//! # Divide and conquer
//!
//! The points are sorted by x once. Each recursive call receives a sub-slice of that
//! order, so splitting never copies. Ranges of three points or fewer go to the brute
//! force scan. Larger ranges are split at index `⌈n/2⌉`; after both halves report their
//! best distance `d`, only points within `d` of the dividing x-coordinate can form a
//! closer cross pair. Those points are sorted by y and each one is compared against
//! its successors until the y-gap reaches `d`, which for well-spread inputs bounds
//! the inner loop to a handful of comparisons.
//!
//! # Determinism
//!
//! Sorting is stable, a tie between the two halves keeps the left witness, and every
//! update requires a strictly smaller distance. The witness pair is therefore a pure
//! function of the input order. The returned *distance* does not depend on the input
//! order at all.
//!
//! No tolerance is used anywhere: distances are only compared for strict improvement.
//!
//! # References
//!
//! - M. I. Shamos and D. Hoey, "Closest-point problems" (1975)

use crate::error::Error;
use crate::geometry::{ClosestPairResult, Point};

/// Sub-ranges of this many points or fewer are solved by brute force.
pub const BRUTE_FORCE_CUTOFF: usize = 3;

/// Exhaustive scan over all `n(n-1)/2` unordered pairs.
///
/// Ties go to the pair visited first, with the outer index ascending and the inner
/// index ascending above it.
pub fn closest_pair_brute_force(points: &[Point]) -> Result<ClosestPairResult, Error> {
    validate(points)?;
    Ok(brute_force(points))
}

/// Divide-and-conquer closest pair. The caller's slice is left untouched.
pub fn closest_pair(points: &[Point]) -> Result<ClosestPairResult, Error> {
    validate(points)?;

    let mut by_x = points.to_vec();
    by_x.sort_by(|a, b| a.x.total_cmp(&b.x));
    Ok(closest_in_range(&by_x))
}

fn validate(points: &[Point]) -> Result<(), Error> {
    if points.len() < 2 {
        return Err(Error::invalid_input(format!(
            "closest pair needs at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(Error::invalid_input(format!(
            "point ({}, {}) has a non-finite coordinate",
            p.x, p.y
        )));
    }
    Ok(())
}

/// Requires `points.len() >= 2`.
fn brute_force(points: &[Point]) -> ClosestPairResult {
    debug_assert!(points.len() >= 2);

    let mut best = ClosestPairResult::new(points[0], points[1]);
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let dist = a.distance(b);
            if dist < best.distance {
                best = ClosestPairResult {
                    distance: dist,
                    pair: (*a, *b),
                };
            }
        }
    }
    best
}

/// `points` is sorted by x and holds at least two points.
fn closest_in_range(points: &[Point]) -> ClosestPairResult {
    let n = points.len();
    if n <= BRUTE_FORCE_CUTOFF {
        return brute_force(points);
    }

    let mid = n.div_ceil(2);
    let (left, right) = points.split_at(mid);
    let best_left = closest_in_range(left);
    let best_right = closest_in_range(right);

    let mut best = if best_left.distance <= best_right.distance {
        best_left
    } else {
        best_right
    };
    if best.distance == 0.0 {
        return best;
    }

    let mid_x = points[mid].x;
    let mut strip: Vec<Point> = points
        .iter()
        .filter(|p| (p.x - mid_x).abs() < best.distance)
        .copied()
        .collect();
    strip.sort_by(|a, b| a.y.total_cmp(&b.y));

    scan_strip(&strip, &mut best);
    best
}

/// Compares each strip point with its y-successors while the y-gap is below the
/// current best distance.
fn scan_strip(strip: &[Point], best: &mut ClosestPairResult) {
    for (i, a) in strip.iter().enumerate() {
        for b in &strip[i + 1..] {
            if b.y - a.y >= best.distance {
                break;
            }
            let dist = a.distance(b);
            if dist < best.distance {
                *best = ClosestPairResult {
                    distance: dist,
                    pair: (*a, *b),
                };
                if dist == 0.0 {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn points(coords: &[(i64, i64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    fn exhaustive_min(points: &[Point]) -> f64 {
        let mut min = f64::INFINITY;
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                min = min.min(points[i].distance(&points[j]));
            }
        }
        min
    }

    fn point_set(max_len: usize) -> impl Strategy<Value = Vec<Point>> {
        proptest::collection::vec((0i64..=10_000, 0i64..=10_000), 2..=max_len)
            .prop_map(|coords| coords.into_iter().map(Point::from).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Divide and conquer agrees with brute force on the minimum distance.
        #[test]
        fn matches_brute_force(pts in point_set(500)) {
            let fast = closest_pair(&pts).unwrap();
            let slow = closest_pair_brute_force(&pts).unwrap();
            prop_assert_eq!(fast.distance, slow.distance);
            prop_assert_eq!(fast.distance, exhaustive_min(&pts));
            prop_assert_eq!(fast.pair.0.distance(&fast.pair.1), fast.distance);
        }

        /// Small coordinate ranges force many duplicates and equal x/y values.
        #[test]
        fn matches_brute_force_on_crowded_grid(
            coords in proptest::collection::vec((0i64..=8, 0i64..=8), 2..=200)
        ) {
            let pts = points(&coords);
            prop_assert_eq!(
                closest_pair(&pts).unwrap().distance,
                closest_pair_brute_force(&pts).unwrap().distance
            );
        }

        /// The distance does not depend on the input order.
        #[test]
        fn permutation_invariant(pts in point_set(200), rotate in 0usize..200) {
            let mut shuffled = pts.clone();
            shuffled.reverse();
            let k = rotate % shuffled.len();
            shuffled.rotate_left(k);
            prop_assert_eq!(
                closest_pair(&pts).unwrap().distance,
                closest_pair(&shuffled).unwrap().distance
            );
        }

        /// The witness is made of points from the input.
        #[test]
        fn witness_comes_from_input(pts in point_set(100)) {
            let result = closest_pair(&pts).unwrap();
            prop_assert!(pts.contains(&result.pair.0));
            prop_assert!(pts.contains(&result.pair.1));
        }

        /// Fractional coordinates take the same code paths as integers.
        #[test]
        fn matches_brute_force_with_floats(
            coords in proptest::collection::vec((-1.0e6f64..1.0e6, -1.0e6f64..1.0e6), 2..=300)
        ) {
            let pts: Vec<Point> = coords.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            prop_assert_eq!(
                closest_pair(&pts).unwrap().distance,
                closest_pair_brute_force(&pts).unwrap().distance
            );
        }
    }

    #[test]
    fn rejects_fewer_than_two_points() {
        for pts in [vec![], points(&[(1, 1)])] {
            assert!(matches!(closest_pair(&pts), Err(Error::InvalidInput(_))));
            assert!(matches!(
                closest_pair_brute_force(&pts),
                Err(Error::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
        assert!(matches!(closest_pair(&pts), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn coincident_points_have_zero_distance() {
        let pts = points(&[(0, 0), (0, 0)]);
        assert_eq!(closest_pair(&pts).unwrap().distance, 0.0);
        assert_eq!(closest_pair_brute_force(&pts).unwrap().distance, 0.0);
    }

    #[test]
    fn duplicate_split_across_halves_is_found() {
        // The two copies of (50, 7) land on opposite sides of the split.
        let pts = points(&[(0, 0), (20, 100), (50, 7), (50, 7), (80, 200), (100, 0)]);
        let result = closest_pair(&pts).unwrap();
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.pair, (Point::new(50.0, 7.0), Point::new(50.0, 7.0)));
    }

    #[test]
    fn diagonal_scenario() {
        let pts = points(&[(1, 1), (2, 2), (3, 3), (100, 100)]);
        let fast = closest_pair(&pts).unwrap();
        let slow = closest_pair_brute_force(&pts).unwrap();

        assert!((fast.distance - std::f64::consts::SQRT_2).abs() < 1.0e-12);
        assert_eq!(fast.distance, slow.distance);
        assert_eq!(slow.pair, (Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
        // Left half [(1,1), (2,2)] wins the tie with the strip pair (2,2)-(3,3).
        assert!(fast.same_pair(&slow));
    }

    #[test]
    fn left_half_wins_tie_with_right_half() {
        let pts = points(&[(0, 0), (1, 0), (10, 0), (11, 0)]);
        let result = closest_pair(&pts).unwrap();
        assert_eq!(result.distance, 1.0);
        assert_eq!(result.pair, (Point::new(0.0, 0.0), Point::new(1.0, 0.0)));
    }

    #[test]
    fn strip_pair_at_equal_distance_keeps_half_witness() {
        // (0,5)-(3,9) crosses the split at distance exactly 5.
        let pts = points(&[(0, 0), (0, 5), (3, 9), (3, 30)]);
        let result = closest_pair(&pts).unwrap();
        assert_eq!(result.distance, 5.0);
        assert_eq!(result.pair, (Point::new(0.0, 0.0), Point::new(0.0, 5.0)));
    }

    #[test]
    fn brute_force_prefers_first_pair_on_ties() {
        let pts = points(&[(0, 0), (10, 0), (11, 0), (20, 0), (21, 0)]);
        let result = closest_pair_brute_force(&pts).unwrap();
        assert_eq!(result.distance, 1.0);
        assert_eq!(result.pair, (Point::new(10.0, 0.0), Point::new(11.0, 0.0)));
    }

    #[test]
    fn collinear_vertical_points() {
        let pts: Vec<Point> = (0..64).map(|i| Point::from((7, i * i))).collect();
        let result = closest_pair(&pts).unwrap();
        assert_eq!(result.distance, 1.0);
        assert_eq!(result.pair, (Point::new(7.0, 0.0), Point::new(7.0, 1.0)));
    }

    #[test]
    fn does_not_reorder_input() {
        let pts = points(&[(9, 9), (1, 5), (4, 4), (0, 0), (7, 1)]);
        let before = pts.clone();
        closest_pair(&pts).unwrap();
        assert_eq!(pts, before);
    }

    #[test]
    fn known_cases() {
        let cases: [(&[(i64, i64)], f64); 4] = [
            (&[(0, 0), (3, 4)], 5.0),
            (&[(0, 0), (5, 0), (0, 5)], 5.0),
            (&[(2, 3), (12, 30), (40, 50), (5, 1), (12, 10), (3, 4)], 2.0f64.sqrt()),
            (&[(-5, -5), (5, 5), (-4, -5), (100, -100)], 1.0),
        ];
        for (coords, expected) in cases {
            let pts = points(coords);
            let result = closest_pair(&pts).unwrap();
            assert!((result.distance - expected).abs() < 1.0e-12, "points={coords:?}");
        }
    }
}
