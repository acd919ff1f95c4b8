//! Property-based tests for generation and verification.
//!
//! These tests use proptest to check that the invariants hold across
//! random seeds, clusters and offsets.

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use orthocubes::{
    expected_silhouette, generate, verify, Cluster, ClusterGenerator, GeneratorConfig, GridCell,
    LatticePoint, Silhouette, Verdict, ViewAxis,
};

/// Reachability from the first cube, written independently of
/// `Cluster::is_connected`.
fn reachable_from_first(cluster: &Cluster) -> usize {
    let occupied: HashSet<_> = cluster.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([cluster.points()[0]]);
    seen.insert(cluster.points()[0]);

    while let Some(p) = queue.pop_front() {
        for d in [(1, 0, 0), (-1, 0, 0), (0, 1, 0), (0, -1, 0), (0, 0, 1), (0, 0, -1)] {
            let next = p + LatticePoint::from(d);
            if occupied.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    seen.len()
}

fn view_axis() -> impl Strategy<Value = ViewAxis> {
    prop_oneof![
        Just(ViewAxis::Top),
        Just(ViewAxis::Left),
        Just(ViewAxis::Front),
    ]
}

/// Strategy for cube count ranges.
fn count_range() -> impl Strategy<Value = (usize, usize)> {
    (1usize..8).prop_flat_map(|min| (Just(min), min..12))
}

/// Strategy for arbitrary (not necessarily connected) clusters.
fn any_cluster() -> impl Strategy<Value = Cluster> {
    prop::collection::hash_set((-4i32..4, -4i32..4, -4i32..4), 1..12).prop_map(|points| {
        Cluster::new(points.into_iter().map(LatticePoint::from).collect()).unwrap()
    })
}

fn offset_3d() -> impl Strategy<Value = LatticePoint> {
    (-50i32..50, -50i32..50, -50i32..50).prop_map(LatticePoint::from)
}

fn offset_2d() -> impl Strategy<Value = GridCell> {
    (-50i32..50, -50i32..50).prop_map(GridCell::from)
}

proptest! {
    /// Generated clusters are face-connected from the origin.
    #[test]
    fn generated_clusters_are_connected(seed in any::<u64>(), (min, max) in count_range()) {
        let cluster = generate(min, max, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(cluster.points()[0], LatticePoint::ORIGIN);
        prop_assert_eq!(reachable_from_first(&cluster), cluster.len());
        prop_assert!(cluster.is_connected());
    }

    /// Generated clusters have distinct cubes and respect the size range.
    #[test]
    fn generated_clusters_are_distinct_and_bounded(
        seed in any::<u64>(),
        (min, max) in count_range(),
    ) {
        let cluster = generate(min, max, &mut StdRng::seed_from_u64(seed)).unwrap();
        let distinct: HashSet<_> = cluster.iter().collect();

        prop_assert_eq!(distinct.len(), cluster.len());
        prop_assert!(cluster.len() <= max);
        // Without an extent the frontier never runs dry.
        prop_assert!(cluster.len() >= min);
    }

    /// Generated clusters stay inside the configured box.
    #[test]
    fn generated_clusters_respect_extent(seed in any::<u64>(), extent in 1u32..4) {
        let config = GeneratorConfig { min_cubes: 1, max_cubes: 30, extent: Some(extent) };
        let generator = ClusterGenerator::new(config).unwrap();
        let cluster = generator.generate(&mut StdRng::seed_from_u64(seed));

        let (dx, dy, dz) = cluster.dims();
        prop_assert!(dx <= extent as usize && dy <= extent as usize && dz <= extent as usize);
        prop_assert!(cluster.len() <= (extent as usize).pow(3));
        prop_assert!(cluster.is_connected());
    }

    /// Moving the whole cluster does not change any of its views.
    #[test]
    fn projection_is_translation_invariant(
        cluster in any_cluster(),
        offset in offset_3d(),
        axis in view_axis(),
    ) {
        let moved = cluster.translated(offset);
        prop_assert_eq!(expected_silhouette(&cluster, axis), expected_silhouette(&moved, axis));
    }

    /// A view never has more cells than the cluster has cubes.
    #[test]
    fn projection_is_no_larger_than_cluster(cluster in any_cluster(), axis in view_axis()) {
        let s = expected_silhouette(&cluster, axis);
        prop_assert!(!s.is_empty());
        prop_assert!(s.len() <= cluster.len());
    }

    /// Moving the drawing does not change the verdict.
    #[test]
    fn verify_is_translation_invariant(
        cluster in any_cluster(),
        drawn in prop::collection::vec((0i32..10, 0i32..10), 0..10),
        offset in offset_2d(),
        axis in view_axis(),
    ) {
        let expected = expected_silhouette(&cluster, axis);
        let drawn: Vec<GridCell> = drawn.into_iter().map(GridCell::from).collect();
        let moved: Vec<GridCell> = drawn.iter().map(|c| *c + offset).collect();

        prop_assert_eq!(verify(&expected, drawn), verify(&expected, moved));
    }

    /// Drawing the expected view anywhere is always correct.
    #[test]
    fn expected_view_verifies(
        cluster in any_cluster(),
        offset in offset_2d(),
        axis in view_axis(),
    ) {
        let expected = expected_silhouette(&cluster, axis);
        let drawn: Vec<GridCell> = expected.iter().map(|c| *c + offset).collect();

        prop_assert_eq!(verify(&expected, drawn), Verdict::Correct);
    }

    /// Set comparison is symmetric.
    #[test]
    fn verify_is_symmetric(
        a in prop::collection::vec((0i32..5, 0i32..5), 1..8),
        b in prop::collection::vec((0i32..5, 0i32..5), 1..8),
    ) {
        let a: Vec<GridCell> = a.into_iter().map(GridCell::from).collect();
        let b: Vec<GridCell> = b.into_iter().map(GridCell::from).collect();

        let ab = verify(&Silhouette::normalized(a.clone()), b.clone());
        let ba = verify(&Silhouette::normalized(b), a);
        prop_assert_eq!(ab, ba);
    }
}
