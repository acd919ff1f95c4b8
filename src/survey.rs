//! Generate many clusters and collect statistics about them.

use std::collections::BTreeMap;

use hashbrown::HashSet;
use indicatif::ProgressBar;
use parking_lot::RwLock;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    cluster::{Cluster, ClusterGenerator},
    projection::{expected_silhouette, ViewAxis},
};

/// Statistics over a batch of generated clusters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurveyReport {
    /// Number of clusters generated.
    pub clusters: usize,
    /// How many clusters there were of each size.
    pub sizes: BTreeMap<usize, usize>,
    /// Number of distinct shapes, up to translation.
    pub distinct_shapes: usize,
    /// Per view (in [`ViewAxis::ALL`] order), how many clusters had at
    /// least one cube hidden behind another.
    pub occluded: [usize; 3],
    /// Clusters that ended up smaller than their target size.
    pub stopped_short: usize,
}

/// Counters for one chunk of work, merged at the end.
#[derive(Default)]
struct Tally {
    clusters: usize,
    sizes: BTreeMap<usize, usize>,
    occluded: [usize; 3],
    stopped_short: usize,
}

impl Tally {
    fn record(&mut self, cluster: &Cluster, target: usize) {
        self.clusters += 1;
        *self.sizes.entry(cluster.len()).or_default() += 1;

        if cluster.len() < target {
            self.stopped_short += 1;
        }

        for (i, axis) in ViewAxis::ALL.into_iter().enumerate() {
            if expected_silhouette(cluster, axis).len() < cluster.len() {
                self.occluded[i] += 1;
            }
        }
    }

    fn merge(mut self, other: Tally) -> Tally {
        self.clusters += other.clusters;
        for (size, count) in other.sizes {
            *self.sizes.entry(size).or_default() += count;
        }
        for i in 0..3 {
            self.occluded[i] += other.occluded[i];
        }
        self.stopped_short += other.stopped_short;
        self
    }
}

/// Number of clusters generated from one chunk seed.
const CHUNK_SIZE: usize = 256;

/// Split `count` into chunks of [`CHUNK_SIZE`], the last one possibly
/// shorter.
fn chunks(count: usize) -> Vec<usize> {
    (0..count.div_ceil(CHUNK_SIZE))
        .map(|i| CHUNK_SIZE.min(count - i * CHUNK_SIZE))
        .collect()
}

fn run_chunk(
    generator: &ClusterGenerator,
    seed: u64,
    len: usize,
    shapes: &RwLock<HashSet<Cluster>>,
    bar: &ProgressBar,
) -> Tally {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();

    for _ in 0..len {
        let target = rng.random_range(generator.config().range());
        let cluster = generator.generate_exact(target, &mut rng);

        tally.record(&cluster, target);

        let shape = cluster.normalized();
        // Skip shapes that are already known without taking the write lock.
        if !shapes.read().contains(&shape) {
            shapes.write().insert(shape);
        }

        bar.inc(1);
    }

    tally
}

/// Generate `count` clusters with `generator` and summarize them.
///
/// The work is split into chunks of a fixed size, and chunk `i` draws from
/// an RNG seeded with `seed + i`, so the result only depends on `seed` and
/// `count`. It is the same on any machine, in parallel or not.
pub fn survey(
    generator: &ClusterGenerator,
    count: usize,
    seed: u64,
    parallel: bool,
    bar: &ProgressBar,
) -> SurveyReport {
    let chunks = chunks(count);
    let shapes = RwLock::new(HashSet::new());

    let tally = if parallel {
        use rayon::prelude::*;

        chunks
            .par_iter()
            .enumerate()
            .map(|(i, len)| run_chunk(generator, seed.wrapping_add(i as u64), *len, &shapes, bar))
            .reduce(Tally::default, Tally::merge)
    } else {
        chunks
            .iter()
            .enumerate()
            .map(|(i, len)| run_chunk(generator, seed.wrapping_add(i as u64), *len, &shapes, bar))
            .fold(Tally::default(), Tally::merge)
    };

    tracing::debug!(clusters = tally.clusters, "Survey finished");

    SurveyReport {
        clusters: tally.clusters,
        sizes: tally.sizes,
        distinct_shapes: shapes.into_inner().len(),
        occluded: tally.occluded,
        stopped_short: tally.stopped_short,
    }
}
