use std::time::Instant;

use orthocubes::{survey::survey as run_survey, ViewAxis};

use crate::{finish_bar, make_bar, seed_or_random, SurveyOpts};

pub fn survey(opts: &SurveyOpts) -> orthocubes::Result<()> {
    let generator = opts.cluster.generator()?;
    let seed = seed_or_random(opts.seed);
    let count = opts.count;

    println!("Seed: {seed}");

    let bar = make_bar(count as u64);
    bar.set_message("clusters generated");

    let start = Instant::now();
    let report = run_survey(&generator, count, seed, !opts.no_parallelism, &bar);
    finish_bar(&bar, start.elapsed(), report.clusters);

    if report.clusters == 0 {
        return Ok(());
    }

    let pct = |v: usize| 100.0 * v as f64 / report.clusters as f64;

    println!();
    println!("Cluster sizes:");
    for (size, n) in &report.sizes {
        println!("  {size:>3} cubes: {n:>8} ({:5.1}%)", pct(*n));
    }

    println!(
        "Distinct shapes (up to translation): {}",
        report.distinct_shapes
    );

    if report.stopped_short > 0 {
        println!(
            "Stopped short of their target: {} ({:.1}%)",
            report.stopped_short,
            pct(report.stopped_short)
        );
    }

    println!("Clusters with hidden cubes:");
    for (axis, n) in ViewAxis::ALL.iter().zip(report.occluded) {
        println!("  {:>5} view: {n:>8} ({:5.1}%)", axis.name(), pct(n));
    }

    Ok(())
}
