use std::{process::ExitCode, time::Duration};

use clap::{Args, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use orthocubes::{
    expected_silhouette, verify_report, Cluster, ClusterGenerator, GeneratorConfig, GridCell,
    Silhouette, Verdict, ViewAxis,
};

mod play;
use play::play;

mod survey;
use survey::survey;

fn finish_bar(bar: &ProgressBar, duration: Duration, clusters: usize) {
    let time = duration.as_micros();
    let secs = time / 1_000_000;
    let micros = time % 1_000_000;

    bar.finish_with_message(format!(
        "Done! Generated {clusters} clusters in {secs}.{micros:06} s"
    ));
}

pub fn make_bar(len: u64) -> indicatif::ProgressBar {
    let bar = ProgressBar::new(len);

    let pos_width = format!("{len}").len();

    let template =
        format!("[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos:>{pos_width}}}/{{len}} {{msg}} remaining: [{{eta_precise}}]");

    bar.set_style(
        ProgressStyle::with_template(&template)
            .unwrap()
            .progress_chars("#>-"),
    );
    bar
}

#[derive(Clone, Parser)]
#[clap(version, about = "Draw the top, left or front view of a random pile of cubes")]
pub enum Opts {
    /// Generate a cluster and print it with all of its views
    Generate(GenerateOpts),
    /// Check a drawing against one view of a seeded cluster
    Check(CheckOpts),
    /// Draw views interactively
    Play(PlayOpts),
    /// Generate many clusters and print statistics about them
    Survey(SurveyOpts),
}

#[derive(Clone, Args)]
pub struct ClusterArgs {
    /// Smallest number of cubes to aim for.
    #[clap(long, default_value_t = 3)]
    pub min: usize,

    /// Largest number of cubes to aim for.
    #[clap(long, default_value_t = 7)]
    pub max: usize,

    /// Keep the cluster inside an EXTENT x EXTENT x EXTENT box.
    ///
    /// Clusters may come out smaller than requested if the box fills up.
    #[clap(long, short)]
    pub extent: Option<u32>,
}

impl ClusterArgs {
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            min_cubes: self.min,
            max_cubes: self.max,
            extent: self.extent,
        }
    }

    pub fn generator(&self) -> orthocubes::Result<ClusterGenerator> {
        ClusterGenerator::new(self.config())
    }
}

/// The given seed, or a random one.
pub fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

#[derive(Clone, Args)]
pub struct GenerateOpts {
    #[clap(flatten)]
    pub cluster: ClusterArgs,

    /// Seed for the random number generator. A random seed is used, and
    /// printed, if omitted.
    #[clap(long, short)]
    pub seed: Option<u64>,

    /// Print the cluster and its views as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Clone, Args)]
pub struct CheckOpts {
    #[clap(flatten)]
    pub cluster: ClusterArgs,

    /// Seed the cluster was generated with.
    #[clap(long, short)]
    pub seed: u64,

    /// The view that was drawn.
    #[clap(long, short, default_value = "top")]
    pub view: ViewAxis,

    /// The drawn cells, as `x,y`.
    pub cells: Vec<GridCell>,
}

#[derive(Clone, Args)]
pub struct PlayOpts {
    #[clap(flatten)]
    pub cluster: ClusterArgs,

    /// Seed for the random number generator. A random seed is used, and
    /// printed, if omitted.
    #[clap(long, short)]
    pub seed: Option<u64>,

    /// Number of cells along each side of the drawing grid.
    #[clap(long, short, default_value_t = orthocubes::grid::DEFAULT_GRID_SIZE)]
    pub grid: u32,
}

#[derive(Clone, Args)]
pub struct SurveyOpts {
    /// The amount of clusters to generate.
    pub count: usize,

    #[clap(flatten)]
    pub cluster: ClusterArgs,

    /// Seed for the random number generator. A random seed is used, and
    /// printed, if omitted.
    #[clap(long, short)]
    pub seed: Option<u64>,

    /// Disable parallelism.
    #[clap(long, short = 'p')]
    pub no_parallelism: bool,
}

#[derive(Serialize)]
struct GeneratedPuzzle<'a> {
    seed: u64,
    cubes: &'a Cluster,
    top: Silhouette,
    left: Silhouette,
    front: Silhouette,
}

pub fn print_views(cluster: &Cluster) {
    for axis in ViewAxis::ALL {
        let (cols, rows) = axis.axis_labels();
        println!();
        println!("{axis} view (columns {cols}, rows {rows}):");
        println!("{}", expected_silhouette(cluster, axis));
    }
}

fn generate(opts: &GenerateOpts) -> orthocubes::Result<()> {
    let generator = opts.cluster.generator()?;
    let seed = seed_or_random(opts.seed);
    let cluster = generator.generate(&mut StdRng::seed_from_u64(seed));

    if opts.json {
        let puzzle = GeneratedPuzzle {
            seed,
            cubes: &cluster,
            top: expected_silhouette(&cluster, ViewAxis::Top),
            left: expected_silhouette(&cluster, ViewAxis::Left),
            front: expected_silhouette(&cluster, ViewAxis::Front),
        };

        println!("{}", serde_json::to_string_pretty(&puzzle)?);
        return Ok(());
    }

    println!("Seed: {seed}");
    println!("Cubes: {}", cluster.len());
    println!("{cluster}");
    print_views(&cluster);

    Ok(())
}

fn check(opts: &CheckOpts) -> orthocubes::Result<Verdict> {
    let generator = opts.cluster.generator()?;
    let cluster = generator.generate(&mut StdRng::seed_from_u64(opts.seed));

    let expected = expected_silhouette(&cluster, opts.view);
    let report = verify_report(&expected, opts.cells.iter().copied());

    println!("{}", report.verdict);

    Ok(report.verdict)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let res = match opts {
        Opts::Generate(g) => generate(&g).map(|_| ExitCode::SUCCESS),
        Opts::Check(c) => check(&c).map(|verdict| match verdict {
            Verdict::Correct => ExitCode::SUCCESS,
            Verdict::Incorrect => ExitCode::from(1),
            Verdict::NothingDrawn => ExitCode::from(2),
        }),
        Opts::Play(p) => play(&p).map(|_| ExitCode::SUCCESS),
        Opts::Survey(s) => survey(&s).map(|_| ExitCode::SUCCESS),
    };

    match res {
        Ok(code) => code,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
