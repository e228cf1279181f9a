//! Command line interface of the minipart partitioner.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use minipart::{
    read_hgr_file, read_solution_file, write_solution_file, BlackboxOptimizer, Hypergraph,
    Index, ObjectiveKind, PartitioningParams, Result, Solution,
};

#[derive(Parser, Debug)]
#[command(name = "minipart", about = "Balanced hypergraph partitioner", version)]
struct Cli {
    /// Input hypergraph in hMETIS .hgr format.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output solution file, one block index per line.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Initial solution to seed the pool with.
    #[arg(short = 'f', long = "initial")]
    initial: Option<PathBuf>,

    /// Number of blocks.
    #[arg(short = 'k', long = "blocks")]
    blocks: Index,

    /// Allowed imbalance, in percent.
    #[arg(short = 'e', long = "imbalance", default_value_t = 5.0)]
    imbalance: f64,

    /// Objective: cut, soed, connectivity, max-degree, daisy-chain-distance,
    /// daisy-chain-max-degree, ratio-cut, ratio-soed, ratio-connectivity or
    /// ratio-max-degree.
    #[arg(short = 'g', long = "objective", default_value = "cut")]
    objective: ObjectiveKind,

    /// Verbosity: 0 quiet, 1 progress, 2 debug, 3 trace.
    #[arg(short = 'v', long = "verbosity", default_value_t = 1)]
    verbosity: u32,

    /// Random seed; identical seeds give identical solutions.
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u64,

    /// Number of solutions in the pool.
    #[arg(long = "pool-size", default_value_t = 8)]
    pool_size: usize,

    /// Number of V-cycles.
    #[arg(long = "v-cycles", default_value_t = 8)]
    v_cycles: usize,

    /// Lower bound of the per-level coarsening factor window.
    #[arg(long = "min-c-factor", default_value_t = 1.5)]
    min_c_factor: f64,

    /// Upper bound of the per-level coarsening factor window.
    #[arg(long = "max-c-factor", default_value_t = 3.0)]
    max_c_factor: f64,

    /// Stop coarsening below this many nodes per block.
    #[arg(long = "min-c-nodes", default_value_t = 20)]
    min_c_nodes: Index,

    /// Local search budget per node and block.
    #[arg(long = "move-ratio", default_value_t = 8.0)]
    move_ratio: f64,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_logging(cli.verbosity);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u32) {
    use tracing_subscriber::filter::LevelFilter;
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut hypergraph = read_hgr_file(&cli.input)?;
    hypergraph.setup_blocks(cli.blocks, cli.imbalance / 100.0)?;

    let initial = cli
        .initial
        .as_ref()
        .map(|path| read_solution_file(path, hypergraph.n_nodes(), hypergraph.n_blocks()))
        .transpose()?;

    let params = PartitioningParams {
        objective: cli.objective,
        seed: cli.seed,
        verbosity: cli.verbosity,
        n_solutions: cli.pool_size,
        n_cycles: cli.v_cycles,
        min_coarsening_factor: cli.min_c_factor,
        max_coarsening_factor: cli.max_c_factor,
        min_coarsening_nodes: cli.min_c_nodes,
        moves_per_element: cli.move_ratio,
    };

    let mut rng = StdRng::seed_from_u64(params.seed);
    let best = BlackboxOptimizer::new(&hypergraph, &params)
        .with_initial(initial)
        .run(&mut rng)?;

    report(&hypergraph, &best, cli.objective, cli.verbosity);

    if let Some(output) = &cli.output {
        write_solution_file(output, &best)?;
    }
    Ok(())
}

/// Prints the result summary the way each objective is usually read.
fn report(hypergraph: &Hypergraph, solution: &Solution, objective: ObjectiveKind, verbosity: u32) {
    let overflow = hypergraph.sum_overflow(solution);
    if overflow != 0 {
        println!(
            "{} capacities exceeded by {}",
            "warning:".yellow().bold(),
            overflow
        );
    }
    match objective {
        ObjectiveKind::Cut => println!(
            "Cut: {}, connectivity: {}",
            hypergraph.cut(solution).bright_cyan(),
            hypergraph.connectivity(solution)
        ),
        ObjectiveKind::Soed => println!(
            "Connectivity: {}",
            hypergraph.connectivity(solution).bright_cyan()
        ),
        ObjectiveKind::MaxDegree => println!(
            "Max degree: {}, connectivity: {}",
            hypergraph.max_degree(solution).bright_cyan(),
            hypergraph.connectivity(solution)
        ),
        ObjectiveKind::DaisyChainDistance => println!(
            "Daisy-chain distance: {}",
            hypergraph.daisy_chain_distance(solution).bright_cyan()
        ),
        ObjectiveKind::DaisyChainMaxDegree => println!(
            "Daisy-chain max degree: {}, distance: {}",
            hypergraph.daisy_chain_max_degree(solution).bright_cyan(),
            hypergraph.daisy_chain_distance(solution)
        ),
        ObjectiveKind::RatioCut => println!(
            "Ratio cut: {:.2}, cut: {}",
            hypergraph.ratio_cut(solution).bright_cyan(),
            hypergraph.cut(solution)
        ),
        ObjectiveKind::RatioSoed => println!(
            "Ratio connectivity: {:.2}, connectivity: {}",
            hypergraph.ratio_connectivity(solution).bright_cyan(),
            hypergraph.connectivity(solution)
        ),
        ObjectiveKind::RatioMaxDegree => println!(
            "Ratio max degree: {:.2}, max degree: {}",
            hypergraph.ratio_max_degree(solution).bright_cyan(),
            hypergraph.max_degree(solution)
        ),
    }
    if verbosity >= 2 {
        let usage = hypergraph.block_usage(solution);
        let degrees = hypergraph.block_degrees(solution);
        println!("{}", "block  usage  capacity  degree".dimmed());
        for block in 0..hypergraph.n_blocks() {
            println!(
                "{:>5}  {:>5}  {:>8}  {:>6}",
                block,
                usage[block as usize],
                hypergraph.block_capacity(block, 0),
                degrees[block as usize]
            );
        }
    }
}
