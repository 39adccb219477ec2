//! Cargo loading benchmark CLI

use clap::{Parser, Subcommand, ValueEnum};
use cylpack_benchmark::{
    builtin_instances, BenchmarkConfig, BenchmarkResult, BenchmarkRunner, InstanceSet,
};
use cylpack_core::Strategy;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cylpack-bench")]
#[command(about = "Benchmark runner for circular cargo loading")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the run commands.
#[derive(clap::Args)]
struct RunArgs {
    /// Instance file (JSON); built-in instances are used if omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Strategies to benchmark
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = vec![StrategyArg::Greedy, StrategyArg::Random, StrategyArg::Ga])]
    strategies: Vec<StrategyArg>,

    /// Number of runs per strategy
    #[arg(short, long, default_value = "1")]
    runs: usize,

    /// Base random seed (run k uses seed + k)
    #[arg(long)]
    seed: Option<u64>,

    /// Time limit per run in seconds (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    time_limit: u64,

    /// Preset solver parameters
    #[arg(short, long, value_enum, default_value = "standard")]
    preset: Preset,

    /// Keep item coordinates in the JSON output
    #[arg(long)]
    placements: bool,

    /// Output file for results (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for CSV results
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available instances
    List {
        /// Instance file (JSON); built-in instances are listed if omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Run benchmark on a single instance
    Run {
        /// Instance name (e.g., basic_01_three_identical)
        #[arg(short, long)]
        instance: String,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Run benchmarks on every instance
    RunAll {
        #[command(flatten)]
        args: RunArgs,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Largest-first greedy
    Greedy,
    /// Random search
    Random,
    /// Genetic Algorithm
    Ga,
    /// Ant Colony Optimization
    Aco,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Random => Strategy::RandomSearch,
            StrategyArg::Ga => Strategy::GeneticAlgorithm,
            StrategyArg::Aco => Strategy::AntColony,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Smaller populations and colonies, 10s default limit
    Quick,
    /// Default solver parameters
    Standard,
}

fn load_instances(file: Option<&Path>) -> anyhow::Result<InstanceSet> {
    Ok(match file {
        Some(path) => InstanceSet::load(path)?,
        None => builtin_instances(),
    })
}

fn benchmark_config(args: &RunArgs) -> BenchmarkConfig {
    let base = match args.preset {
        Preset::Quick => BenchmarkConfig::quick(),
        Preset::Standard => BenchmarkConfig::standard(),
    };
    let mut config = base
        .with_strategies(args.strategies.iter().copied().map(Into::into).collect())
        .with_runs_per_config(args.runs)
        .with_seed(args.seed)
        .with_placements(args.placements);
    if args.time_limit > 0 {
        config = config.with_time_limit(args.time_limit * 1000);
    }
    config
}

fn report(results: &BenchmarkResult, args: &RunArgs) -> anyhow::Result<()> {
    results.print_summary();

    println!("\nStrategy Comparison:");
    println!("{:-<72}", "");
    for summary in results.summary_by_strategy() {
        println!(
            "  {:<8} runs={:<3} avg_fitness={:<10.2} best={:<10.2} perfect={:<3} avg_time={}ms",
            summary.strategy,
            summary.run_count,
            summary.avg_fitness,
            summary.best_fitness,
            summary.perfect_count,
            summary.avg_time_ms
        );
    }

    if let Some(path) = &args.output {
        results.save_json(path)?;
        println!("\nResults saved to: {}", path.display());
    }

    if let Some(path) = &args.csv {
        results.save_csv(path)?;
        println!("CSV saved to: {}", path.display());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { file } => {
            let instances = load_instances(file.as_deref())?;
            println!("Available Instances:");
            println!("====================");
            for instance in &instances {
                println!(
                    "  - {:<36} {:<12} {:>2} items, {} x {}, max {} kg",
                    instance.name,
                    instance.category,
                    instance.items.len(),
                    instance.container.width,
                    instance.container.depth,
                    instance.container.max_weight
                );
            }
            println!("\nUse 'cylpack-bench run -i <INSTANCE>' to run benchmarks");
        }

        Commands::Run { instance, args } => {
            let instances = load_instances(args.file.as_deref())?;
            let instance = instances.require(&instance)?;

            let config = benchmark_config(&args);
            let runner = BenchmarkRunner::new(config);
            let results = runner
                .run_instance(instance)
                .with_config(format!("run {} x{}", instance.name, args.runs));

            report(&results, &args)?;
        }

        Commands::RunAll { args } => {
            let instances = load_instances(args.file.as_deref())?;

            let config = benchmark_config(&args);
            let runner = BenchmarkRunner::new(config);
            let results = runner
                .run_instances(&instances)
                .with_config(format!("run-all {} instances x{}", instances.len(), args.runs));

            report(&results, &args)?;
        }
    }

    Ok(())
}
