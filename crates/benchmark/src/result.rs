//! Benchmark result types and recording.

use crate::dataset::Instance;
use cylpack_core::{SolveResult, Strategy};
use cylpack_loading::{verify_solution, Solution};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Placement of one item, for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementInfo {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub placed: bool,
}

/// Result of a single benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Instance name
    pub instance: String,
    /// Instance category
    pub category: String,
    /// Strategy used
    pub strategy: String,
    /// Run number (1-based)
    pub run: usize,
    /// Seed the run used, if any
    pub seed: Option<u64>,
    /// Final fitness (lower is better, 0 is perfect)
    pub fitness: f64,
    /// Number of items placed
    pub items_placed: usize,
    /// Total items in the instance
    pub total_items: usize,
    /// Placed items as a percentage of all items
    pub placement_rate: f64,
    /// Center of mass x (0 if incomplete)
    pub com_x: f64,
    /// Center of mass y (0 if incomplete)
    pub com_y: f64,
    /// Complete with zero fitness
    pub perfect: bool,
    /// Wall-clock time in milliseconds
    pub time_ms: u64,
    pub container_width: f64,
    pub container_depth: f64,
    pub max_weight: f64,
    /// Weight of the placed items
    pub total_weight: f64,
    /// GA generations run (if applicable)
    pub generations: Option<u32>,
    /// Generation or iteration of the best solution (if applicable)
    pub best_generation: Option<u32>,
    /// Iterations run (if applicable)
    pub iterations: Option<u64>,
    /// Why the search stopped (if applicable)
    pub termination: Option<String>,
    /// Whether the solution passed the independent verifier
    pub verified: bool,
    /// Verifier violation score
    pub violation_score: u32,
    /// Item coordinates (optional, for visualization)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placements: Option<Vec<PlacementInfo>>,
}

impl RunResult {
    /// Builds a row from a finished solve.
    pub fn new(
        instance: &Instance,
        strategy: Strategy,
        run: usize,
        result: &SolveResult<Solution>,
        time_ms: u64,
    ) -> Self {
        let total_items = instance.items.len();
        let container = &instance.container;

        let mut row = Self {
            instance: instance.name.clone(),
            category: instance.category.to_string(),
            strategy: strategy.name().to_string(),
            run,
            seed: None,
            fitness: result.best_fitness.unwrap_or(f64::INFINITY),
            items_placed: 0,
            total_items,
            placement_rate: 0.0,
            com_x: 0.0,
            com_y: 0.0,
            perfect: false,
            time_ms,
            container_width: container.width,
            container_depth: container.depth,
            max_weight: container.max_weight,
            total_weight: 0.0,
            generations: result.generations,
            best_generation: result.best_generation,
            iterations: result.iterations,
            termination: result.termination.map(|reason| format!("{:?}", reason)),
            verified: false,
            violation_score: 0,
            placements: None,
        };

        if let Some(solution) = &result.solution {
            let report = verify_solution(solution);
            row.fitness = solution.fitness;
            row.items_placed = solution.placed_count();
            row.placement_rate = solution.placement_rate() * 100.0;
            if solution.complete {
                let (x, y) = solution.center_of_mass().unwrap_or((0.0, 0.0));
                row.com_x = x;
                row.com_y = y;
            }
            row.perfect = solution.is_perfect();
            row.total_weight = solution.total_placed_weight();
            row.verified = report.is_geometrically_valid();
            row.violation_score = report.score();
        }

        row
    }

    /// Records the seed the run used.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the placements for visualization.
    pub fn with_placements(mut self, placements: Vec<PlacementInfo>) -> Self {
        self.placements = Some(placements);
        self
    }
}

/// Collection of benchmark results.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Individual run results
    pub runs: Vec<RunResult>,
    /// Unix time (seconds) when the benchmark was created
    pub timestamp: u64,
    /// Additional metadata
    pub metadata: BenchmarkMetadata,
}

/// Metadata about the benchmark run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BenchmarkMetadata {
    /// cylpack version
    pub version: String,
    /// Configuration used
    pub config: String,
}

impl BenchmarkResult {
    /// Creates a new benchmark result.
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Self {
            runs: Vec::new(),
            timestamp,
            metadata: BenchmarkMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                config: String::new(),
            },
        }
    }

    /// Sets the configuration description.
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.metadata.config = config.into();
        self
    }

    /// Adds a run result.
    pub fn add_run(&mut self, result: RunResult) {
        self.runs.push(result);
    }

    /// Moves all runs of `other` into this result.
    pub fn merge(&mut self, other: BenchmarkResult) {
        self.runs.extend(other.runs);
    }

    /// Saves results to a JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Saves results to a CSV file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_csv(&mut file)?;
        file.flush()
    }

    /// Writes the CSV header and one line per run.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "instance,category,strategy,run,fitness,items_placed,total_items,placement_rate,com_x,com_y,perfect,time_ms,container_width,container_depth,max_weight,total_weight,generations,best_generation,verified"
        )?;

        for run in &self.runs {
            writeln!(
                out,
                "{},{},{},{},{:.4},{},{},{:.2},{:.3},{:.3},{},{},{},{},{},{:.2},{},{},{}",
                run.instance,
                run.category,
                run.strategy,
                run.run,
                run.fitness,
                run.items_placed,
                run.total_items,
                run.placement_rate,
                run.com_x,
                run.com_y,
                run.perfect,
                run.time_ms,
                run.container_width,
                run.container_depth,
                run.max_weight,
                run.total_weight,
                run.generations.map_or(String::new(), |g| g.to_string()),
                run.best_generation.map_or(String::new(), |g| g.to_string()),
                run.verified,
            )?;
        }

        Ok(())
    }

    /// Prints a summary table to stdout.
    pub fn print_summary(&self) {
        println!("\n{:=<104}", "");
        println!("BENCHMARK RESULTS");
        println!("{:=<104}", "");
        println!(
            "{:<36} {:<8} {:>4} {:>12} {:>9} {:>8} {:>16} {:>8}",
            "Instance", "Strategy", "Run", "Fitness", "Placed", "Perfect", "COM", "Time(ms)"
        );
        println!("{:-<104}", "");

        for run in &self.runs {
            println!(
                "{:<36} {:<8} {:>4} {:>12.2} {:>9} {:>8} {:>16} {:>8}",
                run.instance,
                run.strategy,
                run.run,
                run.fitness,
                format!("{}/{}", run.items_placed, run.total_items),
                if run.perfect { "yes" } else { "no" },
                format!("({:.2}, {:.2})", run.com_x, run.com_y),
                run.time_ms,
            );
        }

        println!("{:=<104}\n", "");
    }

    /// Computes summary statistics grouped by strategy.
    pub fn summary_by_strategy(&self) -> Vec<StrategySummary> {
        let mut by_strategy: BTreeMap<&str, Vec<&RunResult>> = BTreeMap::new();
        for run in &self.runs {
            by_strategy.entry(run.strategy.as_str()).or_default().push(run);
        }

        by_strategy
            .into_iter()
            .map(|(strategy, runs)| {
                let n = runs.len() as f64;
                StrategySummary {
                    strategy: strategy.to_string(),
                    run_count: runs.len(),
                    avg_fitness: runs.iter().map(|r| r.fitness).sum::<f64>() / n,
                    best_fitness: runs.iter().map(|r| r.fitness).fold(f64::INFINITY, f64::min),
                    perfect_count: runs.iter().filter(|r| r.perfect).count(),
                    avg_placement_rate: runs.iter().map(|r| r.placement_rate).sum::<f64>() / n,
                    avg_time_ms: (runs.iter().map(|r| r.time_ms).sum::<u64>() as f64 / n) as u64,
                }
            })
            .collect()
    }
}

/// Summary statistics for a strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub run_count: usize,
    pub avg_fitness: f64,
    pub best_fitness: f64,
    pub perfect_count: usize,
    pub avg_placement_rate: f64,
    pub avg_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InstanceCategory;
    use cylpack_loading::{Container, LoadingProblem, PermutationProblem};

    fn instance() -> Instance {
        Instance::new(
            "trio",
            InstanceCategory::Basic,
            Container::new(10.0, 4.0, 100.0),
            &[(2.0, 10.0), (2.0, 10.0), (2.0, 10.0)],
        )
    }

    fn solved(instance: &Instance) -> SolveResult<Solution> {
        let problem = LoadingProblem::new(instance.items.clone(), instance.container);
        let solution = problem.evaluate_order(&[0, 1, 2]);
        SolveResult::new()
            .with_best_fitness(solution.fitness)
            .with_solution(solution)
    }

    #[test]
    fn test_run_result_from_solution() {
        let instance = instance();
        let row = RunResult::new(&instance, Strategy::Greedy, 1, &solved(&instance), 12);

        assert_eq!(row.strategy, "greedy");
        assert_eq!(row.category, "basic");
        assert_eq!(row.items_placed, 3);
        assert!((row.placement_rate - 100.0).abs() < 1e-9);
        assert!(row.perfect);
        assert!(row.verified);
        assert!((row.com_x - 3.0).abs() < 1e-9);
        assert!((row.com_y - 1.0).abs() < 1e-9);
        assert_eq!(row.total_weight, 30.0);
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let instance = instance();
        let mut results = BenchmarkResult::new();
        results.add_run(RunResult::new(&instance, Strategy::Greedy, 1, &solved(&instance), 5));
        results.add_run(RunResult::new(&instance, Strategy::RandomSearch, 1, &solved(&instance), 7));

        let mut buffer = Vec::new();
        results.write_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("instance,category,strategy"));
        assert!(lines[1].starts_with("trio,basic,greedy,1,"));
    }

    #[test]
    fn test_summary_by_strategy() {
        let instance = instance();
        let mut results = BenchmarkResult::new();
        for run in 1..=2 {
            results.add_run(RunResult::new(&instance, Strategy::Greedy, run, &solved(&instance), 10));
        }

        let summary = results.summary_by_strategy();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].run_count, 2);
        assert_eq!(summary[0].perfect_count, 2);
        assert_eq!(summary[0].avg_time_ms, 10);
    }
}
