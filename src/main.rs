use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use bus_schedule::ga::{optimize_schedule, GaConfig};
use bus_schedule::report::{driver_summaries, write_comparison_csv, write_schedule_csv};
use bus_schedule::scheduler::{allocate_direct, Comparison, ScheduleRequest};
use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of buses in service
    #[arg(long, default_value = "8")]
    buses: String,

    /// Number of category A drivers (8-hour shift)
    #[arg(short = 'a', long, default_value = "10")]
    drivers_a: String,

    /// Number of category B drivers (12-hour shift with breaks)
    #[arg(short = 'b', long, default_value = "5")]
    drivers_b: String,

    /// Target date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,

    /// RNG seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// GA population size
    #[arg(long, default_value_t = bus_schedule::ga::DEFAULT_POPULATION_SIZE)]
    population: usize,

    /// GA generation count
    #[arg(long, default_value_t = bus_schedule::ga::DEFAULT_MAX_GENERATIONS)]
    generations: usize,

    /// Write both schedules to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the metric comparison to this CSV file
    #[arg(long)]
    comparison: Option<PathBuf>,

    /// Print every driver's shifts
    #[arg(long)]
    details: bool,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let date = match &cli.date {
        Some(date) => date.clone(),
        None => jiff::Zoned::now().date().to_string(),
    };
    let request = ScheduleRequest::parse(&cli.buses, &cli.drivers_a, &cli.drivers_b, &date)?;
    info!(
        buses = request.bus_count,
        drivers_a = request.driver_a_count,
        drivers_b = request.driver_b_count,
        date = %request.date,
        weekend = request.day().is_weekend(),
        "scheduling day"
    );

    let mut rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let straight = allocate_direct(&request, &mut rng);
    let config = GaConfig::default()
        .with_population_size(cli.population)
        .with_max_generations(cli.generations);
    let result = optimize_schedule(&request, &config, &mut rng);
    let genetic = result.best;

    let comparison = Comparison::new(&straight, &genetic);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Metric", "Straight Algorithm", "Genetic Algorithm"]);
    for (metric, s, g) in comparison.rows() {
        table.add_row(vec![metric.to_string(), s.to_string(), g.to_string()]);
    }
    println!("{table}");
    println!("Best fitness: {:.1}", result.best_fitness);

    if cli.details {
        let mut details = Table::new();
        details.load_preset(UTF8_FULL).set_header(vec![
            "Algorithm",
            "Driver",
            "Schedule",
            "Work (min)",
            "Break (min)",
        ]);
        for summary in driver_summaries(&straight, &genetic) {
            details.add_row(vec![
                summary.algorithm.to_string(),
                summary.driver_id,
                summary.shifts,
                summary.work_minutes.to_string(),
                summary.break_minutes.to_string(),
            ]);
        }
        println!("{details}");
    }

    if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_schedule_csv(&mut writer, &straight, &genetic)?;
        writer.flush()?;
        info!("Schedule written to {}", path.display());
    }

    if let Some(path) = &cli.comparison {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_comparison_csv(&mut writer, &comparison)?;
        writer.flush()?;
        info!("Comparison written to {}", path.display());
    }

    Ok(())
}
