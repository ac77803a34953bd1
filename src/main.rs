//! Population projection CLI
//!
//! Projects one or more municipalities, prints per-municipality tables and
//! writes the consolidated table as CSV.

use anyhow::{Context, Result};
use clap::Parser;
use poblacion_projection::config::ScenarioConfig;
use poblacion_projection::municipality::load_municipalities;
use poblacion_projection::report::{export_file_name, write_csv_file};
use poblacion_projection::ScenarioRunner;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "poblacion", version, about = "Simulador de proyección de población")]
struct Args {
    /// Scenario settings as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Municipalities as CSV (replaces those in the scenario file)
    #[arg(long)]
    municipalities: Option<PathBuf>,

    /// Projection horizon in years
    #[arg(long)]
    horizon: Option<u32>,

    /// Use early and late growth rates split at the middle of the horizon
    #[arg(long)]
    segmented: bool,

    /// Directory for the CSV export
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Project municipalities in parallel
    #[arg(long)]
    parallel: bool,

    /// Print the consolidated table as JSON instead of text tables
    #[arg(long)]
    json: bool,
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut scenario = match &args.config {
        Some(path) => ScenarioConfig::from_json_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::default(),
    };

    if let Some(path) = &args.municipalities {
        scenario.municipalities = load_municipalities(path)
            .with_context(|| format!("loading municipalities {}", path.display()))?;
    }
    if let Some(horizon) = args.horizon {
        scenario.horizon_years = horizon;
    }
    if args.segmented {
        scenario.segmented = true;
    }

    scenario.validate()?;
    Ok(scenario)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let scenario = load_scenario(&args)?;
    let entities = scenario.to_entities();

    let runner = ScenarioRunner::new(scenario.horizon_years);
    let run = if args.parallel {
        runner.run_parallel(&entities)?
    } else {
        runner.run(&entities)?
    };

    for notice in &run.notices {
        eprintln!("Aviso: {}", notice);
    }

    let table = run.table();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("Simulador de Proyección de Población");
        println!("Horizonte: {} años{}\n", scenario.horizon_years,
            if scenario.segmented { " (tasas por tramos)" } else { "" });

        for entity_table in run.entity_tables() {
            println!("Tabla de resultados para {}", entity_table.entity_name);
            print!("{}", entity_table.render());
            println!();
        }

        println!("Resumen:");
        for labeled in &run.series {
            let summary = labeled.series.summary();
            let growth = summary
                .average_annual_growth
                .map(|g| format!("{:.3}%", g * 100.0))
                .unwrap_or_else(|| "-".to_string());
            println!("  {:<32} final={:>12} crecimiento={:>12} tasa media={}",
                labeled.label(), summary.final_population, summary.absolute_growth, growth);
        }
    }

    let file_name = export_file_name(&run.entity_names());
    let path = args.output.join(file_name);
    write_csv_file(&table, &path)
        .with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Resultados escritos en {}", path.display());

    Ok(())
}
