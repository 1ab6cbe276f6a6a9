use clap::{Args, Parser, Subcommand};
use fd_app::{
    AppResult, DriverOptions, PairOutcome, RunProgressEvent, RunStage, SimulationSetup,
    compile_run, group_by_flow_rate, project_service, query, run_service,
};
use fd_project::schema::{FoamDef, FoamKindDef, KineticsDef, RunFile, StrategyDef};
use fd_syringe::FoamType;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fd-cli")]
#[command(about = "FoamDrain CLI - liquid drainage from foam during syringe injection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run file
    Validate {
        /// Path to the run YAML file
        run_path: PathBuf,
    },
    /// Write a default run file to start from
    Init {
        /// Output path (prints to stdout when omitted)
        output: Option<PathBuf>,
    },
    /// Simulate every pair of a run file
    Run {
        /// Path to the run YAML file
        run_path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Simulate pairs given on the command line
    Simulate {
        /// Syringe volume in mL (3, 5, 10 or 20)
        #[arg(long, default_value_t = 10.0)]
        syringe_ml: f64,
        /// Foam type (tessari or dss)
        #[arg(long, default_value = "tessari")]
        foam: FoamType,
        /// Gas to liquid ratio (3, 4 or 5)
        #[arg(long, default_value_t = 4)]
        gas_ratio: u32,
        /// Flow rate in mL/min, repeatable
        #[arg(long = "flow-rate", required = true)]
        flow_rates: Vec<f64>,
        /// Foam volume in mL, repeatable
        #[arg(long = "foam-volume", required = true)]
        foam_volumes: Vec<f64>,
        /// Rounding digits used to match segment areas
        #[arg(long, default_value_t = 2)]
        digits: u32,
        /// Samples per second
        #[arg(long, default_value_t = 20)]
        frequency: u32,
        /// Use the exact exponential instead of stepping
        #[arg(long)]
        closed_form: bool,
        /// Solve angles by bisection instead of table search
        #[arg(long)]
        bisection: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Write all height curves to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Print outcomes as JSON instead of a summary
    #[arg(long)]
    json: bool,
    /// Simulate pairs one after another
    #[arg(long)]
    sequential: bool,
    /// Wall-clock budget per pair solve, in seconds
    #[arg(long)]
    budget_s: Option<f64>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { run_path } => cmd_validate(&run_path),
        Commands::Init { output } => cmd_init(output.as_deref()),
        Commands::Run { run_path, output } => cmd_run(&run_path, &output),
        Commands::Simulate {
            syringe_ml,
            foam,
            gas_ratio,
            flow_rates,
            foam_volumes,
            digits,
            frequency,
            closed_form,
            bisection,
            output,
        } => {
            let run = RunFile {
                name: "command-line".to_string(),
                syringe_ml,
                foam: FoamDef {
                    kind: match foam {
                        FoamType::Tessari => FoamKindDef::Tessari,
                        FoamType::Dss => FoamKindDef::Dss,
                    },
                    gas_ratio,
                },
                flow_rates_ml_per_min: flow_rates,
                foam_volumes_ml: foam_volumes,
                accuracy_digits: digits,
                sample_frequency_hz: frequency,
                kinetics: if closed_form {
                    KineticsDef::ClosedForm
                } else {
                    KineticsDef::Stepped
                },
                strategy: if bisection {
                    StrategyDef::Bisection
                } else {
                    StrategyDef::BruteForce
                },
                ..RunFile::default()
            };
            simulate_run(&run, &output)
        }
    }
}

fn cmd_validate(run_path: &Path) -> AppResult<()> {
    println!("Validating run file: {}", run_path.display());
    let run = project_service::load_run_file(run_path)?;
    let setup = compile_run(&run)?;
    println!("✓ Run file is valid");
    println!("  {}", setup.syringe);
    println!("  {}", setup.foam);
    println!(
        "  {} flow rates x {} foam volumes",
        setup.params.flow_rates_ml_per_s().len(),
        setup.params.foam_volumes_ml().len()
    );
    Ok(())
}

fn cmd_init(output: Option<&Path>) -> AppResult<()> {
    let run = RunFile::default();
    match output {
        Some(path) => {
            project_service::save_run_file(path, &run)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", project_service::run_file_to_yaml(&run)?),
    }
    Ok(())
}

fn cmd_run(run_path: &Path, output: &OutputArgs) -> AppResult<()> {
    let run = project_service::load_run_file(run_path)?;
    simulate_run(&run, output)
}

fn simulate_run(run: &RunFile, output: &OutputArgs) -> AppResult<()> {
    let mut run = run.clone();
    if output.budget_s.is_some() {
        run.time_budget_s = output.budget_s;
    }
    let setup = compile_run(&run)?;
    let options = DriverOptions {
        parallel: !output.sequential,
    };

    if !output.json {
        println!("Simulating {}: {}, {}", setup.name, setup.syringe, setup.foam);
    }

    let outcomes = run_service::simulate_injection_with_progress(
        &setup,
        &options,
        Some(&mut |event| {
            if !output.json {
                render_cli_progress(&event);
            }
        }),
    );
    if !output.json {
        clear_progress_line();
    }

    if let Some(path) = &output.csv {
        std::fs::write(path, query::outcomes_to_csv(&outcomes))?;
        if !output.json {
            println!("✓ Exported height curves to {}", path.display());
        }
    }

    if output.json {
        println!("{}", query::outcomes_to_json(&outcomes)?);
    } else {
        print_summary(&setup, &outcomes);
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.pair) {
        (RunStage::PairFinished, Some(p)) => {
            let width = 28usize;
            let filled = ((p.fraction_complete() * width as f64).round() as usize).min(width);
            print!(
                "\r[{}{}] {}/{}  Q={:.1} mL/min  V={:.1} mL  {}  elapsed={:.1}s",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled)),
                p.index + 1,
                p.total,
                p.flow_rate_ml_per_s * 60.0,
                p.foam_volume_ml,
                if p.succeeded { "ok" } else { "failed" },
                event.elapsed_wall_s
            );
        }
        _ => {
            let mut line = format!("\r{}  elapsed={:.2}s", event.stage.label(), event.elapsed_wall_s);
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_summary(setup: &SimulationSetup, outcomes: &[PairOutcome]) {
    let radius = setup.syringe.radius_mm();
    for group in group_by_flow_rate(outcomes) {
        println!("\nFlow rate {:.1} mL/min", group.flow_rate_ml_per_min());
        for outcome in group.outcomes {
            match &outcome.result {
                Ok(r) => println!(
                    "  {:>5.1} mL foam: {} points over {:.1} s, final height {:.3} mm of {:.2} mm, table {}",
                    r.foam_volume_ml,
                    r.heights.len(),
                    r.duration_s,
                    r.heights.values().last().copied().unwrap_or(0.0),
                    radius,
                    r.table_size
                ),
                Err(e) => println!("  {:>5.1} mL foam: failed: {}", outcome.foam_volume_ml, e),
            }
        }
    }

    let summary = query::get_run_summary(outcomes);
    println!(
        "\n{} pairs: {} ok, {} failed, solver time {:.2} s",
        summary.pair_count, summary.succeeded, summary.failed, summary.total_wall_time_s
    );
}
