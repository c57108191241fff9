use clap::{Parser, Subcommand};
use rtdsp_sim::{
    Scenario, SimResult, Trace, limit_i16_sequence, pi_q15_sequence, write_csv, write_json,
    write_sequence_csv,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rtdsp")]
#[command(about = "rtdsp - fixed-point control loop simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and value ranges
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Run a closed-loop scenario
    Simulate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the trace as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in characterization sequences
    #[command(subcommand)]
    Sequence(SequenceCommands),
    /// Write the built-in PI characterization scenario as YAML
    Template {
        /// Output YAML file path
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum SequenceCommands {
    /// 16-bit limiter swept across its window
    Limit {
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Q15 PI controller driving a first-order plant
    Pi {
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> SimResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Simulate {
            scenario_path,
            output,
            json,
        } => cmd_simulate(&scenario_path, output.as_deref(), json),
        Commands::Sequence(seq_cmd) => match seq_cmd {
            SequenceCommands::Limit { output } => {
                let rows = limit_i16_sequence(rtdsp_sim::SEQUENCE_LENGTH);
                cmd_write_sequence(rows, output.as_deref())
            }
            SequenceCommands::Pi { output } => {
                cmd_write_sequence(pi_q15_sequence()?, output.as_deref())
            }
        },
        Commands::Template { output } => cmd_template(&output),
    }
}

fn cmd_validate(scenario_path: &Path) -> SimResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = Scenario::load(scenario_path)?;
    println!("✓ Scenario is valid ({} steps)", scenario.steps);
    Ok(())
}

fn cmd_simulate(scenario_path: &Path, output: Option<&Path>, json: bool) -> SimResult<()> {
    let scenario = Scenario::load(scenario_path)?;
    let trace = scenario.run()?;

    let saturated = trace.saturated_steps();
    if saturated > 0 {
        tracing::warn!(saturated, "controller output hit a rail");
    }

    if let Some(path) = output {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        write_trace(&trace, &mut file, json)?;
        file.flush()?;
        println!("✓ Exported {} steps to {}", trace.len(), path.display());
        print_summary(&trace);
    } else {
        write_trace(&trace, io::stdout().lock(), json)?;
    }

    Ok(())
}

fn write_trace<W: io::Write>(trace: &Trace, out: W, json: bool) -> SimResult<()> {
    if json {
        write_json(trace, out)
    } else {
        write_csv(trace, out)
    }
}

fn print_summary(trace: &Trace) {
    if let Some(last) = trace.last() {
        println!(
            "  Final: setpoint {:.6}, output {:.6}, control {:.6}",
            trace.format.to_f64(last.setpoint),
            trace.format.to_f64(last.output),
            trace.format.to_f64(last.control)
        );
    }
    println!("  Saturated steps: {}", trace.saturated_steps());
}

fn cmd_write_sequence(rows: Vec<(i64, i64)>, output: Option<&Path>) -> SimResult<()> {
    let count = rows.len();
    if let Some(path) = output {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        write_sequence_csv(rows, &mut file)?;
        file.flush()?;
        println!("✓ Exported {} data points to {}", count, path.display());
    } else {
        write_sequence_csv(rows, io::stdout().lock())?;
    }
    Ok(())
}

fn cmd_template(output: &Path) -> SimResult<()> {
    Scenario::pi_characterization().save(output)?;
    println!("✓ Wrote scenario template to {}", output.display());
    Ok(())
}
