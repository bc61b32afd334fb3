//! Jones calculus command-line interface.
//!
//! Run polarization jobs from TOML configuration files:
//! ```sh
//! jones-cli run job.toml
//! jones-cli sweep job.toml
//! jones-cli validate job.toml
//! jones-cli elements
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jones-cli")]
#[command(about = "Jones calculus: polarization states through optical elements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate the source state through the element chain.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sweep one element parameter and record intensities and Poincaré points.
    Sweep {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the named polarization states and optical elements.
    Elements,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Jones Calculus Runner");
            println!("=====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_job(&job)?;
            let s = &result.stokes;
            println!("  Stokes:    ({:.6}, {:.6}, {:.6}, {:.6})", s.s0, s.s1, s.s2, s.s3);

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            runner::write_run_result(&result, &out_dir)?;

            println!("Run complete.");
            Ok(())
        }
        Commands::Sweep { config, output } => {
            println!("Jones Calculus Sweep");
            println!("====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let result = runner::run_sweep(&job)?;
            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            // CSV (default on)
            if job.output.save_csv {
                runner::write_sweep_csv(&result, &out_dir.join("sweep.csv"), &job)?;
                runner::write_poincare_csv(&result.poincare, &out_dir.join("poincare.csv"))?;
            }

            // JSON (optional)
            if job.output.save_json {
                runner::write_json(&result, &out_dir.join("sweep.json"))?;
            }

            println!("Sweep complete: {} points.", result.samples.len());
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            runner::build_source(&job.source)?;
            runner::build_elements(&job)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Elements => {
            println!("Polarization states ([source] state = ...):");
            println!("  linear_horizontal    (1, 0)");
            println!("  linear_vertical      (0, 1)");
            println!("  linear_diagonal      (1, 1)/√2");
            println!("  linear_antidiagonal  (1, -1)/√2");
            println!("  linear               (cos θ, sin θ), θ = angle");
            println!("  circular_right       (1, -i)/√2");
            println!("  circular_left        (1, i)/√2");
            println!();
            println!("Optical elements ([[element]] kind = ...):");
            println!("  identity");
            println!("  polarizer_horizontal");
            println!("  polarizer_vertical");
            println!("  polarizer            transmission axis at angle");
            println!("  quarter_wave_plate   fast axis at angle");
            println!("  half_wave_plate      fast axis at angle");
            println!("  phase_retarder       fast axis at angle, retardance eta");
            println!("  matrix               raw 2x2 `matrix`");
            Ok(())
        }
    }
}
