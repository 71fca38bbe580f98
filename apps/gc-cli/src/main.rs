use clap::{Parser, Subcommand};
use gc_chem::{
    ConfigError, RunFile, SolverError, evolve_step, query_cooling_time, query_gamma,
    query_pressure, query_temperature,
};
use gc_core::units::{SECONDS_PER_MEGAYEAR, k, myr};
use gc_core::{Real, to_f64};
use gc_fields::{FieldError, GridShape, MetalCooling, NetworkVariant, PrimordialInit, PrimordialLevel};
use gc_rates::{RateDataSource, RateError, TemperatureGrid};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(about = "gascool CLI - primordial chemistry and cooling solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a single cell of neutral primordial gas and report derived quantities
    Run {
        /// Path to the run YAML file
        run_path: PathBuf,
        /// Initial temperature in K
        #[arg(long, default_value_t = 1000.0)]
        temperature: f64,
        /// Timestep in megayears
        #[arg(long, default_value_t = 1.0)]
        dt_myr: f64,
        /// Gas density in code units
        #[arg(long, default_value_t = 1.0)]
        density: f64,
        /// Expansion factor (must be 1 for non-comoving runs)
        #[arg(long, default_value_t = 1.0)]
        expansion_factor: f64,
    },
    /// Finalize the configuration of a run file and print its ready token
    Validate {
        /// Path to the run YAML file
        run_path: PathBuf,
        /// Also print the parsed run file
        #[arg(long)]
        show: bool,
    },
    /// List the fields a network variant requires
    Fields {
        /// Primordial chemistry level (0-3)
        #[arg(long)]
        level: u8,
        /// Include metal cooling
        #[arg(long)]
        metals: bool,
    },
    /// Write the builtin rate dataset to a JSON file
    ExportRates {
        /// Output JSON path
        output: PathBuf,
        /// Hydrogen mass fraction for the equilibrium tables
        #[arg(long, default_value_t = 0.76)]
        hydrogen_fraction: f64,
        /// Number of temperature bins
        #[arg(long, default_value_t = 600)]
        bins: usize,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    #[error("Rate data error: {0}")]
    Rate(#[from] RateError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            run_path,
            temperature,
            dt_myr,
            density,
            expansion_factor,
        } => cmd_run(&run_path, temperature, dt_myr, density, expansion_factor),
        Commands::Validate { run_path, show } => cmd_validate(&run_path, show),
        Commands::Fields { level, metals } => cmd_fields(level, metals),
        Commands::ExportRates {
            output,
            hydrogen_fraction,
            bins,
        } => cmd_export_rates(&output, hydrogen_fraction, bins),
    }
}

fn cmd_run(
    run_path: &Path,
    temperature: f64,
    dt_myr: f64,
    density: f64,
    expansion_factor: f64,
) -> CliResult<()> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(CliError::InvalidArg(format!(
            "temperature must be positive (got {temperature})"
        )));
    }
    let run = RunFile::load(run_path)?;
    let units = &run.units;
    let config = run.chemistry.finalize(units)?;
    let variant = config.variant();
    let chemistry = config.config();

    // neutral primordial gas
    let x = chemistry.hydrogen_fraction_by_mass;
    let mu = 1.0 / (x + (1.0 - x) / 4.0);
    let init = PrimordialInit {
        density,
        internal_energy: units.internal_energy_for_temperature(k(temperature), mu, chemistry.gamma),
        hydrogen_fraction: x,
        metal_fraction: chemistry.solar_metal_fraction_by_mass,
        ..Default::default()
    };
    let shape = GridShape::new(&[1, 1, 1], &[0, 0, 0], &[0, 0, 0])?;
    let mut state = init.build(shape, &variant)?;

    let dt = units.code_time(myr(dt_myr));
    tracing::info!(token = %config.token(), dt, "evolving single cell");
    println!(
        "Evolving {:?} (metals {:?}) for {} Myr ({} code units)",
        variant.level, variant.metals, dt_myr, dt
    );
    let stats = evolve_step(&config, units, &mut state, expansion_factor, dt)?;
    println!("✓ Step completed in {} subcycles", stats.max_subcycles);

    let mut out: Vec<Real> = vec![0.0; 1];
    query_cooling_time(&config, units, &state, expansion_factor, &mut out)?;
    println!("Cooling time = {:e} s", to_f64(out[0]) * units.time_units());
    query_temperature(&config, units, &state, expansion_factor, &mut out)?;
    println!("Temperature = {:e} K", to_f64(out[0]));
    query_pressure(&config, units, &state, expansion_factor, &mut out)?;
    println!("Pressure = {:e}", to_f64(out[0]));
    query_gamma(&config, units, &state, expansion_factor, &mut out)?;
    println!("gamma = {}", to_f64(out[0]));
    Ok(())
}

fn cmd_validate(run_path: &Path, show: bool) -> CliResult<()> {
    println!("Validating run file: {}", run_path.display());
    let run = RunFile::load(run_path)?;
    if show {
        print!("{}", serde_yaml::to_string(&run)?);
    }
    let config = run.chemistry.finalize(&run.units)?;
    println!("✓ Configuration is valid");
    println!("  token: {}", config.token());
    println!(
        "  temperature units: {:e} K, one Myr = {:e} code time units",
        run.units.temperature_units(),
        SECONDS_PER_MEGAYEAR / run.units.time_units()
    );
    Ok(())
}

fn cmd_fields(level: u8, metals: bool) -> CliResult<()> {
    let level = PrimordialLevel::try_from(level)?;
    let variant = NetworkVariant::new(level, MetalCooling::from(metals));
    println!("Required fields for {:?} (metals {:?}):", level, variant.metals);
    for field in variant.required_fields() {
        println!("  {field}");
    }
    Ok(())
}

fn cmd_export_rates(output: &Path, hydrogen_fraction: f64, bins: usize) -> CliResult<()> {
    if !(hydrogen_fraction > 0.0 && hydrogen_fraction <= 1.0) {
        return Err(CliError::InvalidArg(format!(
            "hydrogen fraction must lie in (0, 1] (got {hydrogen_fraction})"
        )));
    }
    let grid = TemperatureGrid {
        bins,
        ..TemperatureGrid::default()
    };
    let dataset = RateDataSource::Builtin.load(grid, hydrogen_fraction)?;
    dataset.save(output)?;
    println!(
        "✓ Wrote {} rate and {} cooling tables to {}",
        dataset.rates.len(),
        dataset.cooling.len(),
        output.display()
    );
    Ok(())
}
