use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::CustomType;
use serde::Serialize;
use tennis_core::{
    Config, ConstraintOverrides, Constraints, DayGroup, RawObservation, Recommendation,
    recommend_raw,
};
use tracing::debug;

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "tennis", version, about = "Find the best times to play tennis")]
pub struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the constraint thresholds.
    Configure,

    /// Show the constraints that would be applied.
    Constraints {
        #[arg(long)]
        json: bool,
    },

    /// Recommend time slots from a JSON file of hourly forecast rows.
    Recommend {
        /// Path to a JSON array of hourly records.
        file: PathBuf,

        /// Print the response as JSON instead of a report.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

/// Per-run replacements for the configured thresholds.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OverrideArgs {
    /// Temperature must be above this (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub min_temperature: Option<f64>,

    /// Wind speed must be below this (kph).
    #[arg(long)]
    pub max_wind_speed: Option<f64>,

    /// Precipitation probability must be below this (%).
    #[arg(long)]
    pub max_precipitation: Option<f64>,

    /// Humidity must be below this (%).
    #[arg(long)]
    pub max_humidity: Option<f64>,
}

impl From<OverrideArgs> for ConstraintOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            min_temperature_c: args.min_temperature,
            max_wind_speed_kph: args.max_wind_speed,
            max_precipitation_probability_pct: args.max_precipitation,
            max_humidity_pct: args.max_humidity,
        }
    }
}

/// JSON body printed by `recommend --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendResponse<'a> {
    optimized_times: &'a [DayGroup],
    other_valid_times: &'a [DayGroup],
    constraints: &'a Constraints,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Constraints { json } => {
                let constraints = Config::load()?.constraints()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&constraints)?);
                } else {
                    print!("{}", report::constraints(&constraints));
                }
                Ok(())
            }
            Command::Recommend {
                file,
                json,
                overrides,
            } => {
                let configured = Config::load()?.constraints()?;
                let constraints = resolve_constraints(configured, overrides)?;
                let recommendation = recommend_file(&file, &constraints)?;

                if json {
                    let body = RecommendResponse {
                        optimized_times: &recommendation.optimized_times,
                        other_valid_times: &recommendation.other_valid_times,
                        constraints: &constraints,
                    };
                    println!("{}", serde_json::to_string_pretty(&body)?);
                } else {
                    let text = report::recommendation(&recommendation, &constraints);
                    print!("{text}");
                }
                Ok(())
            }
        }
    }
}

/// Apply command-line overrides on top of the configured constraints.
fn resolve_constraints(
    configured: Constraints,
    overrides: OverrideArgs,
) -> anyhow::Result<Constraints> {
    let constraints = configured.with_overrides(overrides.into());
    constraints
        .validate()
        .context("Invalid constraint override")?;
    Ok(constraints)
}

fn recommend_file(path: &Path, constraints: &Constraints) -> anyhow::Result<Recommendation> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read forecast file: {}", path.display()))?;

    let rows: Vec<RawObservation> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse forecast file: {}", path.display()))?;
    debug!("Read {} records from {}", rows.len(), path.display());

    let recommendation = recommend_raw(rows, constraints)
        .with_context(|| format!("Failed to process forecast file: {}", path.display()))?;
    Ok(recommendation)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let current = config.constraints;

    let constraints = Constraints {
        min_temperature_c: prompt_bound("Minimum temperature (°C):", current.min_temperature_c)?,
        max_wind_speed_kph: prompt_bound("Maximum wind speed (kph):", current.max_wind_speed_kph)?,
        max_precipitation_probability_pct: prompt_bound(
            "Maximum precipitation probability (%):",
            current.max_precipitation_probability_pct,
        )?,
        max_humidity_pct: prompt_bound("Maximum humidity (%):", current.max_humidity_pct)?,
    };

    config.set_constraints(constraints)?;
    let path = config.save()?;
    println!("Saved constraints to {}", path.display());
    Ok(())
}

fn prompt_bound(message: &str, current: f64) -> anyhow::Result<f64> {
    let value = CustomType::<f64>::new(message)
        .with_default(current)
        .with_error_message("Please type a valid number")
        .with_help_message("Comparisons are strict; press enter to keep the current value")
        .prompt()?;
    Ok(value)
}
