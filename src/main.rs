use std::fs;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Deserialize;

use satwatch::orbit::parse_tle_text;
use satwatch::{
    upcoming_passes, Observer, SearchConfig, Sgp4Model, SweepConfig, Tracker,
};

#[derive(Parser)]
#[command(name = "satwatch")]
#[command(about = "Satellite pass prediction, ground tracks and footprints")]
struct Cli {
    /// Path to a TLE file (2- or 3-line sets)
    #[arg(long, global = true, default_value = "satellites.tle")]
    tle: String,

    /// Observer as "lat, lon" in degrees
    #[arg(long, global = true, default_value = "0.0, 0.0")]
    observer: String,

    /// Observer altitude in meters
    #[arg(long, global = true)]
    altitude: Option<f64>,

    /// Optional YAML config with search/sweep tuning
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming passes for every satellite in the TLE file
    Passes,
    /// Emit the ground track and footprint rings of the first satellite as JSON
    Track,
    /// Show the current pass phase and alarm rate of the first satellite
    Status,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    search: SearchConfig,
    sweep: SweepConfig,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(observer) = Observer::from_coordinates(&cli.observer, cli.altitude) else {
        eprintln!("Invalid observer coordinates: {}", cli.observer);
        return ExitCode::FAILURE;
    };

    let models = match load_models(&cli.tle) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading TLEs: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if models.is_empty() {
        eprintln!("No TLE sets found in {}", cli.tle);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Commands::Passes => passes(models, &observer, &config),
        Commands::Track => track(models, &config),
        Commands::Status => status(models, &observer, &config),
    }
}

fn load_config(path: Option<&str>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_yaml::from_str(&content).map_err(|e| e.to_string())
}

fn load_models(path: &str) -> Result<Vec<Sgp4Model>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    parse_tle_text(&content)
        .into_iter()
        .map(|rec| {
            Sgp4Model::from_tle(rec.name, &rec.line1, &rec.line2).map_err(|e| e.to_string())
        })
        .collect()
}

fn passes(models: Vec<Sgp4Model>, observer: &Observer, config: &Config) -> ExitCode {
    let now = Utc::now();
    for mut model in models {
        println!("{} (NORAD {})", model.name(), model.norad_id());
        match upcoming_passes(&mut model, observer, now, &config.search) {
            Ok(passes) if passes.is_empty() => println!("  no passes before elements expire"),
            Ok(passes) => {
                for pass in passes {
                    let duration = pass.duration().to_std().unwrap_or_default();
                    println!(
                        "  {}  az {:>5.1} -> {:>5.1}  ({})",
                        pass.rise.time.format("%Y-%m-%d %H:%M:%S"),
                        pass.rise.azimuth_deg,
                        pass.set.azimuth_deg,
                        humantime::format_duration(duration)
                    );
                }
            }
            Err(e) => {
                log::warn!("prediction failed for {}: {}", model.name(), e);
                println!("  prediction failed: {}", e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn track(models: Vec<Sgp4Model>, config: &Config) -> ExitCode {
    let mut tracker = Tracker::new(config.search.clone(), config.sweep.clone());
    if let Some(model) = models.into_iter().next() {
        tracker.set_orbit(model);
    }
    match tracker.sweep(Utc::now()) {
        Ok(Some(sweep)) => match serde_json::to_string_pretty(&sweep) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            eprintln!("No satellite loaded");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Sweep failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn status(models: Vec<Sgp4Model>, observer: &Observer, config: &Config) -> ExitCode {
    let mut tracker = Tracker::new(config.search.clone(), config.sweep.clone());
    tracker.set_observer(*observer);
    if let Some(model) = models.into_iter().next() {
        tracker.set_orbit(model);
    }
    let (phase, rate) = tracker.update(Utc::now());
    println!("phase: {:?}", phase);
    println!("alarm: {:?}", rate);
    ExitCode::SUCCESS
}
