//! Command handlers; each returns the process exit code

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::commands::{DetectArgs, LayersArgs, SliceArgs};
use super::output::OutputFormatter;
use crate::config::PublishConfig;
use crate::detect::Detector;
use crate::layers::launch_slices;
use crate::project::ProjectLocator;
use crate::slicer::{OutputSlicer, Slice, Slicer};

pub fn handle_detect(args: &DetectArgs) -> i32 {
    exit_code(run_detect(args))
}

pub fn handle_slice(args: &SliceArgs) -> i32 {
    exit_code(run_slice(args))
}

pub fn handle_layers(args: &LayersArgs) -> i32 {
    exit_code(run_layers(args))
}

fn exit_code(result: Result<String>) -> i32 {
    match result {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn run_detect(args: &DetectArgs) -> Result<String> {
    let working_dir = resolve_working_dir(args.working_dir.as_ref())?;
    let config = load_config()?;

    info!("Detecting build plan in {}", working_dir.display());
    let plan = Detector::new()
        .detect(&config, &working_dir)
        .context("Failed to detect build plan")?;

    OutputFormatter::new(args.format.into()).format_build_plan(&plan)
}

fn run_slice(args: &SliceArgs) -> Result<String> {
    let slices = OutputSlicer::new().slice(&args.assets_file)?;
    OutputFormatter::new(args.format.into()).format_slices(&slices)
}

fn run_layers(args: &LayersArgs) -> Result<String> {
    let working_dir = resolve_working_dir(args.working_dir.as_ref())?;
    let config = load_config()?;

    let slices = layers_for(&config, &working_dir, &OutputSlicer::new())?;
    OutputFormatter::new(args.format.into()).format_launch_slices(&slices)
}

fn resolve_working_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.clone()),
        None => env::current_dir().context("Failed to get current directory"),
    }
}

fn load_config() -> Result<PublishConfig> {
    let config = PublishConfig::from_env().context("Failed to load build configuration")?;
    config.validate()?;
    debug!("Build configuration:\n{}", config);
    Ok(config)
}

fn layers_for(
    config: &PublishConfig,
    working_dir: &Path,
    slicer: &dyn Slicer,
) -> Result<Vec<Slice>> {
    info!("Locating project in {}", working_dir.display());
    let project = ProjectLocator::new()
        .locate(config, working_dir)
        .context("Failed to locate .NET project")?;

    Ok(launch_slices(config, &project.assets_file, slicer)?)
}
