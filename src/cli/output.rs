//! Output formatting for JSON, YAML and human-readable text

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

use crate::detect::BuildPlan;
use crate::slicer::{OutputSlices, Slice};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Serialize)]
struct LaunchSlices<'a> {
    slices: &'a [Slice],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the three slices of a slicing run
    pub fn format_slices(&self, slices: &OutputSlices) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(slices).context("Failed to serialize slices to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(slices).context("Failed to serialize slices to YAML")
            }
            OutputFormat::Human => Ok(self.format_slices_human(slices)),
        }
    }

    /// Formats launch slices in layer order
    pub fn format_launch_slices(&self, slices: &[Slice]) -> Result<String> {
        let wrapper = LaunchSlices { slices };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&wrapper)
                .context("Failed to serialize launch slices to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&wrapper)
                .context("Failed to serialize launch slices to YAML"),
            OutputFormat::Human => Ok(self.format_launch_slices_human(slices)),
        }
    }

    /// Formats a build plan
    pub fn format_build_plan(&self, plan: &BuildPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize build plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize build plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_build_plan_human(plan)),
        }
    }

    fn format_build_plan_human(&self, plan: &BuildPlan) -> String {
        let mut output = String::from("Provides:\n");
        for provision in &plan.provides {
            let _ = writeln!(output, "  {}", provision.name);
        }

        output.push_str("Requires:\n");
        for requirement in &plan.requires {
            let metadata = &requirement.metadata;
            let mut details = Vec::new();
            if let Some(version) = &metadata.version {
                details.push(format!("version {}", version));
            }
            if let Some(source) = &metadata.version_source {
                details.push(format!("from {}", source));
            }
            if metadata.build {
                details.push("build".to_string());
            }
            if metadata.launch {
                details.push("launch".to_string());
            }
            let _ = writeln!(output, "  {} ({})", requirement.name, details.join(", "));
        }
        output
    }

    fn format_slices_human(&self, slices: &OutputSlices) -> String {
        let mut output = String::new();
        for (kind, slice) in slices.iter() {
            let _ = writeln!(output, "{} ({}):", kind, slice.len());
            for path in &slice.paths {
                let _ = writeln!(output, "  {}", path);
            }
        }
        output
    }

    fn format_launch_slices_human(&self, slices: &[Slice]) -> String {
        let mut output = String::new();
        for (index, slice) in slices.iter().enumerate() {
            let _ = writeln!(output, "Layer {}:", index + 1);
            for path in &slice.paths {
                let _ = writeln!(output, "  {}", path);
            }
        }
        output
    }
}
