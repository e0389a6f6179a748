use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output-layer slicing for .NET publish builds
#[derive(Parser, Debug)]
#[command(
    name = "dotnet-publish",
    about = "Output-layer slicing for .NET publish builds",
    version,
    author,
    long_about = "dotnet-publish reads the project.assets.json written by the .NET toolchain \
                  and divides the published output into cacheable layers: stable packages, \
                  pre-release packages and project references."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug output")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Print the build plan for an application",
        long_about = "Locates the project in the working directory and prints what the build \
                      provides and requires: an SDK matching the project's major runtime \
                      version, ICU, and the ASP.NET Core runtime for web projects.\n\n\
                      Examples:\n  \
                      dotnet-publish detect\n  \
                      dotnet-publish detect /workspace --format json"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Slice an assets file",
        long_about = "Decodes a project.assets.json file and prints the packages, \
                      early-packages and projects slices.\n\n\
                      Examples:\n  \
                      dotnet-publish slice obj/project.assets.json\n  \
                      dotnet-publish slice obj/project.assets.json --format json"
    )]
    Slice(SliceArgs),

    #[command(
        about = "Compute launch slices for a published application",
        long_about = "Locates the project in the working directory (BP_DOTNET_PROJECT_PATH or \
                      buildpack.yml), slices its assets file and prints the launch slices in \
                      layer order.\n\n\
                      Examples:\n  \
                      dotnet-publish layers\n  \
                      dotnet-publish layers /workspace --format yaml"
    )]
    Layers(LayersArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "WORKING_DIR",
        help = "Application working directory (defaults to current directory)"
    )]
    pub working_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct SliceArgs {
    #[arg(value_name = "ASSETS_FILE", help = "Path to project.assets.json")]
    pub assets_file: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct LayersArgs {
    #[arg(
        value_name = "WORKING_DIR",
        help = "Application working directory (defaults to current directory)"
    )]
    pub working_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
