pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, LayersArgs, OutputFormatArg, SliceArgs};
pub use handlers::{handle_detect, handle_layers, handle_slice};
pub use output::{OutputFormat, OutputFormatter};
