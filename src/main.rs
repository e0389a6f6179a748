use dotnet_publish::cli::{handle_detect, handle_layers, handle_slice, CliArgs, Commands};
use dotnet_publish::config::ENV_LOG_LEVEL;
use dotnet_publish::util::logging::{init_logging, json_from_env, parse_level, LoggingConfig};
use dotnet_publish::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("dotnet-publish v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args),
        Commands::Slice(slice_args) => handle_slice(slice_args),
        Commands::Layers(layers_args) => handle_layers(layers_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    let mut config = if level == Level::DEBUG {
        LoggingConfig::debug()
    } else {
        LoggingConfig::with_level(level)
    };
    config.use_json = json_from_env();

    init_logging(config);
}
