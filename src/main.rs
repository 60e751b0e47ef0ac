use clap::Parser;

use mtgutil::cli::{handle_error, Args, CliConfig};

fn main() {
    let args = Args::parse();

    // Set up logging; RUST_LOG overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let result = CliConfig::from_args(args).and_then(|config| mtgutil::cli::run(&config));
    if let Err(error) = result {
        handle_error(&error);
        std::process::exit(1);
    }
}
