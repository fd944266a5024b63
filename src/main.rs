use std::env;
use std::process::ExitCode;

use pogodex::cli;
use pogodex::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();
    let code = cli::run_with_args(&args, &config);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
