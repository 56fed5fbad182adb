//! L{CORE} dataset pipeline CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use lcore_cli::cli::{Cli, Command};
use lcore_cli::commands::{run, run_check_config, run_domains};
use lcore_cli::logging::{LogConfig, LogFormat, init_logging};
use lcore_cli::summary::print_summary;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Run(args) => match run(args, cli.log_data) {
            Ok(outcome) => {
                print_summary(&outcome);
                i32::from(outcome.has_errors())
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Domains(args) => report_exit(run_domains(args)),
        Command::CheckConfig(args) => report_exit(run_check_config(args)),
    };
    std::process::exit(exit_code);
}

fn report_exit(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Logging configuration from CLI flags: `--log-level` beats `-v/-q`, and
/// either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !explicit,
        format: LogFormat::from(cli.log_format),
        log_file: cli.log_file.clone(),
        with_ansi,
        ..LogConfig::default()
    }
}
