//! kanji-colorize CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use kanji_colorize_cli::{Args, error_adapter::to_reportables};

fn render(reporter: &miette::GraphicalReportHandler, err: &kanji_colorize::ColorizeError) -> Vec<String> {
    to_reportables(err)
        .iter()
        .map(|reportable| {
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, reportable)
                .expect("Writing to String buffer is infallible");
            writer
        })
        .collect()
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting kanji-colorize");
    debug!(args:?; "Parsed arguments");

    let reporter = miette::GraphicalReportHandler::new();

    match kanji_colorize_cli::run(&args) {
        Ok(report) => {
            for (entry, err) in report.failed() {
                for rendered in render(&reporter, err) {
                    warn!(entry = entry.as_str(); "{rendered}");
                }
            }
            println!("{report}");
            info!("Completed successfully");
        }
        Err(err) => {
            for rendered in render(&reporter, &err) {
                error!("{rendered}");
            }
            process::exit(1);
        }
    }
}
