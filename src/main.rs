use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use manifest_lint::config::{Args, Config, OutputFormat};
use manifest_lint::diagnostics::{render_json, render_text};
use manifest_lint::{load_file, Validator};

const EXIT_INVALID: u8 = 1;
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = Config::from_args(args)?;
    let validator =
        Validator::new(config.policy.clone()).context("Invalid image registry in policy")?;

    // Read and parse failures never reach the engine
    let source = match load_file(&config.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    let report = validator.validate(&source.document);

    match config.format {
        OutputFormat::Text => {
            if report.is_valid() {
                println!("{}: manifest is valid", source.id);
            } else {
                for line in render_text(&report, &source.id, &source.text) {
                    eprintln!("{}", line);
                }
            }
        }
        OutputFormat::Json => {
            let rendered = render_json(&report, &source.id, &source.text);
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }

    if report.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        log::info!("{} violation(s) in {}", report.len(), source.id);
        Ok(ExitCode::from(EXIT_INVALID))
    }
}
