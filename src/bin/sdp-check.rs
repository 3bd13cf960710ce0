use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use sdpio::check::check_with;
use sdpio::config;
use sdpio::grammar::default_grammar;

/// Verifies that an SDP file survives a parse/write round trip
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SDP file to check
    file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("cannot read {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(e) => {
            error!("{} is not UTF-8: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = check_with(text, default_grammar(), &config::write_options());

    for entry in &report.unrecognized {
        warn!("unrecognized a={} belonging to {}", entry.value, entry.scope);
    }
    for lost in &report.missing {
        error!("l{} lost ({})", lost.line, lost.text);
    }
    for new in &report.added {
        error!("l{} new ({})", new.line, new.text);
    }

    let copied = if report.unrecognized.is_empty() {
        String::new()
    } else {
        format!(", {} unrecognized line(s) copied blindly", report.unrecognized.len())
    };

    if report.is_lossless() {
        info!("{} verified{}", args.file.display(), copied);
        ExitCode::SUCCESS
    } else {
        warn!(
            "{}: {} missing line(s), {} new line(s){}",
            args.file.display(),
            report.missing.len(),
            report.added.len(),
            copied
        );
        ExitCode::FAILURE
    }
}
