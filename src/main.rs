use anyhow::Result;
use chrono::Local;
use clap::Parser;

use std::{fs, path::PathBuf, process::ExitCode};

use vehicle_report::{process_file, Outcome, ReportConfig};

#[derive(Parser)]
/// Writes a year-by-year text report for each vehicle price list (CSV file).
///
/// Each report is written next to its CSV file. Set RUST_LOG to change how
/// much is logged (default: info).
struct Args {
    #[arg(long)]
    /// Also print each report to standard output
    print: bool,
    #[arg(required = true)]
    /// CSV files with the header "year,make,model,msrp"
    paths: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = ReportConfig::default();
    let mut failed = false;
    for path in &args.paths {
        let now = Local::now().fixed_offset();
        match process_file(path, &config, &now) {
            Outcome::Written(written) if args.print => {
                println!("{}", fs::read_to_string(written)?);
            }
            Outcome::Failed => failed = true,
            Outcome::Written(_) | Outcome::Empty => {}
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
