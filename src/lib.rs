#![doc = include_str!("../README.md")]
use chrono::{DateTime, FixedOffset};
use log::info;

use std::path::{Path, PathBuf};

mod config;
mod error;
mod parse;
mod render;
mod report;
mod usd;
mod vehicle;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use parse::{read_csv, report_from_file};
pub use render::{write_report, write_txt_report, TxtReport};
pub use report::VehicleReport;
pub use usd::{ParseUsdError, Usd};
pub use vehicle::{display_name, Vehicle};

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A report was written to this path.
    Written(PathBuf),
    /// The file was valid but held no vehicles, so no report was written.
    Empty,
    /// The file was invalid or the report could not be written. The reason
    /// has been logged.
    Failed,
}

/// Reads the price list at `path` and, if it holds any vehicles, writes its
/// text report.
///
/// # Examples
///
/// ```
/// # use vehicle_report::{process_file, Outcome, ReportConfig};
/// let now = chrono::Local::now().fixed_offset();
/// let outcome = process_file("no_such_file.csv", &ReportConfig::default(), &now);
/// assert_eq!(outcome, Outcome::Failed);
/// ```
pub fn process_file(
    path: impl AsRef<Path>,
    config: &ReportConfig,
    now: &DateTime<FixedOffset>,
) -> Outcome {
    let path = path.as_ref();
    info!("processing {}", path.display());
    let Some(report) = report_from_file(path, config) else {
        return Outcome::Failed;
    };
    if report.is_empty() {
        info!("{}: no vehicles, nothing to report", path.display());
        return Outcome::Empty;
    }
    match write_report(&report, config, now) {
        Some(written) => {
            info!("report created: {}", written.display());
            Outcome::Written(written)
        }
        None => Outcome::Failed,
    }
}
