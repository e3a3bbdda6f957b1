use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    config::ReportConfig,
    error::{Error, Result},
    usd::Usd,
    vehicle::Vehicle,
};

/// Vehicles read from one price list, grouped by model year and make.
///
/// Years are iterated newest first and makes alphabetically, so the order
/// of rows in the input file never affects the report. Each (year, make)
/// pair holds at most one vehicle: inserting a second one replaces the
/// first.
///
/// To read a report from a CSV file, use [`crate::read_csv`].
///
/// To write it out, use [`crate::write_txt_report`], or format a
/// [`crate::TxtReport`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleReport {
    vehicles: BTreeMap<i32, BTreeMap<String, Vehicle>>,
    original_path: PathBuf,
    rows: usize,
}

impl VehicleReport {
    /// Creates an empty report for the price list at `original_path`.
    #[must_use]
    pub fn new(original_path: impl Into<PathBuf>) -> Self {
        Self {
            original_path: original_path.into(),
            ..Self::default()
        }
    }

    /// Adds `vehicle` under its year and make, returning the vehicle it
    /// replaced, if any.
    pub fn insert(&mut self, vehicle: Vehicle) -> Option<Vehicle> {
        self.rows += 1;
        self.vehicles
            .entry(vehicle.year())
            .or_default()
            .insert(vehicle.make().to_string(), vehicle)
    }

    /// Returns each model year, newest first, with its vehicles keyed by
    /// make in ascending order.
    pub fn by_year(&self) -> impl Iterator<Item = (i32, &BTreeMap<String, Vehicle>)> {
        self.vehicles.iter().rev().map(|(year, makes)| (*year, makes))
    }

    /// Returns every vehicle in report order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.by_year().flat_map(|(_, makes)| makes.values())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Number of distinct model years.
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of vehicles in the report, after duplicates were replaced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.values().map(BTreeMap::len).sum()
    }

    /// Number of data rows inserted, including ones later replaced.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn original_path(&self) -> &Path {
        &self.original_path
    }

    /// Exact sum of every vehicle's MSRP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the sum is too large to represent.
    pub fn msrp_total(&self) -> Result<Usd> {
        self.vehicles()
            .try_fold(Usd::default(), |total, vehicle| {
                total.checked_add(vehicle.msrp())
            })
            .ok_or(Error::Overflow { what: "MSRP total" })
    }

    /// The MSRP total with tax applied once to the aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the total is too large to represent.
    pub fn list_price_total(&self, tax_rate: Decimal) -> Result<Usd> {
        self.msrp_total()?
            .checked_mul(tax_rate)
            .ok_or(Error::Overflow {
                what: "list price total",
            })
    }

    /// Returns the path the text report is written to, next to the original
    /// file.
    ///
    /// For `/data/cars.csv` generated at 14:05:07 on 9 March 2024 in UTC-5
    /// this is `/data/REPORT_2024-03-09_14:05:07_-0500__cars(csv).txt`.
    ///
    /// A file name without a `.` keeps its whole name as the base and gets
    /// an empty extension: `cars` becomes `REPORT_..__cars().txt`.
    #[must_use]
    pub fn report_file_path(&self, config: &ReportConfig, now: &DateTime<FixedOffset>) -> PathBuf {
        let original = self.original_path.to_string_lossy();
        let (directory, file_name) = split_directory(&original);
        let (base, extension) = file_name.rsplit_once('.').unwrap_or((file_name, ""));
        PathBuf::from(format!(
            "{directory}{}{}__{base}({extension}).{}",
            config.report_prefix,
            now.format(config.filename_timestamp_format),
            config.report_extension,
        ))
    }
}

/// Splits `path` after its last separator. The directory part keeps the
/// separator and is empty when there is none.
fn split_directory(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        Some(i) => path.split_at(i + 1),
        None => ("", path),
    }
}
