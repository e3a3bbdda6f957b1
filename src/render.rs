use chrono::{DateTime, FixedOffset, NaiveDate};
use log::error;

use std::{
    fmt::{self, Display},
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use crate::{
    config::ReportConfig,
    error::{Error, Result},
    report::VehicleReport,
    usd::Usd,
    vehicle::Vehicle,
};

/// A printable text report: a dated title, the vehicles grouped by year,
/// and the grand totals.
///
/// Every list price and grand total is computed by [`TxtReport::new`], so
/// formatting cannot fail part way through and has no side effects.
#[derive(Debug, Clone)]
pub struct TxtReport<'a> {
    config: &'a ReportConfig,
    date: NaiveDate,
    years: Vec<(i32, Vec<(&'a Vehicle, Usd)>)>,
    msrp_total: Usd,
    list_price_total: Usd,
}

impl<'a> TxtReport<'a> {
    /// Prices `report` for printing on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if any list price or total is too large
    /// to represent.
    pub fn new(report: &'a VehicleReport, config: &'a ReportConfig, date: NaiveDate) -> Result<Self> {
        let years = report
            .by_year()
            .map(|(year, makes)| {
                let priced = makes
                    .values()
                    .map(|vehicle| {
                        vehicle
                            .list_price(config.tax_rate)
                            .map(|list_price| (vehicle, list_price))
                            .ok_or(Error::Overflow { what: "list price" })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((year, priced))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config,
            date,
            years,
            msrp_total: report.msrp_total()?,
            list_price_total: report.list_price_total(config.tax_rate)?,
        })
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:width$}Date: {}",
            self.config.title,
            self.date.format(self.config.date_format),
            width = self.config.title_width,
        )?;
        writeln!(f)
    }

    fn body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        for (year, vehicles) in &self.years {
            writeln!(f, "{year}")?;
            for (vehicle, list_price) in vehicles {
                writeln!(
                    f,
                    "{}{:<make_width$}MSRP: {:<msrp_width$}List Price: {}",
                    config.indent,
                    vehicle.make_model(config.placeholder),
                    vehicle.msrp(),
                    list_price,
                    make_width = config.make_model_width,
                    msrp_width = config.msrp_width,
                )?;
            }
        }
        Ok(())
    }

    fn footer(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;
        let width = config.total_label_width;
        writeln!(f)?;
        writeln!(f, "{}", config.footer_title)?;
        writeln!(
            f,
            "{}{:<width$}{}",
            config.indent,
            "MSRP:",
            self.msrp_total
        )?;
        write!(
            f,
            "{}{:<width$}{}",
            config.indent,
            "List Price:",
            self.list_price_total
        )
    }
}

impl Display for TxtReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header(f)?;
        self.body(f)?;
        self.footer(f)
    }
}

/// Writes `report` as text next to its original file, and returns the path
/// written.
///
/// The file name and the date in the title both come from `now`; see
/// [`VehicleReport::report_file_path`].
///
/// The whole text is rendered before the file is created, so a report
/// that cannot be priced leaves nothing on disk.
///
/// # Errors
///
/// Returns [`Error::Overflow`] if a price or total is too large to
/// represent, or any error from creating or writing the file. A write
/// failure may leave a partly written file behind.
pub fn write_txt_report(
    report: &VehicleReport,
    config: &ReportConfig,
    now: &DateTime<FixedOffset>,
) -> Result<PathBuf> {
    let text = TxtReport::new(report, config, now.date_naive())?.to_string();
    let path = report.report_file_path(config, now);
    let mut writer = BufWriter::new(File::create(&path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(path)
}

/// Like [`write_txt_report`], but logs any failure and returns `None`
/// instead.
#[must_use]
pub fn write_report(
    report: &VehicleReport,
    config: &ReportConfig,
    now: &DateTime<FixedOffset>,
) -> Option<PathBuf> {
    write_txt_report(report, config, now)
        .inspect_err(|e| {
            error!(
                "failed to create report for {}: {e}",
                report.original_path().display()
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use std::fs;

    use super::*;
    use crate::read_csv;

    fn sample_report(path: impl Into<PathBuf>) -> VehicleReport {
        let mut report = VehicleReport::new(path);
        report.insert(Vehicle::new(2020, "Toyota", "Camry", Usd::new(dec!(25000))));
        report.insert(Vehicle::new(2021, "BMW", "330i", Usd::new(dec!(38000))));
        report.insert(Vehicle::new(2020, "Honda", "civic", Usd::new(dec!(1234.5))));
        report
    }

    fn march_9th() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, 8, 30, 0)
            .unwrap()
    }

    const SAMPLE_TEXT: &str = "\
--- Vehicle Report ---                                        Date: 03/09/2024

2021
     BMW 330i                      MSRP: $38,000.00     List Price: $40,660.00
2020
     Honda Civic                   MSRP: $1,234.50      List Price: $1,320.92
     Toyota Camry                  MSRP: $25,000.00     List Price: $26,750.00

--- Grand Total ---
     MSRP:          $64,234.50
     List Price:    $68,730.92";

    #[test]
    fn txt_report_renders_header_body_and_footer() {
        let config = ReportConfig::default();
        let report = sample_report("cars.csv");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(TxtReport::new(&report, &config, date).unwrap().to_string(), SAMPLE_TEXT);
    }

    #[test]
    fn txt_report_renders_empty_report_with_zero_totals() {
        let config = ReportConfig::default();
        let report = VehicleReport::new("cars.csv");
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let text = TxtReport::new(&report, &config, date).unwrap().to_string();
        assert!(text.starts_with("--- Vehicle Report ---"));
        assert!(text.contains("Date: 12/31/2023\n\n\n--- Grand Total ---\n"));
        assert!(text.ends_with("     List Price:    $0.00"));
    }

    #[test]
    fn txt_report_lists_one_line_per_vehicle_in_year_order() {
        let config = ReportConfig::default();
        let report = read_csv("testdata/vehicles.csv", &config).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let text = TxtReport::new(&report, &config, date).unwrap().to_string();
        let items: Vec<_> = text
            .lines()
            .filter(|line| line.starts_with(config.indent) && line.contains("List Price:"))
            .filter(|line| !line.trim_start().starts_with("List Price:"))
            .collect();
        assert_eq!(items.len(), report.len());
        let years: Vec<_> = text
            .lines()
            .filter_map(|line| line.parse::<i32>().ok())
            .collect();
        assert_eq!(years, vec![2021, 2020, 2019, 2015]);
        assert!(text.contains("     MSRP:          $187,734.50\n"));
        assert!(text.ends_with("     List Price:    $200,875.92"));
    }

    #[test]
    fn write_txt_report_fn_writes_file_next_to_original() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::default();
        let report = sample_report(dir.path().join("cars.csv"));
        let path = write_txt_report(&report, &config, &march_9th()).unwrap();
        assert_eq!(
            path,
            dir.path()
                .join("REPORT_2024-03-09_08:30:00_+0000__cars(csv).txt")
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_TEXT);
    }

    #[test]
    fn write_txt_report_fn_leaves_no_file_when_totals_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::default();
        let input = dir.path().join("huge.csv");
        fs::copy("testdata/overflow.csv", &input).unwrap();
        let report = read_csv(&input, &config).unwrap();
        let err = write_txt_report(&report, &config, &march_9th()).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }), "{err:?}");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn txt_report_new_fn_reports_list_price_overflow() {
        let config = ReportConfig::default();
        let mut report = VehicleReport::new("cars.csv");
        report.insert(Vehicle::new(
            2020,
            "Toyota",
            "Camry",
            Usd::new(dec!(75000000000000000000000000000)),
        ));
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let err = TxtReport::new(&report, &config, date).unwrap_err();
        assert!(
            matches!(err, Error::Overflow { what: "list price" }),
            "{err:?}"
        );
    }

    #[test]
    fn write_report_fn_returns_none_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::default();
        let report = sample_report(dir.path().join("missing").join("cars.csv"));
        assert!(write_report(&report, &config, &march_9th()).is_none());
    }
}
