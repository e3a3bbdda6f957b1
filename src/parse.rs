use log::{debug, info, warn};

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{
    config::ReportConfig,
    error::{Error, Result},
    report::VehicleReport,
    usd::Usd,
    vehicle::Vehicle,
};

/// Reads the vehicle price list at `path` into a [`VehicleReport`].
///
/// The file must have a `.csv` extension (in any case), and its first line
/// must be the header `year,make,model,msrp` (in any case). Every following
/// line must hold exactly those four fields separated by commas; fields are
/// trimmed, and quoting is not supported.
///
/// A later row with the same year and make as an earlier one replaces it.
///
/// A file with a header and no data rows gives an empty report.
///
/// # Errors
///
/// Returns the first problem found, and no report, if:
/// * `path` is not a `.csv` file
/// * The file cannot be opened or read
/// * The header is missing or incorrect
/// * Any data row has the wrong number of columns, a year that is not an
///   integer, a blank make or model, or an MSRP that is not a non-negative
///   decimal number
pub fn read_csv(path: impl AsRef<Path>, config: &ReportConfig) -> Result<VehicleReport> {
    let path = path.as_ref();
    if !has_extension(path, config.input_extension) {
        return Err(Error::NotCsv {
            path: path.to_path_buf(),
        });
    }
    let mut lines = BufReader::new(File::open(path)?).lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::MissingHeader),
    };
    let header = header.trim_end_matches('\r');
    if header.trim().is_empty() {
        return Err(Error::MissingHeader);
    }
    if !header.eq_ignore_ascii_case(config.expected_header) {
        return Err(Error::IncorrectHeader {
            found: header.to_string(),
            expected: config.expected_header.to_string(),
        });
    }
    let mut report = VehicleReport::new(path);
    for (i, line) in lines.enumerate() {
        let line_number = i + 2;
        let vehicle = parse_row(line?.trim_end_matches('\r'), line_number, config)?;
        if let Some(replaced) = report.insert(vehicle) {
            debug!(
                "line {line_number}: replacing {} {} {}",
                replaced.year(),
                replaced.make(),
                replaced.model()
            );
        }
    }
    info!(
        "reached end of {}: processed {} lines",
        path.display(),
        report.rows()
    );
    Ok(report)
}

/// Like [`read_csv`], but logs the reason for any failure and returns
/// `None` instead.
#[must_use]
pub fn report_from_file(path: impl AsRef<Path>, config: &ReportConfig) -> Option<VehicleReport> {
    let path = path.as_ref();
    read_csv(path, config)
        .inspect_err(|e| match e.line() {
            Some(line) => warn!("{}:{line}: {e}", path.display()),
            None => warn!("{}: {e}", path.display()),
        })
        .ok()
}

/// Checks the file name ends with `.{extension}` in any case. A file named
/// just `.csv` counts.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name().is_some_and(|name| {
        name.to_string_lossy()
            .to_ascii_lowercase()
            .strip_suffix(&extension.to_ascii_lowercase())
            .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Turns one data row into a [`Vehicle`], checking the fields in column
/// order.
fn parse_row(line: &str, line_number: usize, config: &ReportConfig) -> Result<Vehicle> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[year, make, model, msrp] = fields.as_slice() else {
        return Err(Error::ColumnCount {
            line: line_number,
            expected: config.expected_columns,
            found: fields.len(),
        });
    };
    let year = year.parse::<i32>().map_err(|_| Error::InvalidYear {
        line: line_number,
        value: year.to_string(),
    })?;
    if make.is_empty() {
        return Err(Error::MissingMake { line: line_number });
    }
    if model.is_empty() {
        return Err(Error::MissingModel { line: line_number });
    }
    let invalid_msrp = || Error::InvalidMsrp {
        line: line_number,
        value: msrp.to_string(),
    };
    let msrp = Usd::from_str(msrp).map_err(|_| invalid_msrp())?;
    if msrp.is_negative() {
        return Err(invalid_msrp());
    }
    Ok(Vehicle::new(year, make, model, msrp))
}
