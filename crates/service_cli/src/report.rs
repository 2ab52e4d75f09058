//! Plain-text scenario report.
//!
//! Each run appends one block to the report file:
//!
//! ```text
//! Running at: 2026-01-05 09:30:00.000000
//! Volatility: 0.25
//! Price for S1: Barrier=-30.0%:Booster=60.0%:Participation=100.0%
//!  $0.24311 per $1
//! ```

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::{CliError, Result};

/// Timestamp layout of the report header
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Significant digits of a reported price
const PRICE_DIGITS: usize = 5;

/// Priced scenario line
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Scenario identifier
    pub id: String,
    /// Note description (band layout)
    pub description: String,
    /// Price per unit notional
    pub price: f64,
}

/// Results of one scenario run
#[derive(Debug, Clone)]
pub struct Report {
    started_at: DateTime<Local>,
    volatility: f64,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Start an empty report stamped with the current local time
    pub fn new(volatility: f64) -> Self {
        Self::with_timestamp(Local::now(), volatility)
    }

    /// Start an empty report with an explicit timestamp
    pub fn with_timestamp(started_at: DateTime<Local>, volatility: f64) -> Self {
        Self {
            started_at,
            volatility,
            entries: Vec::new(),
        }
    }

    /// Record a priced scenario
    pub fn push(&mut self, id: impl Into<String>, description: impl Into<String>, price: f64) {
        self.entries.push(ReportEntry {
            id: id.into(),
            description: description.into(),
            price,
        });
    }

    /// Priced scenarios in run order
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Volatility the run was priced with
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Run start time
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Render the report block
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Running at: {}", self.started_at.format(TIMESTAMP_FORMAT));
        let _ = writeln!(out, "Volatility: {}", self.volatility);
        for entry in &self.entries {
            let _ = writeln!(out, "Price for {}: {}", entry.id, entry.description);
            let _ = writeln!(out, " ${} per $1", significant(entry.price, PRICE_DIGITS));
        }
        out
    }

    /// Append the rendered block to a file, creating it when missing
    pub fn append_to(&self, path: &Path) -> Result<()> {
        let report_error = |source| CliError::Report {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(report_error)?;
        file.write_all(self.render().as_bytes())
            .map_err(report_error)?;

        tracing::debug!(path = %path.display(), entries = self.entries.len(), "Report appended");
        Ok(())
    }
}

/// Formats `value` to `digits` significant digits.
///
/// Fixed notation keeps at least one fractional digit (`0.0`, `12.0`);
/// exponents below -4 or at least `digits` switch to scientific notation
/// (`1.2346e+05`). Trailing zeros are dropped.
fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.1}", value);
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (digits as i32 - 1 - exponent) as usize;
    let fixed = trim_fraction(&format!("{:.*}", decimals, value));
    if fixed.contains('.') {
        fixed
    } else {
        format!("{}.0", fixed)
    }
}

fn trim_fraction(number: &str) -> String {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        number.to_string()
    }
}
