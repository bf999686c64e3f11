use crate::error::DataSourceError;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Dimension, Sale};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Columns without which no `Sale` can be built.
const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Total", "Rating"];

/// Columns that are read when present. A sheet without one of them still
/// loads; the field is simply missing on every sale.
const OPTIONAL_COLUMNS: [&str; 7] = [
    "Invoice ID",
    "Branch",
    "City",
    "Customer_type",
    "Gender",
    "Product line",
    "Time",
];

/// Ratings are scored out of ten.
const MAX_RATING: Decimal = Decimal::TEN;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M"];

/// One sheet row exactly as it appears in the file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
    #[serde(rename = "Invoice ID")]
    invoice_id: Option<String>,
    #[serde(rename = "Branch")]
    branch: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "Customer_type")]
    customer_type: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Product line")]
    product_line: Option<String>,
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Time")]
    time: Option<String>,
    #[serde(rename = "Total")]
    total: Option<String>,
    #[serde(rename = "Rating")]
    rating: Option<String>,
}

impl RawRow {
    fn is_blank(&self) -> bool {
        [
            &self.invoice_id,
            &self.branch,
            &self.city,
            &self.customer_type,
            &self.gender,
            &self.product_line,
            &self.date,
            &self.time,
            &self.total,
            &self.rating,
        ]
        .iter()
        .all(|cell| cell.is_none())
    }

    fn into_sale(self, row: usize) -> Result<Sale, DataSourceError> {
        let invalid = |reason: String| DataSourceError::InvalidRow { row, reason };

        let date = self
            .date
            .as_deref()
            .ok_or_else(|| invalid("Date is empty".to_string()))
            .and_then(|raw| parse_date(raw).ok_or_else(|| invalid(format!("unreadable Date '{raw}'"))))?;
        let total = parse_decimal("Total", self.total.as_deref()).map_err(invalid)?;
        if total.is_sign_negative() && !total.is_zero() {
            return Err(invalid(format!("negative Total {total}")));
        }
        let rating = parse_decimal("Rating", self.rating.as_deref()).map_err(invalid)?;
        if rating < Decimal::ZERO || rating > MAX_RATING {
            return Err(invalid(format!("Rating {rating} outside 0 to {MAX_RATING}")));
        }

        let time = match self.time.as_deref() {
            Some(raw) => {
                let parsed = Sale::parse_time(raw);
                if parsed.is_none() {
                    tracing::warn!(row, time = raw, "Unreadable Time; sale left out of the hourly breakdown.");
                }
                parsed
            }
            None => None,
        };

        let mut sale = Sale::new(date, time, total, rating);
        sale.invoice_id = self.invoice_id;
        sale.set_dimension(Dimension::Branch, self.branch);
        sale.set_dimension(Dimension::City, self.city);
        sale.set_dimension(Dimension::CustomerType, self.customer_type);
        sale.set_dimension(Dimension::Gender, self.gender);
        sale.set_dimension(Dimension::ProductLine, self.product_line);
        Ok(sale)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_decimal(column: &str, raw: Option<&str>) -> Result<Decimal, String> {
    let raw = raw.ok_or_else(|| format!("{column} is empty"))?;
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| format!("unreadable {column} '{raw}'"))
}

/// Where the sales sheet lives and how its export is laid out.
#[derive(Debug, Clone)]
pub struct SalesSheet {
    path: PathBuf,
    skip_rows: usize,
    max_rows: Option<usize>,
    delimiter: u8,
}

impl SalesSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skip_rows: 0,
            max_rows: None,
            delimiter: b',',
        }
    }

    pub fn from_settings(settings: &configuration::DataSource) -> Self {
        Self {
            path: settings.path.clone(),
            skip_rows: settings.skip_rows,
            max_rows: settings.max_rows,
            // Validated as ASCII when the configuration was loaded.
            delimiter: u8::try_from(settings.delimiter).unwrap_or(b','),
        }
    }

    /// Lines to discard before the header line.
    pub fn skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Stops after this many data rows.
    pub fn max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the sheet at `path` and parses every data row into a `Sale`.
    pub fn load(&self) -> Result<Vec<Sale>, DataSourceError> {
        let file = File::open(&self.path).map_err(|source| DataSourceError::Open {
            path: self.path.clone(),
            source,
        })?;
        let sales = self.read_from(file)?;
        tracing::info!(path = %self.path.display(), rows = sales.len(), "Loaded sales sheet.");
        Ok(sales)
    }

    /// Parses a sheet from any reader. The configured path is not used.
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<Sale>, DataSourceError> {
        let mut buffered = BufReader::new(reader);
        let mut discarded = String::new();
        for _ in 0..self.skip_rows {
            discarded.clear();
            if buffered.read_line(&mut discarded)? == 0 {
                break;
            }
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(buffered);

        let headers: csv::StringRecord = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{FEFF}').trim())
            .collect();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DataSourceError::MissingColumn(column));
            }
        }
        for column in OPTIONAL_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                tracing::warn!(column, "Sales sheet has no such column; field will be missing on every sale.");
            }
        }
        rdr.set_headers(headers);

        let limit = self.max_rows.unwrap_or(usize::MAX);
        let mut sales = Vec::new();
        for (index, result) in rdr.deserialize::<RawRow>().enumerate() {
            // Rows past the limit are never parsed, so they cannot fail the load.
            if sales.len() == limit {
                break;
            }
            let row = index + 1;
            let raw = result?;
            if raw.is_blank() {
                tracing::debug!(row, "Skipping blank row.");
                continue;
            }
            sales.push(raw.into_sale(row)?);
        }

        Ok(sales)
    }
}
