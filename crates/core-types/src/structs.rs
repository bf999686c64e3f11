use crate::enums::Dimension;
use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::Serialize;

/// Time-of-day layouts accepted for the `Time` column, tried in order.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// A single retail transaction.
///
/// Categorical fields are optional: a blank cell in the source sheet is kept
/// as `None` so that the record still counts towards totals, but drops out of
/// any grouping keyed on that field.
///
/// `time` and `hour` are private and set once in `Sale::new`, so the hour
/// always agrees with the time it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    pub invoice_id: Option<String>,
    pub branch: Option<String>,
    pub city: Option<String>,
    pub customer_type: Option<String>,
    pub gender: Option<String>,
    pub product_line: Option<String>,
    pub date: NaiveDate,
    time: Option<NaiveTime>,
    hour: Option<u32>,
    pub total: Decimal,
    pub rating: Decimal,
}

impl Sale {
    /// Creates a sale with every categorical field unset.
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, total: Decimal, rating: Decimal) -> Self {
        Self {
            invoice_id: None,
            branch: None,
            city: None,
            customer_type: None,
            gender: None,
            product_line: None,
            date,
            hour: time.map(|t| t.hour()),
            time,
            total,
            rating,
        }
    }

    /// Parses a time-of-day cell. Returns `None` when no known layout matches.
    pub fn parse_time(raw: &str) -> Option<NaiveTime> {
        let raw = raw.trim();
        TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// The hour of day (0-23) the sale happened in, if the time was readable.
    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    /// Returns the value of a categorical field.
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        let value = match dimension {
            Dimension::City => &self.city,
            Dimension::CustomerType => &self.customer_type,
            Dimension::Gender => &self.gender,
            Dimension::ProductLine => &self.product_line,
            Dimension::Branch => &self.branch,
        };
        value.as_deref()
    }

    /// Sets a categorical field. Blank values are stored as `None`.
    pub fn set_dimension(&mut self, dimension: Dimension, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        match dimension {
            Dimension::City => self.city = value,
            Dimension::CustomerType => self.customer_type = value,
            Dimension::Gender => self.gender = value,
            Dimension::ProductLine => self.product_line = value,
            Dimension::Branch => self.branch = value,
        }
    }

    /// Builder-style variant of `set_dimension`.
    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        self.set_dimension(dimension, Some(value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 5).unwrap()
    }

    #[test]
    fn hour_is_derived_from_time() {
        let sale = Sale::new(day(), Sale::parse_time("13:08:00"), dec!(548.97), dec!(9.1));
        assert_eq!(sale.hour(), Some(13));

        let short = Sale::new(day(), Sale::parse_time(" 7:45 "), dec!(1), dec!(1));
        assert_eq!(short.hour(), Some(7));
    }

    #[test]
    fn unreadable_time_leaves_hour_unset() {
        let sale = Sale::new(day(), Sale::parse_time("lunchtime"), dec!(10), dec!(5));
        assert_eq!(sale.time(), None);
        assert_eq!(sale.hour(), None);
    }

    #[test]
    fn blank_dimension_is_stored_as_missing() {
        let sale = Sale::new(day(), None, dec!(10), dec!(5))
            .with(Dimension::City, "Yangon")
            .with(Dimension::Gender, "  ");
        assert_eq!(sale.dimension(Dimension::City), Some("Yangon"));
        assert_eq!(sale.dimension(Dimension::Gender), None);
        assert_eq!(sale.dimension(Dimension::Branch), None);
    }
}
