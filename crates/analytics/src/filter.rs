use crate::error::AnalyticsError;
use core_types::{Dimension, Sale};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Keeps the records whose city, customer type and gender are all in the
/// corresponding allowed set.
///
/// An empty set admits nothing. A record missing one of the three fields is
/// never admitted, since a missing value is a member of no set.
pub fn filter(
    records: &[Sale],
    cities: &BTreeSet<String>,
    customer_types: &BTreeSet<String>,
    genders: &BTreeSet<String>,
) -> Vec<Sale> {
    records
        .iter()
        .filter(|sale| {
            is_member(sale.dimension(Dimension::City), cities)
                && is_member(sale.dimension(Dimension::CustomerType), customer_types)
                && is_member(sale.dimension(Dimension::Gender), genders)
        })
        .cloned()
        .collect()
}

fn is_member(value: Option<&str>, allowed: &BTreeSet<String>) -> bool {
    value.is_some_and(|v| allowed.contains(v))
}

/// The values currently allowed for each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub cities: BTreeSet<String>,
    pub customer_types: BTreeSet<String>,
    pub genders: BTreeSet<String>,
}

impl Selection {
    pub fn filter(&self, records: &[Sale]) -> Vec<Sale> {
        filter(records, &self.cities, &self.customer_types, &self.genders)
    }

    pub fn values(&self, dimension: Dimension) -> Result<&BTreeSet<String>, AnalyticsError> {
        match dimension {
            Dimension::City => Ok(&self.cities),
            Dimension::CustomerType => Ok(&self.customer_types),
            Dimension::Gender => Ok(&self.genders),
            other => Err(AnalyticsError::UnsupportedFilter(other)),
        }
    }

    /// Replaces the allowed values for one filter dimension.
    ///
    /// Values that never occur in the data are kept; they simply match nothing.
    pub fn restrict<I, S>(&mut self, dimension: Dimension, values: I) -> Result<(), AnalyticsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = match dimension {
            Dimension::City => &mut self.cities,
            Dimension::CustomerType => &mut self.customer_types,
            Dimension::Gender => &mut self.genders,
            other => return Err(AnalyticsError::UnsupportedFilter(other)),
        };
        *slot = values.into_iter().map(Into::into).collect();
        Ok(())
    }
}

/// The distinct values of each filter dimension, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub customer_types: Vec<String>,
    pub genders: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Sale]) -> Self {
        Self {
            cities: distinct(records, Dimension::City),
            customer_types: distinct(records, Dimension::CustomerType),
            genders: distinct(records, Dimension::Gender),
        }
    }

    pub fn values(&self, dimension: Dimension) -> Result<&[String], AnalyticsError> {
        match dimension {
            Dimension::City => Ok(&self.cities),
            Dimension::CustomerType => Ok(&self.customer_types),
            Dimension::Gender => Ok(&self.genders),
            other => Err(AnalyticsError::UnsupportedFilter(other)),
        }
    }

    /// The default selection: every known value of every dimension.
    pub fn select_all(&self) -> Selection {
        Selection {
            cities: self.cities.iter().cloned().collect(),
            customer_types: self.customer_types.iter().cloned().collect(),
            genders: self.genders.iter().cloned().collect(),
        }
    }
}

fn distinct(records: &[Sale], dimension: Dimension) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|sale| sale.dimension(dimension))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
